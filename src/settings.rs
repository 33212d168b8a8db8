use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppframeError, Result};

// 只读设置存储：AppBuilder::build 时冻结，实例生命周期内只读访问
#[derive(Clone, Debug)]
pub struct Settings {
    inner: Arc<HashMap<String, Value>>,
}

impl Settings {
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(HashMap::new()),
        }
    }
    pub(crate) fn from_frozen_map(map: HashMap<String, Value>) -> Self {
        Self {
            inner: Arc::new(map),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Typed access. Absence of a key surfaces here, never during assembly.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .inner
            .get(key)
            .ok_or_else(|| AppframeError::MissingSetting(key.to_string()))?;
        serde_json::from_value(value.clone()).map_err(|e| AppframeError::InvalidSetting {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Serialize a configuration object and flatten it to settings entries.
/// Only JSON objects are accepted; entries are copied verbatim, not validated.
pub(crate) fn object_entries<C: Serialize + ?Sized>(config: &C) -> Result<Vec<(String, Value)>> {
    let value =
        serde_json::to_value(config).map_err(|e| AppframeError::InvalidConfig(e.to_string()))?;
    into_entries(value)
}

/// Read and parse a JSON file whose root is an object.
pub(crate) fn file_entries(path: &Path) -> Result<Vec<(String, Value)>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppframeError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| {
        AppframeError::InvalidConfig(format!("failed to parse {}: {e}", path.display()))
    })?;
    into_entries(value)
}

/// Collect `PREFIX_KEY=value` environment variables, stripping the prefix.
/// Values that parse as JSON keep their parsed type; everything else stays a string.
pub(crate) fn env_entries(prefix: &str) -> Vec<(String, Value)> {
    let marker = format!("{prefix}_");
    std::env::vars()
        .filter_map(|(key, raw)| {
            let stripped = key.strip_prefix(&marker)?;
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            Some((stripped.to_string(), value))
        })
        .collect()
}

fn into_entries(value: Value) -> Result<Vec<(String, Value)>> {
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(AppframeError::InvalidConfig(format!(
            "configuration must be an object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
