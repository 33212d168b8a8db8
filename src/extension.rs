use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::registry::Helper;
use crate::settings::Settings;

/// An add-on bound to an application during assembly.
/// - `name` identifies the binding; a name binds at most once per instance.
/// - `register` runs once, against the assembly context; failures propagate
///   to the caller unmodified (wrapped only for attribution).
pub trait Extension: Send + Sync {
    fn name(&self) -> &'static str;
    fn register(&self, ctx: &mut ExtensionContext<'_>) -> anyhow::Result<()>;
}

impl fmt::Debug for dyn Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extension({})", self.name())
    }
}

/// Assembly-time view handed to [`Extension::register`].
/// Extensions may seed default settings and contribute named helpers;
/// they get no handle to the finished instance.
pub struct ExtensionContext<'a> {
    app_name: &'a str,
    staged: &'a HashMap<String, Value>,
    defaults: &'a mut HashMap<String, Value>,
    helpers: Vec<(&'static str, Helper)>,
}

impl<'a> ExtensionContext<'a> {
    pub(crate) fn new(
        app_name: &'a str,
        staged: &'a HashMap<String, Value>,
        defaults: &'a mut HashMap<String, Value>,
    ) -> Self {
        Self {
            app_name,
            staged,
            defaults,
            helpers: Vec::new(),
        }
    }

    pub fn app_name(&self) -> &str {
        self.app_name
    }

    /// Seed a default setting. Defaults live beside the staged entries and
    /// lose to caller-provided values at freeze, regardless of load/bind
    /// order; the first extension to seed a key keeps it.
    pub fn setdefault(&mut self, key: &str, value: Value) -> bool {
        if self.staged.contains_key(key) || self.defaults.contains_key(key) {
            return false;
        }
        self.defaults.insert(key.to_string(), value);
        true
    }

    /// Contribute a named helper rendering a string from the frozen settings.
    /// Helpers read settings at call time, so caller overrides are honored
    /// even when the helper was contributed before the override was loaded.
    pub fn helper<F>(&mut self, name: &'static str, f: F)
    where
        F: Fn(&Settings) -> String + Send + Sync + 'static,
    {
        self.helpers.push((name, Arc::new(f)));
    }

    pub(crate) fn into_helpers(self) -> Vec<(&'static str, Helper)> {
        self.helpers
    }
}
