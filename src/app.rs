use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    error::{AppframeError, Result},
    extension::{Extension, ExtensionContext},
    registry::ExtensionRegistry,
    settings::{self, Settings},
    styling::Styling,
};

/// Staged application assembly. Settings accumulate mutably here and freeze
/// into the instance's read-only store at [`AppBuilder::build`].
#[derive(Debug)]
pub struct AppBuilder {
    cfg: AppConfig,
    // 构建前暂存的设置条目（键 -> JSON 值），build 时冻结为只读 Settings；
    // 扩展播种的默认值单独存放，冻结时被暂存值覆盖
    staged: HashMap<String, Value>,
    defaults: HashMap<String, Value>,
    registry: ExtensionRegistry,
}

impl AppBuilder {
    pub fn new(cfg: AppConfig) -> Self {
        Self {
            cfg,
            staged: HashMap::new(),
            defaults: HashMap::new(),
            registry: ExtensionRegistry::new(),
        }
    }

    /// 扩展绑定（单次）：
    /// - 同名扩展每次装配仅允许绑定一次，重复绑定返回 `DuplicateExtension`。
    /// - 扩展在注册阶段只能播种默认设置与贡献 helper，拿不到成品实例。
    /// - 注册失败原样上抛（仅包一层归属信息）。
    pub fn extension<E: Extension>(&mut self, ext: E) -> Result<&mut Self> {
        let name = ext.name();
        if self.registry.is_bound(name) {
            return Err(AppframeError::DuplicateExtension(name));
        }
        let mut ctx = ExtensionContext::new(&self.cfg.app_name, &self.staged, &mut self.defaults);
        if let Err(source) = ext.register(&mut ctx) {
            return Err(AppframeError::ExtensionFailed { name, source });
        }
        let helpers = ctx.into_helpers();
        self.registry.commit(name, helpers);
        tracing::debug!(extension = name, "extension bound");
        Ok(self)
    }

    /// 配置装载（对象）：
    /// - 任意可序列化对象，顶层键值逐条拷入暂存区，不校验不转换。
    /// - 可多次调用装载多个来源；同键以后写为准并告警。
    /// - 非 object 的序列化结果返回 `InvalidConfig`。
    pub fn load<C: Serialize + ?Sized>(&mut self, config: &C) -> Result<&mut Self> {
        let entries = settings::object_entries(config)?;
        let count = entries.len();
        for (key, value) in entries {
            self.stage(key, value);
        }
        tracing::debug!(entries = count, "configuration object loaded");
        Ok(self)
    }

    /// Load a JSON file whose root is an object. Same staging semantics as
    /// [`AppBuilder::load`].
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();
        let entries = settings::file_entries(path)?;
        let count = entries.len();
        for (key, value) in entries {
            self.stage(key, value);
        }
        tracing::debug!(entries = count, path = %path.display(), "configuration file loaded");
        Ok(self)
    }

    /// Overlay `PREFIX_KEY=value` environment variables, prefix stripped.
    /// Reading the environment cannot fail; absent prefix means no entries.
    pub fn load_env(&mut self, prefix: &str) -> &mut Self {
        let entries = settings::env_entries(prefix);
        let count = entries.len();
        for (key, value) in entries {
            self.stage(key, value);
        }
        tracing::debug!(entries = count, prefix, "environment overlay loaded");
        self
    }

    fn stage(&mut self, key: String, value: Value) {
        if self.staged.contains_key(&key) {
            tracing::warn!(setting = %key, "setting staged multiple times before build; overriding");
        }
        self.staged.insert(key, value);
    }

    /// Freeze the staged settings and produce the instance. Infallible:
    /// absence of any particular setting is not an error at build time,
    /// it surfaces on later typed access.
    pub fn build(self) -> App {
        // 冻结顺序：默认值打底，暂存的调用方值覆盖同键默认
        let mut frozen = self.defaults;
        frozen.extend(self.staged);
        let settings = Settings::from_frozen_map(frozen);
        let instance_id = Uuid::new_v4();
        tracing::debug!(
            app = %self.cfg.app_name,
            instance = %instance_id,
            extensions = self.registry.len(),
            settings = settings.len(),
            "application assembled"
        );
        App {
            name: self.cfg.app_name,
            instance_id,
            settings,
            registry: self.registry,
        }
    }
}

/// An assembled application instance: frozen settings store plus the
/// extension registry it was built with. `Send + Sync`; this crate spawns
/// nothing and blocks on nothing.
#[derive(Debug)]
pub struct App {
    name: String,
    instance_id: Uuid,
    settings: Settings,
    registry: ExtensionRegistry,
}

impl App {
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Per-build identity; two factory calls never share an id.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.registry
    }
    pub fn has_extension(&self, name: &str) -> bool {
        self.registry.is_bound(name)
    }

    /// Invoke a helper contributed by a bound extension.
    pub fn call_helper(&self, name: &str) -> Result<String> {
        let helper = self
            .registry
            .helper(name)
            .ok_or_else(|| AppframeError::UnknownHelper(name.to_string()))?;
        Ok(helper(&self.settings))
    }
}

/// 装配入口：构造实例，绑定样式扩展，装载配置对象，返回成品。
/// 配置作为显式参数传入，工厂本身无隐式导入、无全局状态。
pub fn create_app<C: Serialize + ?Sized>(config: &C) -> Result<App> {
    let mut builder = AppBuilder::new(AppConfig::default());
    builder.extension(Styling::default())?;
    builder.load(config)?;
    Ok(builder.build())
}
