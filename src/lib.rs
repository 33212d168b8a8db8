pub mod app;
pub mod config;
pub mod error;
pub mod extension;
pub mod registry;
pub mod settings;
pub mod styling;

pub mod prelude {
    pub use crate::app::{create_app, App, AppBuilder};
    pub use crate::config::AppConfig;
    // 显式装配：配置走参数传入，扩展走实例注册表，无全局状态
    pub use crate::error::{AppframeError, Result};
    pub use crate::extension::{Extension, ExtensionContext};
    pub use crate::settings::Settings;
    pub use crate::styling::Styling;
}
