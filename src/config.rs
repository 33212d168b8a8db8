#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
}

pub const APP_DEFAULT_NAME: &str = "appframe";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: APP_DEFAULT_NAME.to_string(),
        }
    }
}
// 框架配置仅保留应用名；业务设置一律经 AppBuilder 装载进 Settings。
