use serde_json::Value;

use crate::extension::{Extension, ExtensionContext};
use crate::settings::Settings;

pub const SETTING_CDN_BASE: &str = "STYLING_CDN_BASE";
pub const SETTING_VERSION: &str = "STYLING_VERSION";
pub const SETTING_SERVE_LOCAL: &str = "STYLING_SERVE_LOCAL";
pub const SETTING_STATIC_URL: &str = "STYLING_STATIC_URL";

pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/npm/bootstrap";
pub const DEFAULT_VERSION: &str = "5.3.3";
pub const DEFAULT_STATIC_URL: &str = "/static/styling";

/// UI-styling extension: seeds asset-location defaults and contributes the
/// `styling_css` / `styling_js` template helpers.
///
/// Defaults never clobber caller settings; helpers resolve asset locations
/// from the frozen settings at call time.
pub struct Styling {
    pub cdn_base: String,
    pub version: String,
}

impl Styling {
    pub fn new(cdn_base: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            cdn_base: cdn_base.into(),
            version: version.into(),
        }
    }
}

impl Default for Styling {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE, DEFAULT_VERSION)
    }
}

impl Extension for Styling {
    fn name(&self) -> &'static str {
        "styling"
    }

    fn register(&self, ctx: &mut ExtensionContext<'_>) -> anyhow::Result<()> {
        ctx.setdefault(SETTING_CDN_BASE, Value::String(self.cdn_base.clone()));
        ctx.setdefault(SETTING_VERSION, Value::String(self.version.clone()));
        ctx.setdefault(SETTING_SERVE_LOCAL, Value::Bool(false));
        ctx.setdefault(SETTING_STATIC_URL, Value::String(DEFAULT_STATIC_URL.to_string()));

        ctx.helper("styling_css", |settings| {
            format!(
                r#"<link rel="stylesheet" href="{}">"#,
                asset_url(settings, "dist/css/bootstrap.min.css")
            )
        });
        ctx.helper("styling_js", |settings| {
            format!(
                r#"<script src="{}"></script>"#,
                asset_url(settings, "dist/js/bootstrap.bundle.min.js")
            )
        });
        Ok(())
    }
}

/// Resolve an asset location from the frozen settings.
/// 本地分发时走静态路径，否则按 `base@version/file` 组 CDN 地址。
fn asset_url(settings: &Settings, file: &str) -> String {
    let serve_local = settings
        .get(SETTING_SERVE_LOCAL)
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if serve_local {
        let base = settings
            .get(SETTING_STATIC_URL)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_STATIC_URL);
        format!("{base}/{file}")
    } else {
        let base = settings
            .get(SETTING_CDN_BASE)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_CDN_BASE);
        let version = settings
            .get(SETTING_VERSION)
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_VERSION);
        format!("{base}@{version}/{file}")
    }
}
