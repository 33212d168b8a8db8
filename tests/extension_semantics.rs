use mmg_appframe::prelude::*;
use serde_json::{json, Value};

#[test]
fn styling_binds_exactly_once_per_assembly() {
    let mut builder = AppBuilder::new(AppConfig::default());
    builder.extension(Styling::default()).expect("first bind");

    let err = builder
        .extension(Styling::default())
        .expect_err("second bind must be rejected");
    assert!(matches!(err, AppframeError::DuplicateExtension("styling")));

    let app = builder.build();
    assert_eq!(app.extensions().names().collect::<Vec<_>>(), ["styling"]);
}

#[test]
fn factory_binds_styling_once() {
    let app = create_app(&json!({})).expect("create_app");
    assert_eq!(app.extensions().len(), 1);
    assert!(app.has_extension("styling"));
}

#[test]
fn defaults_never_clobber_caller_settings() {
    // 装载在先、绑定在后：扩展默认值只能填空位
    let mut builder = AppBuilder::new(AppConfig::default());
    builder.load(&json!({ "STYLING_VERSION": "4.9.9" })).unwrap();
    builder.extension(Styling::default()).unwrap();
    let app = builder.build();
    assert_eq!(app.settings().get("STYLING_VERSION"), Some(&json!("4.9.9")));

    // 绑定在先、装载在后：同键后写覆盖默认值（工厂的路径）
    let app = create_app(&json!({ "STYLING_VERSION": "4.9.9" })).expect("create_app");
    assert_eq!(app.settings().get("STYLING_VERSION"), Some(&json!("4.9.9")));
}

#[test]
fn helpers_render_from_frozen_settings() {
    let app = create_app(&json!({})).expect("create_app");
    let css = app.call_helper("styling_css").expect("styling_css");
    assert!(css.starts_with("<link"));
    assert!(css.contains("bootstrap@5.3.3/dist/css/bootstrap.min.css"));

    // Caller overrides are honored even though helpers were contributed
    // before the override was loaded.
    let app = create_app(&json!({ "STYLING_VERSION": "9.9.9" })).expect("create_app");
    let css = app.call_helper("styling_css").expect("styling_css");
    assert!(css.contains("bootstrap@9.9.9/"));

    let app = create_app(&json!({
        "STYLING_SERVE_LOCAL": true,
        "STYLING_STATIC_URL": "/assets"
    }))
    .expect("create_app");
    let js = app.call_helper("styling_js").expect("styling_js");
    assert_eq!(
        js,
        r#"<script src="/assets/dist/js/bootstrap.bundle.min.js"></script>"#
    );
}

#[test]
fn unknown_helper_is_an_error() {
    let app = create_app(&json!({})).expect("create_app");
    let err = app.call_helper("no_such_helper").expect_err("must fail");
    assert!(matches!(err, AppframeError::UnknownHelper(_)));
}

struct Seeder;
impl Extension for Seeder {
    fn name(&self) -> &'static str {
        "seeder"
    }
    fn register(&self, ctx: &mut ExtensionContext<'_>) -> anyhow::Result<()> {
        ctx.setdefault("SEEDED", Value::String(ctx.app_name().to_string()));
        ctx.helper("seeded_banner", |settings| {
            let who = settings
                .get("SEEDED")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            format!("<!-- {who} -->")
        });
        Ok(())
    }
}

#[test]
fn custom_extensions_seed_and_contribute_helpers() {
    let mut builder = AppBuilder::new(AppConfig::default());
    builder.extension(Seeder).unwrap();
    builder.extension(Styling::default()).unwrap();
    let app = builder.build();

    assert_eq!(app.settings().get("SEEDED"), Some(&json!("appframe")));
    assert_eq!(app.call_helper("seeded_banner").unwrap(), "<!-- appframe -->");
    assert_eq!(
        app.extensions().names().collect::<Vec<_>>(),
        ["seeder", "styling"]
    );
}

struct Broken;
impl Extension for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }
    fn register(&self, _ctx: &mut ExtensionContext<'_>) -> anyhow::Result<()> {
        anyhow::bail!("registration blew up")
    }
}

#[test]
fn extension_failure_propagates_with_attribution() {
    let mut builder = AppBuilder::new(AppConfig::default());
    let err = builder.extension(Broken).expect_err("must fail");
    match err {
        AppframeError::ExtensionFailed { name, source } => {
            assert_eq!(name, "broken");
            assert!(source.to_string().contains("blew up"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // 注册失败不留痕：实例里不存在半绑定的扩展
    let app = builder.build();
    assert!(!app.has_extension("broken"));
}
