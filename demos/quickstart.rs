//! 单文件示例：配置对象 → 工厂 → 已装配实例 → helper 渲染。
//! Run with: cargo run --example quickstart

use mmg_appframe::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct Config {
    secret_key: &'static str,
    storage_path: &'static str,
    styling_version: &'static str,
}

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let app = create_app(&Config {
        secret_key: "dev-only",
        storage_path: "/tmp/appframe-demo",
        styling_version: "5.3.3",
    })?;

    tracing::info!(
        app = %app.name(),
        instance = %app.instance_id(),
        settings = app.settings().len(),
        "instance assembled"
    );

    println!("{}", app.call_helper("styling_css")?);
    println!("{}", app.call_helper("styling_js")?);
    Ok(())
}
