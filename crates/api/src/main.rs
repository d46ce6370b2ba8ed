use anyhow::Context;

use quickbasket_api::app::{build_app, AppState};
use quickbasket_api::config::ApiConfig;

const DEV_ADMIN_TOKEN: &str = "dev-admin-token";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    quickbasket_observability::init(config.log_format, "info");

    let admin_token = config.admin_token.clone().unwrap_or_else(|| {
        tracing::warn!("QUICKBASKET_ADMIN_TOKEN not set; using insecure dev default");
        DEV_ADMIN_TOKEN.to_string()
    });

    let store = quickbasket_infra::open_store(config.data_file.as_deref(), config.seed)?;
    let app = build_app(AppState::new(store), admin_token);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
