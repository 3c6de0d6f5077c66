use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use keenylog_web::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,keenylog_web=debug,tower_http=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let state = AppState::from_env().context("Failed to initialise application state")?;
    if !state.config.static_dir.is_dir() {
        tracing::warn!("Static directory {} does not exist", state.config.static_dir.display());
    }
    let addr = SocketAddr::new(state.config.host, state.config.port);
    tracing::info!(
        environment = %state.config.environment,
        default_locale = %state.config.locale.default_locale,
        "Starting server on {}",
        addr
    );

    let app = keenylog_web::app(Arc::new(state));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
