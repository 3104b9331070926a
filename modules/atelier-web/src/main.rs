use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use atelier_common::Config;
use atelier_web::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("atelier=info".parse()?))
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr();
    info!(
        default_locale = %config.default_locale,
        static_dir = %config.static_dir,
        "Loaded configuration"
    );

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    info!("Atelier web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
