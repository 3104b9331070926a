pub mod error;
pub mod handlers;
pub mod middleware;
pub mod templates;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

use atelier_common::Config;
use atelier_gate::{Gate, GateConfig};

pub struct AppState {
    pub config: Config,
    pub gate: Gate,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gate = Gate::new(GateConfig::from(&config));
        Self { config, gate }
    }
}

/// Build the full application: routes, the access gate, and response headers.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Password gate
        .route("/password", get(handlers::password_page))
        .route("/password/", get(handlers::password_page))
        .route("/password/{*rest}", get(handlers::password_page))
        // API (bypasses the gate)
        .route("/api/password", post(handlers::submit_password))
        .route("/api/locale", get(handlers::switch_locale))
        .route("/api/health", get(|| async { "ok" }))
        // Static assets
        .nest_service("/static", static_files)
        // Localized pages
        .fallback(handlers::page)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::access_gate,
        ))
        .with_state(state)
        // Private preview: keep out of search indexes
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-robots-tag"),
            HeaderValue::from_static("noindex, nofollow"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::VARY,
            HeaderValue::from_static("Cookie"),
        ))
        // Logging layer: method + path only (no query params, no IP)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
