use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use atelier_common::Locale;
use atelier_gate::{cookies, locale::locale_prefix, routing, RequestContext};

use crate::error::ApiError;
use crate::middleware::{append_set_cookie, cookie_header, ResolvedLocale};
use crate::templates;
use crate::AppState;

// --- Password page ---

#[derive(Debug, Deserialize)]
pub struct PasswordQuery {
    redirect: Option<String>,
    locale: Option<String>,
}

pub async fn password_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PasswordQuery>,
    req: Request,
) -> impl IntoResponse {
    let locale = params
        .locale
        .as_deref()
        .and_then(Locale::from_code)
        .or_else(|| resolved_locale(&req))
        .unwrap_or(state.gate.default_locale());
    let redirect = params.redirect.as_deref().and_then(safe_redirect);

    Html(templates::render_password(locale, redirect))
}

#[derive(Debug, Deserialize)]
pub struct PasswordSubmission {
    #[serde(default)]
    password: String,
    redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PasswordAccepted {
    success: bool,
    redirect: String,
}

/// Check the shared site password and issue the authentication cookie.
pub async fn submit_password(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PasswordSubmission>,
) -> Result<Response, ApiError> {
    if body.password.is_empty() {
        return Err(ApiError::MissingPassword);
    }

    if !constant_time_eq(body.password.as_bytes(), state.config.site_password.as_bytes()) {
        warn!("Rejected site password attempt");
        return Err(ApiError::InvalidPassword);
    }

    let redirect = body
        .redirect
        .as_deref()
        .and_then(safe_redirect)
        .unwrap_or("/")
        .to_string();
    info!(redirect = %redirect, "Site password accepted");

    let mut response = Json(PasswordAccepted {
        success: true,
        redirect,
    })
    .into_response();
    append_set_cookie(
        response.headers_mut(),
        &cookies::auth_cookie(state.config.secure_cookies),
    );
    Ok(response)
}

// --- Language switcher ---

#[derive(Debug, Deserialize)]
pub struct SwitchQuery {
    to: String,
    from: Option<String>,
}

/// Explicit language change: redirect to the equivalent page and, with
/// consent, overwrite the saved preference.
pub async fn switch_locale(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SwitchQuery>,
) -> Result<Response, ApiError> {
    let to = Locale::from_code(&params.to).ok_or_else(|| ApiError::UnsupportedLocale(params.to.clone()))?;
    let from = params.from.as_deref().and_then(safe_redirect).unwrap_or("/");
    let location = routing::switch_locale(from, to);

    let ctx = RequestContext::from_path(from, Some(&cookie_header(&headers)));

    let mut response = Redirect::to(&location).into_response();
    if ctx.consent_given() {
        append_set_cookie(
            response.headers_mut(),
            &cookies::locale_preference_cookie(to, state.config.secure_cookies),
        );
    }
    Ok(response)
}

// --- Pages ---

/// Render a localized page, or a localized 404.
pub async fn page(State(state): State<Arc<AppState>>, req: Request) -> Response {
    let path = req.uri().path();
    match routing::match_path(path) {
        Some(page) => Html(templates::render_page(&page, path)).into_response(),
        None => {
            let locale = locale_prefix(path)
                .or_else(|| resolved_locale(&req))
                .unwrap_or(state.gate.default_locale());
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                templates::render_not_found(locale, path),
            )
                .into_response()
        }
    }
}

// --- Helpers ---

fn resolved_locale(req: &Request) -> Option<Locale> {
    req.extensions()
        .get::<ResolvedLocale>()
        .map(|ResolvedLocale(locale)| *locale)
}

/// Accept only same-origin absolute paths as post-login targets.
fn safe_redirect(target: &str) -> Option<&str> {
    let local = target.starts_with('/') && !target.starts_with("//") && !target.contains('\\');
    local.then_some(target)
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
