use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use atelier_common::{Config, Locale};
use atelier_gate::{cookies, GeoHint, Outcome, RequestContext};

use crate::AppState;

/// Locale the gate resolved for a request that reached a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

/// Run every request through the access gate and apply its decision.
pub async fn access_gate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = request_context(&state.config, &req);
    let safe_method = matches!(*req.method(), Method::GET | Method::HEAD);
    let decision = state.gate.decide(&ctx);

    let mut response = match decision.outcome {
        Outcome::Excluded => next.run(req).await,
        Outcome::PasswordPage { locale } | Outcome::Render { locale } => {
            req.extensions_mut().insert(ResolvedLocale(locale));
            next.run(req).await
        }
        Outcome::RedirectToPassword { location, .. }
        | Outcome::RedirectToLocalePrefix { location, .. } => {
            // Targets only answer GET; other methods are turned into a GET.
            if safe_method {
                Redirect::temporary(&location).into_response()
            } else {
                Redirect::to(&location).into_response()
            }
        }
    };

    if let Some(locale) = decision.persist_locale {
        let cookie = cookies::locale_preference_cookie(locale, state.config.secure_cookies);
        append_set_cookie(response.headers_mut(), &cookie);
    }

    response
}

/// Parse the parts of a request the gate reads.
pub fn request_context(config: &Config, req: &Request) -> RequestContext {
    let headers = req.headers();
    let cookies = cookie_header(headers);
    let geo = GeoHint {
        country: header_str(headers, &config.geo_country_header),
        region: header_str(headers, &config.geo_region_header),
    };

    RequestContext::new(req.uri().path(), req.uri().query(), Some(&cookies), geo)
}

/// All Cookie headers joined into one. HTTP/2 clients may send several.
pub fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn append_set_cookie(headers: &mut HeaderMap, cookie: &str) {
    match HeaderValue::from_str(cookie) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(e) => warn!(error = %e, "Invalid Set-Cookie value"),
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
