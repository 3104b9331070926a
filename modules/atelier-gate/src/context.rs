use atelier_common::Locale;

use crate::cookies::{self, AUTH_COOKIE, AUTH_COOKIE_VALUE, CONSENT_COOKIE, LOCALE_COOKIE};

/// Visitor's answer from the cookie banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    Accepted,
    Declined,
}

impl Consent {
    fn from_cookie(value: &str) -> Option<Self> {
        match value {
            "accepted" => Some(Consent::Accepted),
            "declined" => Some(Consent::Declined),
            _ => None,
        }
    }
}

/// Country and subdivision codes reported by the edge network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoHint {
    pub country: Option<String>,
    pub region: Option<String>,
}

/// Everything the gate reads from one request, parsed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub path: String,
    pub query: Option<String>,
    pub authenticated: bool,
    pub locale_preference: Option<Locale>,
    pub consent: Option<Consent>,
    pub geo: GeoHint,
}

impl RequestContext {
    pub fn new(path: &str, query: Option<&str>, cookie_header: Option<&str>, geo: GeoHint) -> Self {
        let cookie_header = cookie_header.unwrap_or("");

        let path = if path.is_empty() { "/" } else { path };

        Self {
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
            authenticated: cookies::parse_cookie(cookie_header, AUTH_COOKIE)
                == Some(AUTH_COOKIE_VALUE),
            locale_preference: cookies::parse_cookie(cookie_header, LOCALE_COOKIE)
                .and_then(Locale::from_code),
            consent: cookies::parse_cookie(cookie_header, CONSENT_COOKIE)
                .and_then(Consent::from_cookie),
            geo,
        }
    }

    /// Convenience for callers that only have a path and a cookie header.
    pub fn from_path(path: &str, cookie_header: Option<&str>) -> Self {
        Self::new(path, None, cookie_header, GeoHint::default())
    }

    pub fn consent_given(&self) -> bool {
        self.consent == Some(Consent::Accepted)
    }
}
