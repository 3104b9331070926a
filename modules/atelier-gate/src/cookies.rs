use atelier_common::Locale;

pub const AUTH_COOKIE: &str = "site-auth";
pub const AUTH_COOKIE_VALUE: &str = "authenticated";
pub const LOCALE_COOKIE: &str = "locale-preference";
pub const CONSENT_COOKIE: &str = "cookie-consent";

const LOCALE_COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 3600; // 1 year
const AUTH_COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 3600; // 30 days

/// Parse a specific cookie from the Cookie header string.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(name) {
            if let Some(value) = value.strip_prefix('=') {
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                return Some(value);
            }
        }
    }
    None
}

/// Build the Set-Cookie header that remembers the visitor's language.
pub fn locale_preference_cookie(locale: Locale, secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!("{LOCALE_COOKIE}={locale}; Path=/; Max-Age={LOCALE_COOKIE_MAX_AGE_SECS}; SameSite=Lax{secure}")
}

/// Build the Set-Cookie header issued after a correct site password.
pub fn auth_cookie(secure: bool) -> String {
    let secure = if secure { "; Secure" } else { "" };
    format!(
        "{AUTH_COOKIE}={AUTH_COOKIE_VALUE}; Path=/; HttpOnly; SameSite=Lax; Max-Age={AUTH_COOKIE_MAX_AGE_SECS}{secure}"
    )
}
