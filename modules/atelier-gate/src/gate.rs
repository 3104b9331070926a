use atelier_common::{Config, Locale};
use tracing::debug;
use url::form_urlencoded;

use crate::context::RequestContext;
use crate::locale::{self, Resolution};

const EXCLUDED_PREFIXES: &[&str] = &[
    "/studio",
    "/api",
    "/_next",
    "/_vercel",
    "/static",
    "/.well-known/acme-challenge",
];

const EXCLUDED_EXTENSIONS: &[&str] = &[
    "svg", "png", "jpg", "jpeg", "gif", "webp", "avif", "ico", "bmp", "woff", "woff2", "ttf",
    "otf", "eot",
];

/// Immutable gate settings, built once at startup.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub default_locale: Locale,
    pub password_path: String,
    pub excluded_prefixes: Vec<String>,
    pub excluded_extensions: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            password_path: "/password".to_string(),
            excluded_prefixes: EXCLUDED_PREFIXES.iter().map(|p| p.to_string()).collect(),
            excluded_extensions: EXCLUDED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl From<&Config> for GateConfig {
    fn from(config: &Config) -> Self {
        Self {
            default_locale: config.default_locale,
            ..Self::default()
        }
    }
}

/// Terminal state of one request through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Assets, API and CMS paths. Untouched.
    Excluded,
    /// The password entry page itself.
    PasswordPage { locale: Locale },
    /// Not authenticated: send to the password page.
    RedirectToPassword {
        redirect: Option<String>,
        locale: Option<Locale>,
        location: String,
    },
    /// Authenticated but unprefixed: add the locale segment.
    RedirectToLocalePrefix { locale: Locale, location: String },
    /// Authenticated and prefixed: hand off to the page renderer.
    Render { locale: Locale },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub outcome: Outcome,
    /// Locale to write to the preference cookie on this response, if any.
    pub persist_locale: Option<Locale>,
}

impl Decision {
    fn bare(outcome: Outcome) -> Self {
        Self {
            outcome,
            persist_locale: None,
        }
    }

    /// Redirect target for redirecting outcomes.
    pub fn location(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::RedirectToPassword { location, .. }
            | Outcome::RedirectToLocalePrefix { location, .. } => Some(location.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gate {
    config: GateConfig,
}

impl Gate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn default_locale(&self) -> Locale {
        self.config.default_locale
    }

    /// Decide what happens to a request. Total over all inputs.
    pub fn decide(&self, ctx: &RequestContext) -> Decision {
        // Exclusions never touch auth or locale state.
        if self.is_excluded(&ctx.path) {
            debug!(path = %ctx.path, "gate: excluded");
            return Decision::bare(Outcome::Excluded);
        }

        let resolution = locale::resolve(
            &ctx.path,
            ctx.locale_preference,
            &ctx.geo,
            self.config.default_locale,
        );
        let persist_locale = self.locale_to_persist(ctx, &resolution);

        let outcome = if self.is_password_page(&ctx.path) {
            Outcome::PasswordPage {
                locale: resolution.locale,
            }
        } else if !ctx.authenticated {
            self.password_redirect(&ctx.path, resolution.locale)
        } else if !resolution.has_locale_prefix {
            Outcome::RedirectToLocalePrefix {
                locale: resolution.locale,
                location: prefixed_location(resolution.locale, &ctx.path, ctx.query.as_deref()),
            }
        } else {
            // Prefixed requests already carry an explicit locale, so no cookie write.
            debug!(path = %ctx.path, locale = %resolution.locale, "gate: render");
            return Decision::bare(Outcome::Render {
                locale: resolution.locale,
            });
        };

        debug!(
            path = %ctx.path,
            locale = %resolution.locale,
            source = ?resolution.source,
            outcome = ?outcome,
            persist_locale = ?persist_locale,
            "gate: decided"
        );

        Decision {
            outcome,
            persist_locale,
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        let prefixed = self
            .config
            .excluded_prefixes
            .iter()
            .any(|prefix| has_segment_prefix(path, prefix));
        if prefixed {
            return true;
        }

        let last = path.rsplit('/').next().unwrap_or("");
        match last.rsplit_once('.') {
            Some((_, ext)) => self
                .config
                .excluded_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    pub fn is_password_page(&self, path: &str) -> bool {
        has_segment_prefix(path, &self.config.password_path)
    }

    /// Build the password page URL carrying the return path and locale.
    pub fn password_location(&self, redirect: Option<&str>, locale: Option<Locale>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(redirect) = redirect {
            query.append_pair("redirect", redirect);
        }
        if let Some(locale) = locale {
            query.append_pair("locale", locale.as_str());
        }
        let query = query.finish();

        if query.is_empty() {
            self.config.password_path.clone()
        } else {
            format!("{}?{query}", self.config.password_path)
        }
    }

    fn password_redirect(&self, path: &str, resolved: Locale) -> Outcome {
        let redirect = (path != "/").then(|| path.to_string());
        let locale = (resolved != self.config.default_locale).then_some(resolved);
        let location = self.password_location(redirect.as_deref(), locale);
        Outcome::RedirectToPassword {
            redirect,
            locale,
            location,
        }
    }

    /// Write the preference cookie only on a first, consented, unprefixed
    /// visit whose locale differs from the default.
    fn locale_to_persist(&self, ctx: &RequestContext, resolution: &Resolution) -> Option<Locale> {
        let eligible = ctx.consent_given()
            && ctx.locale_preference.is_none()
            && !resolution.has_locale_prefix
            && resolution.locale != self.config.default_locale;
        eligible.then_some(resolution.locale)
    }
}

fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn prefixed_location(locale: Locale, path: &str, query: Option<&str>) -> String {
    let mut location = if path == "/" {
        format!("/{locale}")
    } else {
        format!("/{locale}{path}")
    };
    if let Some(query) = query {
        location.push('?');
        location.push_str(query);
    }
    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GeoHint;

    const AUTH: &str = "site-auth=authenticated";

    fn gate() -> Gate {
        Gate::new(GateConfig::default())
    }

    fn ctx(path: &str, cookies: &str) -> RequestContext {
        RequestContext::from_path(path, Some(cookies))
    }

    fn ctx_geo(path: &str, cookies: &str, country: &str, region: Option<&str>) -> RequestContext {
        RequestContext::new(
            path,
            None,
            Some(cookies),
            GeoHint {
                country: Some(country.to_string()),
                region: region.map(str::to_string),
            },
        )
    }

    // --- Exclusions ---

    #[test]
    fn excluded_paths_pass_through_regardless_of_cookies() {
        let gate = gate();
        for path in [
            "/favicon.ico",
            "/api/password",
            "/api",
            "/studio",
            "/studio/desk/project",
            "/_next/static/chunk.js",
            "/static/site.css",
            "/.well-known/acme-challenge/token123",
            "/images/hero.JPG",
            "/fonts/brand.woff2",
            "/fr/portfolio/cover.webp",
        ] {
            for cookies in ["", AUTH, "cookie-consent=accepted; locale-preference=fr"] {
                let decision = gate.decide(&ctx(path, cookies));
                assert_eq!(decision, Decision::bare(Outcome::Excluded), "{path} / {cookies}");
            }
        }
    }

    #[test]
    fn exclusion_is_segment_bounded() {
        let gate = gate();
        assert!(!gate.is_excluded("/apiary"));
        assert!(!gate.is_excluded("/studios"));
        assert!(!gate.is_excluded("/en/about"));
        assert!(!gate.is_excluded("/en/report.pdf"));
        assert!(!gate.is_excluded("/en/v1.2"));
    }

    // --- Password page ---

    #[test]
    fn password_page_passes_through_unauthenticated() {
        let decision = gate().decide(&ctx("/password", ""));
        assert_eq!(
            decision.outcome,
            Outcome::PasswordPage { locale: Locale::En }
        );
        assert_eq!(decision.persist_locale, None);

        let decision = gate().decide(&ctx("/password/reset", AUTH));
        assert!(matches!(decision.outcome, Outcome::PasswordPage { .. }));
    }

    #[test]
    fn password_page_persists_geolocated_locale_with_consent() {
        let decision = gate().decide(&ctx_geo("/password", "cookie-consent=accepted", "FR", None));
        assert_eq!(decision.outcome, Outcome::PasswordPage { locale: Locale::Fr });
        assert_eq!(decision.persist_locale, Some(Locale::Fr));
    }

    #[test]
    fn passwordless_lookalike_is_not_password_page() {
        let decision = gate().decide(&ctx("/passwords", ""));
        assert!(matches!(decision.outcome, Outcome::RedirectToPassword { .. }));
    }

    // --- Unauthenticated ---

    #[test]
    fn unauthenticated_root_has_no_params() {
        let decision = gate().decide(&ctx("/", ""));
        assert_eq!(
            decision.outcome,
            Outcome::RedirectToPassword {
                redirect: None,
                locale: None,
                location: "/password".to_string(),
            }
        );
    }

    #[test]
    fn unauthenticated_redirect_preserves_target_and_locale() {
        let decision = gate().decide(&ctx("/fr/portfolio/some-project", ""));
        match &decision.outcome {
            Outcome::RedirectToPassword {
                redirect,
                locale,
                location,
            } => {
                assert_eq!(redirect.as_deref(), Some("/fr/portfolio/some-project"));
                assert_eq!(*locale, Some(Locale::Fr));
                assert_eq!(
                    location,
                    "/password?redirect=%2Ffr%2Fportfolio%2Fsome-project&locale=fr"
                );
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        // Explicit URL locale never triggers a cookie write.
        assert_eq!(decision.persist_locale, None);
    }

    #[test]
    fn unauthenticated_default_locale_is_omitted() {
        let decision = gate().decide(&ctx("/en/about", ""));
        assert_eq!(
            decision.location(),
            Some("/password?redirect=%2Fen%2Fabout")
        );
    }

    #[test]
    fn locale_root_keeps_redirect_param() {
        let decision = gate().decide(&ctx("/fr", ""));
        assert_eq!(decision.location(), Some("/password?redirect=%2Ffr&locale=fr"));
    }

    #[test]
    fn invalid_auth_cookie_is_unauthenticated() {
        let decision = gate().decide(&ctx("/en", "site-auth=true"));
        assert!(matches!(decision.outcome, Outcome::RedirectToPassword { .. }));
    }

    #[test]
    fn unauthenticated_geolocated_visit_persists_with_consent() {
        let decision = gate().decide(&ctx_geo("/", "cookie-consent=accepted", "CA", Some("QC")));
        assert_eq!(decision.location(), Some("/password?locale=fr"));
        assert_eq!(decision.persist_locale, Some(Locale::Fr));
    }

    // --- Authenticated, unprefixed ---

    #[test]
    fn authenticated_root_collapses_to_locale() {
        let decision = gate().decide(&ctx("/", AUTH));
        assert_eq!(
            decision.outcome,
            Outcome::RedirectToLocalePrefix {
                locale: Locale::En,
                location: "/en".to_string(),
            }
        );
    }

    #[test]
    fn authenticated_unprefixed_path_gets_prefix_and_query() {
        let context = RequestContext::new(
            "/about",
            Some("ref=newsletter"),
            Some("site-auth=authenticated; locale-preference=fr"),
            GeoHint::default(),
        );
        let decision = gate().decide(&context);
        assert_eq!(decision.location(), Some("/fr/about?ref=newsletter"));
        // Preference already saved.
        assert_eq!(decision.persist_locale, None);
    }

    #[test]
    fn geolocation_only_without_cookie() {
        let decision = gate().decide(&ctx_geo("/", AUTH, "FR", None));
        assert_eq!(decision.location(), Some("/fr"));

        let decision = gate().decide(&ctx_geo(
            "/",
            "site-auth=authenticated; locale-preference=en",
            "FR",
            None,
        ));
        assert_eq!(decision.location(), Some("/en"));
    }

    #[test]
    fn unknown_locale_segment_is_treated_as_unprefixed() {
        let decision = gate().decide(&ctx("/de/about", AUTH));
        assert_eq!(decision.location(), Some("/en/de/about"));
    }

    // --- Authenticated, prefixed ---

    #[test]
    fn prefixed_path_renders_with_url_locale() {
        let decision = gate().decide(&ctx("/fr/about", "site-auth=authenticated; locale-preference=en"));
        assert_eq!(decision, Decision::bare(Outcome::Render { locale: Locale::Fr }));
    }

    #[test]
    fn render_never_persists() {
        let decision = gate().decide(&ctx_geo(
            "/fr/about",
            "site-auth=authenticated; cookie-consent=accepted",
            "FR",
            None,
        ));
        assert_eq!(decision.persist_locale, None);
    }

    // --- Cookie write rules ---

    #[test]
    fn cookie_written_once_across_two_requests() {
        let gate = gate();
        let first = gate.decide(&ctx_geo(
            "/",
            "site-auth=authenticated; cookie-consent=accepted",
            "FR",
            None,
        ));
        assert_eq!(first.persist_locale, Some(Locale::Fr));

        let second = gate.decide(&ctx_geo(
            "/",
            "site-auth=authenticated; cookie-consent=accepted; locale-preference=fr",
            "FR",
            None,
        ));
        assert_eq!(second.persist_locale, None);
        assert_eq!(second.location(), Some("/fr"));
    }

    #[test]
    fn no_cookie_without_consent() {
        let gate = gate();
        for consent in ["", "; cookie-consent=declined", "; cookie-consent=whatever"] {
            for path in ["/", "/password", "/about"] {
                for auth in ["", AUTH] {
                    let cookies = format!("{auth}{consent}");
                    let decision = gate.decide(&ctx_geo(path, &cookies, "FR", None));
                    assert_eq!(decision.persist_locale, None, "{path} / {cookies}");
                }
            }
        }
    }

    #[test]
    fn default_locale_is_never_persisted() {
        let decision = gate().decide(&ctx_geo("/", "site-auth=authenticated; cookie-consent=accepted", "US", None));
        assert_eq!(decision.persist_locale, None);
    }

    #[test]
    fn french_default_flips_persistence() {
        let gate = Gate::new(GateConfig {
            default_locale: Locale::Fr,
            ..GateConfig::default()
        });
        let decision = gate.decide(&ctx("/", "site-auth=authenticated; cookie-consent=accepted"));
        assert_eq!(decision.location(), Some("/fr"));
        assert_eq!(decision.persist_locale, None);

        let decision = gate.decide(&ctx("/en/about", ""));
        assert_eq!(decision.location(), Some("/password?redirect=%2Fen%2Fabout&locale=en"));
    }

    #[test]
    fn redirect_targets_do_not_redirect_again() {
        let gate = gate();
        let first = gate.decide(&ctx("/services", AUTH));
        let target = first.location().unwrap().to_string();
        let second = gate.decide(&ctx(&target, AUTH));
        assert!(matches!(second.outcome, Outcome::Render { .. }));

        let first = gate.decide(&ctx("/services", ""));
        let target = first.location().unwrap();
        let path = target.split('?').next().unwrap();
        let second = gate.decide(&ctx(path, ""));
        assert!(matches!(second.outcome, Outcome::PasswordPage { .. }));
    }
}
