use atelier_common::Locale;

use crate::context::GeoHint;
use crate::geo;

/// Which signal decided the locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Path,
    Cookie,
    Geolocation,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub locale: Locale,
    pub has_locale_prefix: bool,
    pub source: LocaleSource,
}

/// The locale named by the first path segment, if it is a supported one.
pub fn locale_prefix(path: &str) -> Option<Locale> {
    let first = path.strip_prefix('/')?.split('/').next()?;
    Locale::from_code(first)
}

/// Resolve the target locale: URL prefix > preference cookie > geolocation > default.
pub fn resolve(
    path: &str,
    preference: Option<Locale>,
    geo: &GeoHint,
    default: Locale,
) -> Resolution {
    if let Some(locale) = locale_prefix(path) {
        return Resolution {
            locale,
            has_locale_prefix: true,
            source: LocaleSource::Path,
        };
    }

    let (locale, source) = if let Some(locale) = preference {
        (locale, LocaleSource::Cookie)
    } else if let Some(locale) = geo::classify(geo.country.as_deref(), geo.region.as_deref()) {
        (locale, LocaleSource::Geolocation)
    } else {
        (default, LocaleSource::Default)
    };

    Resolution {
        locale,
        has_locale_prefix: false,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo(country: &str, region: Option<&str>) -> GeoHint {
        GeoHint {
            country: Some(country.to_string()),
            region: region.map(str::to_string),
        }
    }

    #[test]
    fn prefix_detection() {
        assert_eq!(locale_prefix("/fr"), Some(Locale::Fr));
        assert_eq!(locale_prefix("/fr/"), Some(Locale::Fr));
        assert_eq!(locale_prefix("/en/about"), Some(Locale::En));
        assert_eq!(locale_prefix("/"), None);
        assert_eq!(locale_prefix("/french/about"), None);
        assert_eq!(locale_prefix("/FR/about"), None);
        assert_eq!(locale_prefix("/de/about"), None);
        assert_eq!(locale_prefix(""), None);
    }

    #[test]
    fn path_wins_over_everything() {
        let r = resolve("/fr/about", Some(Locale::En), &geo("US", None), Locale::En);
        assert_eq!(r.locale, Locale::Fr);
        assert!(r.has_locale_prefix);
        assert_eq!(r.source, LocaleSource::Path);

        let r = resolve("/en/about", Some(Locale::Fr), &geo("FR", None), Locale::En);
        assert_eq!(r.locale, Locale::En);
        assert_eq!(r.source, LocaleSource::Path);
    }

    #[test]
    fn cookie_beats_geolocation() {
        let r = resolve("/about", Some(Locale::En), &geo("FR", None), Locale::En);
        assert_eq!(r.locale, Locale::En);
        assert!(!r.has_locale_prefix);
        assert_eq!(r.source, LocaleSource::Cookie);
    }

    #[test]
    fn geolocation_applies_without_cookie() {
        let r = resolve("/about", None, &geo("FR", None), Locale::En);
        assert_eq!(r.locale, Locale::Fr);
        assert_eq!(r.source, LocaleSource::Geolocation);
    }

    #[test]
    fn default_is_last_resort() {
        let r = resolve("/", None, &GeoHint::default(), Locale::En);
        assert_eq!(r.locale, Locale::En);
        assert_eq!(r.source, LocaleSource::Default);

        let r = resolve("/", None, &geo("CA", Some("ON")), Locale::Fr);
        assert_eq!(r.locale, Locale::Fr);
        assert_eq!(r.source, LocaleSource::Default);
    }
}
