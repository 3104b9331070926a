//! Coarse locale inference from edge geolocation headers.

use atelier_common::Locale;

/// Countries and territories where French is the sole or dominant public
/// language.
const FRENCH_COUNTRIES: &[&str] = &[
    "FR", "MC", // metropolitan France, Monaco
    "GP", "MQ", "GF", "RE", "YT", "PM", "BL", "MF", "NC", "PF", "WF", "TF",
    "SN", "CI", "ML", "BF", "NE", "GN", "BJ", "TG", "CD", "CG", "GA", "HT",
];

/// Subdivisions that are French-speaking inside otherwise mixed countries.
/// Bilingual subdivisions (New Brunswick, Fribourg, Valais) are left out.
const FRENCH_REGIONS: &[(&str, &[&str])] = &[
    ("CA", &["QC"]),
    ("BE", &["WAL", "BRU"]),
    ("CH", &["GE", "VD", "NE", "JU"]),
];

/// Infer a locale from a country code and optional subdivision code.
/// Returns `None` whenever the signal is absent or ambiguous.
pub fn classify(country: Option<&str>, region: Option<&str>) -> Option<Locale> {
    let country = country.map(str::trim).filter(|c| !c.is_empty())?;
    let country = country.to_ascii_uppercase();

    if FRENCH_COUNTRIES.contains(&country.as_str()) {
        return Some(Locale::Fr);
    }

    let (_, regions) = FRENCH_REGIONS.iter().find(|(c, _)| *c == country)?;
    let region = normalize_region(&country, region?)?;

    regions.contains(&region.as_str()).then_some(Locale::Fr)
}

/// Uppercase a subdivision code, accepting both `QC` and ISO 3166-2 `CA-QC`.
fn normalize_region(country: &str, region: &str) -> Option<String> {
    let region = region.trim().to_ascii_uppercase();
    let region = match region.strip_prefix(country).and_then(|r| r.strip_prefix('-')) {
        Some(rest) => rest.to_string(),
        None => region,
    };
    (!region.is_empty()).then_some(region)
}
