//! Localized field lookup over CMS documents.
//!
//! CMS records carry parallel fields per language, e.g. `title_en` and
//! `title_fr`. Pages ask for the base name and the resolved locale.

use serde_json::Value;

use crate::locale::Locale;
use crate::translations;

/// Select the value of `{base}_{locale}` on a CMS record.
///
/// Falls back to an unsuffixed `{base}` field, then to the other locale's
/// field. Nulls and empty strings count as missing.
pub fn localized_field<'a>(entity: &'a Value, locale: Locale, base: &str) -> Option<&'a Value> {
    let object = entity.as_object()?;
    let candidates = [
        format!("{base}_{locale}"),
        base.to_string(),
        format!("{base}_{}", locale.other()),
    ];

    candidates
        .iter()
        .filter_map(|key| object.get(key))
        .find(|value| is_present(value))
}

/// String form of [`localized_field`], falling back to the static
/// translation table when the CMS has nothing for this field.
pub fn localized_text(entity: Option<&Value>, locale: Locale, base: &str, fallback_key: &str) -> String {
    entity
        .and_then(|e| localized_field(e, locale, base))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| translations::lookup(locale, fallback_key).map(str::to_string))
        .unwrap_or_default()
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}
