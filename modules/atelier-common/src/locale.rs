use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AtelierError;

/// The two languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Exact, case-sensitive match against a path segment or cookie value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            _ => None,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Locale::En => Locale::Fr,
            Locale::Fr => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = AtelierError;

    /// Lenient parse for configuration input: trims and ignores case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Locale::from_code(&code).ok_or_else(|| AtelierError::UnsupportedLocale(s.to_string()))
    }
}
