use std::env;

use anyhow::{Context, Result};

use crate::error::AtelierError;
use crate::locale::Locale;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,
    pub static_dir: String,

    // Access gate
    pub site_password: String,
    pub secure_cookies: bool,

    // Locales
    pub default_locale: Locale,

    // Edge geolocation headers
    pub geo_country_header: String,
    pub geo_region_header: String,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Only `SITE_PASSWORD` is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_password = lookup("SITE_PASSWORD")
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AtelierError::Config("SITE_PASSWORD is required".into()))?;

        let web_port: u16 = lookup("WEB_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("WEB_PORT must be a number")?;

        let default_locale = match lookup("DEFAULT_LOCALE") {
            Some(raw) => raw.parse::<Locale>()?,
            None => Locale::En,
        };

        let secure_cookies = match lookup("SECURE_COOKIES") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| AtelierError::Config(format!("SECURE_COOKIES is not a boolean: {raw}")))?,
            None => !cfg!(debug_assertions),
        };

        Ok(Self {
            web_host: lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "./static".to_string()),
            site_password,
            secure_cookies,
            default_locale,
            geo_country_header: lookup("GEO_COUNTRY_HEADER")
                .unwrap_or_else(|| "x-vercel-ip-country".to_string()),
            geo_region_header: lookup("GEO_REGION_HEADER")
                .unwrap_or_else(|| "x-vercel-ip-country-region".to_string()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
