pub mod config;
pub mod content;
pub mod error;
pub mod locale;
pub mod translations;

pub use config::Config;
pub use content::{localized_field, localized_text};
pub use error::AtelierError;
pub use locale::Locale;
