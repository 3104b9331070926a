//! Access gate and locale routing for the public site.
//!
//! Everything here is pure: a [`RequestContext`] goes in, a [`Decision`]
//! comes out. The web crate translates decisions into HTTP responses.

pub mod context;
pub mod cookies;
pub mod gate;
pub mod geo;
pub mod locale;
pub mod routing;

pub use context::{Consent, GeoHint, RequestContext};
pub use gate::{Decision, Gate, GateConfig, Outcome};
pub use locale::{LocaleSource, Resolution};
