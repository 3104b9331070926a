use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Typed failures returned by the JSON endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("password is required")]
    MissingPassword,

    #[error("incorrect password")]
    InvalidPassword,

    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPassword | ApiError::UnsupportedLocale(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPassword => StatusCode::UNAUTHORIZED,
        }
    }

    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingPassword => "missing_password",
            ApiError::InvalidPassword => "invalid_password",
            ApiError::UnsupportedLocale(_) => "unsupported_locale",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
