use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Errors raised while submitting a credit form.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The submitted form body could not be decoded.
    BadRequest(String),
    /// The prediction endpoint could not be reached.
    Transport(String),
    /// The prediction endpoint answered with a body that is not valid JSON.
    InvalidJson {
        /// HTTP status of the response.
        status: u16,
        /// Parser message.
        message: String,
    },
    /// The response parsed as JSON but lacks `credit_score` or `suggestions`.
    MissingField(String),
    /// Internal failure (client construction, rendering).
    InternalError(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// Innermost error, with all context layers removed.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Transport(msg) => write!(f, "Prediction request failed: {}", msg),
            AppError::InvalidJson { status, message } => {
                write!(
                    f,
                    "Prediction response ({}) is not valid JSON: {}",
                    status, message
                )
            }
            AppError::MissingField(msg) => write!(f, "Prediction response incomplete: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each error variant to an HTTP status code and a JSON body.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Transport(msg) => {
                tracing::error!("Prediction transport error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Prediction service unavailable".to_string(),
                )
            }
            AppError::InvalidJson { status, message } => {
                tracing::error!(
                    "Prediction service returned {} with invalid JSON: {}",
                    status, message
                );
                (
                    StatusCode::BAD_GATEWAY,
                    "Prediction service error".to_string(),
                )
            }
            AppError::MissingField(msg) => {
                tracing::error!("Prediction response incomplete: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Prediction service error".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::WithContext { source, context } => {
                tracing::error!("Error with context: {} -> {}", context, source);
                return (**source).clone().into_response();
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_and_root_unwraps() {
        let err: Result<(), AppError> = Err(AppError::Transport("refused".to_string()));
        let wrapped = err.context("submission 1").unwrap_err();

        assert_eq!(
            wrapped.to_string(),
            "submission 1: Prediction request failed: refused"
        );
        assert!(matches!(wrapped.root(), AppError::Transport(_)));
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let resp = AppError::MissingField("credit_score".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = AppError::BadRequest("bad body".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::Transport("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
