//! Error types for risk service

use crate::models::ErrorResponse;
use crate::validation::ValidationErrors;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

/// Risk service error
#[derive(Debug, Error)]
pub enum RiskError {
    /// Payload parsed but failed field validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Payload could not be read as JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Metrics could not be registered or encoded
    #[error("Metrics error: {0}")]
    Metrics(String),
}

impl From<prometheus::Error> for RiskError {
    fn from(err: prometheus::Error) -> Self {
        RiskError::Metrics(err.to_string())
    }
}

impl RiskError {
    fn error_type(&self) -> &'static str {
        match self {
            RiskError::Validation(_) => "VALIDATION_ERROR",
            RiskError::MalformedBody(_) => "MALFORMED_BODY",
            RiskError::Configuration(_) => "CONFIGURATION_ERROR",
            RiskError::Metrics(_) => "METRICS_ERROR",
        }
    }
}

impl ResponseError for RiskError {
    fn status_code(&self) -> StatusCode {
        match self {
            RiskError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RiskError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            RiskError::Configuration(_) | RiskError::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            RiskError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            details,
        })
    }
}

/// Routes `web::Json` extractor failures through [`RiskError`]
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    RiskError::MalformedBody(err.to_string()).into()
}

/// Result alias for the crate
pub type RiskResult<T> = Result<T, RiskError>;
