//! Wire bodies that are not part of the scoring contract

use serde::{Deserialize, Serialize};

// ===== Health Check =====
/// Body of `GET /risk/health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
}

// ===== Error Response =====
/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error type
    pub error: String,
    /// Human-readable description
    pub message: String,
    /// Per-field violations, for validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
