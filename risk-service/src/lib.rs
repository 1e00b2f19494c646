//! Risk Service
//!
//! Stateless, rule-based risk scoring for proposed transfers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod scoring;
pub mod types;
pub mod validation;

pub use error::{RiskError, RiskResult};
pub use scoring::RiskScorer;
pub use types::*;
pub use validation::{validate, ActivityStatsPolicy, ValidationErrors};
