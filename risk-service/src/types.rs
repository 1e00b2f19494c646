//! Core types for risk service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Risk score (0-100)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Upper bound of every reported score
    pub const MAX: u8 = 100;

    /// Create new risk score, capped at 100
    pub fn new(score: u32) -> Self {
        Self(score.min(Self::MAX as u32) as u8)
    }

    /// Get raw score
    pub fn score(&self) -> u8 {
        self.0
    }

    /// No rule contributed
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(RiskScore::new)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a triggered scoring rule.
///
/// Downstream consumers filter on the serialized strings, so renaming a
/// variant's wire form is a breaking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Single transfer at or above the large amount threshold
    LargeAmount,
    /// Many transfers from the account in the last 24 hours
    HighFrequency,
    /// High transferred total from the account in the last 24 hours
    HighTotal,
}

impl ReasonCode {
    /// Wire form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::LargeAmount => "large_amount",
            ReasonCode::HighFrequency => "high_frequency",
            ReasonCode::HighTotal => "high_total",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transfer that passed validation and normalization.
///
/// Only [`crate::validation::validate`] produces this record, so the scorer
/// can rely on every field being in range.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferAssessmentRequest {
    /// Initiating user
    pub user_id: String,

    /// Debited account
    pub from_account_id: String,

    /// Credited account
    pub to_account_id: String,

    /// Transfer amount, never negative
    pub amount: Decimal,

    /// Upper-cased three letter currency code
    pub currency: String,

    /// When the transfer was requested
    pub timestamp: DateTime<Utc>,

    /// Transfers from the account in the trailing 24 hours
    pub last_24h_transfer_count: u32,

    /// Amount transferred from the account in the trailing 24 hours, never negative
    pub last_24h_transfer_total: Decimal,
}

/// Score and triggered reasons, in rule evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAssessmentResult {
    /// Capped additive score
    pub risk_score: RiskScore,

    /// One entry per triggered rule
    pub reasons: Vec<ReasonCode>,
}
