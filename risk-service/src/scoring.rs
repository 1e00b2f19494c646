//! Risk scoring engine
//!
//! Scores are a capped sum over a fixed, ordered rule table. Every rule is
//! independent and inclusive at its threshold, and the reasons list follows
//! table order so each contribution can be audited by the caller.

use crate::types::{ReasonCode, RiskScore, TransferAssessmentRequest, TransferAssessmentResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

/// Amount at or above which a single transfer counts as large
pub const LARGE_AMOUNT_THRESHOLD: Decimal = dec!(500);

/// 24h transfer count at or above which activity counts as high frequency
pub const HIGH_FREQUENCY_THRESHOLD: u32 = 5;

/// 24h transferred total at or above which activity counts as high volume
pub const HIGH_TOTAL_THRESHOLD: Decimal = dec!(1000);

/// A threshold predicate paired with its fixed weight
#[derive(Clone, Copy)]
pub struct ScoringRule {
    /// Code reported when the rule fires
    pub reason: ReasonCode,
    /// Points added when the rule fires
    pub weight: u32,
    /// Human-readable condition
    pub description: &'static str,
    /// Threshold check
    pub applies: fn(&TransferAssessmentRequest) -> bool,
}

/// Rule table in evaluation order. Reordering changes the reasons list.
pub const RULES: &[ScoringRule] = &[
    ScoringRule {
        reason: ReasonCode::LargeAmount,
        weight: 30,
        description: "Transfer amount is 500 or more",
        applies: is_large_amount,
    },
    ScoringRule {
        reason: ReasonCode::HighFrequency,
        weight: 25,
        description: "5 or more transfers from the account in the last 24 hours",
        applies: is_high_frequency,
    },
    ScoringRule {
        reason: ReasonCode::HighTotal,
        weight: 20,
        description: "1000 or more transferred from the account in the last 24 hours",
        applies: is_high_total,
    },
];

fn is_large_amount(req: &TransferAssessmentRequest) -> bool {
    req.amount >= LARGE_AMOUNT_THRESHOLD
}

fn is_high_frequency(req: &TransferAssessmentRequest) -> bool {
    req.last_24h_transfer_count >= HIGH_FREQUENCY_THRESHOLD
}

fn is_high_total(req: &TransferAssessmentRequest) -> bool {
    req.last_24h_transfer_total >= HIGH_TOTAL_THRESHOLD
}

/// Serializable view of a rule for the catalog endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RuleDescriptor {
    /// Reason code
    pub reason: ReasonCode,
    /// Points added
    pub weight: u32,
    /// Human-readable condition
    pub description: &'static str,
}

impl From<&ScoringRule> for RuleDescriptor {
    fn from(rule: &ScoringRule) -> Self {
        RuleDescriptor {
            reason: rule.reason,
            weight: rule.weight,
            description: rule.description,
        }
    }
}

/// One fired rule and the points it added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContribution {
    /// Fired rule
    pub reason: ReasonCode,
    /// Points added
    pub weight: u32,
}

/// Per-rule breakdown of a single evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assessment {
    /// Fired rules in table order
    pub contributions: Vec<RuleContribution>,
}

impl Assessment {
    /// Sum of fired weights before the cap
    pub fn raw_score(&self) -> u32 {
        self.contributions
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.weight))
    }

    /// Capped score
    pub fn risk_score(&self) -> RiskScore {
        RiskScore::new(self.raw_score())
    }

    /// Response view: capped score plus reasons
    pub fn into_result(self) -> TransferAssessmentResult {
        let risk_score = self.risk_score();
        TransferAssessmentResult {
            risk_score,
            reasons: self.contributions.into_iter().map(|c| c.reason).collect(),
        }
    }
}

/// Risk scorer
pub struct RiskScorer {
    rules: &'static [ScoringRule],
}

impl RiskScorer {
    /// Create new risk scorer over the fixed rule table
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &'static [ScoringRule] {
        self.rules
    }

    /// Evaluate every rule against a validated request
    pub fn assess(&self, req: &TransferAssessmentRequest) -> Assessment {
        let contributions = self
            .rules
            .iter()
            .filter(|rule| (rule.applies)(req))
            .map(|rule| {
                debug!(reason = %rule.reason, weight = rule.weight, "Risk rule triggered");
                RuleContribution {
                    reason: rule.reason,
                    weight: rule.weight,
                }
            })
            .collect();

        Assessment { contributions }
    }

    /// Score a validated request
    pub fn evaluate(&self, req: &TransferAssessmentRequest) -> TransferAssessmentResult {
        self.assess(req).into_result()
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}
