//! Prometheus metrics

use crate::error::{RiskError, RiskResult};
use crate::types::TransferAssessmentResult;
use crate::validation::ValidationErrors;
use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    // HTTP metrics
    /// Scoring request latency by route
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new("http_request_duration_seconds", "HTTP request duration in seconds")
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["path"]
    ).expect("metric can be created");

    // Business metrics - Risk Service specific
    /// Assessments by outcome, `scored` or `rejected`
    pub static ref RISK_ASSESSMENTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("risk_assessments_total", "Total transfer assessments by outcome"),
        &["outcome"]
    ).expect("metric can be created");

    /// Triggered rules by reason code
    pub static ref RISK_RULE_HITS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("risk_rule_hits_total", "Total triggered scoring rules by reason code"),
        &["reason"]
    ).expect("metric can be created");

    /// Reported scores
    pub static ref RISK_SCORE: Histogram = Histogram::with_opts(
        HistogramOpts::new("risk_score", "Distribution of reported risk scores")
            .buckets(vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0])
    ).expect("metric can be created");

    /// Rejected fields by field and violation kind
    pub static ref RISK_VALIDATION_FAILURES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("risk_validation_failures_total", "Total rejected request fields"),
        &["field", "reason"]
    ).expect("metric can be created");
}

/// Register all metrics with the given registry
pub fn register_metrics(registry: &Registry) -> RiskResult<()> {
    // HTTP metrics
    registry.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;

    // Business metrics
    registry.register(Box::new(RISK_ASSESSMENTS_TOTAL.clone()))?;
    registry.register(Box::new(RISK_RULE_HITS_TOTAL.clone()))?;
    registry.register(Box::new(RISK_SCORE.clone()))?;
    registry.register(Box::new(RISK_VALIDATION_FAILURES_TOTAL.clone()))?;

    Ok(())
}

/// Record a scored request
pub fn observe_assessment(result: &TransferAssessmentResult) {
    RISK_ASSESSMENTS_TOTAL.with_label_values(&["scored"]).inc();
    RISK_SCORE.observe(f64::from(result.risk_score.score()));
    for reason in &result.reasons {
        RISK_RULE_HITS_TOTAL
            .with_label_values(&[reason.as_str()])
            .inc();
    }
}

/// Record a rejected request and each of its violations
pub fn observe_rejection(errors: &ValidationErrors) {
    RISK_ASSESSMENTS_TOTAL.with_label_values(&["rejected"]).inc();
    for violation in errors.violations() {
        let reason = violation.reason.to_string();
        RISK_VALIDATION_FAILURES_TOTAL
            .with_label_values(&[violation.field, reason.as_str()])
            .inc();
    }
}

/// Generate metrics output in Prometheus text format
pub fn encode(registry: &Registry) -> RiskResult<String> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| RiskError::Metrics(e.to_string()))
}
