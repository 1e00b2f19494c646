//! HTTP handlers and route wiring

use crate::config::ScoringConfig;
use crate::error::{json_error_handler, RiskResult};
use crate::metrics;
use crate::models::HealthResponse;
use crate::scoring::{RiskScorer, RuleDescriptor};
use crate::validation;
use actix_web::{web, HttpResponse};
use prometheus::Registry;
use serde_json::Value;
use tracing::{info, warn};

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "risk-service";
const SCORE_PATH: &str = "/risk/score";

// ===== Health Check =====
/// Liveness check
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ===== Score Transfer =====
/// Validate a transfer payload and return its risk score
pub async fn score_transfer(
    payload: web::Json<Value>,
    scorer: web::Data<RiskScorer>,
    scoring: web::Data<ScoringConfig>,
) -> RiskResult<HttpResponse> {
    let _timer = metrics::HTTP_REQUEST_DURATION
        .with_label_values(&[SCORE_PATH])
        .start_timer();

    let payload = payload.into_inner();
    let request = match validation::validate(&payload, scoring.activity_stats_policy()) {
        Ok(request) => request,
        Err(errors) => {
            warn!(violations = errors.len(), "Rejected transfer assessment: {}", errors);
            metrics::observe_rejection(&errors);
            return Err(errors.into());
        }
    };

    let result = scorer.evaluate(&request);
    metrics::observe_assessment(&result);

    info!(
        user_id = %request.user_id,
        currency = %request.currency,
        risk_score = result.risk_score.score(),
        reasons = ?result.reasons,
        "Transfer risk scored"
    );

    Ok(HttpResponse::Ok().json(result))
}

// ===== Rule Catalog =====
/// Fixed rule table in evaluation order
pub async fn list_rules(scorer: web::Data<RiskScorer>) -> HttpResponse {
    let rules: Vec<RuleDescriptor> = scorer.rules().iter().map(RuleDescriptor::from).collect();
    HttpResponse::Ok().json(rules)
}

// ===== Prometheus Metrics =====
/// Prometheus text exposition
pub async fn export_metrics(registry: web::Data<Registry>) -> RiskResult<HttpResponse> {
    let body = metrics::encode(&registry)?;
    Ok(HttpResponse::Ok()
        .content_type(prometheus::TEXT_FORMAT)
        .body(body))
}

/// JSON extractor config that reports parse failures as [`crate::RiskError`]
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

// ===== Configure Routes =====
/// Mount the risk routes and `/metrics`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/risk")
            .route("/score", web::post().to(score_transfer))
            .route("/health", web::get().to(health_check))
            .route("/rules", web::get().to(list_rules)),
    )
    .route("/metrics", web::get().to(export_metrics));
}

/// Shared state plus routes, ready for `App::configure`.
pub fn configure_service(
    scoring: ScoringConfig,
    registry: Registry,
    json_limit: usize,
) -> impl Fn(&mut web::ServiceConfig) + Clone + Send + 'static {
    let scorer = web::Data::new(RiskScorer::new());
    let scoring = web::Data::new(scoring);
    let registry = web::Data::new(registry);

    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(scorer.clone())
            .app_data(scoring.clone())
            .app_data(registry.clone())
            .app_data(json_config(json_limit));
        configure_routes(cfg);
    }
}
