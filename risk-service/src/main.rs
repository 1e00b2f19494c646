use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use risk_service::{config::Config, handlers, metrics, scoring::RULES};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!("Starting Risk Service...");
    info!(
        rules = RULES.len(),
        activity_stats = ?config.scoring.activity_stats_policy(),
        "Configuration loaded successfully"
    );

    let registry = prometheus::default_registry().clone();
    metrics::register_metrics(&registry).context("Failed to register metrics")?;

    let service = handlers::configure_service(
        config.scoring.clone(),
        registry,
        config.server.json_limit_bytes,
    );

    let server_config = config.server.clone();

    info!(
        "Starting HTTP server on {}:{}",
        server_config.host, server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(middleware::Logger::default())
            .configure(service.clone())
    })
    .workers(server_config.workers)
    .bind((server_config.host.as_str(), server_config.port))
    .with_context(|| {
        format!(
            "Failed to bind {}:{}",
            server_config.host, server_config.port
        )
    })?
    .run()
    .await
    .context("HTTP server terminated with an error")
}
