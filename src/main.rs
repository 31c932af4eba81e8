//! CareConnect Billing Server
//!
//! Multi-tenant billing engine for the CareConnect care-management platform:
//! per-role revenue reports, billing-cycle dates, and invoice-driven
//! auto-suspension of companies in arrears.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use careconnect_api::handlers::{configure_billing, configure_companies, configure_suspensions};
use careconnect_core::AppConfig;
use careconnect_db::{
    create_pool, PgBillingConfigRepository, PgCompanyRepository, PgInvoiceRepository,
    PgStaffRepository,
};
use careconnect_services::{BillingEngine, SuspensionEngine};
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "careconnect-billing",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(health_check))
            // Billing summary and rate table
            .configure(configure_billing)
            // Suspension administration
            .configure(configure_suspensions)
            // Company listing
            .configure(configure_companies),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "careconnect_billing={},careconnect_api={},careconnect_services={},careconnect_db={},actix_web=info,sqlx=warn",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!(
        "Starting CareConnect Billing v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration (defaults -> config files -> CARECONNECT_ env vars)
    let config = AppConfig::load().expect("Failed to load configuration");

    info!(
        "Billing policy: grace {} days, manual-review cap {} days",
        config.billing.grace_period_days, config.billing.max_overdue_days
    );

    info!("Connecting to database...");
    let pool = create_pool(
        &config.database.url,
        Some(config.database.max_connections),
    )
    .await
    .expect("Failed to create database pool");

    // Repositories
    let billing_config_repo = Arc::new(PgBillingConfigRepository::new(pool.clone()));
    let staff_repo = Arc::new(PgStaffRepository::new(pool.clone()));
    let company_repo = Arc::new(PgCompanyRepository::new(pool.clone()));
    let invoice_repo = Arc::new(PgInvoiceRepository::new(pool.clone()));

    // Engines
    let billing_engine = Arc::new(BillingEngine::new(
        billing_config_repo,
        staff_repo.clone(),
    ));
    let suspension_engine = Arc::new(SuspensionEngine::new(
        invoice_repo,
        staff_repo,
        company_repo.clone(),
        config.billing.clone(),
    ));

    // CORS configuration
    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        // Configure CORS - clone cors_origins for each worker
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            // Shared state
            .app_data(web::Data::from(billing_engine.clone()))
            .app_data(web::Data::from(suspension_engine.clone()))
            .app_data(web::Data::from(company_repo.clone()))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_query",
                        "message": error_message
                    })),
                )
                .into()
            }))
            // Middleware
            .wrap(cors)
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
