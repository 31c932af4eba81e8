//! Billing report handlers
//!
//! HTTP handlers for usage analytics and the active rate table.

use actix_web::{web, HttpResponse};
use careconnect_core::AppError;
use careconnect_services::PgBillingEngine;
use tracing::{debug, instrument};

use crate::dto::{ApiResponse, SummaryQuery};

/// Get billing analytics
///
/// GET /api/v1/billing/summary?tenant_id=...
///
/// With `tenant_id` the report covers a single tenant; without it, every
/// company on the platform.
#[instrument(skip(engine))]
pub async fn get_billing_summary(
    engine: web::Data<PgBillingEngine>,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AppError> {
    debug!("Computing billing summary");

    let analytics = match query.tenant_id {
        Some(tenant_id) => engine.calculate_tenant_billing(tenant_id).await?,
        None => engine.calculate_all_company_billing().await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(analytics)))
}

/// Get the active rate table
///
/// GET /api/v1/billing/rates
///
/// Returns the persisted configuration, or the default table when
/// configuration cannot be read.
#[instrument(skip(engine))]
pub async fn get_rate_table(
    engine: web::Data<PgBillingEngine>,
) -> Result<HttpResponse, AppError> {
    let table = engine.rate_table().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(table)))
}

/// Configure billing report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/billing/summary", web::get().to(get_billing_summary))
        .route("/billing/rates", web::get().to(get_rate_table));
}
