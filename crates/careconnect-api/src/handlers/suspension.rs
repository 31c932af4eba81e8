//! Suspension administration handlers
//!
//! Auto-suspension runs off a scheduled/administrative trigger; these
//! handlers expose that trigger plus a read-only preview and the manual
//! suspend/restore operations.

use actix_web::{web, HttpResponse};
use careconnect_core::AppError;
use careconnect_services::PgSuspensionEngine;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::billing::AccessChangeResponse;
use crate::dto::ApiResponse;

/// Preview companies currently eligible for auto-suspension
///
/// GET /api/v1/billing/suspensions/pending
#[instrument(skip(engine))]
pub async fn list_pending_suspensions(
    engine: web::Data<PgSuspensionEngine>,
) -> Result<HttpResponse, AppError> {
    let candidates = engine.companies_for_auto_suspension().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(candidates)))
}

/// Run one auto-suspension pass
///
/// POST /api/v1/billing/suspensions/process
#[instrument(skip(engine))]
pub async fn process_suspensions(
    engine: web::Data<PgSuspensionEngine>,
) -> Result<HttpResponse, AppError> {
    info!("Auto-suspension run triggered");
    let report = engine.process_auto_suspensions().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

/// Manually suspend a company's staff access
///
/// POST /api/v1/billing/companies/{company_id}/suspend
#[instrument(skip(engine))]
pub async fn suspend_company(
    engine: web::Data<PgSuspensionEngine>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let company_id = path.into_inner();
    let users_affected = engine.suspend_company_access(company_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        AccessChangeResponse {
            company_id,
            users_affected,
        },
        "company access suspended",
    )))
}

/// Restore a company's staff access after payment
///
/// POST /api/v1/billing/companies/{company_id}/restore
#[instrument(skip(engine))]
pub async fn restore_company(
    engine: web::Data<PgSuspensionEngine>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let company_id = path.into_inner();
    let users_affected = engine.restore_company_access(company_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        AccessChangeResponse {
            company_id,
            users_affected,
        },
        "company access restored",
    )))
}

/// Configure suspension routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/billing/suspensions/pending",
        web::get().to(list_pending_suspensions),
    )
    .route(
        "/billing/suspensions/process",
        web::post().to(process_suspensions),
    )
    .route(
        "/billing/companies/{company_id}/suspend",
        web::post().to(suspend_company),
    )
    .route(
        "/billing/companies/{company_id}/restore",
        web::post().to(restore_company),
    );
}
