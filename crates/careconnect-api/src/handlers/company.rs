//! Company listing handlers

use actix_web::{web, HttpResponse};
use careconnect_core::{traits::CompanyRepository, AppError};
use careconnect_db::PgCompanyRepository;
use tracing::{debug, instrument};
use validator::Validate;

use crate::dto::{ApiResponse, PaginationParams};

/// List companies with billing status
///
/// GET /api/v1/billing/companies?page=1&per_page=50
#[instrument(skip(repo))]
pub async fn list_companies(
    repo: web::Data<PgCompanyRepository>,
    params: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    params.validate()?;

    debug!("Listing companies page {} per_page {}", params.page, params.per_page);

    let companies = repo.list(params.limit(), params.offset()).await?;
    let total = repo.count().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(params.paginate(companies, total))))
}

/// Configure company routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/billing/companies", web::get().to(list_companies));
}
