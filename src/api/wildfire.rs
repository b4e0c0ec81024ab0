//! Active wildfire detections endpoint

use actix_web::{get, web, HttpResponse};

use crate::api::error::ApiError;
use crate::app::AppState;

/// Active fire detections from NASA FIRMS
///
/// A missing NASA key is an error; an upstream failure degrades to demo data.
#[utoipa::path(
    get,
    path = "/api/wildfires",
    responses(
        (status = 200, description = "Active fire detections (live or demo)", body = crate::model::FireSummary),
        (status = 500, description = "NASA API key missing", body = crate::api::error::ErrorResponse)
    ),
    tag = "wildfires"
)]
#[get("/api/wildfires")]
pub async fn active_wildfires(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let summary = state.firms.active_fires().await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Configure wildfire routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(active_wildfires);
}
