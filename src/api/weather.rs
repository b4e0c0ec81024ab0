//! Weather endpoint

use actix_web::{get, web, HttpResponse, Responder};

use crate::app::AppState;

/// Current weather for the monitored location
///
/// Never fails: when the OpenWeatherMap key is absent or the upstream call
/// errors, static fallback data is returned with a `note` marking it as such.
#[utoipa::path(
    get,
    path = "/api/weather",
    responses(
        (status = 200, description = "Current weather (live or fallback)", body = crate::model::WeatherReport)
    ),
    tag = "weather"
)]
#[get("/api/weather")]
pub async fn current_weather(state: web::Data<AppState>) -> impl Responder {
    let report = state.weather.current().await;
    HttpResponse::Ok().json(report)
}

/// Configure weather routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(current_weather);
}
