use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;
use tracing::error;

use super::SystemService;
use crate::models::system::responses::SystemStatusResponse;
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

pub async fn get_status(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = service.get_storage(request);
    let now = Utc::now();

    let uptime_secs = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (now - start.start_datetime).num_seconds())
        .unwrap_or(0);

    let active_links = match storage.count_active_links(now).await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count active links: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to retrieve system status",
                )),
            );
        }
    };

    let status = SystemStatusResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_secs,
        active_links,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        status,
        "System status retrieved successfully",
    )))
}
