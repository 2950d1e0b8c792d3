use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::AttendanceService;
use crate::models::attendance::requests::StatsQueryParams;
use crate::models::{ApiResponse, ErrorCode};

pub async fn attendance_stats(
    service: &AttendanceService,
    request: &HttpRequest,
    query: StatsQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let now = Utc::now();

    match storage
        .attendance_stats(query.class_code.as_deref(), now)
        .await
    {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Attendance statistics retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance statistics: {e}"),
            )),
        ),
    }
}
