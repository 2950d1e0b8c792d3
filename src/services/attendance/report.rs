use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use super::AttendanceService;
use crate::models::attendance::requests::{ReportListQuery, ReportQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn attendance_report(
    service: &AttendanceService,
    request: &HttpRequest,
    query: ReportQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 日期过滤参数按 UTC 解析
    let date = match &query.date {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidParams,
                    "Invalid date: expected YYYY-MM-DD",
                )));
            }
        },
        None => None,
    };

    let list_query = ReportListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        class_code: query.class_code,
        status: query.status,
        date,
    };

    match storage.list_attendance_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attendance report retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance report: {e}"),
            )),
        ),
    }
}
