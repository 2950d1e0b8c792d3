use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use tracing::{error, info};

use super::AttendanceService;
use crate::cache::insert_json;
use crate::models::attendance::requests::MarkAttendanceRequest;
use crate::models::attendance::responses::MarkAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::attendance_links::{link_token_cache_key, resolve::cache_ttl_secs};
use crate::utils::validate::validate_student_name;

/// 学生签到
///
/// 使用计数的加一和上限检查在同一条 UPDATE 里完成，
/// 并发签到不会把 usage_count 推过 max_usage。
pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mark_data: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let now = Utc::now();

    if let Err(msg) = validate_student_name(&mark_data.student_name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }
    if mark_data.student_id <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidParams,
            "Invalid student_id: expected a positive integer",
        )));
    }

    // 签到总是回源数据库，缓存里的使用计数可能滞后
    let mut link = match storage.get_link_by_token(&mark_data.token).await {
        Ok(Some(link)) if link.class_code == mark_data.class_code => link,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::LinkNotFound,
                "Attendance link not found",
            )));
        }
        Err(e) => {
            error!("Failed to get attendance link by token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching attendance link",
                )),
            );
        }
    };

    if !link.is_active(now) {
        return Ok(HttpResponse::Gone().json(ApiResponse::error_empty(
            ErrorCode::LinkExpired,
            "Attendance link has expired",
        )));
    }

    // 原子地占用一个使用名额
    match storage.increment_link_usage(link.id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::LinkUsageExceeded,
                "Attendance link usage limit reached",
            )));
        }
        Err(e) => {
            error!("Failed to increment link usage for {}: {}", link.id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceMarkFailed,
                    "Failed to mark attendance",
                )),
            );
        }
    }
    link.usage_count += 1;

    let record = match storage
        .create_attendance_record(&link, &mark_data, now)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            // 名额已占用但记录写入失败，保留计数，只报错
            error!(
                "Attendance record creation failed for link {}: {}",
                link.id, e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceMarkFailed,
                    format!("Failed to mark attendance: {e}"),
                )),
            );
        }
    };

    // 用最新计数刷新缓存，避免解析接口拿到旧值
    let cache = service.get_cache(request);
    let ttl = cache_ttl_secs(&link, now);
    insert_json(
        cache.as_ref(),
        link_token_cache_key(&link.token),
        &link,
        ttl,
    )
    .await;

    info!(
        "Student {} marked {} for class {} (usage {}/{})",
        mark_data.student_id, mark_data.status, link.class_code, link.usage_count, link.max_usage
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        MarkAttendanceResponse {
            record,
            usage_count: link.usage_count,
            max_usage: link.max_usage,
        },
        "Attendance marked successfully",
    )))
}
