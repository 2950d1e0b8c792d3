use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, Utc};
use tracing::{error, info};

use super::AttendanceLinkService;
use crate::config::AppConfig;
use crate::models::attendance_links::display::decorate_for_display;
use crate::models::attendance_links::requests::CreateLinkRequest;
use crate::models::attendance_links::responses::DecoratedLink;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::NewAttendanceLink;
use crate::utils::random_code::generate_token;
use crate::utils::validate::{validate_class_code, validate_duration_minutes};

/// 拼接签到 URL；班级代码和令牌的字符集都是 URL 安全的，不需要编码
fn build_link_url(base_url: &str, class_code: &str, token: &str) -> String {
    format!(
        "{}/attendance?class={}&token={}",
        base_url.trim_end_matches('/'),
        class_code,
        token
    )
}

pub async fn create_link(
    service: &AttendanceLinkService,
    request: &HttpRequest,
    link_data: CreateLinkRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    if let Err(msg) = validate_class_code(&link_data.class_code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidParams, msg)));
    }

    // 有效时长只接受固定档位
    let duration_minutes = link_data
        .duration_minutes
        .unwrap_or(config.attendance.default_duration_minutes);
    if let Err(msg) = validate_duration_minutes(duration_minutes) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidDuration, msg)));
    }

    // 班级必须存在，链接上的班级信息是创建时的副本
    let class = match storage.get_class_by_code(&link_data.class_code).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            error!("Failed to get class {}: {}", link_data.class_code, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching class",
                )),
            );
        }
    };

    // 使用上限：请求指定 > 班级人数 > 配置默认值
    let max_usage = match link_data.max_usage {
        Some(value) if value > 0 => value,
        Some(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidParams,
                "max_usage must be a positive integer",
            )));
        }
        None if class.student_count > 0 => class.student_count,
        None => config.attendance.default_max_usage,
    };

    let now = Utc::now();
    let token = generate_token(config.attendance.token_length);
    let link_url = build_link_url(&config.attendance.base_url, &class.class_code, &token);

    let new_link = NewAttendanceLink {
        teacher_id: link_data.teacher_id,
        class_code: class.class_code.clone(),
        class_name: class.class_name.clone(),
        token,
        link: link_url,
        created_at: now,
        expires_at: now + Duration::minutes(duration_minutes),
        max_usage,
    };

    match storage.create_link(new_link).await {
        Ok(link) => {
            info!(
                "Attendance link {} created for class {} (expires in {} minutes)",
                link.id, link.class_code, duration_minutes
            );
            let display = decorate_for_display(&link, now);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                DecoratedLink { link, display },
                "Attendance link created successfully",
            )))
        }
        Err(e) => Ok(handle_link_create_error(&e.to_string())),
    }
}

/// 错误响应辅助函数
fn handle_link_create_error(e: &str) -> HttpResponse {
    let msg = format!("Attendance link creation failed: {e}");
    error!("{}", msg);
    if msg.contains("UNIQUE constraint failed") {
        // 令牌撞上唯一索引，由调用方重试
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::LinkCreationFailed,
            "Token collision, please retry",
        ))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::LinkCreationFailed,
            msg,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_url_shape() {
        assert_eq!(
            build_link_url("http://localhost:3000", "MATH101", "abc123xyz"),
            "http://localhost:3000/attendance?class=MATH101&token=abc123xyz"
        );
        // 末尾斜杠不会产生双斜杠
        assert_eq!(
            build_link_url("https://attend.example.com/", "cs-2024", "tok"),
            "https://attend.example.com/attendance?class=cs-2024&token=tok"
        );
    }

    #[test]
    fn test_expiry_offset_is_exact() {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(60);
        assert_eq!((expires_at - now).num_milliseconds(), 3_600_000);
    }

    #[test]
    fn test_token_collision_maps_to_conflict() {
        use actix_web::http::StatusCode;

        let collision = handle_link_create_error(
            "创建签到链接失败: UNIQUE constraint failed: attendance_links.token",
        );
        assert_eq!(collision.status(), StatusCode::CONFLICT);

        let outage = handle_link_create_error("创建签到链接失败: connection refused");
        assert_eq!(outage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
