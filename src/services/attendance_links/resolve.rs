use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use super::{AttendanceLinkService, link_token_cache_key};
use crate::cache::{CacheResult, get_json, insert_json};
use crate::config::AppConfig;
use crate::models::attendance_links::display::decorate_for_display;
use crate::models::attendance_links::entities::AttendanceLink;
use crate::models::attendance_links::requests::ResolveLinkQuery;
use crate::models::attendance_links::responses::DecoratedLink;
use crate::models::{ApiResponse, ErrorCode};

/// 解析签到链接：校验令牌、班级和有效期，返回带倒计时的链接信息
///
/// 过期判定是拉取式的，以本次请求时刻为准，不依赖任何后台定时任务。
pub async fn resolve_link(
    service: &AttendanceLinkService,
    request: &HttpRequest,
    query: ResolveLinkQuery,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);
    let now = Utc::now();
    let cache_key = link_token_cache_key(&query.token);

    // 先查缓存，未命中再回源数据库
    let link = match get_json::<AttendanceLink>(cache.as_ref(), &cache_key).await {
        CacheResult::Found(link) => {
            debug!("Attendance link cache hit for token {}", query.token);
            link
        }
        CacheResult::NotFound | CacheResult::ExistsButNoValue => {
            let storage = service.get_storage(request);
            match storage.get_link_by_token(&query.token).await {
                Ok(Some(link)) => {
                    if link.is_active(now) {
                        let ttl = cache_ttl_secs(&link, now);
                        insert_json(cache.as_ref(), cache_key, &link, ttl).await;
                    }
                    link
                }
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::LinkNotFound,
                        "Attendance link not found",
                    )));
                }
                Err(e) => {
                    error!("Failed to resolve attendance link: {}", e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while resolving attendance link",
                        ),
                    ));
                }
            }
        }
    };

    // 令牌和班级必须成对匹配，防止拿着别的班级的令牌签到
    if link.class_code != query.class_code {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LinkNotFound,
            "Attendance link not found",
        )));
    }

    if !link.is_active(now) {
        return Ok(HttpResponse::Gone().json(ApiResponse::error_empty(
            ErrorCode::LinkExpired,
            "Attendance link has expired",
        )));
    }

    if link.is_exhausted() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::LinkUsageExceeded,
            "Attendance link usage limit reached",
        )));
    }

    let display = decorate_for_display(&link, now);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DecoratedLink { link, display },
        "Attendance link resolved successfully",
    )))
}

/// 缓存 TTL：不超过链接剩余有效期，也不超过配置的默认 TTL
pub(crate) fn cache_ttl_secs(link: &AttendanceLink, now: DateTime<Utc>) -> u64 {
    let remaining_secs = (link.remaining_ms(now) / 1000).max(1) as u64;
    remaining_secs.min(AppConfig::get().cache.default_ttl)
}
