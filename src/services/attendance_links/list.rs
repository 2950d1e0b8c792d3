use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::AttendanceLinkService;
use crate::models::attendance_links::display::decorate_for_display;
use crate::models::attendance_links::requests::{LinkListQuery, LinkQueryParams};
use crate::models::attendance_links::responses::{DecoratedLink, LinkListResponse};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_links(
    service: &AttendanceLinkService,
    request: &HttpRequest,
    query: LinkQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 列表只返回活跃链接，过期判定统一以本次请求时刻为准
    let now = Utc::now();
    let list_query = LinkListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        teacher_id: Some(query.teacher_id),
        class_code: query.class_code,
    };

    match storage
        .list_active_links_with_pagination(list_query, now)
        .await
    {
        Ok((links, pagination)) => {
            let items = links
                .into_iter()
                .map(|link| {
                    let display = decorate_for_display(&link, now);
                    DecoratedLink { link, display }
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                LinkListResponse { pagination, items },
                "Attendance link list retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve attendance link list: {e}"),
            )),
        ),
    }
}
