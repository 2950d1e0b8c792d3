use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AttendanceLinkService, link_token_cache_key};
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_link(
    service: &AttendanceLinkService,
    request: &HttpRequest,
    link_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先取出链接拿到令牌，删除后同步清掉缓存
    let link = match storage.get_link_by_id(link_id).await {
        Ok(Some(link)) => link,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::LinkNotFound,
                "Attendance link not found",
            )));
        }
        Err(e) => {
            error!("Failed to get attendance link {}: {}", link_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching attendance link",
                )),
            );
        }
    };

    match storage.delete_link(link_id).await {
        Ok(true) => {
            service
                .get_cache(request)
                .remove(&link_token_cache_key(&link.token))
                .await;
            info!("Attendance link {} deleted", link_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Attendance link deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LinkNotFound,
            "Attendance link not found",
        ))),
        Err(e) => {
            error!("Failed to delete attendance link {}: {}", link_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::LinkDeleteFailed,
                    format!("Failed to delete attendance link: {e}"),
                )),
            )
        }
    }
}
