use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance_links::requests::{
    CreateLinkRequest, LinkQueryParams, ResolveLinkQuery,
};
use crate::services::AttendanceLinkService;
use crate::utils::SafeLinkIdI64;

// 懒加载的全局 LINK_SERVICE 实例
static LINK_SERVICE: Lazy<AttendanceLinkService> = Lazy::new(AttendanceLinkService::new_lazy);

// HTTP处理程序
pub async fn list_links(
    req: HttpRequest,
    query: web::Query<LinkQueryParams>,
) -> ActixResult<HttpResponse> {
    LINK_SERVICE.list_links(&req, query.into_inner()).await
}

pub async fn create_link(
    req: HttpRequest,
    link_data: web::Json<CreateLinkRequest>,
) -> ActixResult<HttpResponse> {
    LINK_SERVICE.create_link(&req, link_data.into_inner()).await
}

pub async fn delete_link(req: HttpRequest, link_id: SafeLinkIdI64) -> ActixResult<HttpResponse> {
    LINK_SERVICE.delete_link(&req, link_id.0).await
}

pub async fn resolve_link(
    req: HttpRequest,
    query: web::Query<ResolveLinkQuery>,
) -> ActixResult<HttpResponse> {
    LINK_SERVICE.resolve_link(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_attendance_link_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance-links")
            .service(
                web::resource("")
                    .route(web::get().to(list_links))
                    .route(
                        web::post()
                            .to(create_link)
                            // 限制链接创建频率
                            .wrap(middlewares::RateLimit::create_link()),
                    ),
            )
            .service(
                web::resource("/resolve").route(
                    web::get()
                        .to(resolve_link)
                        // 防止令牌暴力枚举
                        .wrap(middlewares::RateLimit::resolve_token()),
                ),
            )
            .service(web::resource("/{link_id}").route(web::delete().to(delete_link))),
    );
}
