use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    MarkAttendanceRequest, ReportQueryParams, StatsQueryParams,
};
use crate::services::AttendanceService;

// 懒加载的全局 ATTENDANCE_SERVICE 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// HTTP处理程序
pub async fn mark_attendance(
    req: HttpRequest,
    mark_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(&req, mark_data.into_inner())
        .await
}

pub async fn attendance_report(
    req: HttpRequest,
    query: web::Query<ReportQueryParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_report(&req, query.into_inner())
        .await
}

pub async fn attendance_stats(
    req: HttpRequest,
    query: web::Query<StatsQueryParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_stats(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .service(
                web::resource("/mark").route(
                    web::post()
                        .to(mark_attendance)
                        // 限制签到提交频率
                        .wrap(middlewares::RateLimit::mark_attendance()),
                ),
            )
            .service(web::resource("/report").route(web::get().to(attendance_report)))
            .service(web::resource("/stats").route(web::get().to(attendance_stats))),
    );
}
