pub mod mark;
pub mod report;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::attendance::requests::{
    MarkAttendanceRequest, ReportQueryParams, StatsQueryParams,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Object cache not found in app data")
            .get_ref()
            .clone()
    }

    // 学生签到
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        mark_data: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, request, mark_data).await
    }

    // 签到报表
    pub async fn attendance_report(
        &self,
        request: &HttpRequest,
        query: ReportQueryParams,
    ) -> ActixResult<HttpResponse> {
        report::attendance_report(self, request, query).await
    }

    // 签到统计
    pub async fn attendance_stats(
        &self,
        request: &HttpRequest,
        query: StatsQueryParams,
    ) -> ActixResult<HttpResponse> {
        stats::attendance_stats(self, request, query).await
    }
}
