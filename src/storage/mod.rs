use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    attendance::{
        entities::AttendanceRecord,
        requests::{MarkAttendanceRequest, ReportListQuery},
        responses::{AttendanceReportResponse, AttendanceStatsResponse},
    },
    attendance_links::{
        entities::AttendanceLink,
        requests::LinkListQuery,
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest},
        responses::ClassListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 新链接的落库数据，缺省值已在服务层补齐
#[derive(Debug, Clone)]
pub struct NewAttendanceLink {
    pub teacher_id: i64,
    pub class_code: String,
    pub class_name: String,
    pub token: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub max_usage: i64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过班级代码获取班级信息
    async fn get_class_by_code(&self, class_code: &str) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 签到链接管理方法
    // 创建链接，usage_count 从 0 开始
    async fn create_link(&self, link: NewAttendanceLink) -> Result<AttendanceLink>;
    // 通过ID获取链接
    async fn get_link_by_id(&self, id: i64) -> Result<Option<AttendanceLink>>;
    // 通过令牌获取链接（不过滤过期，由调用方判定）
    async fn get_link_by_token(&self, token: &str) -> Result<Option<AttendanceLink>>;
    // 分页列出活跃链接，过期判定以传入的 now 为准
    async fn list_active_links_with_pagination(
        &self,
        query: LinkListQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<AttendanceLink>, crate::models::PaginationInfo)>;
    // 删除链接，无论是否过期
    async fn delete_link(&self, id: i64) -> Result<bool>;
    // 使用次数加一，达到上限时返回 false 且不修改
    async fn increment_link_usage(&self, id: i64) -> Result<bool>;
    // 清理已过期链接，返回删除行数
    async fn purge_expired_links(&self, now: DateTime<Utc>) -> Result<u64>;
    // 统计活跃链接数
    async fn count_active_links(&self, now: DateTime<Utc>) -> Result<i64>;

    /// 签到记录方法
    // 写入签到记录
    async fn create_attendance_record(
        &self,
        link: &AttendanceLink,
        request: &MarkAttendanceRequest,
        marked_at: DateTime<Utc>,
    ) -> Result<AttendanceRecord>;
    // 分页列出签到记录
    async fn list_attendance_with_pagination(
        &self,
        query: ReportListQuery,
    ) -> Result<AttendanceReportResponse>;
    // 按状态聚合签到统计
    async fn attendance_stats(
        &self,
        class_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AttendanceStatsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
