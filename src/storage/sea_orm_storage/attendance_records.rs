//! 签到记录存储操作

use super::SeaOrmStorage;
use crate::entity::attendance_records::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::errors::{AttendSystemError, Result};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::{MarkAttendanceRequest, ReportListQuery},
        responses::{AttendanceReportResponse, AttendanceStatsResponse},
    },
    attendance_links::entities::AttendanceLink,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 写入签到记录，班级信息从链接上冗余
    pub async fn create_attendance_record_impl(
        &self,
        link: &AttendanceLink,
        request: &MarkAttendanceRequest,
        marked_at: DateTime<Utc>,
    ) -> Result<AttendanceRecord> {
        let model = ActiveModel {
            link_id: Set(link.id),
            class_code: Set(link.class_code.clone()),
            class_name: Set(link.class_name.clone()),
            student_id: Set(request.student_id),
            student_name: Set(request.student_name.clone()),
            status: Set(request.status.to_string()),
            verification_method: Set(request.verification_method.to_string()),
            marked_at: Set(marked_at.timestamp_millis()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("写入签到记录失败: {e}")))?;

        Ok(result.into_attendance_record())
    }

    /// 分页列出签到记录，最新的在前
    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: ReportListQuery,
    ) -> Result<AttendanceReportResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = AttendanceRecords::find();

        if let Some(ref class_code) = query.class_code {
            select = select.filter(Column::ClassCode.eq(class_code));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 按日过滤：[当天 00:00, 次日 00:00)
        if let Some(date) = query.date {
            let day_start = date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis())
                .ok_or_else(|| AttendSystemError::date_parse("无效的日期"))?;
            let day_end = day_start + 24 * 3600 * 1000;
            select = select
                .filter(Column::MarkedAt.gte(day_start))
                .filter(Column::MarkedAt.lt(day_end));
        }

        select = select.order_by_desc(Column::MarkedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询记录总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询记录页数失败: {e}")))?;

        let records = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询签到记录失败: {e}")))?;

        Ok(AttendanceReportResponse {
            items: records
                .into_iter()
                .map(|m| m.into_attendance_record())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 按状态聚合签到统计
    pub async fn attendance_stats_impl(
        &self,
        class_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AttendanceStatsResponse> {
        let count_status = |status: Option<AttendanceStatus>| {
            let mut select = AttendanceRecords::find();
            if let Some(code) = class_code {
                select = select.filter(Column::ClassCode.eq(code));
            }
            if let Some(status) = status {
                select = select.filter(Column::Status.eq(status.to_string()));
            }
            select.count(&self.db)
        };

        let total = count_status(None)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("统计签到总数失败: {e}")))?;
        let present = count_status(Some(AttendanceStatus::Present))
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("统计出勤数失败: {e}")))?;
        let late = count_status(Some(AttendanceStatus::Late))
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("统计迟到数失败: {e}")))?;
        let absent = count_status(Some(AttendanceStatus::Absent))
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("统计缺勤数失败: {e}")))?;

        let active_links = self.count_active_links_impl(now).await?;

        Ok(AttendanceStatsResponse {
            total_records: total as i64,
            present: present as i64,
            late: late as i64,
            absent: absent as i64,
            active_links,
        })
    }
}
