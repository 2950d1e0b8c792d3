//! 签到链接存储操作
//!
//! 过期采用拉取式判定：读路径统一带 expires_at > now 过滤，
//! 过期行留在表里直到 purge_expired_links 清扫。

use super::SeaOrmStorage;
use crate::entity::attendance_links::{ActiveModel, Column, Entity as AttendanceLinks};
use crate::errors::{AttendSystemError, Result};
use crate::models::{
    PaginationInfo,
    attendance_links::{entities::AttendanceLink, requests::LinkListQuery},
};
use crate::storage::NewAttendanceLink;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建签到链接，usage_count 从 0 开始
    pub async fn create_link_impl(&self, link: NewAttendanceLink) -> Result<AttendanceLink> {
        let model = ActiveModel {
            teacher_id: Set(link.teacher_id),
            class_code: Set(link.class_code),
            class_name: Set(link.class_name),
            token: Set(link.token),
            link: Set(link.link),
            created_at: Set(link.created_at.timestamp_millis()),
            expires_at: Set(link.expires_at.timestamp_millis()),
            usage_count: Set(0),
            max_usage: Set(link.max_usage),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("创建签到链接失败: {e}")))?;

        Ok(result.into_attendance_link())
    }

    /// 通过 ID 获取链接
    pub async fn get_link_by_id_impl(&self, id: i64) -> Result<Option<AttendanceLink>> {
        let result = AttendanceLinks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询签到链接失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance_link()))
    }

    /// 通过令牌获取链接，不做过期过滤，调用方需要区分"不存在"和"已过期"
    pub async fn get_link_by_token_impl(&self, token: &str) -> Result<Option<AttendanceLink>> {
        let result = AttendanceLinks::find()
            .filter(Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询签到链接失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance_link()))
    }

    /// 分页列出活跃链接
    ///
    /// 活跃判定严格为 expires_at > now，恰好到期的链接不返回
    pub async fn list_active_links_with_pagination_impl(
        &self,
        query: LinkListQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<AttendanceLink>, PaginationInfo)> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select =
            AttendanceLinks::find().filter(Column::ExpiresAt.gt(now.timestamp_millis()));

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(ref class_code) = query.class_code {
            select = select.filter(Column::ClassCode.eq(class_code));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询链接总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询链接页数失败: {e}")))?;

        let links = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("查询链接列表失败: {e}")))?;

        Ok((
            links.into_iter().map(|m| m.into_attendance_link()).collect(),
            PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        ))
    }

    /// 删除链接，无论是否过期；重复删除不报错
    pub async fn delete_link_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceLinks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("删除签到链接失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 使用次数加一
    ///
    /// 上限校验放在 UPDATE 谓词里（usage_count < max_usage），
    /// 并发签到不会把计数推过上限；返回 false 表示已达上限
    pub async fn increment_link_usage_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceLinks::update_many()
            .col_expr(
                Column::UsageCount,
                Expr::col(Column::UsageCount).add(1),
            )
            .filter(Column::Id.eq(id))
            .filter(Expr::col(Column::UsageCount).lt(Expr::col(Column::MaxUsage)))
            .exec(&self.db)
            .await
            .map_err(|e| {
                AttendSystemError::database_operation(format!("更新链接使用次数失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 清扫已过期链接（expires_at <= now）
    pub async fn purge_expired_links_impl(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = AttendanceLinks::delete_many()
            .filter(Column::ExpiresAt.lte(now.timestamp_millis()))
            .exec(&self.db)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("清理过期链接失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 统计活跃链接数
    pub async fn count_active_links_impl(&self, now: DateTime<Utc>) -> Result<i64> {
        let count = AttendanceLinks::find()
            .filter(Column::ExpiresAt.gt(now.timestamp_millis()))
            .count(&self.db)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("统计活跃链接失败: {e}")))?;

        Ok(count as i64)
    }
}
