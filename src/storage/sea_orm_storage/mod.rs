//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance_links;
mod attendance_records;
mod classes;

use crate::config::AppConfig;
use crate::errors::{AttendSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AttendSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AttendSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AttendSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AttendSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AttendSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use chrono::{DateTime, Utc};

use crate::models::{
    PaginationInfo,
    attendance::{
        entities::AttendanceRecord,
        requests::{MarkAttendanceRequest, ReportListQuery},
        responses::{AttendanceReportResponse, AttendanceStatsResponse},
    },
    attendance_links::{entities::AttendanceLink, requests::LinkListQuery},
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest},
        responses::ClassListResponse,
    },
};
use crate::storage::{NewAttendanceLink, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_code(&self, class_code: &str) -> Result<Option<Class>> {
        self.get_class_by_code_impl(class_code).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 签到链接模块
    async fn create_link(&self, link: NewAttendanceLink) -> Result<AttendanceLink> {
        self.create_link_impl(link).await
    }

    async fn get_link_by_id(&self, id: i64) -> Result<Option<AttendanceLink>> {
        self.get_link_by_id_impl(id).await
    }

    async fn get_link_by_token(&self, token: &str) -> Result<Option<AttendanceLink>> {
        self.get_link_by_token_impl(token).await
    }

    async fn list_active_links_with_pagination(
        &self,
        query: LinkListQuery,
        now: DateTime<Utc>,
    ) -> Result<(Vec<AttendanceLink>, PaginationInfo)> {
        self.list_active_links_with_pagination_impl(query, now).await
    }

    async fn delete_link(&self, id: i64) -> Result<bool> {
        self.delete_link_impl(id).await
    }

    async fn increment_link_usage(&self, id: i64) -> Result<bool> {
        self.increment_link_usage_impl(id).await
    }

    async fn purge_expired_links(&self, now: DateTime<Utc>) -> Result<u64> {
        self.purge_expired_links_impl(now).await
    }

    async fn count_active_links(&self, now: DateTime<Utc>) -> Result<i64> {
        self.count_active_links_impl(now).await
    }

    // 签到记录模块
    async fn create_attendance_record(
        &self,
        link: &AttendanceLink,
        request: &MarkAttendanceRequest,
        marked_at: DateTime<Utc>,
    ) -> Result<AttendanceRecord> {
        self.create_attendance_record_impl(link, request, marked_at)
            .await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: ReportListQuery,
    ) -> Result<AttendanceReportResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn attendance_stats(
        &self,
        class_code: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AttendanceStatsResponse> {
        self.attendance_stats_impl(class_code, now).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::NewAttendanceLink;
    use chrono::Duration;

    /// 每个测试用独立的内存库，迁移后直接构造存储实例
    async fn memory_storage() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory sqlite");
        Migrator::up(&db, None).await.expect("migration failed");
        SeaOrmStorage { db }
    }

    fn new_link(token: &str, expires_in_secs: i64, max_usage: i64) -> NewAttendanceLink {
        let now = Utc::now();
        NewAttendanceLink {
            teacher_id: 1,
            class_code: "MATH101".to_string(),
            class_name: "Mathematics 101".to_string(),
            token: token.to_string(),
            link: format!("http://localhost:3000/attendance?class=MATH101&token={token}"),
            created_at: now,
            expires_at: now + Duration::seconds(expires_in_secs),
            max_usage,
        }
    }

    fn default_query() -> LinkListQuery {
        LinkListQuery {
            page: None,
            size: None,
            teacher_id: None,
            class_code: None,
        }
    }

    #[tokio::test]
    async fn test_created_link_starts_unused_and_is_listed() {
        let storage = memory_storage().await;

        let link = storage
            .create_link_impl(new_link("tok-fresh", 3600, 30))
            .await
            .unwrap();
        assert_eq!(link.usage_count, 0);

        let (links, pagination) = storage
            .list_active_links_with_pagination_impl(default_query(), Utc::now())
            .await
            .unwrap();
        assert_eq!(pagination.total, 1);
        assert_eq!(links[0].id, link.id);
        assert_eq!(links[0].usage_count, 0);
    }

    #[tokio::test]
    async fn test_deleted_link_never_reappears() {
        let storage = memory_storage().await;

        let link = storage
            .create_link_impl(new_link("tok-gone", 3600, 30))
            .await
            .unwrap();

        assert!(storage.delete_link_impl(link.id).await.unwrap());
        assert!(storage.get_link_by_id_impl(link.id).await.unwrap().is_none());

        let (links, pagination) = storage
            .list_active_links_with_pagination_impl(default_query(), Utc::now())
            .await
            .unwrap();
        assert!(links.is_empty());
        assert_eq!(pagination.total, 0);

        // 重复删除不报错，只返回 false
        assert!(!storage.delete_link_impl(link.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_link_is_never_listed() {
        let storage = memory_storage().await;

        storage
            .create_link_impl(new_link("tok-stale", -60, 30))
            .await
            .unwrap();

        let now = Utc::now();
        let (links, _) = storage
            .list_active_links_with_pagination_impl(default_query(), now)
            .await
            .unwrap();
        assert!(links.is_empty());
        assert_eq!(storage.count_active_links_impl(now).await.unwrap(), 0);

        // 令牌查询不做过期过滤，调用方据此区分"不存在"和"已过期"
        let stale = storage
            .get_link_by_token_impl("tok-stale")
            .await
            .unwrap()
            .expect("expired link should still resolve by token");
        assert!(!stale.is_active(now));

        // 清扫后彻底消失
        assert_eq!(storage.purge_expired_links_impl(now).await.unwrap(), 1);
        assert!(
            storage
                .get_link_by_token_impl("tok-stale")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_increment_stops_at_ceiling() {
        let storage = memory_storage().await;

        let link = storage
            .create_link_impl(new_link("tok-full", 3600, 1))
            .await
            .unwrap();

        assert!(storage.increment_link_usage_impl(link.id).await.unwrap());
        // 已达上限，计数不再变化
        assert!(!storage.increment_link_usage_impl(link.id).await.unwrap());

        let reloaded = storage
            .get_link_by_id_impl(link.id)
            .await
            .unwrap()
            .expect("link should still exist");
        assert_eq!(reloaded.usage_count, 1);
        assert_eq!(reloaded.max_usage, 1);
    }
}
