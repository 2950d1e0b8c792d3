//! 考勤签到链接实体
//!
//! created_at / expires_at 以毫秒时间戳存储，倒计时展示依赖毫秒精度。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_links")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub class_code: String,
    pub class_name: String,
    #[sea_orm(unique)]
    pub token: String,
    pub link: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub usage_count: i64,
    pub max_usage: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_records::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_attendance_link(self) -> crate::models::attendance_links::entities::AttendanceLink {
        use crate::models::attendance_links::entities::AttendanceLink;
        use chrono::{DateTime, Utc};

        AttendanceLink {
            id: self.id,
            teacher_id: self.teacher_id,
            class_code: self.class_code,
            class_name: self.class_name,
            token: self.token,
            link: self.link,
            created_at: DateTime::<Utc>::from_timestamp_millis(self.created_at)
                .unwrap_or_default(),
            expires_at: DateTime::<Utc>::from_timestamp_millis(self.expires_at)
                .unwrap_or_default(),
            usage_count: self.usage_count,
            max_usage: self.max_usage,
        }
    }
}
