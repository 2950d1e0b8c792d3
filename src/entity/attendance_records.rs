//! 签到记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub link_id: i64,
    pub class_code: String,
    pub class_name: String,
    pub student_id: i64,
    pub student_name: String,
    pub status: String,
    pub verification_method: String,
    pub marked_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_links::Entity",
        from = "Column::LinkId",
        to = "super::attendance_links::Column::Id"
    )]
    AttendanceLink,
}

impl Related<super::attendance_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_attendance_record(self) -> crate::models::attendance::entities::AttendanceRecord {
        use crate::models::attendance::entities::{
            AttendanceRecord, AttendanceStatus, VerificationMethod,
        };
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        AttendanceRecord {
            id: self.id,
            link_id: self.link_id,
            class_code: self.class_code,
            class_name: self.class_name,
            student_id: self.student_id,
            student_name: self.student_name,
            status: AttendanceStatus::from_str(&self.status)
                .unwrap_or(AttendanceStatus::Present),
            verification_method: VerificationMethod::from_str(&self.verification_method)
                .unwrap_or(VerificationMethod::FaceRecognition),
            marked_at: DateTime::<Utc>::from_timestamp_millis(self.marked_at).unwrap_or_default(),
        }
    }
}
