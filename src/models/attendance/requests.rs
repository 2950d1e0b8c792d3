use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AttendanceStatus, VerificationMethod};

// 签到请求，class / token 来自签到链接 URL 的查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    #[serde(rename = "class")]
    pub class_code: String,
    pub token: String,
    pub student_id: i64,
    pub student_name: String,
    #[serde(default = "default_status")]
    pub status: AttendanceStatus,
    pub verification_method: VerificationMethod,
}

fn default_status() -> AttendanceStatus {
    AttendanceStatus::Present
}

// 签到报表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ReportQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_code: Option<String>,
    pub status: Option<AttendanceStatus>,
    // 按日期过滤，格式 YYYY-MM-DD（UTC）
    pub date: Option<String>,
}

// 签到记录列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct ReportListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_code: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub date: Option<chrono::NaiveDate>,
}

// 统计查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StatsQueryParams {
    pub class_code: Option<String>,
}
