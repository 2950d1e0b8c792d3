use serde::Serialize;
use ts_rs::TS;

use super::entities::AttendanceRecord;
use crate::models::common::pagination::PaginationInfo;

// 签到成功响应：记录本身加上链接的最新使用计数
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub record: AttendanceRecord,
    pub usage_count: i64,
    pub max_usage: i64,
}

// 签到报表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceReportResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<AttendanceRecord>,
}

// 签到统计响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceStatsResponse {
    pub total_records: i64,
    pub present: i64,
    pub late: i64,
    pub absent: i64,
    pub active_links: i64,
}
