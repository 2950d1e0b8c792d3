use serde::Serialize;
use ts_rs::TS;

use super::display::LinkDisplay;
use super::entities::AttendanceLink;
use crate::models::common::pagination::PaginationInfo;

// 带倒计时展示信息的链接
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct DecoratedLink {
    #[serde(flatten)]
    #[ts(flatten)]
    pub link: AttendanceLink,
    pub display: LinkDisplay,
}

// 链接列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct LinkListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<DecoratedLink>,
}
