use crate::models::common::pagination::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 创建签到链接请求
//
// duration_minutes 只接受枚举值 15/30/60/120/240/480/1440，
// max_usage 缺省时取班级人数，班级人数为 0 再回退到配置默认值。
// 所有缺省值都在服务层构造链接时一次性补齐
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct CreateLinkRequest {
    pub teacher_id: i64,
    pub class_code: String,
    pub duration_minutes: Option<i64>,
    pub max_usage: Option<i64>,
}

// 链接查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct LinkQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: i64,
    pub class_code: Option<String>,
}

// 链接列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct LinkListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub class_code: Option<String>,
}

// 签到页解析链接的查询参数，对应生成 URL 里的 ?class=..&token=..
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct ResolveLinkQuery {
    #[serde(rename = "class")]
    pub class_code: String,
    pub token: String,
}
