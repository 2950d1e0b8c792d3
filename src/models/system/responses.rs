use serde::Serialize;
use ts_rs::TS;

// 系统状态响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemStatusResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    // 进程启动至今的秒数
    pub uptime_secs: i64,
    // 当前活跃（未过期）的签到链接数
    pub active_links: i64,
}
