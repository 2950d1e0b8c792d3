pub mod attendance;
pub mod attendance_links;
pub mod classes;
pub mod common;
pub mod system;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

// 业务错误码，随 ApiResponse 返回给前端
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 (1xxx)
    InternalServerError = 1000,
    InvalidParams = 1001,
    RateLimitExceeded = 1002,

    // 班级相关错误 (2xxx)
    ClassNotFound = 2001,
    ClassAlreadyExists = 2002,
    ClassCreationFailed = 2003,
    ClassDeleteFailed = 2004,

    // 考勤链接相关错误 (3xxx)
    LinkNotFound = 3001,
    LinkExpired = 3002,
    LinkUsageExceeded = 3003,
    LinkCreationFailed = 3004,
    LinkDeleteFailed = 3005,
    InvalidDuration = 3006,

    // 签到相关错误 (4xxx)
    AttendanceMarkFailed = 4001,
    InvalidAttendanceStatus = 4002,
}

// 程序启动时间，用于系统状态接口的运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
