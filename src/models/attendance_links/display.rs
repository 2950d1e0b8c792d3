//! 链接展示信息的纯函数计算
//!
//! 前端以 1 秒间隔轮询倒计时，这里不做任何定时器调度，
//! 所有展示字段都是 (link, now) 的纯函数。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::AttendanceLink;

// 5 分钟 / 15 分钟的紧急度阈值（毫秒），边界值本身落在更紧急的一档
const URGENT_THRESHOLD_MS: i64 = 5 * 60 * 1000;
const WARNING_THRESHOLD_MS: i64 = 15 * 60 * 1000;

// 倒计时紧急度
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub enum UrgencyLevel {
    Urgent,  // 剩余 <= 5 分钟（含已过期）
    Warning, // 剩余 <= 15 分钟
    Normal,
}

// 链接的展示信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct LinkDisplay {
    pub time_remaining: String,
    pub remaining_ms: i64,
    pub progress_percentage: f64,
    pub urgency_level: UrgencyLevel,
}

/// 计算链接的倒计时展示信息
pub fn decorate_for_display(link: &AttendanceLink, now: DateTime<Utc>) -> LinkDisplay {
    let remaining_ms = link.remaining_ms(now);
    LinkDisplay {
        time_remaining: format_time_remaining(remaining_ms),
        remaining_ms,
        progress_percentage: progress_percentage(link.usage_count, link.max_usage),
        urgency_level: urgency_level(remaining_ms),
    }
}

/// 剩余时长的人类可读格式：`2h 5m 30s` / `5m 30s` / `30s` / `Expired`
pub fn format_time_remaining(remaining_ms: i64) -> String {
    if remaining_ms <= 0 {
        return "Expired".to_string();
    }

    let total_secs = remaining_ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// 使用进度百分比，max_usage 为 0 时记为 100%
pub fn progress_percentage(usage_count: i64, max_usage: i64) -> f64 {
    if max_usage <= 0 {
        return 100.0;
    }
    usage_count as f64 / max_usage as f64 * 100.0
}

/// 三档紧急度，边界值落在更紧急的一档：恰好 5:00 为 urgent，恰好 15:00 为 warning
pub fn urgency_level(remaining_ms: i64) -> UrgencyLevel {
    if remaining_ms <= URGENT_THRESHOLD_MS {
        UrgencyLevel::Urgent
    } else if remaining_ms <= WARNING_THRESHOLD_MS {
        UrgencyLevel::Warning
    } else {
        UrgencyLevel::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link_expiring_in(ms: i64) -> AttendanceLink {
        let now = Utc::now();
        AttendanceLink {
            id: 1,
            teacher_id: 1,
            class_code: "MATH101".to_string(),
            class_name: "Mathematics 101".to_string(),
            token: "abc123".to_string(),
            link: "http://localhost:3000/attendance?class=MATH101&token=abc123".to_string(),
            created_at: now - Duration::minutes(5),
            expires_at: now + Duration::milliseconds(ms),
            usage_count: 12,
            max_usage: 30,
        }
    }

    #[test]
    fn test_urgency_boundaries_exact() {
        // 恰好 5:00 -> urgent，5:01 -> warning
        assert_eq!(urgency_level(5 * 60 * 1000), UrgencyLevel::Urgent);
        assert_eq!(urgency_level(5 * 60 * 1000 + 1000), UrgencyLevel::Warning);
        // 恰好 15:00 -> warning，15:01 -> normal
        assert_eq!(urgency_level(15 * 60 * 1000), UrgencyLevel::Warning);
        assert_eq!(urgency_level(15 * 60 * 1000 + 1000), UrgencyLevel::Normal);
    }

    #[test]
    fn test_expired_link_is_urgent_with_zero_remaining() {
        let link = link_expiring_in(60_000);
        let display = decorate_for_display(&link, link.expires_at);
        assert_eq!(display.remaining_ms, 0);
        assert_eq!(display.time_remaining, "Expired");
        assert_eq!(display.urgency_level, UrgencyLevel::Urgent);

        let display = decorate_for_display(&link, link.expires_at + Duration::minutes(10));
        assert_eq!(display.remaining_ms, 0);
        assert_eq!(display.urgency_level, UrgencyLevel::Urgent);
    }

    #[test]
    fn test_format_time_remaining() {
        assert_eq!(format_time_remaining(0), "Expired");
        assert_eq!(format_time_remaining(-5), "Expired");
        assert_eq!(format_time_remaining(45_000), "45s");
        assert_eq!(format_time_remaining(150_000), "2m 30s");
        assert_eq!(format_time_remaining(7_530_000), "2h 5m 30s");
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(12, 30), 40.0);
        assert_eq!(progress_percentage(0, 30), 0.0);
        assert_eq!(progress_percentage(30, 30), 100.0);
        assert_eq!(progress_percentage(5, 0), 100.0);
    }

    #[test]
    fn test_decorate_uses_usage_progress() {
        let link = link_expiring_in(30 * 60 * 1000);
        let display = decorate_for_display(&link, Utc::now());
        assert_eq!(display.urgency_level, UrgencyLevel::Normal);
        assert_eq!(display.progress_percentage, 40.0);
    }
}
