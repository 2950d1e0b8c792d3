use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考勤签到链接
//
// class_code / class_name 是创建时从班级冗余过来的副本，创建后不再变化，
// 班级改名不影响已发出的链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance_link.ts")]
pub struct AttendanceLink {
    // 链接ID
    pub id: i64,
    // 所属教师ID，链接只归属一个教师
    pub teacher_id: i64,
    // 班级代码
    pub class_code: String,
    // 班级名称
    pub class_name: String,
    // 签到令牌，活跃链接间唯一
    pub token: String,
    // 完整的签到 URL
    pub link: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 过期时间 = created_at + 有效时长
    pub expires_at: chrono::DateTime<chrono::Utc>,
    // 已使用次数，每次成功签到加一
    pub usage_count: i64,
    // 使用次数上限
    pub max_usage: i64,
}

impl AttendanceLink {
    /// 链接是否活跃：now 严格早于过期时间
    pub fn is_active(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        now < self.expires_at
    }

    /// 剩余有效时长（毫秒），已过期时为 0
    pub fn remaining_ms(&self, now: chrono::DateTime<chrono::Utc>) -> i64 {
        (self.expires_at - now).num_milliseconds().max(0)
    }

    /// 使用次数是否已达上限
    pub fn is_exhausted(&self) -> bool {
        self.usage_count >= self.max_usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn sample_link(id: i64, expires_in_secs: i64) -> AttendanceLink {
        let now = Utc::now();
        AttendanceLink {
            id,
            teacher_id: 1,
            class_code: "MATH101".to_string(),
            class_name: "Mathematics 101".to_string(),
            token: format!("tok{id}"),
            link: format!("http://localhost:3000/attendance?class=MATH101&token=tok{id}"),
            created_at: now,
            expires_at: now + Duration::seconds(expires_in_secs),
            usage_count: 0,
            max_usage: 30,
        }
    }

    #[test]
    fn test_active_boundary_is_strict() {
        let link = sample_link(1, 60);
        assert!(link.is_active(link.created_at));
        // now == expires_at 时不再活跃
        assert!(!link.is_active(link.expires_at));
        assert!(!link.is_active(link.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_remaining_ms_clamped_to_zero() {
        let link = sample_link(1, 60);
        assert_eq!(link.remaining_ms(link.created_at), 60_000);
        assert_eq!(link.remaining_ms(link.expires_at), 0);
        assert_eq!(link.remaining_ms(link.expires_at + Duration::hours(1)), 0);
    }

    #[test]
    fn test_exhausted() {
        let mut link = sample_link(1, 60);
        assert!(!link.is_exhausted());
        link.usage_count = 30;
        assert!(link.is_exhausted());
    }

    #[test]
    fn test_serde_round_trip_preserves_link_set() {
        let links = vec![sample_link(1, 120), sample_link(2, 3600)];
        let json = serde_json::to_string(&links).unwrap();
        let reloaded: Vec<AttendanceLink> = serde_json::from_str(&json).unwrap();
        assert_eq!(links, reloaded);
    }
}
