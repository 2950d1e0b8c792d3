use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 签到状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present, // 出勤
    Late,    // 迟到
    Absent,  // 缺勤
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "present";
    pub const LATE: &'static str = "late";
    pub const ABSENT: &'static str = "absent";
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AttendanceStatus::PRESENT => Ok(AttendanceStatus::Present),
            AttendanceStatus::LATE => Ok(AttendanceStatus::Late),
            AttendanceStatus::ABSENT => Ok(AttendanceStatus::Absent),
            _ => Err(serde::de::Error::custom(format!(
                "无效的签到状态: '{s}'. 支持的状态: present, late, absent"
            ))),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "{}", AttendanceStatus::PRESENT),
            AttendanceStatus::Late => write!(f, "{}", AttendanceStatus::LATE),
            AttendanceStatus::Absent => write!(f, "{}", AttendanceStatus::ABSENT),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "late" => Ok(AttendanceStatus::Late),
            "absent" => Ok(AttendanceStatus::Absent),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

// 验证方式
//
// 原系统的人脸/指纹验证只是前端模拟，这里仅作为记录上的标签保存，
// 不做任何真实校验
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum VerificationMethod {
    FaceRecognition,
    Fingerprint,
}

impl VerificationMethod {
    pub const FACE_RECOGNITION: &'static str = "face_recognition";
    pub const FINGERPRINT: &'static str = "fingerprint";
}

impl<'de> Deserialize<'de> for VerificationMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            VerificationMethod::FACE_RECOGNITION => Ok(VerificationMethod::FaceRecognition),
            VerificationMethod::FINGERPRINT => Ok(VerificationMethod::Fingerprint),
            _ => Err(serde::de::Error::custom(format!(
                "无效的验证方式: '{s}'. 支持的方式: face_recognition, fingerprint"
            ))),
        }
    }
}

impl std::fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationMethod::FaceRecognition => {
                write!(f, "{}", VerificationMethod::FACE_RECOGNITION)
            }
            VerificationMethod::Fingerprint => write!(f, "{}", VerificationMethod::FINGERPRINT),
        }
    }
}

impl std::str::FromStr for VerificationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "face_recognition" => Ok(VerificationMethod::FaceRecognition),
            "fingerprint" => Ok(VerificationMethod::Fingerprint),
            _ => Err(format!("Invalid verification method: {s}")),
        }
    }
}

// 签到记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    // 来源签到链接ID
    pub link_id: i64,
    pub class_code: String,
    pub class_name: String,
    pub student_id: i64,
    pub student_name: String,
    pub status: AttendanceStatus,
    pub verification_method: VerificationMethod,
    pub marked_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for s in ["present", "late", "absent"] {
            assert_eq!(AttendanceStatus::from_str(s).unwrap().to_string(), s);
        }
        assert!(AttendanceStatus::from_str("excused").is_err());
    }

    #[test]
    fn test_method_round_trip() {
        for s in ["face_recognition", "fingerprint"] {
            assert_eq!(VerificationMethod::from_str(s).unwrap().to_string(), s);
        }
        assert!(VerificationMethod::from_str("password").is_err());
    }
}
