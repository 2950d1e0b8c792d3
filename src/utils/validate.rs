//! 输入校验工具

use once_cell::sync::Lazy;
use regex::Regex;

/// 允许的链接有效时长（分钟）
pub const ALLOWED_DURATIONS: [i64; 7] = [15, 30, 60, 120, 240, 480, 1440];

/// 班级代码格式：2-32 位字母、数字、下划线或连字符
static CLASS_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{2,32}$").expect("invalid class code regex"));

/// 校验链接有效时长是否在允许的集合内
pub fn validate_duration_minutes(duration: i64) -> Result<(), &'static str> {
    if ALLOWED_DURATIONS.contains(&duration) {
        Ok(())
    } else {
        Err("Duration must be one of: 15, 30, 60, 120, 240, 480, 1440 minutes")
    }
}

/// 校验班级代码格式
pub fn validate_class_code(code: &str) -> Result<(), &'static str> {
    if CLASS_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err("Class code must be 2-32 characters of letters, digits, underscore or hyphen")
    }
}

/// 校验学生姓名：非空且不超过 64 个字符
pub fn validate_student_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err("Student name cannot be empty")
    } else if trimmed.chars().count() > 64 {
        Err("Student name too long (max 64 characters)")
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_durations() {
        for d in [15, 30, 60, 120, 240, 480, 1440] {
            assert!(validate_duration_minutes(d).is_ok(), "{d} should be allowed");
        }
        for d in [0, -60, 1, 45, 90, 2880] {
            assert!(validate_duration_minutes(d).is_err(), "{d} should be rejected");
        }
    }

    #[test]
    fn test_class_code_format() {
        assert!(validate_class_code("MATH101").is_ok());
        assert!(validate_class_code("cs-2024_a").is_ok());
        assert!(validate_class_code("ab").is_ok());

        assert!(validate_class_code("").is_err());
        assert!(validate_class_code("a").is_err());
        assert!(validate_class_code("has space").is_err());
        assert!(validate_class_code("数学101").is_err());
        assert!(validate_class_code(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_student_name() {
        assert!(validate_student_name("张三").is_ok());
        assert!(validate_student_name("  Alice  ").is_ok());
        assert!(validate_student_name("").is_err());
        assert!(validate_student_name("   ").is_err());
        assert!(validate_student_name(&"名".repeat(65)).is_err());
    }
}
