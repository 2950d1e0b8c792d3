//! SQL 辅助工具

/// 转义 LIKE 模式中的特殊字符
///
/// 用户输入作为 LIKE 模式时，`%`、`_` 和 `\` 需要转义，
/// 否则搜索 "100%" 会匹配所有以 100 开头的内容。
pub fn escape_like_pattern(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like_pattern("%_\\"), "\\%\\_\\\\");
    }
}
