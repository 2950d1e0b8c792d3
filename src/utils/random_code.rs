//! 随机令牌生成

use rand::Rng;

/// 令牌字符集：小写字母 + 数字，与 URL 查询参数天然兼容
const TOKEN_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 生成指定长度的随机令牌
pub fn generate_token(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        assert_eq!(generate_token(9).len(), 9);
        assert_eq!(generate_token(32).len(), 32);
        assert_eq!(generate_token(0).len(), 0);
    }

    #[test]
    fn test_token_charset() {
        let token = generate_token(200);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_tokens_differ() {
        // 9 位 36 字符令牌碰撞概率可以忽略
        let a = generate_token(9);
        let b = generate_token(9);
        assert_ne!(a, b);
    }
}
