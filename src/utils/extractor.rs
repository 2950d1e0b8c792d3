//! 路径参数提取器
//!
//! 在进入处理函数之前完成解析和校验，非法参数统一返回
//! InvalidParams 错误响应。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_class_code;

/// 构造 400 响应的辅助函数
fn invalid_param_error(message: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidParams,
        message,
    ));
    actix_web::error::InternalError::from_response(message.to_string(), response).into()
}

/// 从路径中提取正整数 ID
fn extract_positive_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| invalid_param_error(&format!("Invalid {name}: expected a positive integer")))
}

// 签到链接 ID
pub struct SafeLinkIdI64(pub i64);

impl FromRequest for SafeLinkIdI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_positive_i64(req, "link_id").map(SafeLinkIdI64))
    }
}

// 班级 ID
pub struct SafeClassIdI64(pub i64);

impl FromRequest for SafeClassIdI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_positive_i64(req, "class_id").map(SafeClassIdI64))
    }
}

// 班级代码
pub struct SafeClassCode(pub String);

impl FromRequest for SafeClassCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("code") {
            Some(code) => match validate_class_code(code) {
                Ok(()) => Ok(SafeClassCode(code.to_string())),
                Err(msg) => Err(invalid_param_error(msg)),
            },
            None => Err(invalid_param_error("Missing class code")),
        };
        ready(result)
    }
}
