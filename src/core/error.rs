//! 核心错误处理模块

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

/// 产品不存在时返回给客户端的固定信息
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("请求校验失败: {0:?}")]
    Validation(Vec<ValidationDetail>),
    #[error("不支持的请求方法")]
    MethodNotAllowed,
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 单条校验错误，`loc` 指出出错位置，例如 `["body"]` 或 `["path", "product_id"]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationDetail {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

impl ApiError {
    pub fn product_not_found() -> Self {
        ApiError::NotFound(PRODUCT_NOT_FOUND.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(msg) => json!({ "detail": msg }),
            ApiError::Validation(details) => {
                debug!("请求校验失败: {:?}", details);
                json!({ "detail": details })
            }
            ApiError::MethodNotAllowed => json!({ "detail": "Method Not Allowed" }),
            ApiError::Internal(msg) => {
                error!("内部错误: {}", msg);
                json!({ "detail": "Internal Server Error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => {
                ApiError::Validation(vec![ValidationDetail::new(
                    &["path", "product_id"],
                    e.body_text(),
                    "int_parsing",
                )])
            }
            other => ApiError::Internal(other.body_text()),
        }
    }
}
