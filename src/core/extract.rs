//! 请求提取器：把 axum 的提取失败统一转换为 422 校验错误

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, ValidationDetail};

/// 请求体的逐字段校验规则
///
/// 返回空列表表示通过；否则每个出错字段对应一条错误，`loc` 形如 `["body", "<字段>"]`。
pub trait FieldRules {
    fn field_errors(body: &Value) -> Vec<ValidationDetail>;
}

/// JSON 请求体提取器
///
/// 未携带 `Content-Type` 时按 JSON 解析；携带了但不是 JSON 类型时拒绝。
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + FieldRules,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| value.to_str().unwrap_or_default().to_string());

        if let Some(content_type) = content_type.as_deref() {
            if !is_json_content_type(content_type) {
                return Err(body_error(
                    "Expected request with `Content-Type: application/json`",
                    "missing_content_type",
                ));
            }
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| body_error(rejection.body_text(), "body_unreadable"))?;

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| body_error(format!("JSON decode error: {e}"), "json_invalid"))?;

        let errors = T::field_errors(&body);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        serde_json::from_value(body)
            .map(ValidJson)
            .map_err(|e| body_error(e.to_string(), "value_error"))
    }
}

fn body_error(msg: impl Into<String>, kind: &str) -> ApiError {
    ApiError::Validation(vec![ValidationDetail::new(&["body"], msg, kind)])
}

/// `application/json` 或 `application/*+json`
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// 路径参数提取器
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ValidPath<T>(pub T);
