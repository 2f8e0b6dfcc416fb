//! Converter module.

use serde_json::Value;

use crate::models::GenerateContentRequest;
use crate::response::{ApiErrorResponse, ApiErrorStatus, GenerateContentResponse};

/// `GenerateContent` 请求转换（Gemini API）。
///
/// # Errors
/// 当序列化失败时返回错误。
pub fn generate_content_request_to_mldev(
    request: &GenerateContentRequest,
) -> Result<Value, serde_json::Error> {
    serde_json::to_value(request)
}

/// `GenerateContent` 响应转换（Gemini API）。
///
/// # Errors
/// 当反序列化失败时返回错误。
pub fn generate_content_response_from_mldev(
    value: Value,
) -> Result<GenerateContentResponse, serde_json::Error> {
    serde_json::from_value(value)
}

/// 从错误响应体中解析 Google API 错误；不是标准错误结构时返回 `None`。
#[must_use]
pub fn api_error_from_body(body: &str) -> Option<ApiErrorStatus> {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .map(|response| response.error)
}
