//! Error definitions for the client.

use genai_prompt_types::converters::api_error_from_body;
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Auth error (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Missing credential: {message}")]
    MissingCredential { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Timeout: {message}")]
    Timeout { message: String },
}

/// 错误分类，供 CLI 映射退出码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 凭据缺失或为空（未发出任何请求）。
    Credential,
    /// 服务端拒绝凭据。
    Authentication,
    /// 连接失败或超时。
    Network,
    /// 服务端返回非成功状态。
    Service,
    /// 本地配置无效。
    Config,
    Internal,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential { .. } => ErrorKind::Credential,
            Self::Auth { .. } => ErrorKind::Authentication,
            Self::Timeout { .. } => ErrorKind::Network,
            Self::HttpClient { source } => {
                if source.is_builder() {
                    ErrorKind::Config
                } else if source.is_decode() {
                    ErrorKind::Internal
                } else {
                    ErrorKind::Network
                }
            }
            Self::ApiError { .. } => ErrorKind::Service,
            Self::InvalidConfig { .. } => ErrorKind::Config,
            Self::Parse { .. } | Self::Serialization { .. } | Self::Io { .. } => {
                ErrorKind::Internal
            }
        }
    }

    /// 由非成功的 HTTP 响应构造错误。
    ///
    /// 401/403，以及标记了无效 API key 的 400，归为 [`Error::Auth`]；
    /// 其余归为 [`Error::ApiError`]。消息优先取 Google 错误体中的 `message`。
    pub(crate) fn from_response(status: StatusCode, body: String) -> Self {
        let parsed = api_error_from_body(&body);
        let key_rejected = parsed.as_ref().is_some_and(|err| {
            err.reasons()
                .iter()
                .any(|reason| matches!(*reason, "API_KEY_INVALID" | "API_KEY_EXPIRED"))
                || err.status.as_deref() == Some("UNAUTHENTICATED")
                || err.status.as_deref() == Some("PERMISSION_DENIED")
        });
        let message = parsed
            .and_then(|err| err.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(body);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || key_rejected {
            Self::Auth {
                status: status.as_u16(),
                message,
            }
        } else {
            Self::ApiError {
                status: status.as_u16(),
                message,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_api_key_is_auth_error() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{"reason": "API_KEY_INVALID"}]
            }
        })
        .to_string();
        let err = Error::from_response(StatusCode::BAD_REQUEST, body);
        let Error::Auth { status, message } = &err else {
            panic!("expected auth error, got {err:?}");
        };
        assert_eq!(*status, 400);
        assert!(message.starts_with("API key not valid"));
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn forbidden_is_auth_error_even_without_body() {
        let err = Error::from_response(StatusCode::FORBIDDEN, String::new());
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn unknown_model_is_service_error() {
        let body = json!({
            "error": {
                "code": 404,
                "message": "models/nope is not found for API version v1beta",
                "status": "NOT_FOUND"
            }
        })
        .to_string();
        let err = Error::from_response(StatusCode::NOT_FOUND, body);
        let Error::ApiError { status, message } = &err else {
            panic!("expected api error, got {err:?}");
        };
        assert_eq!(*status, 404);
        assert!(message.contains("models/nope"));
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[test]
    fn raw_body_is_kept_when_not_google_shape() {
        let err = Error::from_response(StatusCode::BAD_GATEWAY, "upstream reset".into());
        let Error::ApiError { status, message } = &err else {
            panic!("expected api error, got {err:?}");
        };
        assert_eq!(*status, 502);
        assert_eq!(message, "upstream reset");
    }

    #[test]
    fn local_errors_are_classified() {
        let err = Error::MissingCredential {
            message: "GEMINI_API_KEY not set".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Credential);

        let err = Error::InvalidConfig {
            message: "bad".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = Error::Timeout {
            message: "30s".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
