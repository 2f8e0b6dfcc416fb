//! Models API surface.

use std::sync::Arc;

use genai_prompt_types::content::Content;
use genai_prompt_types::converters;
use genai_prompt_types::models::{GenerateContentConfig, GenerateContentRequest};
use genai_prompt_types::response::GenerateContentResponse;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::ClientInner;
use crate::error::{Error, Result};

mod urls;

use urls::build_model_method_url;

#[derive(Clone)]
pub struct Models {
    pub(crate) inner: Arc<ClientInner>,
}

impl Models {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 生成内容（默认配置）。
    pub async fn generate_content(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse> {
        self.generate_content_with_config(model, contents, GenerateContentConfig::default())
            .await
    }

    /// 生成内容（自定义配置）。
    ///
    /// 非成功状态码映射为 [`Error::Auth`] 或 [`Error::ApiError`]，不做重试。
    pub async fn generate_content_with_config(
        &self,
        model: impl Into<String>,
        contents: Vec<Content>,
        config: GenerateContentConfig,
    ) -> Result<GenerateContentResponse> {
        let model = model.into();
        if contents.is_empty() {
            return Err(Error::InvalidConfig {
                message: "At least one content is required".into(),
            });
        }

        let url = build_model_method_url(&self.inner, &model, "generateContent")?;
        let request = GenerateContentRequest::new(contents, config);
        let body = converters::generate_content_request_to_mldev(&request)?;

        debug!(model = %model, "generateContent");
        let request = self.inner.http.post(url).json(&body);
        let response = self.inner.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_response(status, body));
        }

        let body = self.inner.read_body(response).await?;
        let value = serde_json::from_slice::<Value>(&body).map_err(|err| Error::Parse {
            message: format!("generateContent response is not JSON: {err}"),
        })?;
        let result = converters::generate_content_response_from_mldev(value).map_err(|err| {
            Error::Parse {
                message: format!("Unexpected generateContent response: {err}"),
            }
        })?;

        if result.text().is_none_or(|text| text.is_empty()) {
            match result.block_reason() {
                Some(reason) => warn!(?reason, "prompt was blocked; no text returned"),
                None => warn!(
                    finish_reason = ?result.finish_reason(),
                    "response contained no text"
                ),
            }
        }
        Ok(result)
    }
}
