//! Narrow text-generation interface.
//!
//! The runner only needs `generate(model, prompt) -> text`; [`Models`] implements it over HTTP and
//! tests can substitute an in-memory implementation.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use genai_prompt_types::content::Content;
use genai_prompt_types::models::GenerateContentConfig;

use crate::client::Client;
use crate::error::Result;
use crate::models::Models;

/// 单次文本生成请求。
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// 附加生成配置（system instruction、temperature 等）。
    pub config: GenerateContentConfig,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            config: GenerateContentConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GenerateContentConfig) -> Self {
        self.config = config;
        self
    }
}

/// 文本生成后端。
///
/// 返回 `Ok(None)` 表示服务端成功响应但没有文本。
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: GenerateRequest) -> BoxFuture<'_, Result<Option<String>>>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, request: GenerateRequest) -> BoxFuture<'_, Result<Option<String>>> {
        (**self).generate(request)
    }
}

impl TextGenerator for Models {
    fn generate(&self, request: GenerateRequest) -> BoxFuture<'_, Result<Option<String>>> {
        async move {
            let GenerateRequest {
                model,
                prompt,
                config,
            } = request;
            let response = self
                .generate_content_with_config(model, vec![Content::text(prompt)], config)
                .await?;
            Ok(response.text())
        }
        .boxed()
    }
}

impl TextGenerator for Client {
    fn generate(&self, request: GenerateRequest) -> BoxFuture<'_, Result<Option<String>>> {
        let models = self.models();
        async move { models.generate(request).await }.boxed()
    }
}
