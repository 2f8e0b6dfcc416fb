//! Prompt runner: one request, one line of output.

use std::io::Write;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::generator::{GenerateRequest, TextGenerator};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Default prompt text.
pub const DEFAULT_PROMPT: &str = "Explain how AI works in a few words";

/// 运行结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 服务端返回了文本。
    Text(String),
    /// 服务端成功响应但没有文本；输出一个空行。
    Empty,
}

impl RunOutcome {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Empty => "",
        }
    }
}

/// 发送一次 prompt 并把结果写到输出流。
pub struct PromptRunner<G> {
    generator: G,
}

impl<G: TextGenerator> PromptRunner<G> {
    pub const fn new(generator: G) -> Self {
        Self { generator }
    }

    /// 发送请求，成功后写出文本并追加换行。
    ///
    /// 出错时不向 `out` 写任何内容，错误原样返回给调用方。
    ///
    /// # Errors
    /// 当请求失败或写出失败时返回错误。
    pub async fn run<W: Write>(&self, request: GenerateRequest, out: &mut W) -> Result<RunOutcome> {
        if request.prompt.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "Prompt must not be empty".into(),
            });
        }

        info!(model = %request.model, "sending prompt");
        let outcome = match self.generator.generate(request).await? {
            Some(text) => RunOutcome::Text(text),
            None => RunOutcome::Empty,
        };
        debug!(bytes = outcome.text().len(), "writing response");

        writeln!(out, "{}", outcome.text())?;
        out.flush()?;
        Ok(outcome)
    }
}
