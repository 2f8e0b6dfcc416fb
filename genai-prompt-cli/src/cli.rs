//! CLI argument definitions and run configuration.

use clap::Parser;
use genai_prompt::types::config::GenerationConfig;
use genai_prompt::types::content::Content;
use genai_prompt::types::models::GenerateContentConfig;
use genai_prompt::{Error, GenerateRequest, Result, DEFAULT_MODEL, DEFAULT_PROMPT};

/// Send one prompt to Gemini and print the reply.
///
/// The API key is read from GEMINI_API_KEY (or GOOGLE_API_KEY).
#[derive(Parser, Debug)]
#[command(name = "gprompt", version, about)]
pub struct Cli {
    /// Model identifier, e.g. gemini-3-flash-preview
    #[arg(short, long, env = "GENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Prompt text to send
    #[arg(short, long, env = "GENAI_PROMPT", default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "GENAI_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Optional system instruction
    #[arg(long)]
    pub system: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    pub max_output_tokens: Option<i32>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// 解析并校验后的运行配置。
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub model: String,
    pub prompt: String,
    pub timeout: Option<u64>,
    pub system: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<i32>,
}

impl TryFrom<Cli> for RunConfig {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let model = cli.model.trim().to_string();
        if model.is_empty() {
            return Err(Error::InvalidConfig {
                message: "Model identifier must not be empty".into(),
            });
        }
        if cli.prompt.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "Prompt must not be empty".into(),
            });
        }
        if let Some(temperature) = cli.temperature {
            if !temperature.is_finite() || temperature < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!(
                        "Temperature must be a non-negative number, got {temperature}"
                    ),
                });
            }
        }
        let system = cli.system.filter(|system| !system.trim().is_empty());

        Ok(Self {
            model,
            prompt: cli.prompt,
            timeout: cli.timeout,
            system,
            temperature: cli.temperature,
            max_output_tokens: cli.max_output_tokens,
        })
    }
}

impl RunConfig {
    /// 组装发往生成后端的请求。
    #[must_use]
    pub fn to_request(&self) -> GenerateRequest {
        let generation_config = GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };
        let config = GenerateContentConfig {
            system_instruction: self.system.as_deref().map(Content::text),
            generation_config: Some(generation_config),
        };
        GenerateRequest::new(&self.model, &self.prompt).with_config(config)
    }
}
