use crate::client::ClientInner;
use crate::error::{Error, Result};

/// 补全模型资源名：`gemini-x` -> `models/gemini-x`，已带前缀的原样保留。
pub(super) fn transform_model_name(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

pub(super) fn validate_model_name(model: &str) -> Result<()> {
    let trimmed = model.trim();
    if trimmed.is_empty() || trimmed == "models/" {
        return Err(Error::InvalidConfig {
            message: "Model identifier must not be empty".into(),
        });
    }
    if trimmed.chars().any(|ch| ch.is_whitespace() || ch == '?' || ch == '#') {
        return Err(Error::InvalidConfig {
            message: format!("Invalid model identifier: {model}"),
        });
    }
    Ok(())
}

pub(super) fn build_model_method_url(
    inner: &ClientInner,
    model: &str,
    method: &str,
) -> Result<String> {
    validate_model_name(model)?;
    let model = transform_model_name(model.trim());
    let base = &inner.api_client.base_url;
    let version = &inner.api_client.api_version;
    Ok(format!("{base}{version}/{model}:{method}"))
}
