use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{Language, Outcome};

/// 对话内容。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// 角色：user/model。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// 消息内容片段。
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// 创建用户文本消息。
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_parts(vec![Part::text(text)], Role::User)
    }

    /// 从 parts 构建内容。
    #[must_use]
    pub const fn from_parts(parts: Vec<Part>, role: Role) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }

    /// 提取第一段文本。
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| part.text_value())
    }

    /// 拼接所有非思考文本片段；没有任何文本片段时返回 `None`。
    #[must_use]
    pub fn joined_text(&self) -> Option<String> {
        let mut texts = self
            .parts
            .iter()
            .filter(|part| !part.is_thought())
            .filter_map(Part::text_value)
            .peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

/// 内容角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// 内容部分。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// 具体内容变体。
    #[serde(flatten)]
    pub kind: PartKind,
    /// 是否为思考内容。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    /// 思考签名（服务端返回的 base64 字符串，原样保留）。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

impl Part {
    /// 创建文本 Part。
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_kind(PartKind::Text { text: text.into() })
    }

    /// 创建内联数据 Part（`data` 为 base64 编码）。
    pub fn inline_data(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::from_kind(PartKind::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        })
    }

    /// 设置是否为思考内容。
    #[must_use]
    pub const fn with_thought(mut self, thought: bool) -> Self {
        self.thought = Some(thought);
        self
    }

    /// 获取文本内容（仅当为 Text Part）。
    #[must_use]
    pub const fn text_value(&self) -> Option<&str> {
        match &self.kind {
            PartKind::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }

    const fn from_kind(kind: PartKind) -> Self {
        Self {
            kind,
            thought: None,
            thought_signature: None,
        }
    }
}

/// 内容部分的具体变体。
///
/// 未识别的片段落入 [`PartKind::Unknown`]，不影响同一响应中其他文本的解析。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum PartKind {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponse,
    },
    ExecutableCode {
        #[serde(rename = "executableCode")]
        executable_code: ExecutableCode,
    },
    CodeExecutionResult {
        #[serde(rename = "codeExecutionResult")]
        code_execution_result: CodeExecutionResult,
    },
    Unknown(Map<String, Value>),
}

/// 内联数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// URI 文件数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// 函数调用。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}

/// 函数响应。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// 模型生成的可执行代码。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableCode {
    pub code: String,
    pub language: Language,
}

/// 代码执行结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExecutionResult {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_first_text_skips_non_text() {
        let content = Content::from_parts(
            vec![
                Part::inline_data("AQID", "image/png"),
                Part::text("first"),
                Part::text("second"),
            ],
            Role::User,
        );
        assert_eq!(content.first_text(), Some("first"));
    }

    #[test]
    fn joined_text_skips_thoughts() {
        let content = Content::from_parts(
            vec![
                Part::text("thinking...").with_thought(true),
                Part::text("AI learns "),
                Part::text("patterns."),
            ],
            Role::Model,
        );
        assert_eq!(content.joined_text().as_deref(), Some("AI learns patterns."));
    }

    #[test]
    fn joined_text_is_none_without_text_parts() {
        let content =
            Content::from_parts(vec![Part::inline_data("AQID", "image/png")], Role::Model);
        assert_eq!(content.joined_text(), None);

        let empty = Content::from_parts(Vec::new(), Role::Model);
        assert_eq!(empty.joined_text(), None);
    }

    #[test]
    fn user_text_serializes_as_wire_shape() {
        let value = serde_json::to_value(Content::text("hello")).unwrap();
        assert_eq!(value, json!({"role": "user", "parts": [{"text": "hello"}]}));
    }

    #[test]
    fn function_call_part_deserializes_from_camel_case() {
        let value = json!({
            "functionCall": {
                "name": "add_numbers",
                "args": { "a": 2.5, "b": 3.1 }
            },
            "thoughtSignature": "AQID"
        });
        let part: Part = serde_json::from_value(value).unwrap();
        let PartKind::FunctionCall { function_call } = &part.kind else {
            panic!("expected function call, got {:?}", part.kind);
        };
        assert_eq!(function_call.name.as_deref(), Some("add_numbers"));
        assert_eq!(part.thought_signature.as_deref(), Some("AQID"));
        assert_eq!(part.text_value(), None);
    }

    #[test]
    fn code_execution_parts_deserialize_next_to_text() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"text": "Let me compute that. "},
                {"executableCode": {"language": "PYTHON", "code": "print(2 + 2)"}},
                {"codeExecutionResult": {"outcome": "OUTCOME_OK", "output": "4\n"}},
                {"text": "The answer is 4."}
            ]
        }))
        .unwrap();

        let PartKind::ExecutableCode { executable_code } = &content.parts[1].kind else {
            panic!("expected executable code, got {:?}", content.parts[1].kind);
        };
        assert_eq!(executable_code.language, Language::Python);
        let PartKind::CodeExecutionResult {
            code_execution_result,
        } = &content.parts[2].kind
        else {
            panic!("expected execution result, got {:?}", content.parts[2].kind);
        };
        assert_eq!(code_execution_result.outcome, Outcome::OutcomeOk);
        assert_eq!(
            content.joined_text().as_deref(),
            Some("Let me compute that. The answer is 4.")
        );
    }

    #[test]
    fn unrecognized_part_is_kept_as_unknown() {
        let part: Part = serde_json::from_value(json!({
            "videoMetadata": {"startOffset": "1s"},
            "thoughtSignature": "AQID"
        }))
        .unwrap();
        let PartKind::Unknown(fields) = &part.kind else {
            panic!("expected unknown part, got {:?}", part.kind);
        };
        assert!(fields.contains_key("videoMetadata"));
        assert_eq!(part.thought_signature.as_deref(), Some("AQID"));
        assert_eq!(part.text_value(), None);
    }

    #[test]
    fn thought_part_deserializes() {
        let part: Part = serde_json::from_value(json!({"text": "hmm", "thought": true})).unwrap();
        assert!(part.is_thought());
        assert_eq!(part.text_value(), Some("hmm"));
    }
}
