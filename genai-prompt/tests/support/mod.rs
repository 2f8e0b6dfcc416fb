#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use genai_prompt::Client;

pub const GENERATE_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

pub fn build_gemini_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }
        ],
        "modelVersion": "gemini-3-flash-preview"
    })
}

pub fn google_error(code: u16, status: &str, message: &str) -> Value {
    json!({
        "error": {"code": code, "message": message, "status": status}
    })
}

pub async fn mount_generate(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}
