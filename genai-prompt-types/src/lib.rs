//! Wire types for the genai-prompt Gemini client.

pub mod config;
pub mod content;
pub mod converters;
pub mod enums;
pub mod models;
pub mod response;
