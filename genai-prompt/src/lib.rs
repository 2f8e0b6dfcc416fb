//! Gemini prompt runner: a thin client for `generateContent` plus the runner that prints its text.

pub mod client;
pub mod error;
pub mod generator;
pub mod models;
pub mod runner;

#[cfg(test)]
mod test_support;

pub use genai_prompt_types as types;

pub use client::{ApiKey, Client, ClientBuilder, ClientConfig, HttpOptions};
pub use error::{Error, ErrorKind, Result};
pub use generator::{GenerateRequest, TextGenerator};
pub use runner::{PromptRunner, RunOutcome, DEFAULT_MODEL, DEFAULT_PROMPT};
