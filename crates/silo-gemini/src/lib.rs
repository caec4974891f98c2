//! Silo Gemini - Gemini embedding client.
//!
//! Async client for the Gemini `embedContent` REST API. One call per text
//! fragment; retry and pacing policy belong to the caller.

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::{GeminiError, GeminiResult};
pub use types::*;
