//! Completion client trait

use async_trait::async_trait;
use serde::Serialize;

use crate::InferenceError;

pub type InferenceResult<T> = Result<T, InferenceError>;

/// Sampling parameters sent alongside a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
}

/// Body of a `/v1/completions` call; sampling fields are flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the first choice's text, trimmed.
    async fn complete(&self, request: &CompletionRequest) -> InferenceResult<String>;

    /// Model identifier requests are sent with
    fn model(&self) -> &str;
}
