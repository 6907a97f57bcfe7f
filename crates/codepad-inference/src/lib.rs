//! Inference gateway: forwards templated prompts to a text-completion API
//! and relays the first choice's text.

pub mod client;
pub mod error;
pub mod gateway;
pub mod routes;
pub mod together;

pub use client::{CompletionClient, CompletionRequest, InferenceResult, SamplingParams};
pub use error::InferenceError;
pub use gateway::InferenceGateway;
pub use routes::CompletionRoute;
pub use together::TogetherClient;
