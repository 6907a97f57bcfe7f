//! Together-compatible `/v1/completions` client

use std::time::Duration;

use async_trait::async_trait;
use codepad_config::InferenceSettings;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{CompletionClient, CompletionRequest, InferenceError, InferenceResult};

pub struct TogetherClient {
    client: Client,
    settings: InferenceSettings,
    api_key: Option<SecretString>,
}

impl TogetherClient {
    pub fn new(settings: InferenceSettings) -> InferenceResult<Self> {
        let api_key = settings
            .resolve_api_key()
            .map_err(|e| InferenceError::Configuration(format!("{:#}", e)))?;
        if api_key.is_none() {
            tracing::warn!(
                env = %settings.api_key_env,
                "no inference API key configured, completion requests will be unauthenticated"
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/completions", self.settings.base_url_trimmed())
    }
}

#[async_trait]
impl CompletionClient for TogetherClient {
    async fn complete(&self, request: &CompletionRequest) -> InferenceResult<String> {
        let mut builder = self.client.post(self.completions_url()).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api { status, body });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text.trim().to_string())
            .ok_or_else(|| InferenceError::InvalidResponse("response has no choices".to_string()))
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}
