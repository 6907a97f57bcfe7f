use std::sync::Arc;

use crate::routes::{explain_prompt, fix_prompt, generate_prompt};
use crate::{CompletionClient, CompletionRequest, CompletionRoute, InferenceResult};

/// Route-level entry points over a [`CompletionClient`].
#[derive(Clone)]
pub struct InferenceGateway {
    client: Arc<dyn CompletionClient>,
}

impl InferenceGateway {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub async fn generate(&self, prompt: &str) -> InferenceResult<String> {
        self.complete(CompletionRoute::Generate, generate_prompt(prompt))
            .await
    }

    pub async fn explain(&self, code: &str) -> InferenceResult<String> {
        self.complete(CompletionRoute::Explain, explain_prompt(code))
            .await
    }

    pub async fn fix(&self, code: &str, issue: &str) -> InferenceResult<String> {
        self.complete(CompletionRoute::Fix, fix_prompt(code, issue))
            .await
    }

    async fn complete(&self, route: CompletionRoute, prompt: String) -> InferenceResult<String> {
        let request = CompletionRequest {
            model: self.client.model().to_string(),
            prompt,
            sampling: route.sampling(),
        };
        tracing::debug!(?route, model = %request.model, "forwarding completion");
        self.client.complete(&request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::InferenceError;

    struct RecordingClient {
        requests: Mutex<Vec<CompletionRequest>>,
        fail: bool,
    }

    impl RecordingClient {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, request: &CompletionRequest) -> InferenceResult<String> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(InferenceError::InvalidResponse("no choices".to_string()));
            }
            Ok("done".to_string())
        }

        fn model(&self) -> &str {
            "test-model"
        }
    }

    #[tokio::test]
    async fn test_routes_build_requests() {
        let client = RecordingClient::new(false);
        let gateway = InferenceGateway::new(client.clone());

        assert_eq!(gateway.generate("a counter").await.unwrap(), "done");
        gateway.explain("fn main() {}").await.unwrap();
        gateway.fix("x = ", "incomplete").await.unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.model == "test-model"));
        assert_eq!(
            requests[0].prompt,
            "Generate code for the following request: a counter\n\nCode:"
        );
        assert_eq!(requests[0].sampling, CompletionRoute::Generate.sampling());
        assert_eq!(requests[1].sampling, CompletionRoute::Explain.sampling());
        assert!(requests[2].prompt.starts_with("Fix the following code issue: incomplete"));
        assert_eq!(requests[2].sampling, CompletionRoute::Fix.sampling());
    }

    #[tokio::test]
    async fn test_client_errors_propagate() {
        let gateway = InferenceGateway::new(RecordingClient::new(true));
        let err = gateway.generate("x").await.unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
        assert_eq!(gateway.model(), "test-model");
    }
}
