use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use codepad_config::ServerSettings;
use codepad_inference::InferenceGateway;
use codepad_store::ProjectStore;

use crate::error::ServerError;
use crate::handlers;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
    pub inference: InferenceGateway,
    pub settings: ServerSettings,
}

pub struct CodepadServer {
    state: Arc<AppState>,
}

impl CodepadServer {
    pub fn new(
        store: Arc<dyn ProjectStore>,
        inference: InferenceGateway,
        settings: ServerSettings,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                store,
                inference,
                settings,
            }),
        }
    }

    /// Request bodies are not size-limited; projects are saved and exported
    /// whole.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/health", get(handlers::health))
            .route("/api/generate", post(handlers::generate))
            .route("/api/explain", post(handlers::explain))
            .route("/api/fix", post(handlers::fix))
            .route("/api/install-package", post(handlers::install_package))
            .route("/api/export", post(handlers::export))
            .route("/api/run", post(handlers::run))
            .route("/api/save", post(handlers::save))
            .route("/api/load/{project_id}", get(handlers::load))
            .route("/api/projects", get(handlers::list_projects))
            .layer(DefaultBodyLimit::disable())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Bind to the configured host and port and serve until the process exits.
    pub async fn start(&self) -> Result<(), ServerError> {
        let addr = format!("{}:{}", self.state.settings.host, self.state.settings.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!("Codepad backend listening on http://{}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
