use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use codepad_export::ExportError;

use crate::error::ApiError;
use crate::protocol::{
    ExplainRequest, ExplainResponse, ExportRequest, FixRequest, FixResponse, GenerateRequest,
    GenerateResponse, HealthResponse, InstallPackageRequest, InstallPackageResponse,
    LoadResponse, ProjectsResponse, RunRequest, RunResponse, SaveRequest, SaveResponse,
};
use crate::server::AppState;

type SharedState = State<Arc<AppState>>;

/// A body that is not valid JSON for `T` is treated as an empty request so
/// that the route's own required-field check produces the response. A body
/// that could not be read at all is still an error.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::BytesRejection(rejection)) => Err(ApiError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "unreadable request body");
            Ok(T::default())
        }
    }
}

/// `attachment; filename="..."` with `"` and `\` escaped inside the quoted
/// string.
fn content_disposition(file_name: &str) -> Result<HeaderValue, ApiError> {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", escaped)).map_err(|e| {
        tracing::error!(error = %e, file_name, "Error exporting project");
        ApiError::Operation(format!("Export failed: invalid project name: {}", e))
    })
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub(crate) async fn generate(
    State(state): SharedState,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let req = body_or_default(body)?;
    if req.prompt.is_empty() {
        return Err(ApiError::Validation("Prompt is required".to_string()));
    }

    let code = state.inference.generate(&req.prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Error generating code");
        ApiError::Operation(format!("Code generation failed: {}", e))
    })?;

    Ok(Json(GenerateResponse {
        code,
        model: state.inference.model().to_string(),
        prompt: req.prompt,
    }))
}

pub(crate) async fn explain(
    State(state): SharedState,
    body: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let req = body_or_default(body)?;
    if req.code.is_empty() {
        return Err(ApiError::Validation("Code is required".to_string()));
    }

    let explanation = state.inference.explain(&req.code).await.map_err(|e| {
        tracing::error!(error = %e, "Error explaining code");
        ApiError::Operation(format!("Code explanation failed: {}", e))
    })?;

    Ok(Json(ExplainResponse {
        explanation,
        model: state.inference.model().to_string(),
    }))
}

pub(crate) async fn fix(
    State(state): SharedState,
    body: Result<Json<FixRequest>, JsonRejection>,
) -> Result<Json<FixResponse>, ApiError> {
    let req = body_or_default(body)?;
    if req.code.is_empty() {
        return Err(ApiError::Validation("Code is required".to_string()));
    }

    let fixed_code = state
        .inference
        .fix(&req.code, &req.issue)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error fixing code");
            ApiError::Operation(format!("Code fixing failed: {}", e))
        })?;

    Ok(Json(FixResponse {
        fixed_code,
        model: state.inference.model().to_string(),
        issue: req.issue,
    }))
}

/// Acknowledges the package without installing anything.
pub(crate) async fn install_package(
    body: Result<Json<InstallPackageRequest>, JsonRejection>,
) -> Result<Json<InstallPackageResponse>, ApiError> {
    let req = body_or_default(body)?;
    if req.package.is_empty() {
        return Err(ApiError::Validation("Package name is required".to_string()));
    }

    tracing::info!(package = %req.package, "Installing package");

    Ok(Json(InstallPackageResponse {
        message: format!("Package {} installed successfully", req.package),
        package: req.package,
        version: "1.0.0",
    }))
}

pub(crate) async fn export(
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = body_or_default(body)?;

    let archive = codepad_export::export(req.project_name(), &req.files).map_err(|e| match e {
        err @ ExportError::EmptyInput => ApiError::Validation(err.to_string()),
        other => {
            tracing::error!(error = %other, "Error exporting project");
            ApiError::Operation(format!("Export failed: {}", other))
        }
    })?;

    let disposition = content_disposition(&archive.file_name)?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    )
        .into_response())
}

/// Reports the project as running without starting anything.
pub(crate) async fn run(
    State(state): SharedState,
    body: Result<Json<RunRequest>, JsonRejection>,
) -> Result<Json<RunResponse>, ApiError> {
    let req = body_or_default(body)?;
    if !req.files.contains_key("index.html") {
        return Err(ApiError::Validation("No index.html file found".to_string()));
    }

    tracing::info!(files = req.files.len(), "Starting project");

    Ok(Json(RunResponse {
        message: "Project started successfully",
        url: state.settings.run_url.clone(),
        status: "running",
    }))
}

pub(crate) async fn save(
    State(state): SharedState,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let project_id = req.project_id().to_string();
    let result = state.store.save(&project_id, req.files).await;

    Ok(Json(SaveResponse {
        message: "Project saved successfully",
        project_id: result.project_id,
        files_count: result.files_count,
    }))
}

pub(crate) async fn load(
    State(state): SharedState,
    Path(project_id): Path<String>,
) -> Result<Json<LoadResponse>, ApiError> {
    let record = state.store.load(&project_id).await?;

    Ok(Json(LoadResponse {
        project_id: record.id,
        files: record.files,
        last_modified: record.last_modified,
    }))
}

pub(crate) async fn list_projects(State(state): SharedState) -> Json<ProjectsResponse> {
    let projects = state.store.list().await;
    Json(ProjectsResponse {
        total: projects.len(),
        projects,
    })
}
