//! Request and response bodies for the `/api` routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codepad_export::DEFAULT_PROJECT_NAME;
use codepad_store::{ProjectFiles, ProjectSummary, DEFAULT_PROJECT_ID};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FixRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub issue: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstallPackageRequest {
    #[serde(default)]
    pub package: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub files: ProjectFiles,
    #[serde(default)]
    pub project_name: Option<String>,
}

impl ExportRequest {
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub files: ProjectFiles,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub files: ProjectFiles,
}

impl SaveRequest {
    pub fn project_id(&self) -> &str {
        self.project_id.as_deref().unwrap_or(DEFAULT_PROJECT_ID)
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub code: String,
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct FixResponse {
    pub fixed_code: String,
    pub model: String,
    pub issue: String,
}

#[derive(Debug, Serialize)]
pub struct InstallPackageResponse {
    pub message: String,
    pub package: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub message: &'static str,
    pub url: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: &'static str,
    pub project_id: String,
    pub files_count: usize,
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub project_id: String,
    pub files: ProjectFiles,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectSummary>,
    pub total: usize,
}
