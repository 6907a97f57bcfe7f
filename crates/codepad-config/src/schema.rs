use std::path::PathBuf;

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Completion model used by every inference route unless overridden.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodepadConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub inference: InferenceSettings,
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind the HTTP server
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,

    /// URL reported back by `/api/run`
    #[serde(default = "default_run_url")]
    pub run_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            run_url: default_run_url(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_run_url() -> String {
    "http://localhost:3000".to_string()
}

// ============================================================================
// Inference
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceSettings {
    /// Base URL of the Together-compatible completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Upstream request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// File containing the API key; takes precedence over `api_key_env`
    #[serde(default)]
    pub api_key_file: Option<PathBuf>,

    /// Key set programmatically; never read from or written to config files
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
            api_key_file: None,
            api_key: None,
        }
    }
}

impl InferenceSettings {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url_trimmed(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Resolve the API key: explicit key, then key file, then environment.
    pub fn resolve_api_key(&self) -> Result<Option<SecretString>> {
        if let Some(key) = &self.api_key {
            return Ok(Some(key.clone()));
        }

        if let Some(path) = &self.api_key_file {
            let key = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read API key file: {}", path.display()))?;
            let key = key.trim();
            if !key.is_empty() {
                return Ok(Some(SecretString::from(key.to_string())));
            }
        }

        Ok(std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::from(key.trim().to_string())))
    }
}

fn default_base_url() -> String {
    "https://api.together.xyz".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_api_key_env() -> String {
    "TOGETHER_API_KEY".to_string()
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodepadConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.run_url, "http://localhost:3000");
        assert_eq!(config.inference.base_url, "https://api.together.xyz");
        assert_eq!(config.inference.model, DEFAULT_MODEL);
        assert_eq!(config.inference.timeout_secs, 120);
        assert_eq!(config.inference.api_key_env, "TOGETHER_API_KEY");
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: CodepadConfig =
            serde_json::from_str(r#"{"server": {"port": 8080}}"#).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.inference.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let settings = InferenceSettings::default().with_api_key("sk-secret");
        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!format!("{:?}", settings).contains("sk-secret"));
    }

    #[test]
    fn test_explicit_key_wins() {
        let settings = InferenceSettings {
            api_key_env: "CODEPAD_TEST_UNSET_KEY_VAR".to_string(),
            ..InferenceSettings::default()
        }
        .with_api_key("direct");
        let key = settings.resolve_api_key().unwrap().unwrap();
        assert_eq!(key.expose_secret(), "direct");
    }

    #[test]
    fn test_key_file_is_trimmed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("key");
        std::fs::write(&path, "  from-file\n").unwrap();

        let settings = InferenceSettings {
            api_key_file: Some(path),
            api_key_env: "CODEPAD_TEST_UNSET_KEY_VAR".to_string(),
            ..InferenceSettings::default()
        };
        let key = settings.resolve_api_key().unwrap().unwrap();
        assert_eq!(key.expose_secret(), "from-file");
    }

    #[test]
    fn test_missing_key_file_is_an_error() {
        let settings = InferenceSettings {
            api_key_file: Some(PathBuf::from("/nonexistent/codepad/key")),
            ..InferenceSettings::default()
        };
        assert!(settings.resolve_api_key().is_err());
    }

    #[test]
    fn test_env_key() {
        std::env::set_var("CODEPAD_TEST_ENV_KEY", "from-env");
        let settings = InferenceSettings {
            api_key_env: "CODEPAD_TEST_ENV_KEY".to_string(),
            ..InferenceSettings::default()
        };
        let key = settings.resolve_api_key().unwrap().unwrap();
        assert_eq!(key.expose_secret(), "from-env");
    }

    #[test]
    fn test_no_key_configured() {
        let settings = InferenceSettings {
            api_key_env: "CODEPAD_TEST_UNSET_KEY_VAR".to_string(),
            ..InferenceSettings::default()
        };
        assert!(settings.resolve_api_key().unwrap().is_none());
    }

    #[test]
    fn test_base_url_trimmed() {
        let settings = InferenceSettings::default().with_base_url("http://localhost:9000/");
        assert_eq!(settings.base_url_trimmed(), "http://localhost:9000");
    }
}
