use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::schema::{CodepadConfig, InferenceSettings, ServerSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Jsonc,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;

        match ext {
            "jsonc" => Some(Self::Jsonc),
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: CodepadConfig,
    pub path: PathBuf,
    pub format: ConfigFormat,
}

/// Load configuration from `config_path`, or from the first config file
/// found in the usual locations. Falls back to defaults when none exists.
pub fn load_config(config_path: Option<&Path>) -> Result<CodepadConfig> {
    match resolve_config(config_path)? {
        Some(resolved) => {
            tracing::info!(path = %resolved.path.display(), "loaded configuration");
            Ok(resolved.config)
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Ok(CodepadConfig::default())
        }
    }
}

pub fn resolve_config(config_path: Option<&Path>) -> Result<Option<ResolvedConfig>> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => match find_config_file() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    load_config_from_file(&path).map(Some)
}

pub fn load_config_from_file(path: &Path) -> Result<ResolvedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| anyhow!("Unknown config format for: {}", path.display()))?;

    let config = parse_config_content(&content, format)?;

    Ok(ResolvedConfig {
        config: expand_env_vars(config),
        path: path.to_path_buf(),
        format,
    })
}

fn parse_config_content(content: &str, format: ConfigFormat) -> Result<CodepadConfig> {
    match format {
        ConfigFormat::Jsonc => json5::from_str(content).context("Failed to parse JSONC"),
        ConfigFormat::Json => serde_json::from_str(content).context("Failed to parse JSON"),
        ConfigFormat::Yaml => serde_yaml_ng::from_str(content).context("Failed to parse YAML"),
    }
}

const CONFIG_CANDIDATES: &[&str] = &[
    "codepad.jsonc",
    "codepad.json",
    "codepad.yml",
    "codepad.yaml",
    ".codepad.jsonc",
    ".codepad.json",
    ".codepad.yml",
    ".codepad.yaml",
];

fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_CANDIDATES.iter().map(PathBuf::from);
    let global = dirs::home_dir()
        .map(|home| home.join(".config").join("codepad"))
        .into_iter()
        .flat_map(|dir| CONFIG_CANDIDATES.iter().map(move |c| dir.join(c)));

    local.chain(global).find(|path| path.exists())
}

fn expand_env_vars(config: CodepadConfig) -> CodepadConfig {
    CodepadConfig {
        server: ServerSettings {
            host: expand_env_string(&config.server.host),
            port: config.server.port,
            run_url: expand_env_string(&config.server.run_url),
        },
        inference: InferenceSettings {
            base_url: expand_env_string(&config.inference.base_url),
            model: expand_env_string(&config.inference.model),
            api_key_file: config
                .inference
                .api_key_file
                .as_ref()
                .map(|p| PathBuf::from(expand_env_string(&p.to_string_lossy()))),
            ..config.inference
        },
    }
}

fn expand_env_string(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        if chars.peek() == Some(&'{') {
            chars.next();
            let var_name: String = chars.by_ref().take_while(|&c| c != '}').collect();
            match env::var(&var_name) {
                Ok(value) => result.push_str(&value),
                Err(_) => {
                    result.push_str("${");
                    result.push_str(&var_name);
                    result.push('}');
                }
            }
            continue;
        }

        let mut var_name = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                var_name.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if var_name.is_empty() {
            result.push('$');
        } else if let Ok(value) = env::var(&var_name) {
            result.push_str(&value);
        } else {
            result.push('$');
            result.push_str(&var_name);
        }
    }

    result
}
