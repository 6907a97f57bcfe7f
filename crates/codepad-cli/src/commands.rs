//! CLI arguments

use std::path::PathBuf;

use clap::Parser;
use codepad_config::CodepadConfig;

/// Codepad - AI coding backend
#[derive(Parser, Debug)]
#[command(name = "codepad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (codepad.json, codepad.jsonc or codepad.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind, overriding the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding the config file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Completion model, overriding the config file
    #[arg(short, long)]
    pub model: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply(&self, mut config: CodepadConfig) -> CodepadConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model) = &self.model {
            config.inference.model = model.clone();
        }
        config
    }
}
