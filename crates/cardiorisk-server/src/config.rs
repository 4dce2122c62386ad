//! Server configuration

use cardiorisk_core::DiagnosisLabels;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Model artifact path
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,

    /// Diagnosis wording per label
    #[serde(default)]
    pub diagnosis: DiagnosisLabels,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.model_path = model.clone();
        }

        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            config.port = port;
        }

        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// `listen:port` string suitable for socket address parsing
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            listen: default_listen(),
            port: default_port(),
            cors: CorsConfig::default(),
            diagnosis: DiagnosisLabels::default(),
        }
    }
}

/// Cross-origin configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; empty or `*` allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Whether every origin is allowed
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/heart_disease_classifier.yaml")
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}
