// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub ats_base_url: String,
    pub ats_source_key: String,
    pub ats_board_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_from_file(&environment)
    }

    fn get_environment() -> String {
        std::env::var("UNGHOST_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let config_path = std::path::Path::new("config.yaml");
        if !config_path.exists() {
            anyhow::bail!("config.yaml not found in current directory. Server cannot start without configuration.");
        }

        let config_content =
            std::fs::read_to_string(config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }
}

/// Secrets never live in config.yaml; they come from the environment
/// (optionally via .env).
#[derive(Debug, Clone)]
pub struct Secrets {
    pub ats_api_key: String,
    pub ats_user_email: String,
    pub llm_api_key: String,
}

impl Secrets {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ats_api_key: require_env("HRFLOW_API_KEY")?,
            ats_user_email: require_env("HRFLOW_USER_EMAIL")?,
            llm_api_key: require_env("ANTHROPIC_API_KEY")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
}
