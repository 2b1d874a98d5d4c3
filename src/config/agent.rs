// src/config/agent.rs
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

pub const DEFAULT_CONFIG_PATH: &str = "config/agent.json";
pub const ENV_CONFIG_PATH: &str = "INSIGHTS_CONFIG_PATH";

const DEFAULT_DASHBOARD_ENDPOINT: &str =
    "https://x8ki-letl-twmt.n7.xano.io/api:xGgv-L-P/content_top_posts_dashboard_cache";

fn default_temperature() -> f32 {
    0.0
}
fn default_model_timeout() -> u64 {
    120
}
fn default_dashboard_timeout() -> u64 {
    10
}
fn default_dashboard_endpoint() -> String {
    DEFAULT_DASHBOARD_ENDPOINT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub model: ModelConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier, e.g. "llama-3.1-70b-versatile" or "gpt-4o-mini".
    pub model: String,
    /// OpenAI-compatible API base, e.g. "https://api.groq.com/openai/v1".
    pub api_url: String,
    /// "ENV" means: read from OPENAI_API_KEY. Empty means no auth header
    /// (local endpoints).
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_endpoint")]
    pub endpoint_url: String,
    #[serde(default = "default_dashboard_timeout")]
    pub timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_dashboard_endpoint(),
            timeout_secs: default_dashboard_timeout(),
        }
    }
}

impl AgentConfig {
    /// Load from INSIGHTS_CONFIG_PATH when set, else `config/agent.json`.
    pub fn load() -> anyhow::Result<Self> {
        let path = env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_file(&path)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)?;
        let mut cfg: AgentConfig = serde_json::from_str(&data)?;

        // Resolve api key if "ENV"
        if cfg.model.api_key.trim().eq_ignore_ascii_case("env") {
            cfg.model.api_key = env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow::anyhow!("Missing OPENAI_API_KEY env var"))?;
        }

        // Sanitize temperature; the grouping prompt expects deterministic output.
        if !(0.0..=2.0).contains(&cfg.model.temperature) {
            cfg.model.temperature = default_temperature();
        }

        Ok(cfg)
    }
}
