use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_LOG_PATH: &str = "interview_log.csv";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub hf_api_token: String,
    pub hf_model: String,
    pub inference_base_url: String,
    pub inference_timeout_secs: u64,
    pub feedback_max_new_tokens: u32,
    pub answer_max_new_tokens: u32,
    pub log_path: PathBuf,
    pub role_catalog_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            hf_api_token: require_env("HF_API_TOKEN")?,
            hf_model: env_or("HF_MODEL", DEFAULT_MODEL),
            inference_base_url: env_or("INFERENCE_BASE_URL", DEFAULT_INFERENCE_BASE_URL),
            inference_timeout_secs: parse_env("INFERENCE_TIMEOUT_SECS", 120)?,
            feedback_max_new_tokens: parse_env("FEEDBACK_MAX_NEW_TOKENS", 400)?,
            answer_max_new_tokens: parse_env("ANSWER_MAX_NEW_TOKENS", 150)?,
            log_path: PathBuf::from(env_or("LOG_PATH", DEFAULT_LOG_PATH)),
            role_catalog_path: std::env::var("ROLE_CATALOG_PATH").ok().map(PathBuf::from),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
