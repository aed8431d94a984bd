use std::str::FromStr;

use anyhow::{Context, Result};

use crate::resume::validation::ValidationLimits;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or unparsable.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
    pub cors_allowed_origins: Vec<String>,
    pub limits: ValidationLimits,
    /// Replace collaborator error detail with a generic message in responses.
    pub redact_upstream_errors: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ValidationLimits::default();

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_MODEL.to_string()),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS", 120)?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_allowed_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            limits: ValidationLimits {
                max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
                min_extracted_chars: optional_env(
                    "MIN_EXTRACTED_CHARS",
                    defaults.min_extracted_chars,
                )?,
                min_resume_chars: optional_env("MIN_RESUME_CHARS", defaults.min_resume_chars)?,
                max_resume_chars: optional_env("MAX_RESUME_CHARS", defaults.max_resume_chars)?,
                max_job_description_chars: optional_env(
                    "MAX_JOB_DESCRIPTION_CHARS",
                    defaults.max_job_description_chars,
                )?,
            },
            redact_upstream_errors: match std::env::var("REDACT_UPSTREAM_ERRORS") {
                Ok(raw) => parse_flag(&raw).with_context(|| {
                    format!("REDACT_UPSTREAM_ERRORS must be true or false, got '{raw}'")
                })?,
                Err(_) => false,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
