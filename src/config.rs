//! Process configuration, read once from the environment at startup.
//!
//! Environment variables:
//! - `GROQ_API_KEY`: bearer credential for the completion endpoint (required)
//! - `API_ENDPOINT`: base URL of the inference service (required)
//! - `COMPLETION_URL`: chat-completion endpoint (default: Groq's OpenAI-compatible URL)
//! - `COMPLETION_MODEL`: model identifier (default: `llama-3.3-70b-versatile`)
//! - `UPSTREAM_TIMEOUT_SECS`: timeout for both outbound calls (default: 30)
//! - `HOST` / `PORT`: listen address (default: 127.0.0.1:8080)

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub inference_base_url: String,
    pub completion_url: String,
    pub completion_model: String,
    pub upstream_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| non_blank(key).ok_or(ConfigError::Missing(key));

        let api_key = required("GROQ_API_KEY")?;
        let inference_base_url = required("API_ENDPOINT")?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let upstream_timeout = match non_blank("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("UPSTREAM_TIMEOUT_SECS", &v)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let port = match non_blank("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => 8080,
        };

        Ok(Self {
            api_key,
            inference_base_url,
            completion_url: non_blank("COMPLETION_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string()),
            completion_model: non_blank("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            upstream_timeout,
            host: non_blank("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
        })
    }

    pub fn prediction_url(&self) -> String {
        format!("{}/predict-data-url", self.inference_base_url)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "secret"),
            ("API_ENDPOINT", "http://inference:8000/"),
        ]))
        .unwrap();

        assert_eq!(config.completion_url, DEFAULT_COMPLETION_URL);
        assert_eq!(config.completion_model, DEFAULT_COMPLETION_MODEL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(30));
        assert_eq!(config.port, 8080);
        assert_eq!(config.prediction_url(), "http://inference:8000/predict-data-url");
    }

    #[test]
    fn missing_credential_fails_fast() {
        let err = AppConfig::from_lookup(lookup(&[("API_ENDPOINT", "http://x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GROQ_API_KEY"));
    }

    #[test]
    fn blank_endpoint_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "secret"),
            ("API_ENDPOINT", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("API_ENDPOINT"));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "secret"),
            ("API_ENDPOINT", "http://x"),
            ("UPSTREAM_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "UPSTREAM_TIMEOUT_SECS",
                value: "soon".to_string()
            }
        );
    }
}
