use std::env;
use std::time::Duration;

use crate::errors::{AgentError, AgentResult};

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const GEMINI_TIMEOUT: Duration = Duration::from_secs(30);

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";
pub const GEMINI_HOST_VAR: &str = "GEMINI_HOST";

// Unified enum to wrap different provider configurations
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Gemini(GeminiProviderConfig),
    Mock(MockProviderConfig),
}

/// Sampling parameters sent with every Gemini request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Clone)]
pub struct GeminiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub generation: GenerationConfig,
}

impl GeminiProviderConfig {
    /// Config for the public endpoint with default model, timeout and sampling
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: GEMINI_HOST.to_string(),
            api_key: api_key.into(),
            model: GEMINI_MODEL.to_string(),
            timeout: GEMINI_TIMEOUT,
            generation: GenerationConfig::default(),
        }
    }

    /// Read the config from `GEMINI_API_KEY`, with optional `GEMINI_MODEL` and `GEMINI_HOST`
    pub fn from_env() -> AgentResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AgentError::Configuration(format!(
                    "{} environment variable is required",
                    GEMINI_API_KEY_VAR
                ))
            })?;

        let mut config = Self::new(api_key);
        if let Ok(model) = env::var(GEMINI_MODEL_VAR) {
            config.model = model;
        }
        if let Ok(host) = env::var(GEMINI_HOST_VAR) {
            config.host = host;
        }
        Ok(config)
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }
}

// The API key never shows up in logs or panics
impl std::fmt::Debug for GeminiProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProviderConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("generation", &self.generation)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockProviderConfig {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clean_env() {
        for var in [GEMINI_API_KEY_VAR, GEMINI_MODEL_VAR, GEMINI_HOST_VAR] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clean_env();
        let err = GeminiProviderConfig::from_env().unwrap_err();
        assert_eq!(
            err,
            AgentError::Configuration("GEMINI_API_KEY environment variable is required".into())
        );

        env::set_var(GEMINI_API_KEY_VAR, "   ");
        assert!(GeminiProviderConfig::from_env().is_err());
        clean_env();
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clean_env();
        env::set_var(GEMINI_API_KEY_VAR, "test-key");

        let config = GeminiProviderConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, GEMINI_MODEL);
        assert_eq!(config.host, GEMINI_HOST);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.generation, GenerationConfig::default());

        clean_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clean_env();
        env::set_var(GEMINI_API_KEY_VAR, "test-key");
        env::set_var(GEMINI_MODEL_VAR, "gemini-1.5-pro");
        env::set_var(GEMINI_HOST_VAR, "http://localhost:9999");

        let config = GeminiProviderConfig::from_env().unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.host, "http://localhost:9999");

        clean_env();
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = GeminiProviderConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
