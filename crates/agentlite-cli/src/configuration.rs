use std::env;
use std::path::Path;
use std::time::Duration;

use agentlite::providers::configs::{
    GeminiProviderConfig, GenerationConfig, MockProviderConfig, ProviderConfig,
    GEMINI_API_KEY_VAR, GEMINI_HOST, GEMINI_MODEL, GEMINI_TIMEOUT,
};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{to_env_var, ConfigError, ENV_PREFIX};

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Be friendly and concise in your responses.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum ProviderSettings {
    Gemini {
        #[serde(default = "default_gemini_host")]
        host: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default = "default_gemini_model")]
        model: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        #[serde(default)]
        temperature: Option<f32>,
        #[serde(default)]
        max_output_tokens: Option<u32>,
    },
    Mock {
        #[serde(default)]
        name: Option<String>,
    },
}

impl ProviderSettings {
    // Convert to the agentlite ProviderConfig, falling back to GEMINI_API_KEY for the key
    pub fn into_config(self) -> Result<ProviderConfig, ConfigError> {
        match self {
            ProviderSettings::Gemini {
                host,
                api_key,
                model,
                timeout_secs,
                temperature,
                max_output_tokens,
            } => {
                let api_key = api_key
                    .filter(|key| !key.trim().is_empty())
                    .or_else(|| env::var(GEMINI_API_KEY_VAR).ok())
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingEnvVar {
                        env_var: GEMINI_API_KEY_VAR.to_string(),
                    })?;

                let defaults = GenerationConfig::default();
                let generation = GenerationConfig {
                    temperature: temperature.unwrap_or(defaults.temperature),
                    max_output_tokens: max_output_tokens.unwrap_or(defaults.max_output_tokens),
                    ..defaults
                };

                Ok(ProviderConfig::Gemini(
                    GeminiProviderConfig::new(api_key)
                        .with_host(host)
                        .with_model(model)
                        .with_timeout(Duration::from_secs(timeout_secs))
                        .with_generation(generation),
                ))
            }
            ProviderSettings::Mock { name } => {
                Ok(ProviderConfig::Mock(MockProviderConfig { name }))
            }
        }
    }

    /// The mock has no model, so it reports the override as its name
    fn set_model(&mut self, value: String) {
        match self {
            ProviderSettings::Gemini { model, .. } => *model = value,
            ProviderSettings::Mock { name } => *name = Some(value),
        }
    }
}

/// Values given on the command line, applied over every other source
#[derive(Debug, Default)]
pub struct Overrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    pub provider: ProviderSettings,
}

impl Settings {
    /// Layer defaults, the optional TOML file, `AGENTLITE_*` variables and CLI overrides
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("system_prompt", default_system_prompt())?
            .set_default("provider.type", "gemini")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("provider.type", overrides.provider.clone())?
            .set_override_option("system_prompt", overrides.system_prompt.clone())?
            .build()?;

        match config.try_deserialize::<Self>() {
            Ok(mut settings) => {
                if let Some(model) = &overrides.model {
                    settings.provider.set_model(model.clone());
                }
                Ok(settings)
            }
            Err(err) => {
                tracing::debug!("Configuration error: {:?}", &err);

                // Point the user at the variable that would have supplied the field
                let error_str = err.to_string();
                if error_str.starts_with("missing field") {
                    let field = error_str
                        .trim_start_matches("missing field `")
                        .trim_end_matches('`');
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else if let config::ConfigError::NotFound(field) = &err {
                    Err(ConfigError::MissingEnvVar {
                        env_var: to_env_var(field),
                    })
                } else {
                    Err(ConfigError::Other(err))
                }
            }
        }
    }
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_gemini_host() -> String {
    GEMINI_HOST.to_string()
}

fn default_gemini_model() -> String {
    GEMINI_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    GEMINI_TIMEOUT.as_secs()
}
