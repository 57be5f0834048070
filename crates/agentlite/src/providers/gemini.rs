use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::base::{ensure_not_cancelled, Provider};
use super::configs::{GeminiProviderConfig, GenerationConfig};
use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::models::role::Role;

const SYSTEM_SEPARATOR: &str = "\n\n";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn new(role: &'static str, text: String) -> Self {
        Self {
            role,
            parts: vec![GeminiPart { text }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

impl From<&GenerationConfig> for GeminiGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    // Blocked candidates come back without content
    #[serde(default)]
    content: GeminiCandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// Convert messages into Gemini `contents`.
///
/// Gemini has no system role in the turn list, so system text is folded into the first user
/// turn. System messages that arrive once a user turn has been sent are dropped, including any
/// trailing ones.
///
/// This intentionally does not carry a mid-conversation system message over to the next user
/// turn: `[user x, system s, user y]` yields `"x"` and `"y"`, never `"s\n\ny"`.
fn messages_to_gemini_spec(messages: &[Message]) -> AgentResult<Vec<GeminiContent>> {
    let mut contents = Vec::new();
    let mut system_instructions: Vec<&str> = Vec::new();
    let mut seen_user = false;

    for message in messages {
        match message.role {
            Role::System => {
                if !seen_user {
                    system_instructions.push(&message.content);
                }
            }
            Role::User => {
                let text = if system_instructions.is_empty() {
                    message.content.clone()
                } else {
                    let mut text = system_instructions.join(SYSTEM_SEPARATOR);
                    text.push_str(SYSTEM_SEPARATOR);
                    text.push_str(&message.content);
                    system_instructions.clear();
                    text
                };
                seen_user = true;
                contents.push(GeminiContent::new("user", text));
            }
            Role::Assistant => {
                contents.push(GeminiContent::new("model", message.content.clone()));
            }
        }
    }

    if contents.is_empty() {
        return Err(AgentError::NoValidMessages);
    }
    Ok(contents)
}

fn response_to_text(response: GeminiResponse) -> AgentResult<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or(AgentError::NoResponseContent)
}

/// Provider for Google's Gemini `generateContent` API
pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> AgentResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AgentError::Configuration(
                "Gemini API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create a provider from `GEMINI_API_KEY` and friends
    pub fn from_env() -> AgentResult<Self> {
        Self::new(GeminiProviderConfig::from_env()?)
    }

    /// Create a provider for the default model with an explicit key and timeout
    pub fn with_timeout<S: Into<String>>(api_key: S, timeout: Duration) -> AgentResult<Self> {
        Self::new(GeminiProviderConfig::new(api_key).with_timeout(timeout))
    }

    fn request_error(&self, err: reqwest::Error) -> AgentError {
        if err.is_timeout() {
            AgentError::Timeout(self.config.timeout)
        } else {
            // The url carries the api key in its query string
            AgentError::Transport(err.without_url().to_string())
        }
    }

    async fn post(&self, request: &GeminiRequest) -> AgentResult<GeminiResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.host.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;

        if !status.is_success() {
            warn!(model = %self.config.model, status = status.as_u16(), "Gemini API returned an error");
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| AgentError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(
        &self,
        cancel: &CancellationToken,
        messages: &[Message],
    ) -> AgentResult<String> {
        ensure_not_cancelled(cancel)?;

        let request = GeminiRequest {
            contents: messages_to_gemini_spec(messages)?,
            generation_config: (&self.config.generation).into(),
        };

        debug!(
            model = %self.config.model,
            contents = request.contents.len(),
            "sending Gemini generateContent request"
        );

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(AgentError::Cancelled),
            response = self.post(&request) => response?,
        };

        response_to_text(response)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
