use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::providers::base::Provider;

/// Name reported when no provider is configured
pub const NO_MODEL_NAME: &str = "none";

/// Agent pairs a system prompt with the provider that answers for it.
///
/// Each [`Agent::run`] is an independent exchange: no history carries over between calls.
#[derive(Default)]
pub struct Agent {
    system_prompt: String,
    provider: Option<Arc<dyn Provider>>,
}

impl Agent {
    /// Create a new Agent with the specified system prompt and provider
    pub fn new<S: Into<String>>(system_prompt: S, provider: Arc<dyn Provider>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            provider: Some(provider),
        }
    }

    /// Send `user_input` to the provider, preceded by the system prompt when one is set
    pub async fn run(&self, cancel: &CancellationToken, user_input: &str) -> AgentResult<String> {
        let provider = self.provider.as_ref().ok_or(AgentError::NoModel)?;

        if user_input.is_empty() {
            return Err(AgentError::EmptyInput);
        }

        let messages = self.build_messages(user_input);
        debug!(
            model = provider.name(),
            messages = messages.len(),
            "running agent"
        );

        provider.generate(cancel, &messages).await
    }

    fn build_messages(&self, user_input: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.is_empty() {
            messages.push(Message::system(self.system_prompt.as_str()));
        }
        messages.push(Message::user(user_input));
        messages
    }

    pub fn model_name(&self) -> &str {
        self.provider
            .as_ref()
            .map(|provider| provider.name())
            .unwrap_or(NO_MODEL_NAME)
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Takes effect on the next run
    pub fn set_system_prompt<S: Into<String>>(&mut self, prompt: S) {
        self.system_prompt = prompt.into();
    }

    /// Takes effect on the next run
    pub fn set_provider(&mut self, provider: Arc<dyn Provider>) {
        self.provider = Some(provider);
    }

    /// Detach the provider, returning it if one was set
    pub fn clear_provider(&mut self) -> Option<Arc<dyn Provider>> {
        self.provider.take()
    }
}
