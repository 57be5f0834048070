use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::base::{ensure_not_cancelled, Provider};
use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;

pub const MOCK_MODEL: &str = "mock-model";
pub const NO_INPUT_REPLY: &str = "I didn't receive any user input.";

enum Keywords {
    Any(&'static [&'static str]),
    All(&'static [&'static str]),
}

impl Keywords {
    fn matches(&self, text: &str) -> bool {
        match self {
            Keywords::Any(words) => words.iter().any(|word| text.contains(word)),
            Keywords::All(words) => words.iter().all(|word| text.contains(word)),
        }
    }
}

struct Rule {
    keywords: Keywords,
    reply: &'static str,
}

// Checked in order, first match wins
const RULES: &[Rule] = &[
    Rule {
        keywords: Keywords::Any(&["hello", "hi"]),
        reply: "Hello! How can I help you today?",
    },
    Rule {
        keywords: Keywords::Any(&["weather"]),
        reply: "I'd love to help with weather information, but I don't have access to weather data yet.",
    },
    Rule {
        keywords: Keywords::Any(&["time"]),
        reply: "I don't have access to the current time, but I can help with other questions!",
    },
    Rule {
        keywords: Keywords::Any(&["math", "calculate"]),
        reply: "I can help with math! Try asking me specific calculations like '2 + 2'.",
    },
    Rule {
        keywords: Keywords::Any(&["2 + 2", "2+2"]),
        reply: "2 + 2 = 4",
    },
    Rule {
        keywords: Keywords::All(&["go", "programming"]),
        reply: "Go is a fantastic programming language! It's simple, fast, and has great concurrency support.",
    },
    Rule {
        keywords: Keywords::Any(&["thank"]),
        reply: "You're welcome! Happy to help.",
    },
    Rule {
        keywords: Keywords::Any(&["bye", "goodbye"]),
        reply: "Goodbye! Have a great day!",
    },
];

/// A deterministic provider that answers from keyword rules, for use without network access
pub struct MockProvider {
    name: String,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            name: MOCK_MODEL.to_string(),
        }
    }

    /// Report a different model name, handy when testing agent wiring
    pub fn with_name<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    fn reply_to(input: &str) -> String {
        let lowered = input.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.matches(&lowered))
            .map(|rule| rule.reply.to_string())
            .unwrap_or_else(|| {
                format!(
                    "I understand you said: \"{}\". I'm a simple mock model, so my responses are limited, but I'm here to help!",
                    input
                )
            })
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(
        &self,
        cancel: &CancellationToken,
        messages: &[Message],
    ) -> AgentResult<String> {
        ensure_not_cancelled(cancel)?;

        if messages.is_empty() {
            return Err(AgentError::NoMessages);
        }

        let input = messages
            .iter()
            .rev()
            .find(|message| message.is_user())
            .map(|message| message.content.as_str())
            .filter(|content| !content.is_empty());

        let Some(input) = input else {
            return Ok(NO_INPUT_REPLY.to_string());
        };

        debug!(model = %self.name, "mock provider answering {} messages", messages.len());
        Ok(Self::reply_to(input))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
