use std::time::Duration;

use thiserror::Error;

use crate::models::role::Role;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Agent has no model")]
    NoModel,

    #[error("User input cannot be empty")]
    EmptyInput,

    #[error("Invalid role '{0}', must be one of: user, assistant, system")]
    InvalidRole(String),

    #[error("Message content cannot be empty for role '{0}'")]
    EmptyContent(Role),

    #[error("No valid messages to send")]
    NoValidMessages,

    #[error("API returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("No response content returned")]
    NoResponseContent,

    #[error("Request was cancelled")]
    Cancelled,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("No messages provided")]
    NoMessages,
}

pub type AgentResult<T> = Result<T, AgentError>;
