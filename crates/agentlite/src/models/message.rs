use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::Role;
use crate::errors::{AgentError, AgentResult};

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A single turn passed to a provider
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new system message
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    /// Build a message from an untyped role name and validate it
    pub fn parse<S: Into<String>>(role: &str, content: S) -> AgentResult<Self> {
        let message = Self::new(Role::parse(role)?, content);
        message.validate()?;
        Ok(message)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    pub fn is_system(&self) -> bool {
        self.role == Role::System
    }

    /// True when the content is empty or only whitespace
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// System messages may be blank, every other role needs content
    pub fn validate(&self) -> AgentResult<()> {
        if self.is_empty() && !self.is_system() {
            return Err(AgentError::EmptyContent(self.role));
        }
        Ok(())
    }

    /// Return a copy whose content holds at most `max_len` characters.
    ///
    /// Cut content ends with `...` when there is room for it. Below three characters the
    /// content is cut hard instead, so the result never exceeds `max_len`.
    pub fn truncate(&self, max_len: usize) -> Message {
        if self.content.chars().count() <= max_len {
            return self.clone();
        }

        let content = if max_len < ELLIPSIS.len() {
            self.content.chars().take(max_len).collect()
        } else {
            let mut cut: String = self
                .content
                .chars()
                .take(max_len - ELLIPSIS.len())
                .collect();
            cut.push_str(ELLIPSIS);
            cut
        };

        Message {
            role: self.role,
            content,
        }
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.role.as_ref().to_uppercase(), self.content)
    }
}
