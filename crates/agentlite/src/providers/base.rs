use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;

/// Base trait for model backends (Gemini, mock, etc)
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate one response for an ordered, non-empty sequence of messages.
    ///
    /// Implementations return [`AgentError::Cancelled`] without doing any work when `cancel`
    /// has already fired.
    async fn generate(&self, cancel: &CancellationToken, messages: &[Message])
        -> AgentResult<String>;

    /// A stable identifier for the backend or model in use
    fn name(&self) -> &str;
}

/// Fail fast when the caller has already given up on the request
pub fn ensure_not_cancelled(cancel: &CancellationToken) -> AgentResult<()> {
    if cancel.is_cancelled() {
        return Err(AgentError::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_not_cancelled() {
        let cancel = CancellationToken::new();
        assert!(ensure_not_cancelled(&cancel).is_ok());

        cancel.cancel();
        assert_eq!(ensure_not_cancelled(&cancel), Err(AgentError::Cancelled));
    }

    #[test]
    fn test_child_token_observes_parent() {
        let parent = CancellationToken::new();
        let child = parent.child_token();
        parent.cancel();
        assert_eq!(ensure_not_cancelled(&child), Err(AgentError::Cancelled));
    }
}
