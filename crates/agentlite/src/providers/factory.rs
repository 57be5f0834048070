use std::sync::Arc;

use strum_macros::{Display, EnumIter, EnumString};

use super::{
    base::Provider, configs::ProviderConfig, gemini::GeminiProvider, mock::MockProvider,
};
use crate::errors::AgentResult;

#[derive(EnumIter, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ProviderType {
    Gemini,
    Mock,
}

impl ProviderConfig {
    pub fn provider_type(&self) -> ProviderType {
        match self {
            ProviderConfig::Gemini(_) => ProviderType::Gemini,
            ProviderConfig::Mock(_) => ProviderType::Mock,
        }
    }
}

/// Build a provider that can be shared between agents
pub fn get_provider(config: ProviderConfig) -> AgentResult<Arc<dyn Provider>> {
    match config {
        ProviderConfig::Gemini(gemini_config) => Ok(Arc::new(GeminiProvider::new(gemini_config)?)),
        ProviderConfig::Mock(mock_config) => Ok(Arc::new(match mock_config.name {
            Some(name) => MockProvider::with_name(name),
            None => MockProvider::new(),
        })),
    }
}
