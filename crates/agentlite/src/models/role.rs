use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::errors::{AgentError, AgentResult};

/// The speaker of a message
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Parse a role from its wire name, rejecting anything but the three legal values
    pub fn parse(role: &str) -> AgentResult<Self> {
        Role::from_str(role).map_err(|_| AgentError::InvalidRole(role.to_string()))
    }
}
