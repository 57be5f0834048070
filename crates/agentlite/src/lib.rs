pub mod agent;
pub mod errors;
pub mod models;
pub mod providers;

pub use agent::Agent;
pub use errors::{AgentError, AgentResult};
pub use tokio_util::sync::CancellationToken;
