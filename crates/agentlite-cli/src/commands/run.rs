use agentlite::Agent;
use anyhow::{Context, Result};

use super::{render, run_interruptible};

pub async fn execute(agent: &Agent, input: &str) -> Result<()> {
    let reply = run_interruptible(agent, input)
        .await
        .with_context(|| format!("{} failed to answer", agent.model_name()))?;

    render(&reply)?;
    println!();
    Ok(())
}
