pub mod run;
pub mod session;

use agentlite::{Agent, AgentResult, CancellationToken};
use anyhow::{anyhow, Result};
use bat::PrettyPrinter;

/// Run the agent once, cancelling the request if the user hits Ctrl-C
pub async fn run_interruptible(agent: &Agent, input: &str) -> AgentResult<String> {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = agent.run(&cancel, input).await;
    watcher.abort();
    result
}

pub fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .map_err(|e| anyhow!("failed to render reply: {}", e))?;
    Ok(())
}
