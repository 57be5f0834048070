use agentlite::models::message::Message;
use agentlite::Agent;
use anyhow::Result;
use cliclack::{input, spinner};
use console::style;

use super::{render, run_interruptible};

pub async fn execute(agent: &Agent) -> Result<()> {
    println!(
        "agentlite session with {} {}",
        style(agent.model_name()).cyan(),
        style("- type \"exit\" to end the session").dim()
    );
    println!("\n");

    loop {
        let message_text: String = input("Message:").placeholder("").multiline().interact()?;

        if message_text.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        let message = Message::user(message_text);
        if let Err(err) = message.validate() {
            println!("{}", style(err).yellow());
            continue;
        }

        let spin = spinner();
        spin.start("awaiting reply");

        // Each turn is a fresh exchange, earlier replies are not sent back
        match run_interruptible(agent, &message.content).await {
            Ok(reply) => {
                spin.stop("");
                render(&reply)?;
            }
            Err(err) => spin.stop(style(err).red().to_string()),
        }

        println!("\n");
    }
    Ok(())
}
