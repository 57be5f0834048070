use std::path::PathBuf;

use agentlite::providers::factory::{get_provider, ProviderType};
use agentlite::Agent;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod configuration;
mod error;

use configuration::{Overrides, Settings};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML settings file, layered under AGENTLITE_* environment variables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Provider to use (gemini or mock)
    #[arg(short, long, global = true, value_enum)]
    provider: Option<CliProviderVariant>,

    /// Model to use (the mock provider reports it as its name)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// System prompt sent ahead of every input
    #[arg(short, long, global = true)]
    system: Option<String>,

    /// Log debug output to stderr when RUST_LOG is not set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
enum CliProviderVariant {
    Gemini,
    Mock,
}

impl From<CliProviderVariant> for ProviderType {
    fn from(variant: CliProviderVariant) -> Self {
        match variant {
            CliProviderVariant::Gemini => ProviderType::Gemini,
            CliProviderVariant::Mock => ProviderType::Mock,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Send one input to the agent and print the reply
    Run {
        /// The user input
        input: String,
    },
    /// Chat interactively, one independent exchange per input
    Session,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            provider: self
                .provider
                .map(|variant| ProviderType::from(variant).to_string()),
            model: self.model.clone(),
            system_prompt: self.system.clone(),
        }
    }
}

// RUST_LOG takes precedence over --verbose
fn default_log_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn build_agent(settings: Settings) -> Result<Agent> {
    let provider_config = settings.provider.into_config()?;
    let provider = get_provider(provider_config).context("failed to create provider")?;
    Ok(Agent::new(settings.system_prompt, provider))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(cli.verbose)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    let settings = Settings::load(cli.config.as_deref(), &cli.overrides())
        .context("failed to load settings")?;
    let agent = build_agent(settings)?;

    match cli.command {
        Command::Run { input } => commands::run::execute(&agent, &input).await,
        Command::Session => commands::session::execute(&agent).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "agentlite",
            "run",
            "Tell me a joke",
            "--provider",
            "mock",
            "--system",
            "Be terse.",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Run { ref input } if input == "Tell me a joke"));
        let overrides = cli.overrides();
        assert_eq!(overrides.provider.as_deref(), Some("mock"));
        assert_eq!(overrides.system_prompt.as_deref(), Some("Be terse."));
        assert_eq!(overrides.model, None);
    }

    #[test]
    fn test_parse_rejects_unknown_provider() {
        assert!(Cli::try_parse_from(["agentlite", "--provider", "openai", "session"]).is_err());
    }

    #[test]
    fn test_log_directive_from_verbose_flag() {
        let cli = Cli::try_parse_from(["agentlite", "--verbose", "session"]).unwrap();
        assert_eq!(default_log_directive(cli.verbose), "debug");

        let cli = Cli::try_parse_from(["agentlite", "session"]).unwrap();
        assert_eq!(default_log_directive(cli.verbose), "warn");
        assert!(EnvFilter::try_new(default_log_directive(cli.verbose)).is_ok());
    }

    #[test]
    fn test_build_mock_agent() {
        let settings = Settings {
            system_prompt: "Be terse.".to_string(),
            provider: configuration::ProviderSettings::Mock {
                name: Some("cli-mock".to_string()),
            },
        };
        let agent = build_agent(settings).unwrap();
        assert_eq!(agent.model_name(), "cli-mock");
        assert_eq!(agent.system_prompt(), "Be terse.");
    }
}
