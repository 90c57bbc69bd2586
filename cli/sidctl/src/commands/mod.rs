//! CLI commands.

mod is;
mod new;
mod parse;

use anyhow::Result;
use clap::{Parser, Subcommand};
use semanticid::{config, Config, IdProvider};
use tracing::debug;

use crate::error::CliError;
use crate::output::OutputFormat;

/// sidctl - Create and inspect semantic IDs.
#[derive(Debug, Parser)]
#[command(name = "sidctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Id provider for the id part (ulid or uuid).
    #[arg(long, global = true, env = "SID_PROVIDER")]
    provider: Option<String>,

    /// Separator between namespace, collection and id.
    #[arg(long, global = true, env = "SID_SEPARATOR")]
    separator: Option<String>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, env = "SID_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate new IDs.
    New(new::NewCommand),

    /// Parse IDs and show their parts.
    Parse(parse::ParseCommand),

    /// Check whether an ID has a given `namespace.collection` identity.
    Is(is::IsCommand),

    /// Show the effective configuration.
    Config,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        let mut config = Config::from_env().map_err(CliError::from)?;
        if let Some(provider) = &self.provider {
            config.provider = config::provider_by_name(provider).map_err(CliError::from)?;
        }
        if let Some(separator) = &self.separator {
            config.separator = config::parse_separator(separator).map_err(CliError::from)?;
        }

        debug!(
            namespace = %config.namespace,
            collection = %config.collection,
            separator = %config.separator,
            "configuration resolved"
        );

        // Display and serde read the process-wide configuration.
        config::replace(config.clone());

        let ctx = CommandContext { config, format };

        match self.command {
            Commands::New(cmd) => cmd.run(ctx),
            Commands::Parse(cmd) => cmd.run(ctx),
            Commands::Is(cmd) => cmd.run(ctx),
            Commands::Config => show_config(ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

#[derive(Debug, serde::Serialize)]
struct ConfigView {
    namespace: String,
    collection: String,
    provider: String,
    separator: String,
}

impl ConfigView {
    fn new(config: &Config) -> Self {
        Self {
            namespace: config.namespace.clone(),
            collection: config.collection.clone(),
            provider: config.provider.name().to_string(),
            separator: config.separator.to_string(),
        }
    }
}

fn show_config(ctx: CommandContext) -> Result<()> {
    let view = ConfigView::new(&ctx.config);

    match ctx.format {
        OutputFormat::Json => crate::output::print_single(&view),
        OutputFormat::Table => {
            println!("namespace: {}", view.namespace);
            println!("collection: {}", view.collection);
            println!("provider: {}", view.provider);
            println!("separator: {}", view.separator);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "sidctl",
            "--provider",
            "uuid",
            "--separator",
            ":",
            "new",
            "--namespace",
            "auth",
            "--count",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.provider.as_deref(), Some("uuid"));
        assert_eq!(cli.separator.as_deref(), Some(":"));
        assert!(matches!(cli.command, Commands::New(_)));
    }

    #[test]
    fn test_config_view_names_provider() {
        let config = Config::default()
            .with_namespace("auth")
            .with_shared_provider(config::provider_by_name("uuid").unwrap())
            .with_separator(':');

        let view = ConfigView::new(&config);
        assert_eq!(view.namespace, "auth");
        assert_eq!(view.collection, config::DEFAULT_COLLECTION);
        assert_eq!(view.provider, "uuid");
        assert_eq!(view.separator, ":");
        assert_eq!(ConfigView::new(&Config::default()).provider, "ulid");
    }

    #[test]
    fn test_parse_requires_ids() {
        assert!(Cli::try_parse_from(["sidctl", "parse"]).is_err());
        assert!(Cli::try_parse_from(["sidctl", "parse", "a.b.c", "--no-validate"]).is_ok());
    }
}
