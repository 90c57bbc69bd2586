//! Error handling and display for the CLI.

use colored::Colorize;
use semanticid::config::ConfigError;
use semanticid::{ErrorKind, SidError};
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not parse '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: SidError,
    },

    #[error("could not generate an id: {0}")]
    Generate(#[source] SidError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl CliError {
    fn sid_error(&self) -> Option<&SidError> {
        match self {
            CliError::Parse { source, .. } => Some(source),
            CliError::Generate(source) => Some(source),
            CliError::Config(_) => None,
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = err.downcast_ref::<CliError>().and_then(hint) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint(err: &CliError) -> Option<&'static str> {
    match err.sid_error().map(SidError::kind) {
        Some(ErrorKind::Empty) => Some("Pass a non-empty ID."),
        Some(ErrorKind::Malformed) => {
            Some("IDs have the shape namespace.collection.id (see --separator).")
        }
        Some(ErrorKind::InvalidIdPart) => {
            Some("The id part doesn't match --provider. Pass --no-validate to accept it as-is.")
        }
        Some(ErrorKind::PartContainsSeparator) => {
            Some("Namespace and collection can't contain the separator.")
        }
        Some(ErrorKind::ProviderFailure) => Some("The id provider failed; try again."),
        _ => match err {
            CliError::Config(ConfigError::UnknownProvider(_)) => {
                Some("Supported providers are 'ulid' and 'uuid'.")
            }
            _ => None,
        },
    }
}
