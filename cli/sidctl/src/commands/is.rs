//! Is command (identity check).

use anyhow::Result;
use clap::Args;
use semanticid::Config;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Check whether an ID belongs to `namespace.collection`.
#[derive(Debug, Args)]
pub struct IsCommand {
    /// The ID to check.
    id: String,

    /// Identity as `namespace.collection`.
    identity: String,

    /// Accept id parts the provider would reject.
    #[arg(long)]
    no_validate: bool,
}

#[derive(Debug, Serialize)]
struct IsView {
    id: String,
    identity: String,
    matches: bool,
}

impl IsCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let view = self.check(&ctx.config)?;

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => println!("{}", view.matches),
        }

        Ok(())
    }

    fn check(&self, config: &Config) -> Result<IsView, CliError> {
        let sid = config
            .parse(&self.id, !self.no_validate)
            .map_err(|source| CliError::Parse {
                input: self.id.clone(),
                source,
            })?;

        Ok(IsView {
            matches: sid.is(&self.identity),
            id: self.id.clone(),
            identity: self.identity.clone(),
        })
    }
}
