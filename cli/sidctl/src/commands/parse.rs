//! Parse command (split IDs into their parts).

use anyhow::Result;
use clap::Args;
use semanticid::{Config, SemanticId};
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::print_output;

use super::CommandContext;

/// Parse semantic IDs and show their parts.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// IDs to parse.
    #[arg(required = true)]
    ids: Vec<String>,

    /// Accept id parts the provider would reject.
    #[arg(long)]
    no_validate: bool,
}

/// One ID broken into its parts.
#[derive(Debug, Serialize, Tabled)]
pub struct IdView {
    #[tabled(rename = "ID")]
    pub sid: String,
    #[tabled(rename = "Namespace")]
    pub namespace: String,
    #[tabled(rename = "Collection")]
    pub collection: String,
    #[tabled(rename = "Id Part")]
    pub id: String,
}

impl IdView {
    pub fn new(config: &Config, sid: &SemanticId) -> Self {
        Self {
            sid: config.format(sid),
            namespace: sid.namespace().to_string(),
            collection: sid.collection().to_string(),
            id: sid.id().to_string(),
        }
    }
}

impl ParseCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let views = parse_ids(&ctx.config, &self.ids, !self.no_validate)?;
        print_output(&views, ctx.format);
        Ok(())
    }
}

/// Parses every input in order, stopping at the first failure.
fn parse_ids(config: &Config, ids: &[String], validate: bool) -> Result<Vec<IdView>, CliError> {
    ids.iter()
        .map(|input| {
            config
                .parse(input, validate)
                .map(|sid| IdView::new(config, &sid))
                .map_err(|source| CliError::Parse {
                    input: input.clone(),
                    source,
                })
        })
        .collect()
}
