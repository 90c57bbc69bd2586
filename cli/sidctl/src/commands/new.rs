//! New command (generate IDs).

use anyhow::Result;
use clap::Args;
use semanticid::{Builder, Config, SemanticId};
use tracing::debug;

use crate::error::CliError;
use crate::output::{print_output, OutputFormat};

use super::parse::IdView;
use super::CommandContext;

/// Generate new semantic IDs.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Namespace (defaults to SID_NAMESPACE or "namespace").
    #[arg(long, short)]
    namespace: Option<String>,

    /// Collection (defaults to SID_COLLECTION or "collection").
    #[arg(long, short)]
    collection: Option<String>,

    /// Number of IDs to generate.
    #[arg(long, default_value_t = 1)]
    count: usize,
}

impl NewCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let ids = self.generate(&ctx.config)?;

        match ctx.format {
            OutputFormat::Table => {
                for sid in &ids {
                    println!("{}", ctx.config.format(sid));
                }
            }
            OutputFormat::Json => {
                let views: Vec<IdView> = ids
                    .iter()
                    .map(|sid| IdView::new(&ctx.config, sid))
                    .collect();
                print_output(&views, ctx.format);
            }
        }

        Ok(())
    }

    fn generate(&self, config: &Config) -> Result<Vec<SemanticId>, CliError> {
        debug!(count = self.count, "generating ids");

        (0..self.count)
            .map(|_| {
                let mut builder = Builder::with_config(config.clone());
                if let Some(namespace) = &self.namespace {
                    builder = builder.with_namespace(namespace);
                }
                if let Some(collection) = &self.collection {
                    builder = builder.with_collection(collection);
                }
                builder.build().map_err(CliError::Generate)
            })
            .collect()
    }
}
