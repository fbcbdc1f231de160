mod find;

use clap::Parser;

use crate::{config::Config, logger::Logger};

/// Command-line client for a CI server
#[derive(Parser)]
#[clap(version)]
pub struct Args {
    #[clap(flatten)]
    global: Global,
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[derive(Parser, Debug, Default)]
pub struct Global {
    /// Saved target to talk to
    #[clap(short = 't', long = "target", global = true)]
    pub target: Option<String>,
    /// Log HTTP requests to stderr
    #[clap(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
    /// Print table headers even when stdout is not a terminal
    #[clap(long = "print-table-headers", global = true)]
    pub print_table_headers: bool,
}

#[derive(Parser)]
pub enum Subcommand {
    Find(find::Args),
}

impl Args {
    /// Rejects user errors that need neither config nor network.
    pub fn preflight(&self) -> miette::Result<()> {
        match &self.subcommand {
            Subcommand::Find(args) => {
                args.build_id()?;
            }
        }
        Ok(())
    }

    pub async fn execute(self, config: Config, logger: Logger) -> miette::Result<()> {
        if self.global.verbose {
            logger.enable_trace();
        }
        match self.subcommand {
            Subcommand::Find(args) => args.execute(&self.global, config, logger).await,
        }
    }
}
