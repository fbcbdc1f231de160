use clap::{error::ErrorKind, Parser};
use logger::Logger;
use utils::IntoDiagnosticShorthand;

mod cli;
mod client;
mod config;
mod logger;
mod model;
mod target;
mod ui;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        // usage errors share the exit code of every other user error
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    args.preflight()?;
    let logger = Logger::new();
    let config = config::load().d()?;
    args.execute(config, logger).await
}
