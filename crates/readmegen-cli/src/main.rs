//! readmegen CLI entry point.

use clap::Parser;
use miette::Result;
use readmegen_cli::{cli, commands, error, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    commands::generate_execute(args)
        .await
        .map_err(error::cli_error_to_miette)
}
