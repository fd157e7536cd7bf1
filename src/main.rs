//! CLI entry point for the eigen map, covariance, PCA and distribution tools

use clap::Parser;
use eigenscope::io::cli::{Cli, run, setup_logging};

fn main() -> eigenscope::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(&cli)
}
