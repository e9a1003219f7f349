//! CLI entry point for the prescription annotation toolchain

use clap::Parser;
use rx_annotate::io::cli::{Cli, ToolRunner};

fn main() -> rx_annotate::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut runner = ToolRunner::new(cli);
    runner.run()
}
