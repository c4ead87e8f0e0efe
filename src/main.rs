use clap::Parser;
use verbrouter::cli::{run_cli, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_cli(cli)
}
