use clap::Parser;
use tracing::debug;

use mip_observe::{init_local_offset, init_logger};

mod cli;
mod commands;
mod config;

use cli::Cli;
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    // Local offset can only be read while the process is single-threaded.
    init_local_offset();

    let cli = Cli::parse();
    let cfg = AppConfig::resolve(&cli)?;
    init_logger(&cfg.logger)?;
    debug!(shell = %cfg.shell, "configuration resolved");

    // One call at a time: a current-thread runtime is all the tool invocations need.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(commands::run(cli.command, cli.json, cfg))
}
