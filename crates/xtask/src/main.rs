//! Development tasks for the forge workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Hooks, Resolve};

/// Development tasks for the forge workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for forge", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Resolve the stats of a sample tool
    Resolve(Resolve),

    /// List hook tokens and the hooks each sample definition provides
    Hooks(Hooks),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(cmd) => cmd.execute(),
        Command::Hooks(cmd) => cmd.execute(),
    }
}
