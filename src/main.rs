//! jcrev CLI
//!
//! Applies the delay-only reference and the full reverb to a WAV file.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use jcrev::cli::commands;
#[cfg(feature = "playback")]
use jcrev::cli::playback::CpalPlayer as Player;
#[cfg(not(feature = "playback"))]
use jcrev::cli::playback::NoPlayback as Player;
use jcrev::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("jcrev v{}", env!("CARGO_PKG_VERSION"));

    let player = Player::default();
    commands::run(&cli, &player)
        .with_context(|| format!("failed to process {}", cli.source.display()))?;

    Ok(())
}
