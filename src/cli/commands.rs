//! CLI Command Implementations
//!
//! Implements the harness run: info, delay-only pass, full-reverb pass.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use log::{info, warn};

use super::playback::Playback;
use super::Cli;
use crate::dsp::ReverbConfig;
use crate::engine::{digest, export_wav, import_wav, render_delay, render_reverb, PcmAudio};
use crate::error::Result;

/// Paths written by one harness run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Delay-only reference output
    pub delay_path: PathBuf,
    /// Full reverb output
    pub reverb_path: PathBuf,
}

/// Execute the harness for the parsed command line.
pub fn run(cli: &Cli, player: &dyn Playback) -> Result<RunReport> {
    run_at(cli, player, Local::now())
}

/// Same as [`run`], with the output timestamp pinned.
pub fn run_at<Tz: TimeZone>(
    cli: &Cli,
    player: &dyn Playback,
    now: DateTime<Tz>,
) -> Result<RunReport>
where
    Tz::Offset: std::fmt::Display,
{
    info!("Loading source: {}", cli.source.display());
    let source = import_wav(&cli.source)?;
    print_info(&source);

    let config = load_config(cli.config.as_deref())?;
    config.validate()?;

    if cli.play_source {
        play(player, &source, "source");
    }

    let suffix = date_suffix(&now);
    let delay_path = cli.output_dir.join(format!("{}_out.wav", suffix));
    let reverb_path = cli.output_dir.join(format!("{}_comb.wav", suffix));

    let delayed = render_delay(&source, cli.delay_gain, cli.delay_offset)?;
    export_wav(&delayed, &delay_path)?;
    info!(
        "Delay pass written: {} (sha256 {})",
        delay_path.display(),
        digest(&delayed.samples)
    );

    let reverberated = render_reverb(&source, &config)?;
    export_wav(&reverberated, &reverb_path)?;
    info!(
        "Reverb pass written: {} (sha256 {})",
        reverb_path.display(),
        digest(&reverberated.samples)
    );

    println!("Delay output: {}", delay_path.display());
    println!("Reverb output: {}", reverb_path.display());

    if cli.play_result {
        play(player, &reverberated, "reverb result");
    }

    Ok(RunReport {
        delay_path,
        reverb_path,
    })
}

/// Print source stream details.
pub fn print_info(audio: &PcmAudio) {
    let layout = match audio.spec.channels {
        1 => "mono",
        2 => "stereo",
        _ => "multichannel",
    };
    println!("Audio channels: {} ({})", audio.spec.channels, layout);
    println!("Audio frame rate: {}", audio.spec.sample_rate);
    println!("Audio sample width: {}", audio.spec.sample_width());
    println!("Audio frames: {}", audio.frames());
}

/// Read the reverb configuration, falling back to the built-in preset.
pub fn load_config(path: Option<&Path>) -> Result<ReverbConfig> {
    match path {
        Some(path) => {
            info!("Loading reverb config: {}", path.display());
            ReverbConfig::from_json_file(path)
        }
        None => Ok(ReverbConfig::default()),
    }
}

/// Output file prefix, e.g. `2022-8-19_09.05.03`
pub fn date_suffix<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y-%-m-%-d_%H.%M.%S").to_string()
}

fn play(player: &dyn Playback, audio: &PcmAudio, label: &str) {
    info!("Playing {} ({:.2} s)", label, audio.duration_secs());
    if let Err(e) = player.play(audio) {
        warn!("Playback of {} failed: {}", label, e);
    }
}
