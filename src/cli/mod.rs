//! CLI Module
//!
//! Command-line harness: reads a source WAV, renders the delay-only reference
//! and the full reverb next to each other, and optionally plays them.

pub mod commands;
pub mod playback;

use clap::Parser;
use std::path::PathBuf;

use crate::dsp::{DEFAULT_COMBS, DEFAULT_MAX_DELAY};

/// jcrev - Schroeder reverberator for 16-bit PCM WAV files
#[derive(Parser, Debug)]
#[command(name = "jcrev")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source audio file (16-bit PCM WAV)
    #[arg(long)]
    pub source: PathBuf,

    /// Play the source file before processing
    #[arg(long)]
    pub play_source: bool,

    /// Play the reverb result after processing
    #[arg(long)]
    pub play_result: bool,

    /// Reverb configuration as JSON (defaults to the built-in preset)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gain of the delay-only reference pass
    #[arg(long, default_value_t = DEFAULT_COMBS[0].0)]
    pub delay_gain: f32,

    /// Offset of the delay-only reference pass, in samples
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY)]
    pub delay_offset: usize,

    /// Directory for the rendered files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_source_is_required() {
        let err = Cli::try_parse_from(["jcrev-cli"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["jcrev-cli", "--source", "in.wav"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("in.wav"));
        assert!(!cli.play_source);
        assert!(!cli.play_result);
        assert!(cli.config.is_none());
        assert_eq!(cli.delay_gain, 0.697);
        assert_eq!(cli.delay_offset, 5801);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "jcrev-cli",
            "--source",
            "in.wav",
            "--play-result",
            "--delay-gain",
            "0.5",
            "--delay-offset",
            "100",
            "-o",
            "out",
            "-c",
            "room.json",
        ])
        .unwrap();
        assert!(cli.play_result);
        assert_eq!(cli.delay_gain, 0.5);
        assert_eq!(cli.delay_offset, 100);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.config, Some(PathBuf::from("room.json")));
    }
}
