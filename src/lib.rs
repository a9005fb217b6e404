//! jcrev - Schroeder Reverberator
//!
//! A reverb for 16-bit PCM audio built from delay lines:
//! - four parallel feedback comb filters produce decaying echoes
//! - three serial allpass filters diffuse them into a dense tail
//!
//! # Architecture
//!
//! - `dsp`: delay line, filters and the `ReverbEngine` (no I/O)
//! - `engine`: WAV/PCM conversion and per-channel rendering of whole files
//! - `cli`: the command-line harness around both

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use dsp::{FilterParams, ReverbConfig, ReverbEngine, Sample};
pub use error::{ReverbError, Result};
