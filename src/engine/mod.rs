//! Audio Engine Module
//!
//! Everything around the DSP core:
//! - WAV and raw PCM conversion
//! - Per-channel rendering of whole files

pub mod io;
pub mod render;

pub use io::{
    decode_pcm_bytes, encode_pcm_bytes, export_wav, generate_test_tone, import_wav, PcmAudio,
    PcmSpec,
};
pub use render::{deinterleave, digest, interleave, render_delay, render_reverb};
