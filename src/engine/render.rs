//! Whole-file rendering
//!
//! Splits interleaved audio into channels, runs each channel through its own
//! engine (no state is shared between channels), and interleaves the result.

use log::info;
use sha2::{Digest, Sha256};

use super::io::{encode_pcm_bytes, PcmAudio};
use crate::dsp::{Echo, ReverbConfig, ReverbEngine, Sample};
use crate::error::Result;

/// Run the full reverb over every channel.
///
/// The result has the same spec and frame count as the input.
pub fn render_reverb(audio: &PcmAudio, config: &ReverbConfig) -> Result<PcmAudio> {
    config.validate()?;
    info!(
        "Rendering reverb: {} frames x {} channel(s)",
        audio.frames(),
        audio.spec.channels
    );

    let channels = deinterleave(&audio.samples, audio.spec.channels as usize);
    let mut processed = Vec::with_capacity(channels.len());
    for channel in &channels {
        let mut engine = ReverbEngine::new();
        engine.init(config)?;
        processed.push(engine.process_block(channel)?);
        engine.deinit()?;
    }

    Ok(PcmAudio::new(audio.spec, interleave(&processed)))
}

/// Run the single-tap echo over every channel.
///
/// The result is `offset` frames longer than the input.
pub fn render_delay(audio: &PcmAudio, amp: f32, offset: usize) -> Result<PcmAudio> {
    let echo = Echo::new(amp, offset)?;
    info!(
        "Rendering delay: gain {}, offset {} samples, {} frames",
        amp,
        offset,
        audio.frames()
    );

    let processed: Vec<Vec<Sample>> = deinterleave(&audio.samples, audio.spec.channels as usize)
        .iter()
        .map(|channel| echo.render(channel))
        .collect();

    Ok(PcmAudio::new(audio.spec, interleave(&processed)))
}

/// SHA-256 of the little-endian encoding, as lowercase hex
pub fn digest(samples: &[Sample]) -> String {
    let hash = Sha256::digest(encode_pcm_bytes(samples));
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}

/// De-interleave samples from [L,R,L,R,...] to [[L,L,...], [R,R,...]]
///
/// A trailing partial frame is dropped.
pub fn deinterleave(samples: &[Sample], channels: usize) -> Vec<Vec<Sample>> {
    if channels == 0 {
        return Vec::new();
    }
    let frames = samples.len() / channels;
    let mut result = vec![Vec::with_capacity(frames); channels];

    for frame in samples.chunks_exact(channels) {
        for (channel, &sample) in result.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    result
}

/// Interleave channels from [[L,L,...], [R,R,...]] to [L,R,L,R,...]
pub fn interleave(channels: &[Vec<Sample>]) -> Vec<Sample> {
    if channels.is_empty() {
        return Vec::new();
    }

    let num_channels = channels.len();
    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    let mut result = Vec::with_capacity(frames * num_channels);

    for frame in 0..frames {
        for channel in channels {
            result.push(channel[frame]);
        }
    }

    result
}
