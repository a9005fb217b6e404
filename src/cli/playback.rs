//! Playback of decoded audio on the default output device.
//!
//! The harness already holds the source and the rendered result in memory, so
//! playback streams those samples straight to the device instead of re-reading
//! the written files.

use crate::dsp::Sample;
use crate::engine::{deinterleave, PcmAudio};
use crate::error::Result;

/// Something that can play decoded audio to completion
pub trait Playback {
    fn play(&self, audio: &PcmAudio) -> Result<()>;
}

/// Convert 16-bit PCM into interleaved `f32` frames for a device.
///
/// Channels are mapped by index; a mono source feeds every device channel and
/// device channels past the source's get silence. Sample rates are converted
/// by linear interpolation.
pub fn device_frames(audio: &PcmAudio, device_channels: u16, device_rate: u32) -> Vec<f32> {
    let source_channels = audio.spec.channels.max(1) as usize;
    let channels: Vec<Vec<f32>> = deinterleave(&audio.samples, source_channels)
        .iter()
        .map(|channel| resample_linear(channel, audio.spec.sample_rate, device_rate))
        .collect();

    let frames = channels.first().map_or(0, Vec::len);
    let device_channels = device_channels as usize;
    let mut output = Vec::with_capacity(frames * device_channels);
    for frame in 0..frames {
        for out_ch in 0..device_channels {
            let sample = match channels.len() {
                1 => channels[0][frame],
                n if out_ch < n => channels[out_ch][frame],
                _ => 0.0,
            };
            output.push(sample);
        }
    }
    output
}

fn resample_linear(samples: &[Sample], from_rate: u32, to_rate: u32) -> Vec<f32> {
    let scaled = samples.iter().map(|&s| s as f32 / 32768.0);
    if from_rate == to_rate || from_rate == 0 || samples.is_empty() {
        return scaled.collect();
    }
    let input: Vec<f32> = scaled.collect();

    let ratio = to_rate as f64 / from_rate as f64;
    let output_len = ((input.len() as f64) * ratio).round() as usize;
    let last = input.len() - 1;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 / ratio;
            let index = (pos.floor() as usize).min(last);
            let frac = (pos - index as f64) as f32;
            let next = input[(index + 1).min(last)];
            input[index] + (next - input[index]) * frac
        })
        .collect()
}

#[cfg(feature = "playback")]
pub use device::CpalPlayer;

#[cfg(feature = "playback")]
mod device {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use cpal::{BufferSize, Device, SampleFormat, StreamConfig, SupportedStreamConfig};
    use log::{debug, error};

    use super::{device_frames, Playback};
    use crate::engine::PcmAudio;
    use crate::error::{ReverbError, Result};

    /// Extra wait past the nominal duration before giving up on a stream
    const STALL_GRACE: Duration = Duration::from_secs(2);
    /// Lets the device drain its last buffer before the stream is dropped
    const DRAIN_TIME: Duration = Duration::from_millis(150);
    const POLL_INTERVAL: Duration = Duration::from_millis(20);

    /// Plays audio on the default output device of the default host
    #[derive(Debug, Default)]
    pub struct CpalPlayer;

    impl Playback for CpalPlayer {
        fn play(&self, audio: &PcmAudio) -> Result<()> {
            let host = cpal::default_host();
            let device = host.default_output_device().ok_or_else(|| ReverbError::Playback {
                reason: "no output device available".to_string(),
            })?;
            let supported = output_config(&device)?;

            let config = StreamConfig {
                channels: supported.channels(),
                sample_rate: supported.sample_rate(),
                buffer_size: BufferSize::Default,
            };
            debug!(
                "Playing {} frames on {} ({} ch @ {} Hz)",
                audio.frames(),
                device.name().unwrap_or_else(|_| "unknown device".to_string()),
                config.channels,
                config.sample_rate.0
            );

            let samples = Arc::new(device_frames(audio, config.channels, config.sample_rate.0));
            let total = samples.len();
            let position = Arc::new(AtomicUsize::new(0));

            let stream_samples = Arc::clone(&samples);
            let stream_position = Arc::clone(&position);
            let stream = device
                .build_output_stream(
                    &config,
                    move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                        let start = stream_position.load(Ordering::Relaxed);
                        let end = (start + data.len()).min(stream_samples.len());
                        let written = end - start;
                        data[..written].copy_from_slice(&stream_samples[start..end]);
                        data[written..].fill(0.0);
                        stream_position.store(end, Ordering::Relaxed);
                    },
                    move |err| error!("Audio stream error: {}", err),
                    None,
                )
                .map_err(playback_error)?;
            stream.play().map_err(playback_error)?;

            let frames = total / config.channels.max(1) as usize;
            let expected =
                Duration::from_secs_f64(frames as f64 / config.sample_rate.0.max(1) as f64);
            let deadline = Instant::now() + expected + STALL_GRACE;

            while position.load(Ordering::Relaxed) < total {
                if Instant::now() > deadline {
                    return Err(ReverbError::Playback {
                        reason: "output stream stalled".to_string(),
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            std::thread::sleep(DRAIN_TIME);
            Ok(())
        }
    }

    /// Default output config, or an `f32` config at the same rate.
    fn output_config(device: &Device) -> Result<SupportedStreamConfig> {
        let default = device.default_output_config().map_err(playback_error)?;
        if default.sample_format() == SampleFormat::F32 {
            return Ok(default);
        }

        let rate = default.sample_rate();
        device
            .supported_output_configs()
            .map_err(playback_error)?
            .filter(|range| range.sample_format() == SampleFormat::F32)
            .find(|range| {
                range.min_sample_rate().0 <= rate.0 && rate.0 <= range.max_sample_rate().0
            })
            .map(|range| range.with_sample_rate(rate))
            .ok_or_else(|| ReverbError::Playback {
                reason: format!("device has no f32 output at {} Hz", rate.0),
            })
    }

    fn playback_error(err: impl std::fmt::Display) -> ReverbError {
        ReverbError::Playback {
            reason: err.to_string(),
        }
    }
}

/// Stand-in used when the crate is built without an audio backend
#[cfg(not(feature = "playback"))]
#[derive(Debug, Default)]
pub struct NoPlayback;

#[cfg(not(feature = "playback"))]
impl Playback for NoPlayback {
    fn play(&self, _audio: &PcmAudio) -> Result<()> {
        Err(crate::error::ReverbError::Playback {
            reason: "built without the `playback` feature".to_string(),
        })
    }
}
