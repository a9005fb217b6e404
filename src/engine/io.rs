//! Audio file I/O for jcrev
//!
//! Reads and writes 16-bit integer PCM WAV files and converts raw
//! little-endian PCM bytes to samples and back. Channel count, frame rate and
//! sample width pass through processing unchanged.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::dsp::Sample;
use crate::error::{ReverbError, Result};

/// The only sample width the engine accepts
pub const BITS_PER_SAMPLE: u16 = 16;

/// Stream metadata carried from the source file to every rendered file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    /// Number of interleaved channels
    pub channels: u16,
    /// Frames per second
    pub sample_rate: u32,
    /// Bits per sample (always 16)
    pub bits_per_sample: u16,
}

impl PcmSpec {
    /// Create a 16-bit spec
    pub fn new(channels: u16, sample_rate: u32) -> Self {
        PcmSpec {
            channels,
            sample_rate,
            bits_per_sample: BITS_PER_SAMPLE,
        }
    }

    /// Create a mono 16-bit spec
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(1, sample_rate)
    }

    /// Sample width in bytes
    pub fn sample_width(&self) -> u16 {
        self.bits_per_sample / 8
    }

    fn to_wav_spec(self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }
}

/// Interleaved 16-bit PCM audio with its stream metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub spec: PcmSpec,
    /// Interleaved samples: [L, R, L, R, ...] for stereo
    pub samples: Vec<Sample>,
}

impl PcmAudio {
    pub fn new(spec: PcmSpec, samples: Vec<Sample>) -> Self {
        PcmAudio { spec, samples }
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        match self.spec.channels {
            0 => 0,
            channels => self.samples.len() / channels as usize,
        }
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.spec.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.spec.sample_rate as f64
    }
}

/// Import a 16-bit PCM WAV file
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a valid WAV file
/// * `UnsupportedFormat` - If the audio is not 16-bit integer PCM
pub fn import_wav(path: &Path) -> Result<PcmAudio> {
    // Check file exists
    if !path.exists() {
        return Err(ReverbError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let mut reader = WavReader::open(path).map_err(|e| ReverbError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(ReverbError::UnsupportedFormat {
            format: format!(
                "{}-bit {:?} audio (only 16-bit integer PCM supported)",
                spec.bits_per_sample, spec.sample_format
            ),
        });
    }
    if spec.channels == 0 {
        return Err(ReverbError::InvalidAudio {
            reason: "WAV header declares zero channels".to_string(),
            source: None,
        });
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()
        .map_err(|e| ReverbError::InvalidAudio {
            reason: format!("Failed to read 16-bit samples: {}", e),
            source: Some(Box::new(e)),
        })?;

    Ok(PcmAudio::new(
        PcmSpec::new(spec.channels, spec.sample_rate),
        samples,
    ))
}

/// Export audio to a 16-bit PCM WAV file with the audio's own spec
pub fn export_wav(audio: &PcmAudio, path: &Path) -> Result<()> {
    let mut writer = WavWriter::create(path, audio.spec.to_wav_spec()).map_err(wav_error)?;

    for &sample in &audio.samples {
        writer.write_sample(sample).map_err(wav_error)?;
    }

    writer.finalize().map_err(wav_error)?;

    Ok(())
}

/// Decode raw little-endian 16-bit PCM bytes
pub fn decode_pcm_bytes(bytes: &[u8]) -> Result<Vec<Sample>> {
    if bytes.len() % 2 != 0 {
        return Err(ReverbError::InvalidAudio {
            reason: format!("PCM byte stream has odd length {}", bytes.len()),
            source: None,
        });
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| Sample::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Encode samples as raw little-endian 16-bit PCM bytes
pub fn encode_pcm_bytes(samples: &[Sample]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Generate a mono sine tone at the given peak amplitude
///
/// Useful for exercising the engine without a source file.
pub fn generate_test_tone(
    frequency: f32,
    amplitude: Sample,
    num_samples: usize,
    sample_rate: u32,
) -> Vec<Sample> {
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;

    (0..num_samples)
        .map(|i| (amplitude as f32 * (angular_freq * i as f32).sin()).round() as Sample)
        .collect()
}

fn wav_error(e: hound::Error) -> ReverbError {
    match e {
        hound::Error::IoError(io) => ReverbError::Io(io),
        other => ReverbError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}
