//! Schroeder allpass filter

use super::delay_line::DelayLine;
use super::sample::{saturate, Sample};

/// Allpass filter for diffusion
///
/// Implements: y[n] = -gain * x[n] + x[n - delay] + gain * y[n - delay]
///
/// The delay line stores `x + gain * y`, so one read and one write per sample
/// carry both the feedforward and feedback terms. Magnitude response is flat;
/// only the phase (and so the echo density) changes.
#[derive(Debug, Clone)]
pub struct AllpassFilter {
    /// Holds x[n] + gain * y[n]
    line: DelayLine,
    /// Allpass coefficient, 0 <= gain < 1
    gain: f32,
    /// Loop length in samples
    delay: usize,
}

impl AllpassFilter {
    /// Create an allpass filter. Parameters are validated by `ReverbConfig`.
    pub fn new(gain: f32, delay: usize) -> Self {
        Self {
            line: DelayLine::new(delay),
            gain,
            delay,
        }
    }

    /// Process a single sample through the allpass filter
    #[inline]
    pub fn process(&mut self, input: Sample) -> Sample {
        let delayed = self.line.tap(self.delay) as f32;
        let input = input as f32;

        let output = delayed - self.gain * input;
        self.line.write(saturate(input + self.gain * output));

        saturate(output)
    }

    /// Clear the filter state
    pub fn clear(&mut self) {
        self.line.clear();
    }
}
