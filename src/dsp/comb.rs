//! Feedback comb filter

use super::delay_line::DelayLine;
use super::sample::{saturate, Sample};

/// Feedback comb filter
///
/// Implements: y[n] = x[n] + gain * y[n - delay]
///
/// The past *output* recirculates, producing repeats spaced `delay` samples
/// apart that decay by `gain` each pass.
#[derive(Debug, Clone)]
pub struct CombFilter {
    /// Holds past outputs
    line: DelayLine,
    /// Feedback coefficient, 0 <= gain < 1
    gain: f32,
    /// Loop length in samples
    delay: usize,
}

impl CombFilter {
    /// Create a comb filter. Parameters are validated by `ReverbConfig`.
    pub fn new(gain: f32, delay: usize) -> Self {
        Self {
            line: DelayLine::new(delay),
            gain,
            delay,
        }
    }

    /// Process a single sample through the comb filter
    #[inline]
    pub fn process(&mut self, input: Sample) -> Sample {
        let delayed = self.line.tap(self.delay);
        let output = saturate(input as f32 + self.gain * delayed as f32);
        self.line.write(output);
        output
    }

    /// Clear the filter state
    pub fn clear(&mut self) {
        self.line.clear();
    }
}
