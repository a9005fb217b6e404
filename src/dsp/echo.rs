//! Single-tap feedforward echo
//!
//! The simplest delay effect: every input sample is repeated once, `offset`
//! samples later and scaled by `amp`. Used as the "delay-only" reference a
//! single comb filter must agree with before its second recirculation.

use super::reverb::DELAY_CEILING;
use super::sample::{saturate, Sample};
use crate::error::{ReverbError, Result};

/// Feedforward echo: y[n] = x[n] + round(amp * x[n - offset])
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Echo {
    /// Echo level (0 to < 1)
    amp: f32,
    /// Echo distance in samples
    offset: usize,
}

impl Echo {
    /// Create a new echo
    ///
    /// # Arguments
    /// * `amp` - Echo level, 0.0 <= amp < 1.0
    /// * `offset` - Echo distance in samples, 1 to `DELAY_CEILING`
    pub fn new(amp: f32, offset: usize) -> Result<Self> {
        if !(0.0..1.0).contains(&amp) {
            return Err(ReverbError::invalid_parameter(
                "delay_gain",
                amp,
                "0.0 <= gain < 1.0",
            ));
        }
        if offset == 0 || offset > DELAY_CEILING {
            return Err(ReverbError::invalid_parameter(
                "delay_offset",
                offset,
                format!("1 to {} samples", DELAY_CEILING),
            ));
        }
        Ok(Self { amp, offset })
    }

    /// Apply the echo to a whole signal.
    ///
    /// The output is `offset` samples longer than the input so the echo of the
    /// final samples is not cut off.
    pub fn render(&self, input: &[Sample]) -> Vec<Sample> {
        let len = input.len() + self.offset;
        (0..len)
            .map(|n| {
                let dry = input.get(n).copied().unwrap_or(0) as f32;
                let wet = n
                    .checked_sub(self.offset)
                    .and_then(|i| input.get(i))
                    .map(|&x| (self.amp * x as f32).round())
                    .unwrap_or(0.0);
                saturate(dry + wet)
            })
            .collect()
    }
}
