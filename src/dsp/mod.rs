//! DSP building blocks
//!
//! Delay lines, the comb and allpass filters built on them, the reverb engine
//! that wires them together, and the single-tap echo used as a reference.

mod allpass;
mod comb;
mod delay_line;
mod echo;
mod reverb;
mod sample;

pub use allpass::AllpassFilter;
pub use comb::CombFilter;
pub use delay_line::DelayLine;
pub use echo::Echo;
pub use reverb::{
    FilterParams, ReverbConfig, ReverbEngine, DEFAULT_ALLPASSES, DEFAULT_COMBS,
    DEFAULT_MAX_DELAY, DELAY_CEILING,
};
pub use sample::{saturate, Sample};
