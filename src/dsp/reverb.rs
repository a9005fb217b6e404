//! Reverb engine
//!
//! A Schroeder reverberator (JCRev topology):
//! - parallel feedback comb filters, all fed the same dry sample
//! - comb outputs averaged into one signal
//! - series allpass filters for diffusion
//!
//! The engine works on 16-bit integer samples and saturates after every
//! stage, so a hot input can clip but never corrupts the feedback state.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::allpass::AllpassFilter;
use super::comb::CombFilter;
use super::sample::{saturate, Sample};
use crate::error::{ReverbError, Result};

// ============================================================================
// Reference Preset
// ============================================================================

/// Longest delay of the reference preset, in samples
pub const DEFAULT_MAX_DELAY: usize = 5801;

/// Largest delay any filter or echo accepts, in samples
pub const DELAY_CEILING: usize = i16::MAX as usize;

/// Reference comb filters: (gain, delay in samples)
pub const DEFAULT_COMBS: [(f32, usize); 4] =
    [(0.697, 5801), (0.715, 5399), (0.733, 4999), (0.742, 4799)];

/// Reference allpass filters: (gain, delay in samples)
pub const DEFAULT_ALLPASSES: [(f32, usize); 3] = [(0.7, 1051), (0.7, 337), (0.7, 113)];

// ============================================================================
// Parameter Structs
// ============================================================================

/// Gain and delay of a single comb or allpass filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Feedback/allpass coefficient: 0 to < 1
    pub gain: f32,
    /// Delay in samples: 1 to `max_delay`
    pub delay: usize,
}

impl FilterParams {
    pub fn new(gain: f32, delay: usize) -> Self {
        Self { gain, delay }
    }
}

impl From<(f32, usize)> for FilterParams {
    fn from((gain, delay): (f32, usize)) -> Self {
        Self { gain, delay }
    }
}

/// Reverb engine configuration
///
/// `max_delay` bounds the delay of every filter; it sizes nothing on its own
/// and never enters the signal path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverbConfig {
    /// Upper bound for every filter delay, in samples
    pub max_delay: usize,
    /// Parallel comb filters, in order
    pub combs: Vec<FilterParams>,
    /// Serial allpass filters, in processing order
    pub allpasses: Vec<FilterParams>,
}

impl Default for ReverbConfig {
    fn default() -> Self {
        Self::schroeder(DEFAULT_MAX_DELAY, DEFAULT_COMBS, DEFAULT_ALLPASSES)
    }
}

impl ReverbConfig {
    /// Build the canonical four-comb, three-allpass network.
    pub fn schroeder(
        max_delay: usize,
        combs: [(f32, usize); 4],
        allpasses: [(f32, usize); 3],
    ) -> Self {
        Self {
            max_delay,
            combs: combs.into_iter().map(FilterParams::from).collect(),
            allpasses: allpasses.into_iter().map(FilterParams::from).collect(),
        }
    }

    /// Build a network with arbitrary filter counts.
    pub fn new(max_delay: usize, combs: Vec<FilterParams>, allpasses: Vec<FilterParams>) -> Self {
        Self {
            max_delay,
            combs,
            allpasses,
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReverbError::FileNotFound {
                path: path.display().to_string(),
                source: None,
            });
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Validate all parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_delay == 0 || self.max_delay > DELAY_CEILING {
            return Err(ReverbError::invalid_parameter(
                "max_delay",
                self.max_delay,
                format!("1 to {} samples", DELAY_CEILING),
            ));
        }
        if self.combs.is_empty() {
            return Err(ReverbError::invalid_parameter(
                "combs",
                "[]",
                "at least one comb filter",
            ));
        }

        let filters = self
            .combs
            .iter()
            .enumerate()
            .map(|(i, p)| (format!("combs[{}]", i), p))
            .chain(
                self.allpasses
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (format!("allpasses[{}]", i), p)),
            );

        for (name, params) in filters {
            if !(0.0..1.0).contains(&params.gain) {
                return Err(ReverbError::invalid_parameter(
                    format!("{}.gain", name),
                    params.gain,
                    "0.0 <= gain < 1.0",
                ));
            }
            if params.delay == 0 || params.delay > self.max_delay {
                return Err(ReverbError::invalid_parameter(
                    format!("{}.delay", name),
                    params.delay,
                    format!("1 to {} samples", self.max_delay),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Engine
// ============================================================================

/// The filters of an initialized engine
#[derive(Debug, Clone)]
struct Network {
    config: ReverbConfig,
    combs: Vec<CombFilter>,
    allpasses: Vec<AllpassFilter>,
}

impl Network {
    fn build(config: &ReverbConfig) -> Self {
        Self {
            config: config.clone(),
            combs: config
                .combs
                .iter()
                .map(|p| CombFilter::new(p.gain, p.delay))
                .collect(),
            allpasses: config
                .allpasses
                .iter()
                .map(|p| AllpassFilter::new(p.gain, p.delay))
                .collect(),
        }
    }

    #[inline]
    fn process(&mut self, input: Sample) -> Sample {
        // Each comb sees the dry input; outputs are averaged, not chained
        let sum: i32 = self
            .combs
            .iter_mut()
            .map(|comb| comb.process(input) as i32)
            .sum();
        let mixed = saturate(sum as f32 / self.combs.len() as f32);

        self.allpasses
            .iter_mut()
            .fold(mixed, |sample, allpass| allpass.process(sample))
    }

    fn clear(&mut self) {
        self.combs.iter_mut().for_each(CombFilter::clear);
        self.allpasses.iter_mut().for_each(AllpassFilter::clear);
    }
}

/// Schroeder reverberator over 16-bit samples
///
/// Starts uninitialized. `init` builds and zero-fills the filter network,
/// `process` runs one sample through it, `deinit` drops it again. Calling
/// `init` twice without `deinit` is rejected with `AlreadyInitialized`.
///
/// One engine carries the state of exactly one channel. Samples must be fed in
/// stream order; process other channels with their own engines.
#[derive(Debug, Clone, Default)]
pub struct ReverbEngine {
    network: Option<Network>,
}

impl ReverbEngine {
    /// Create an uninitialized engine
    pub fn new() -> Self {
        Self { network: None }
    }

    /// Create and initialize an engine in one step
    pub fn with_config(config: &ReverbConfig) -> Result<Self> {
        let mut engine = Self::new();
        engine.init(config)?;
        Ok(engine)
    }

    /// Validate `config`, then allocate and zero-fill every delay line.
    ///
    /// On error the engine is left exactly as it was.
    pub fn init(&mut self, config: &ReverbConfig) -> Result<()> {
        if self.network.is_some() {
            return Err(ReverbError::AlreadyInitialized);
        }
        config.validate()?;

        self.network = Some(Network::build(config));
        debug!(
            "Reverb initialized: {} combs, {} allpasses, max delay {} samples",
            config.combs.len(),
            config.allpasses.len(),
            config.max_delay
        );
        Ok(())
    }

    /// Release all filter state.
    pub fn deinit(&mut self) -> Result<()> {
        match self.network.take() {
            Some(_) => {
                debug!("Reverb deinitialized");
                Ok(())
            }
            None => Err(ReverbError::NotInitialized),
        }
    }

    /// Silence every delay line, keeping the network allocated.
    ///
    /// Output after a reset matches a freshly initialized engine.
    pub fn reset(&mut self) -> Result<()> {
        let network = self.network.as_mut().ok_or(ReverbError::NotInitialized)?;
        network.clear();
        debug!("Reverb reset");
        Ok(())
    }

    /// Check if the engine is ready to process
    pub fn is_initialized(&self) -> bool {
        self.network.is_some()
    }

    /// Configuration of the running network, if initialized
    pub fn config(&self) -> Option<&ReverbConfig> {
        self.network.as_ref().map(|n| &n.config)
    }

    /// Run one sample through combs and allpasses.
    #[inline]
    pub fn process(&mut self, sample: Sample) -> Result<Sample> {
        let network = self.network.as_mut().ok_or(ReverbError::NotInitialized)?;
        Ok(network.process(sample))
    }

    /// Run a block of consecutive samples.
    pub fn process_block(&mut self, input: &[Sample]) -> Result<Vec<Sample>> {
        let network = self.network.as_mut().ok_or(ReverbError::NotInitialized)?;
        Ok(input.iter().map(|&x| network.process(x)).collect())
    }
}
