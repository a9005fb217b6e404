//! Reverb Property Tests
//!
//! Behavioral guarantees of the engine: decay, stability, determinism,
//! equivalence with the single-tap echo, and lifecycle.

use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;

use jcrev::dsp::{
    AllpassFilter, Echo, FilterParams, ReverbConfig, ReverbEngine, Sample, DELAY_CEILING,
};
use jcrev::engine::{digest, generate_test_tone};
use jcrev::ReverbError;

/// Deterministic pseudo-random samples in [-amplitude, amplitude]
fn noise(len: usize, amplitude: i32, seed: u32) -> Vec<Sample> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let unit = (state >> 16) as i32 - 32768; // -32768..32767
            (unit * amplitude / 32768) as Sample
        })
        .collect()
}

fn peak(samples: &[Sample]) -> i32 {
    samples.iter().map(|&s| (s as i32).abs()).max().unwrap_or(0)
}

// === Decay and Stability ===

#[test]
fn test_silence_stays_silent() {
    let mut engine = ReverbEngine::with_config(&ReverbConfig::default()).unwrap();
    let output = engine.process_block(&vec![0; 20_000]).unwrap();
    assert!(output.iter().all(|&s| s == 0));
}

#[test]
fn test_impulse_decays_to_silence() {
    let mut engine = ReverbEngine::with_config(&ReverbConfig::default()).unwrap();

    let mut input = vec![0; 400_000];
    input[0] = i16::MAX;
    let output = engine.process_block(&input).unwrap();

    let early = peak(&output[..50_000]);
    let late = peak(&output[390_000..]);
    assert!(early > 1000, "impulse produced no reverb (peak {})", early);
    assert!(
        late <= 16,
        "tail did not decay: early peak {}, late peak {}",
        early,
        late
    );
}

#[test]
fn test_high_feedback_stays_bounded_and_decays() {
    let config = ReverbConfig::new(
        17,
        vec![
            FilterParams::new(0.9, 7),
            FilterParams::new(0.9, 11),
            FilterParams::new(0.9, 13),
            FilterParams::new(0.9, 17),
        ],
        vec![
            FilterParams::new(0.9, 3),
            FilterParams::new(0.9, 5),
            FilterParams::new(0.9, 7),
        ],
    );
    let mut engine = ReverbEngine::with_config(&config).unwrap();

    // Full-scale square wave drives every stage into the clamp
    let driven: Vec<Sample> = (0..50_000)
        .map(|n| if (n / 25) % 2 == 0 { i16::MAX } else { i16::MIN })
        .collect();
    engine.process_block(&driven).unwrap();

    let tail = engine.process_block(&vec![0; 20_000]).unwrap();
    assert!(
        peak(&tail[19_000..]) <= 327,
        "clamped feedback failed to decay: {}",
        peak(&tail[19_000..])
    );
}

// === Reference Equivalence ===

#[test]
fn test_single_comb_matches_echo_reference() {
    let (gain, delay) = (0.697, 5801);
    let config = ReverbConfig::new(delay, vec![FilterParams::new(gain, delay)], vec![]);
    let mut engine = ReverbEngine::with_config(&config).unwrap();

    // Shorter than two loop lengths: the comb recirculates exactly once
    let input = noise(2 * delay - 1, 16_000, 7);
    let reverb = engine.process_block(&input).unwrap();
    let reference = Echo::new(gain, delay).unwrap().render(&input);

    for (n, (&a, &b)) in reverb.iter().zip(&reference).enumerate() {
        assert!(
            (a as i32 - b as i32).abs() <= 1,
            "sample {}: comb {} vs echo {}",
            n,
            a,
            b
        );
    }
}

#[test]
fn test_end_to_end_comb_halving() {
    let config = ReverbConfig::new(2, vec![FilterParams::new(0.5, 2)], vec![]);
    let mut engine = ReverbEngine::with_config(&config).unwrap();
    let output = engine.process_block(&[100, 0, 0, 0, 0, 0]).unwrap();
    assert_eq!(output, vec![100, 0, 50, 0, 25, 0]);
}

// === Allpass Magnitude ===

#[test]
fn test_allpass_sine_amplitude_does_not_grow() {
    // 1225 Hz at 44.1 kHz: exactly 36 samples per period
    let input = generate_test_tone(1225.0, 8000, 30_000, 44_100);

    let mut allpass = AllpassFilter::new(0.7, 113);
    let output: Vec<Sample> = input.iter().map(|&x| allpass.process(x)).collect();

    let steady = peak(&output[25_000..]);
    assert!(steady <= 8000 + 8, "allpass amplified the sine: {}", steady);
    assert_abs_diff_eq!(steady as f64, 8000.0, epsilon = 64.0);
}

#[test]
fn test_allpass_cascade_preserves_amplitude() {
    // A zero-gain comb of one sample leaves only the allpass chain audible
    let config = ReverbConfig::new(
        1051,
        vec![FilterParams::new(0.0, 1)],
        ReverbConfig::default().allpasses,
    );
    let mut engine = ReverbEngine::with_config(&config).unwrap();

    let input = generate_test_tone(1225.0, 8000, 40_000, 44_100);
    let output = engine.process_block(&input).unwrap();

    let steady = peak(&output[35_000..]);
    assert!(steady <= 8000 + 16, "allpass chain amplified the sine: {}", steady);
    assert_abs_diff_eq!(steady as f64, 8000.0, epsilon = 64.0);
}

// === Determinism and Lifecycle ===

#[test]
fn test_independent_instances_are_identical() {
    let config = ReverbConfig::default();
    let input = noise(30_000, 20_000, 42);

    let mut first = ReverbEngine::with_config(&config).unwrap();
    let mut second = ReverbEngine::with_config(&config).unwrap();

    let a = first.process_block(&input).unwrap();
    let b: Vec<Sample> = input.iter().map(|&x| second.process(x).unwrap()).collect();

    assert!(a == b, "outputs of identical engines diverged");
    assert_eq!(digest(&a), digest(&b));
}

#[test]
fn test_reinit_leaves_no_residual_state() {
    let config = ReverbConfig::default();
    let input = noise(20_000, 20_000, 1);

    let mut engine = ReverbEngine::new();
    engine.init(&config).unwrap();
    let first = engine.process_block(&input).unwrap();
    engine.deinit().unwrap();

    engine.init(&config).unwrap();
    let second = engine.process_block(&input).unwrap();
    engine.deinit().unwrap();

    assert!(first == second, "re-initialized engine reproduced different output");
}

#[test]
fn test_lifecycle_violations() {
    let mut engine = ReverbEngine::new();
    assert!(matches!(engine.process(1), Err(ReverbError::NotInitialized)));
    assert!(matches!(engine.deinit(), Err(ReverbError::NotInitialized)));

    engine.init(&ReverbConfig::default()).unwrap();
    assert!(matches!(
        engine.init(&ReverbConfig::default()),
        Err(ReverbError::AlreadyInitialized)
    ));
    assert!(engine.process(1).is_ok());

    engine.deinit().unwrap();
    let err = engine.process(1).unwrap_err();
    assert!(err.is_state_error());
}

#[test]
fn test_delay_beyond_capacity_is_rejected_at_init() {
    let mut config = ReverbConfig::default();
    config.combs[1].delay = config.max_delay + 1;

    let mut engine = ReverbEngine::new();
    let err = engine.init(&config).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(!engine.is_initialized());
}

#[test]
fn test_oversized_delays_are_rejected_at_init() {
    let config: ReverbConfig = serde_json::from_str(
        r#"{"max_delay":18446744073709551615,"combs":[{"gain":0.5,"delay":18446744073709551615}],"allpasses":[]}"#,
    )
    .unwrap();

    let mut engine = ReverbEngine::new();
    let err = engine.init(&config).unwrap_err();
    assert!(err.is_configuration_error());
    assert!(!engine.is_initialized());
}

#[test]
fn test_delay_ceiling_is_accepted() {
    let config = ReverbConfig::new(
        DELAY_CEILING,
        vec![FilterParams::new(0.5, DELAY_CEILING)],
        vec![FilterParams::new(0.5, DELAY_CEILING)],
    );
    let mut engine = ReverbEngine::with_config(&config).unwrap();
    assert_eq!(engine.process(100).unwrap(), -50);
}

#[test]
fn test_reset_matches_fresh_engine() {
    let config = ReverbConfig::default();
    let input = noise(12_000, 20_000, 3);

    let mut engine = ReverbEngine::with_config(&config).unwrap();
    let first = engine.process_block(&input).unwrap();
    engine.reset().unwrap();
    let second = engine.process_block(&input).unwrap();

    assert!(first == second, "reset left residual state in the network");
}
