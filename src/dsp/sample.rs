//! Sample type and the overflow guard shared by every filter stage.

/// One 16-bit signed PCM sample
pub type Sample = i16;

/// Round to nearest (ties away from zero) and clamp into the 16-bit range.
///
/// Every value that is written into a delay line or returned from a filter
/// goes through here, so the recursive feedback state never wraps around.
#[inline]
pub fn saturate(value: f32) -> Sample {
    value
        .round()
        .clamp(Sample::MIN as f32, Sample::MAX as f32) as Sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_rounds_to_nearest() {
        assert_eq!(saturate(0.4), 0);
        assert_eq!(saturate(0.5), 1);
        assert_eq!(saturate(-0.5), -1);
        assert_eq!(saturate(69.7), 70);
        assert_eq!(saturate(-12.2), -12);
    }

    #[test]
    fn test_saturate_clamps() {
        assert_eq!(saturate(40000.0), i16::MAX);
        assert_eq!(saturate(-40000.0), i16::MIN);
        assert_eq!(saturate(32767.4), i16::MAX);
        assert_eq!(saturate(-32768.4), i16::MIN);
    }
}
