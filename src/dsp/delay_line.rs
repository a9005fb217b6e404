//! Fixed-capacity circular sample buffer.

use super::sample::Sample;

/// Circular delay line holding the last `capacity` written samples.
///
/// The capacity never changes after construction. `write_pos` always points
/// at the slot the next write will land in.
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// Circular buffer, zero-filled on construction
    buffer: Vec<Sample>,
    /// Current write position
    write_pos: usize,
}

impl DelayLine {
    /// Create a zero-filled delay line that can serve delays up to `max_delay`.
    ///
    /// The buffer holds `max_delay + 1` samples.
    pub fn new(max_delay: usize) -> Self {
        Self {
            buffer: vec![0; max_delay + 1],
            write_pos: 0,
        }
    }

    /// Number of samples the line holds
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Store a sample at the current position and advance.
    #[inline]
    pub fn write(&mut self, sample: Sample) {
        self.buffer[self.write_pos] = sample;
        self.write_pos += 1;
        if self.write_pos == self.buffer.len() {
            self.write_pos = 0;
        }
    }

    /// Sample written `offset` steps before the most recent write.
    ///
    /// `read(0)` is the most recent write. Requires `offset < capacity`.
    #[inline]
    pub fn read(&self, offset: usize) -> Sample {
        debug_assert!(
            offset < self.buffer.len(),
            "delay line offset {} out of range (capacity {})",
            offset,
            self.buffer.len()
        );
        let size = self.buffer.len();
        let latest = self.write_pos + size - 1;
        self.buffer[(latest - offset) % size]
    }

    /// Sample that will be `delay` samples old once the next write lands.
    ///
    /// This is the `x[n - delay]` term of a filter that reads before it
    /// writes. Requires `1 <= delay < capacity`.
    #[inline]
    pub fn tap(&self, delay: usize) -> Sample {
        debug_assert!(delay >= 1, "delay line tap must be at least 1 sample");
        self.read(delay - 1)
    }

    /// Zero the buffer and rewind the write position.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
        self.write_pos = 0;
    }
}
