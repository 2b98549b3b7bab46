#![forbid(unsafe_code)]

//! Caller-owned random generator for auxiliary utilities.
//!
//! Callers construct and seed an [`Rng`] once at startup and thread it
//! through explicitly; there is no hidden, lazily initialized process-wide
//! state. The generator is xorshift64*, which is plenty for picking random
//! cells or colours and keeps runs reproducible for a given seed.

/// A small deterministic generator.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a generator from a seed.
    ///
    /// A zero seed is remapped to a fixed non-zero constant because
    /// xorshift has an all-zero fixed point.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Random integer in `[min, max)`.
    ///
    /// Returns `min` when the range is empty.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64) as u64;
        (min as i64 + (self.next_u64() % span) as i64) as i32
    }
}
