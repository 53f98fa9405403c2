//! Deterministic pseudo-random number generation.
//!
//! All randomness in the simulation (bot walk timers, particle speed and
//! lifetime ranges) flows through an explicitly seeded [`SimpleRng`] so that
//! physics scenarios reproduce bit-for-bit under a fixed seed.

/// Simple pseudo-random number generator.
///
/// Uses a basic xorshift algorithm for fast, deterministic randomness.
/// Not suitable for cryptography; entirely suitable for gameplay jitter.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new generator. A zero seed is bumped to 1 (xorshift
    /// degenerates at zero state).
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// Advance the generator and return the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Generate a random f32 in [0.0, 1.0)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Generate a random f32 in [min, max)
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Generate a random i32 in [min, max] (inclusive on both ends).
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = (max - min + 1) as u32;
        min + (self.next_u32() % span) as i32
    }

    /// Return true with the given probability (0.0 = never, 1.0 = always).
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }
}
