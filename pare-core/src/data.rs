//! Explicit random state threaded through every generator.

use std::fmt;

/// Largest magnitude below which every whole number is exactly representable
/// as an `f64`.
pub(crate) const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Splittable random seed for deterministic generation.
///
/// Seeds are plain values: drawing from a seed returns the drawn value
/// together with the successor seed, and splitting yields two independent
/// streams. Nothing is shared between threads, so independent threads can
/// generate safely from independent seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Draw a seed from the thread-local entropy source.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        Seed::from_u64(rng.gen())
    }

    /// Split a seed into two independent seeds.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a bounded random value in `[0, bound)`.
    ///
    /// A `bound` of zero always yields zero.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }

    /// Generate a float in the half-open interval `[0, 1)`.
    pub fn next_unit(self) -> (f64, Self) {
        let (value, new_seed) = self.next_u64();
        ((value >> 11) as f64 / (1u64 << 53) as f64, new_seed)
    }

    /// Generate a float in the closed interval `[0, 1]`.
    pub fn next_unit_closed(self) -> (f64, Self) {
        let (value, new_seed) = self.next_u64();
        ((value >> 11) as f64 / ((1u64 << 53) - 1) as f64, new_seed)
    }

    /// Generate an integer in `[min, max]` inclusive.
    ///
    /// Handles the full `i64` span, where the width does not fit in a `u64`
    /// bound. Callers guarantee `min <= max`.
    pub fn next_in_range(self, min: i64, max: i64) -> (i64, Self) {
        let width = (max as i128 - min as i128 + 1) as u128;
        if width > u64::MAX as u128 {
            let (value, new_seed) = self.next_u64();
            return (min.wrapping_add(value as i64), new_seed);
        }
        let (offset, new_seed) = self.next_bounded(width as u64);
        ((min as i128 + offset as i128) as i64, new_seed)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// SplitMix64 mixing function.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Derive an odd gamma for a split stream.
fn mix_gamma(z: u64) -> u64 {
    let z = splitmix64_mix(z);
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
