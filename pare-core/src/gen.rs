//! Generator combinators for property-based testing.

use crate::{data::*, error::*};

/// Characters produced by [`Gen::alphanumeric_char`].
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of consecutive rejections between `filter` diagnostics.
const FILTER_REPORT_INTERVAL: u64 = 1000;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values composed with combinator
/// functions. A generator holds no mutable state: all randomness comes from
/// the [`Seed`] passed to [`Gen::generate`], so the same seed always yields
/// the same value. Generators are not `Send`; give each thread its own
/// generator and seed.
pub struct Gen<T> {
    generator: Box<dyn Fn(Seed) -> T>,
}

impl<T> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Seed) -> T + 'static,
    {
        Gen {
            generator: Box::new(f),
        }
    }

    /// Generate a value from the given seed.
    pub fn generate(&self, seed: Seed) -> T {
        (self.generator)(seed)
    }

    /// Draw one value using a fresh random seed.
    pub fn sample(&self) -> T {
        self.generate(Seed::random())
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone + 'static,
    {
        Gen::new(move |_seed| value.clone())
    }
}

impl<T> Gen<T>
where
    T: 'static,
{
    /// Map a function over the generated values.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        Gen::new(move |seed| f(self.generate(seed)))
    }

    /// Bind/flatmap for dependent generation.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + 'static,
        U: 'static,
    {
        Gen::new(move |seed| {
            let (seed1, seed2) = seed.split();
            let value = self.generate(seed1);
            f(value).generate(seed2)
        })
    }

    /// Keep only values satisfying `predicate`, resampling until one does.
    ///
    /// There is no attempt cap. A predicate that no generated value can
    /// satisfy, or that holds with vanishing probability, makes generation
    /// loop forever. Long rejection runs are reported through `tracing` at
    /// debug level.
    pub fn filter<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        Gen::new(move |seed| {
            let mut seed = seed;
            let mut rejected: u64 = 0;
            loop {
                let (attempt, rest) = seed.split();
                let value = self.generate(attempt);
                if predicate(&value) {
                    return value;
                }
                rejected += 1;
                if rejected % FILTER_REPORT_INTERVAL == 0 {
                    tracing::debug!(rejected, "filter is still rejecting samples");
                }
                seed = rest;
            }
        })
    }

    /// Post-process each sample with `on_true` when `predicate` holds on it,
    /// and with `on_false` otherwise.
    pub fn partitioned_map<U, P, F, G>(self, predicate: P, (on_true, on_false): (F, G)) -> Gen<U>
    where
        P: Fn(&T) -> bool + 'static,
        F: Fn(T) -> U + 'static,
        G: Fn(T) -> U + 'static,
        U: 'static,
    {
        Gen::new(move |seed| {
            let value = self.generate(seed);
            if predicate(&value) {
                on_true(value)
            } else {
                on_false(value)
            }
        })
    }
}

impl Gen<bool> {
    /// Generate `true` with probability `p`.
    pub fn boolean(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(PareError::invalid_argument(format!(
                "probability must lie in [0, 1], got {p}"
            )));
        }
        Ok(Gen::new(move |seed| seed.next_unit().0 < p))
    }
}

impl Gen<i64> {
    /// Generate an integer uniformly in `[min, max]`.
    pub fn integer(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(PareError::invalid_argument(format!(
                "integer range is empty: {min} > {max}"
            )));
        }
        Ok(Gen::new(move |seed| seed.next_in_range(min, max).0))
    }

    /// Generate an integer uniformly in `[0, max]`.
    pub fn integer_nonneg(max: i64) -> Result<Self> {
        if max < 0 {
            return Err(PareError::invalid_argument(format!(
                "upper bound must be non-negative, got {max}"
            )));
        }
        Self::integer(0, max)
    }
}

impl Gen<f64> {
    /// Generate a float uniformly in `[min, max]`.
    pub fn float(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(PareError::invalid_argument(format!(
                "float bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(PareError::invalid_argument(format!(
                "float range is empty: {min} > {max}"
            )));
        }
        Ok(Gen::new(move |seed| {
            let (t, _) = seed.next_unit_closed();
            // Interpolating this way cannot overflow for extreme bounds.
            let value = min * (1.0 - t) + max * t;
            value.max(min).min(max)
        }))
    }

    /// Generate a float uniformly in `[0, max]`.
    pub fn float_nonneg(max: f64) -> Result<Self> {
        if max < 0.0 {
            return Err(PareError::invalid_argument(format!(
                "upper bound must be non-negative, got {max}"
            )));
        }
        Self::float(0.0, max)
    }
}

impl Gen<char> {
    /// Generate a byte-valued character, uniform over `0..=255`.
    pub fn char() -> Self {
        Gen::new(|seed| {
            let (byte, _) = seed.next_bounded(256);
            char::from(byte as u8)
        })
    }

    /// Generate a character uniformly from `[a-zA-Z0-9]`.
    pub fn alphanumeric_char() -> Self {
        Gen::new(|seed| {
            let (index, _) = seed.next_bounded(ALPHANUMERIC.len() as u64);
            char::from(ALPHANUMERIC[index as usize])
        })
    }
}

impl Gen<String> {
    /// Generate a string of exactly `length` characters, each drawn
    /// independently from `chars`.
    pub fn string(length: isize, chars: Gen<char>) -> Result<Self> {
        let length = checked_length(length, "string")?;
        Ok(Gen::new(move |seed| {
            independent_seeds(seed, length)
                .map(|seed| chars.generate(seed))
                .collect()
        }))
    }
}

impl<T> Gen<Vec<T>>
where
    T: 'static,
{
    /// Generate a list of exactly `length` elements, each drawn
    /// independently from `elements`.
    pub fn list(length: isize, elements: Gen<T>) -> Result<Self> {
        let length = checked_length(length, "list")?;
        Ok(Gen::new(move |seed| {
            independent_seeds(seed, length)
                .map(|seed| elements.generate(seed))
                .collect()
        }))
    }
}

impl<A, B> Gen<(A, B)>
where
    A: 'static,
    B: 'static,
{
    /// Generate pairs, sampling `first` then `second` from independent seeds.
    pub fn combine(first: Gen<A>, second: Gen<B>) -> Self {
        Gen::new(move |seed| {
            let (seed1, seed2) = seed.split();
            (first.generate(seed1), second.generate(seed2))
        })
    }
}

/// Convert a requested length to `usize`, rejecting negative values.
fn checked_length(length: isize, what: &str) -> Result<usize> {
    usize::try_from(length).map_err(|_| {
        PareError::invalid_argument(format!("{what} length must be non-negative, got {length}"))
    })
}

/// Yield `count` independent seeds split off from `seed`.
fn independent_seeds(seed: Seed, count: usize) -> impl Iterator<Item = Seed> {
    let mut rest = seed;
    (0..count).map(move |_| {
        let (here, next) = rest.split();
        rest = next;
        here
    })
}
