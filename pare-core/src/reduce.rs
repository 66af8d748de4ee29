//! Reduction strategies for minimizing counterexamples.
//!
//! A [`Reduction`] maps a value to a lazy, finite sequence of simpler
//! candidates, simplest first. Every strategy here enumerates: numbers
//! propose every simpler value within the input's magnitude rather than
//! successive halvings, and characters propose every earlier character of
//! their own range. Composite strategies never change the shape of a value,
//! so a candidate always stays inside the space the paired [`Gen`] covers.
//!
//! [`Gen`]: crate::gen::Gen

use std::iter;
use std::ops::RangeInclusive;
use std::rc::Rc;

use crate::data::MAX_EXACT_F64;

/// Lazy sequence of candidates proposed by a [`Reduction`].
pub type Candidates<T> = Box<dyn Iterator<Item = T>>;

static LETTERS: [RangeInclusive<char>; 2] = ['a'..='z', 'A'..='Z'];
static ALPHANUMERICS: [RangeInclusive<char>; 3] = ['a'..='z', 'A'..='Z', '0'..='9'];

/// A strategy proposing simpler values of type `T`.
///
/// Candidates never include the input itself, and composing reductions
/// with the same structure as their generators keeps every candidate
/// producible by that generator. Cloning is cheap.
pub struct Reduction<T> {
    reducer: Rc<dyn Fn(&T) -> Candidates<T>>,
}

impl<T> Clone for Reduction<T> {
    fn clone(&self) -> Self {
        Reduction {
            reducer: Rc::clone(&self.reducer),
        }
    }
}

impl<T> Reduction<T>
where
    T: 'static,
{
    /// Create a new reduction from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> Candidates<T> + 'static,
    {
        Reduction {
            reducer: Rc::new(f),
        }
    }

    /// Propose simpler candidates for `value`, simplest first.
    pub fn reduce(&self, value: &T) -> Candidates<T> {
        (self.reducer)(value)
    }

    /// A reduction that never proposes anything.
    pub fn empty() -> Self {
        Self::new(|_value| Box::new(iter::empty()))
    }

    /// Keep only candidates satisfying `predicate`, preserving their order.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        Self::new(move |value| {
            let predicate = Rc::clone(&predicate);
            Box::new(self.reduce(value).filter(move |candidate| predicate(candidate)))
        })
    }
}

impl Reduction<bool> {
    /// `true` reduces to `false`; `false` is minimal.
    pub fn bool() -> Self {
        Self::new(|&value: &bool| -> Candidates<bool> {
            if value {
                Box::new(iter::once(false))
            } else {
                Box::new(iter::empty())
            }
        })
    }
}

impl Reduction<i64> {
    /// Every integer of smaller magnitude, ordered `0, 1, -1, 2, -2, ...`,
    /// followed by the positive mirror of a negative input.
    pub fn int() -> Self {
        Self::new(|&value| {
            let magnitude = value.unsigned_abs();
            let mirror = if value < 0 {
                i64::try_from(magnitude).ok()
            } else {
                None
            };
            // k < magnitude <= 2^63, so k always fits in an i64.
            let below = (0..magnitude).flat_map(|k| signed_pair(k as i64));
            Box::new(below.chain(mirror))
        })
    }

    /// Every integer in `[0, n)`, ascending. Negative input is not
    /// producible by the paired generator and reduces to nothing.
    pub fn int_nonneg() -> Self {
        Self::new(|&value| Box::new(0..value.max(0)))
    }
}

impl Reduction<f64> {
    /// Every whole number of smaller magnitude, ordered like [`Reduction::int`],
    /// followed by the positive mirror of a negative input.
    ///
    /// Enumeration stops at 2^53, past which whole numbers are no longer
    /// consecutive. NaN and infinities reduce to nothing.
    pub fn float() -> Self {
        Self::new(|&value: &f64| -> Candidates<f64> {
            if !value.is_finite() {
                return Box::new(iter::empty());
            }
            let mirror = (value < 0.0).then(|| -value);
            let below = (0..whole_numbers_below(value.abs())).flat_map(|k| {
                let k = k as f64;
                iter::once(k).chain((k != 0.0).then(|| -k))
            });
            Box::new(below.chain(mirror))
        })
    }

    /// Every whole number in `[0, x)`, ascending.
    pub fn float_nonneg() -> Self {
        Self::new(|&value: &f64| -> Candidates<f64> {
            if !value.is_finite() || value <= 0.0 {
                return Box::new(iter::empty());
            }
            Box::new((0..whole_numbers_below(value)).map(|k| k as f64))
        })
    }
}

impl Reduction<char> {
    /// A letter reduces to every earlier letter of the same case.
    /// Anything else is minimal.
    pub fn char() -> Self {
        Self::new(|&value| earlier_in_range(value, &LETTERS))
    }

    /// Like [`Reduction::char`], and a digit reduces to every smaller digit.
    pub fn alphanum() -> Self {
        Self::new(|&value| earlier_in_range(value, &ALPHANUMERICS))
    }
}

impl Reduction<String> {
    /// Reduce one character at a time with `chars`, left to right.
    ///
    /// Every candidate has the same length as the input and differs from it
    /// in exactly one position.
    pub fn string(chars: Reduction<char>) -> Self {
        Self::new(move |value: &String| {
            let original: Vec<char> = value.chars().collect();
            Box::new(
                substitutions(original, chars.clone())
                    .map(|candidate| candidate.into_iter().collect::<String>()),
            )
        })
    }
}

impl<T> Reduction<Vec<T>>
where
    T: Clone + 'static,
{
    /// Reduce one element at a time with `elements`.
    ///
    /// Positions are visited left to right and, for each position, every
    /// element candidate is substituted in order with the rest of the list
    /// held fixed. Lists are never shortened, and the number of candidates
    /// is the sum of the per-element candidate counts.
    pub fn list(elements: Reduction<T>) -> Self {
        Self::new(move |values: &Vec<T>| {
            Box::new(substitutions(values.clone(), elements.clone()))
        })
    }
}

impl<A, B> Reduction<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    /// Cross product of both components' candidates, `first` varying slowest.
    ///
    /// Neither side is ever held at its original value, so a pair reduces
    /// to nothing as soon as either component is minimal.
    pub fn combine(first: Reduction<A>, second: Reduction<B>) -> Self {
        Self::new(move |(left, right): &(A, B)| {
            let second = second.clone();
            let right = right.clone();
            Box::new(first.reduce(left).flat_map(move |a| {
                second.reduce(&right).map(move |b| (a.clone(), b))
            }))
        })
    }

    /// Reduce one component at a time: every `first` candidate paired with
    /// the original right value, then every `second` candidate paired with
    /// the original left value.
    pub fn pairwise(first: Reduction<A>, second: Reduction<B>) -> Self {
        Self::new(move |(left, right): &(A, B)| {
            let fixed_right = right.clone();
            let fixed_left = left.clone();
            let lefts = first
                .reduce(left)
                .map(move |a| (a, fixed_right.clone()));
            let rights = second
                .reduce(right)
                .map(move |b| (fixed_left.clone(), b));
            Box::new(lefts.chain(rights))
        })
    }
}

/// `k` followed by `-k`, without repeating zero.
fn signed_pair(k: i64) -> impl Iterator<Item = i64> {
    iter::once(k).chain((k != 0).then(|| -k))
}

/// Count of whole numbers `w >= 0` with `w < magnitude`, capped at 2^53.
fn whole_numbers_below(magnitude: f64) -> u64 {
    magnitude.min(MAX_EXACT_F64).ceil() as u64
}

/// Every character before `value` in whichever of `ranges` contains it.
fn earlier_in_range(value: char, ranges: &[RangeInclusive<char>]) -> Candidates<char> {
    match ranges.iter().find(|range| range.contains(&value)) {
        Some(range) => Box::new(*range.start()..value),
        None => Box::new(iter::empty()),
    }
}

/// Substitute each candidate of each element, position-major.
fn substitutions<T>(original: Vec<T>, elements: Reduction<T>) -> impl Iterator<Item = Vec<T>>
where
    T: Clone + 'static,
{
    let len = original.len();
    (0..len).flat_map(move |index| {
        let base = original.clone();
        elements.reduce(&original[index]).map(move |candidate| {
            let mut substituted = base.clone();
            substituted[index] = candidate;
            substituted
        })
    })
}
