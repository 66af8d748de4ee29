//! Reduction correctness properties
//!
//! These properties ensure that every base reduction only proposes values
//! its paired generator could have produced, in simplest-first order, and
//! never proposes the input itself.

use crate::{arbitrary_int, for_all};
use pare::*;

/// Property: int candidates of a value in [-n, n] stay in [-n, n]
pub fn test_int_domain_compatibility() {
    let reduction = Reduction::int();
    for_all(&arbitrary_int(), |&value| {
        let bound = value.abs();
        reduction
            .reduce(&value)
            .all(|candidate| (-bound..=bound).contains(&candidate))
    });
}

/// Property: int_nonneg never proposes a negative number or exceeds n
pub fn test_int_nonneg_domain_compatibility() {
    let reduction = Reduction::int_nonneg();
    let gen = Gen::integer_nonneg(60).expect("valid bound");
    for_all(&gen, |&value| {
        let candidates: Vec<i64> = reduction.reduce(&value).collect();
        candidates.len() == value as usize
            && candidates.iter().all(|candidate| (0..value).contains(candidate))
    });
}

/// Property: float candidates stay within the input's magnitude
pub fn test_float_domain_compatibility() {
    let signed = Reduction::float();
    let nonneg = Reduction::float_nonneg();
    let gen = Gen::float(-25.0, 25.0).expect("valid range");
    for_all(&gen, |&value| {
        let bound = value.abs();
        signed
            .reduce(&value)
            .all(|candidate| (candidate.abs() < bound && candidate.fract() == 0.0) || candidate == bound)
            && nonneg
                .reduce(&bound)
                .all(|candidate| (0.0..bound).contains(&candidate))
    });
}

/// Property: char candidates of a letter are letters of the same case
pub fn test_char_domain_compatibility() {
    let reduction = Reduction::char();
    for_all(&Gen::char(), |&value| {
        let candidates: Vec<char> = reduction.reduce(&value).collect();
        if value.is_ascii_lowercase() {
            candidates.iter().all(|c| c.is_ascii_lowercase() && *c < value)
                && candidates.len() == (value as u8 - b'a') as usize
        } else if value.is_ascii_uppercase() {
            candidates.iter().all(|c| c.is_ascii_uppercase() && *c < value)
                && candidates.len() == (value as u8 - b'A') as usize
        } else {
            candidates.is_empty()
        }
    });
}

/// Property: alphanum candidates are alphanumeric and never cross ranges
pub fn test_alphanum_domain_compatibility() {
    let reduction = Reduction::alphanum();
    for_all(&Gen::alphanumeric_char(), |&value| {
        reduction.reduce(&value).all(|candidate| {
            candidate.is_ascii_alphanumeric()
                && candidate < value
                && candidate.is_ascii_digit() == value.is_ascii_digit()
                && candidate.is_ascii_lowercase() == value.is_ascii_lowercase()
        })
    });
    for_all(&Gen::char(), |&value| {
        value.is_ascii_alphanumeric() || reduction.reduce(&value).next().is_none()
    });
}

/// Property: numeric candidates are non-decreasing in magnitude
pub fn test_simplicity_ordering() {
    let ints = Reduction::int();
    for_all(&arbitrary_int(), |value| {
        let magnitudes: Vec<u64> = ints.reduce(value).map(i64::unsigned_abs).collect();
        magnitudes.windows(2).all(|pair| pair[0] <= pair[1])
            && magnitudes.first().map_or(true, |&first| first == 0)
    });

    let floats = Reduction::float();
    let gen = Gen::float(-30.0, 30.0).expect("valid range");
    for_all(&gen, |value| {
        let magnitudes: Vec<f64> = floats.reduce(value).map(f64::abs).collect();
        magnitudes.windows(2).all(|pair| pair[0] <= pair[1])
    });
}

/// Property: no reduction proposes the value it was given
pub fn test_candidates_exclude_input() {
    let ints = Reduction::int();
    for_all(&arbitrary_int(), |value| ints.reduce(value).all(|c| c != *value));

    let chars = Reduction::alphanum();
    for_all(&Gen::alphanumeric_char(), |value| {
        chars.reduce(value).all(|c| c != *value)
    });

    let bools = Reduction::bool();
    for_all(&Gen::boolean(0.5).expect("valid probability"), |value| {
        bools.reduce(value).all(|c| c != *value)
    });
}
