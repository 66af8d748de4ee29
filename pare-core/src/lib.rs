//! Core functionality for pare property-based testing.
//!
//! This crate provides the two building blocks a property runner needs:
//! [`Gen`], which produces random values from an explicit [`Seed`], and
//! [`Reduction`], which proposes simpler candidates for a failing value.
//! Generators and reductions come in matched pairs per base type and compose
//! with the same structural combinators.

pub mod data;
pub mod error;
pub mod gen;
pub mod reduce;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use reduce::*;
