//! pare property-based testing library.
//!
//! This is the main entry point for pare, re-exporting the generators,
//! reductions and seeds from `pare-core`.

pub use pare_core::*;
