//! Shared primitives: geometry, visual state, errors and interpolation math.

pub mod core;
pub mod error;
pub(crate) mod math;
