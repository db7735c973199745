//! Scroll regions, their registry and snap targeting.

pub mod region;
pub mod registry;
pub mod snap;
pub mod trigger;
