//! Host-facing engine and frame snapshots.

/// The explicitly owned choreography engine.
pub mod engine;
/// Serializable output snapshots.
pub mod frame;
