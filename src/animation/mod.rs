//! Easing, tweens, timelines and the wall-clock entry animator.

pub mod ease;
pub mod entry;
pub mod timeline;
pub mod tween;
