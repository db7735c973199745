//! Scrollreel is a scroll-driven choreography engine.
//!
//! The host owns an [`AnimationEngine`] and feeds it scroll offsets, layout changes and
//! frame ticks. The engine maps scroll position onto [`Timeline`]s bound to
//! [`ScrollRegion`]s, writes the resulting visual state of every element on its
//! [`Stage`], and asks the host to scroll when a settled offset should snap to the
//! center of a pinned region.
//!
//! - Describe a page with a [`Choreography`] JSON document, or build regions in code
//! - [`AnimationEngine::init`] once, then `on_scroll` / `on_resize` / `tick`
//! - Read the output with [`AnimationEngine::frame`] or straight from the [`Stage`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod foundation;
pub mod scene;
pub mod scroll;
pub mod session;

pub use crate::animation::ease::Ease;
pub use crate::animation::entry::{EntryAnimator, EntryState};
pub use crate::animation::timeline::Timeline;
pub use crate::animation::tween::{PropertyTrack, Target, Tween};
pub use crate::foundation::core::{Affine, Layout, Length, Property, Vec2, Viewport, VisualState};
pub use crate::foundation::error::{ScrollreelError, ScrollreelResult};
pub use crate::scene::choreography::Choreography;
pub use crate::scene::selector::Selector;
pub use crate::scene::stage::{Element, ElementHandle, ElementSpec, Stage};
pub use crate::scroll::region::{RegionPhase, ScrollRegion};
pub use crate::scroll::registry::{RegionId, RegionRegistry, RegionSpan};
pub use crate::scroll::snap::{SnapAnimation, SnapConfig, SnapController, SnapRange, SnapStep};
pub use crate::scroll::trigger::{Edge, EndCondition, StartCondition};
pub use crate::session::engine::{AnimationEngine, EngineConfig, ScrollRequest};
pub use crate::session::frame::{ElementFrame, Frame, RegionFrame};
