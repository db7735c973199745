use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    foundation::core::{Length, Property, Viewport, VisualState},
    foundation::error::{ScrollreelError, ScrollreelResult},
    foundation::math::clamp01,
    scene::selector::Selector,
    scene::stage::{ElementHandle, Stage},
};

/// What a tween animates: a selector resolved against the stage, or explicit handles.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    Selector(Selector),
    Handles(Vec<ElementHandle>),
}

impl From<Selector> for Target {
    fn from(sel: Selector) -> Self {
        Self::Selector(sel)
    }
}

impl From<ElementHandle> for Target {
    fn from(h: ElementHandle) -> Self {
        Self::Handles(vec![h])
    }
}

impl From<Vec<ElementHandle>> for Target {
    fn from(hs: Vec<ElementHandle>) -> Self {
        Self::Handles(hs)
    }
}

/// One property interpolated from `from` to `to`.
///
/// A missing endpoint stands for the target element's own rest value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyTrack {
    pub property: Property,
    pub from: Option<Length>,
    pub to: Option<Length>,
}

impl PropertyTrack {
    pub fn new(property: Property, from: impl Into<Length>, to: impl Into<Length>) -> Self {
        Self {
            property,
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Pixel endpoints for an element resting at `rest`.
    pub fn endpoints(&self, rest: &VisualState, viewport: Viewport) -> (f64, f64) {
        let fallback = rest.get(self.property);
        let side = |v: Option<Length>| v.map_or(fallback, |l| l.resolve(viewport));
        (side(self.from), side(self.to))
    }

    fn lengths(&self) -> impl Iterator<Item = Length> {
        self.from.into_iter().chain(self.to)
    }
}

/// A single property-interpolation instruction.
///
/// `start` and `duration` are in the owning timeline's units: fractions of the scroll
/// span for scroll regions, seconds for entry timelines.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: Target,
    pub tracks: SmallVec<[PropertyTrack; 4]>,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    /// Per-element start delay across the resolved target set.
    pub stagger: f64,
    resolved: Vec<ElementHandle>,
}

impl Tween {
    pub fn new(target: impl Into<Target>) -> Self {
        let target = target.into();
        let resolved = match &target {
            Target::Handles(hs) => hs.clone(),
            Target::Selector(_) => Vec::new(),
        };
        Self {
            target,
            tracks: SmallVec::new(),
            start: 0.0,
            duration: 1.0,
            ease: Ease::Linear,
            stagger: 0.0,
            resolved,
        }
    }

    pub fn at(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    /// Add or replace the track for `track.property`.
    pub fn track(mut self, track: PropertyTrack) -> Self {
        match self.tracks.iter_mut().find(|t| t.property == track.property) {
            Some(existing) => *existing = track,
            None => self.tracks.push(track),
        }
        self
    }

    pub fn prop(
        self,
        property: Property,
        from: impl Into<Length>,
        to: impl Into<Length>,
    ) -> Self {
        self.track(PropertyTrack::new(property, from, to))
    }

    pub fn opacity(self, from: f64, to: f64) -> Self {
        self.prop(Property::Opacity, from, to)
    }

    pub fn x(self, from: impl Into<Length>, to: impl Into<Length>) -> Self {
        self.prop(Property::X, from, to)
    }

    pub fn y(self, from: impl Into<Length>, to: impl Into<Length>) -> Self {
        self.prop(Property::Y, from, to)
    }

    pub fn scale(self, from: f64, to: f64) -> Self {
        self.prop(Property::Scale, from, to)
    }

    pub fn rotation(self, from: f64, to: f64) -> Self {
        self.prop(Property::Rotation, from, to)
    }

    pub fn validate(&self) -> ScrollreelResult<()> {
        if !self.start.is_finite() {
            return Err(ScrollreelError::timeline("tween start must be finite"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollreelError::timeline(
                "tween duration must be finite and >= 0",
            ));
        }
        if !self.stagger.is_finite() {
            return Err(ScrollreelError::timeline("tween stagger must be finite"));
        }
        for track in &self.tracks {
            if track.from.is_none() && track.to.is_none() {
                return Err(ScrollreelError::timeline(format!(
                    "{:?} track needs a from or to value",
                    track.property
                )));
            }
            if !track.lengths().all(|l| l.is_finite()) {
                return Err(ScrollreelError::timeline(format!(
                    "{:?} values must be finite",
                    track.property
                )));
            }
            let relative = track.lengths().any(|l| l.is_viewport_relative());
            if relative && !track.property.is_spatial() {
                return Err(ScrollreelError::timeline(format!(
                    "{:?} does not accept viewport units",
                    track.property
                )));
            }
        }
        Ok(())
    }

    /// Re-resolve a selector target; explicit handles are kept as given.
    pub fn resolve(&mut self, stage: &Stage) {
        if let Target::Selector(sel) = &self.target {
            self.resolved = stage.resolve(sel);
            if self.resolved.is_empty() {
                tracing::trace!(selector = %sel, "tween target resolved to no elements");
            }
        }
    }

    pub fn handles(&self) -> &[ElementHandle] {
        &self.resolved
    }

    /// Start of the `index`-th resolved element, after stagger.
    pub fn start_for(&self, index: usize) -> f64 {
        self.start + self.stagger * index as f64
    }

    /// End of the last staggered element.
    pub fn end(&self) -> f64 {
        let last = self.resolved.len().saturating_sub(1);
        self.start_for(last) + self.duration
    }

    /// Un-eased local progress of the `index`-th element at timeline position `position`.
    pub fn local_progress(&self, position: f64, index: usize) -> f64 {
        let start = self.start_for(index);
        if self.duration == 0.0 {
            return if position >= start { 1.0 } else { 0.0 };
        }
        clamp01((position - start) / self.duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
