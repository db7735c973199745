use crate::{
    animation::ease::Ease,
    foundation::error::{ScrollreelError, ScrollreelResult},
    foundation::math::{EPSILON, clamp01, lerp},
    scroll::registry::{RegionId, RegionSpan},
};

/// Snap tuning. The defaults reproduce the choreography the engine was built for.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub enabled: bool,
    /// Outward expansion of each range, as a fraction of total scrollable distance.
    pub tolerance: f64,
    /// Shortest transition, in seconds.
    pub min_duration: f64,
    /// Longest transition, in seconds.
    pub max_duration: f64,
    /// Travel (fraction of total) at which the transition reaches `max_duration`.
    pub duration_reference: f64,
    pub ease: Ease,
    /// Seconds to wait after settling before moving.
    pub delay: f64,
    /// Scroll speed in px/s below which scrolling counts as settled.
    pub settle_velocity: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 0.02,
            min_duration: 0.15,
            max_duration: 0.35,
            duration_reference: 0.1,
            ease: Ease::OutCubic,
            delay: 0.0,
            settle_velocity: 30.0,
        }
    }
}

impl SnapConfig {
    pub fn validate(&self) -> ScrollreelResult<()> {
        for (name, v) in [
            ("tolerance", self.tolerance),
            ("min_duration", self.min_duration),
            ("max_duration", self.max_duration),
            ("delay", self.delay),
            ("settle_velocity", self.settle_velocity),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(ScrollreelError::validation(format!(
                    "snap.{name} must be finite and >= 0"
                )));
            }
        }
        if !(self.min_duration > 0.0) {
            return Err(ScrollreelError::validation(
                "snap.min_duration must be > 0",
            ));
        }
        if self.max_duration < self.min_duration {
            return Err(ScrollreelError::validation(
                "snap.max_duration must be >= snap.min_duration",
            ));
        }
        if !(self.duration_reference.is_finite() && self.duration_reference > 0.0) {
            return Err(ScrollreelError::validation(
                "snap.duration_reference must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// A pinned region's span as fractions of total scrollable distance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SnapRange {
    pub region: RegionId,
    pub start: f64,
    pub end: f64,
    pub center: f64,
}

impl SnapRange {
    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.start - tolerance && value <= self.end + tolerance
    }
}

/// Piecewise snap-target function over the registered pinned regions.
#[derive(Clone, Debug, Default)]
pub struct SnapController {
    config: SnapConfig,
}

impl SnapController {
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Normalized ranges of pinned, non-degenerate regions; empty when nothing can scroll.
    pub fn ranges(spans: &[RegionSpan], total_scrollable: f64) -> Vec<SnapRange> {
        if !(total_scrollable > EPSILON) {
            return Vec::new();
        }
        spans
            .iter()
            .filter(|s| s.pinned && !s.degenerate)
            .map(|s| {
                let start = s.start / total_scrollable;
                let end = s.end / total_scrollable;
                SnapRange {
                    region: s.id,
                    start,
                    end,
                    center: start + (end - start) * 0.5,
                }
            })
            .collect()
    }

    /// Snap a normalized value: the closest center if `value` is inside any expanded
    /// range, otherwise `value` itself. Ties go to the earliest range.
    pub fn snap_fraction(&self, value: f64, ranges: &[SnapRange]) -> (f64, Option<RegionId>) {
        let tol = self.config.tolerance;
        if !ranges.iter().any(|r| r.contains(value, tol)) {
            return (value, None);
        }
        let mut best = ranges[0];
        for r in &ranges[1..] {
            if (r.center - value).abs() < (best.center - value).abs() {
                best = *r;
            }
        }
        (best.center, Some(best.region))
    }

    /// Resting offset for a free `candidate` scroll offset, in pixels.
    pub fn compute_snap_target(
        &self,
        candidate: f64,
        total_scrollable: f64,
        spans: &[RegionSpan],
    ) -> f64 {
        self.target_for(candidate, total_scrollable, spans).0
    }

    fn target_for(
        &self,
        candidate: f64,
        total_scrollable: f64,
        spans: &[RegionSpan],
    ) -> (f64, Option<RegionId>) {
        let ranges = Self::ranges(spans, total_scrollable);
        if ranges.is_empty() {
            return (candidate, None);
        }
        let (fraction, region) = self.snap_fraction(candidate / total_scrollable, &ranges);
        match region {
            Some(id) => (fraction * total_scrollable, Some(id)),
            None => (candidate, None),
        }
    }

    /// Transition length for travelling `distance` px, clamped to the duration window.
    pub fn duration_for(&self, distance: f64, total_scrollable: f64) -> f64 {
        let c = &self.config;
        if !(total_scrollable > EPSILON) {
            return c.min_duration;
        }
        let t = clamp01((distance.abs() / total_scrollable) / c.duration_reference);
        lerp(c.min_duration, c.max_duration, t)
    }

    /// Plan a snap from `candidate`, or `None` when it already rests at its target.
    pub fn plan(
        &self,
        candidate: f64,
        total_scrollable: f64,
        spans: &[RegionSpan],
    ) -> Option<SnapAnimation> {
        if !self.config.enabled {
            return None;
        }
        let (target, region) = self.target_for(candidate, total_scrollable, spans);
        let region = region?;
        if (target - candidate).abs() < 0.5 {
            return None;
        }
        Some(SnapAnimation {
            from: candidate,
            to: target,
            duration: self.duration_for(target - candidate, total_scrollable),
            delay: self.config.delay,
            elapsed: 0.0,
            ease: self.config.ease,
            region,
        })
    }
}

/// One step of an in-flight snap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapStep {
    /// Still inside the post-settle delay.
    Waiting,
    /// Request this scroll offset.
    Moving(f64),
    /// Final offset; the task is complete.
    Finished(f64),
}

/// Cancellable, bounded-duration scroll transition toward a region center.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapAnimation {
    from: f64,
    to: f64,
    duration: f64,
    delay: f64,
    elapsed: f64,
    ease: Ease,
    region: RegionId,
}

impl SnapAnimation {
    pub fn origin(&self) -> f64 {
        self.from
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }

    pub fn offset_at(&self, elapsed: f64) -> f64 {
        let t = if self.duration > 0.0 {
            clamp01((elapsed - self.delay) / self.duration)
        } else {
            1.0
        };
        lerp(self.from, self.to, self.ease.apply(t))
    }

    pub fn tick(&mut self, dt: f64) -> SnapStep {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            SnapStep::Finished(self.to)
        } else if self.elapsed < self.delay {
            SnapStep::Waiting
        } else {
            SnapStep::Moving(self.offset_at(self.elapsed))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/snap.rs"]
mod tests;
