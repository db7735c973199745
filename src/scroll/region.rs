use crate::{
    animation::timeline::Timeline,
    foundation::core::Viewport,
    foundation::error::{ScrollreelError, ScrollreelResult},
    foundation::math::{approach, span_fraction},
    scene::stage::{ElementHandle, Stage},
    scroll::trigger::{EndCondition, StartCondition},
};

/// Progress distance below which scrub smoothing lands exactly on the target.
const SCRUB_SETTLE: f64 = 1e-4;

/// Where a scroll offset sits relative to a region's span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionPhase {
    /// `offset < start`; targets are at rest.
    #[default]
    Before,
    /// `start <= offset <= end`; targets are interpolated.
    Active,
    /// `offset > end`; the end state is held.
    After,
}

/// Binds a [`Timeline`] to a trigger element and a scroll-distance span.
#[derive(Clone, Debug)]
pub struct ScrollRegion {
    label: String,
    trigger: ElementHandle,
    start_condition: StartCondition,
    end_condition: EndCondition,
    pinned: bool,
    scrub: Option<f64>,
    timeline: Timeline,

    // Derived by `resolve`; recomputed on every registry rebuild.
    start: f64,
    end: f64,
    trigger_top: f64,
    trigger_bottom: f64,
    resolved: bool,

    phase: RegionPhase,
    target_progress: f64,
    progress: f64,
}

impl ScrollRegion {
    pub fn new(trigger: ElementHandle, timeline: Timeline) -> Self {
        Self {
            label: String::new(),
            trigger,
            start_condition: StartCondition::TOP_TOP,
            end_condition: EndCondition::ONE_VIEWPORT,
            pinned: false,
            scrub: None,
            timeline,
            start: 0.0,
            end: 0.0,
            trigger_top: 0.0,
            trigger_bottom: 0.0,
            resolved: false,
            phase: RegionPhase::Before,
            target_progress: 0.0,
            progress: 0.0,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn start_when(mut self, cond: StartCondition) -> Self {
        self.start_condition = cond;
        self
    }

    pub fn end_when(mut self, cond: EndCondition) -> Self {
        self.end_condition = cond;
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Smooth progress toward the scroll position over `lag` seconds.
    pub fn scrub(mut self, lag: Option<f64>) -> ScrollreelResult<Self> {
        if let Some(l) = lag {
            if !(l.is_finite() && l >= 0.0) {
                return Err(ScrollreelError::validation(
                    "scrub lag must be finite and >= 0",
                ));
            }
        }
        self.scrub = lag.filter(|l| *l > 0.0);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.label
    }

    pub fn trigger(&self) -> ElementHandle {
        self.trigger
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn span(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// `end <= start`, or the trigger could not be resolved.
    pub fn is_degenerate(&self) -> bool {
        !self.resolved || !(self.end > self.start)
    }

    pub fn phase(&self) -> RegionPhase {
        self.phase
    }

    /// Progress currently applied to the timeline (lags the scroll position when scrubbing).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub(crate) fn trigger_top(&self) -> f64 {
        self.trigger_top
    }

    pub(crate) fn trigger_bottom(&self) -> f64 {
        self.trigger_bottom
    }

    /// Resolve start/end against current trigger geometry, without pin spacing.
    pub(crate) fn resolve(&mut self, stage: &Stage, viewport: Viewport) {
        self.timeline.resolve(stage);
        let Some(el) = stage.get(self.trigger) else {
            tracing::debug!(region = %self.label, "trigger element missing; region is inert");
            self.resolved = false;
            self.start = 0.0;
            self.end = 0.0;
            return;
        };
        let (top, height) = (el.spec.top, el.spec.height);
        self.trigger_top = top;
        self.trigger_bottom = top + height;
        self.start = self.start_condition.resolve(top, height, viewport.height);
        self.end = self
            .end_condition
            .resolve(self.start, top, height, viewport.height);
        self.resolved = true;
        if self.is_degenerate() {
            tracing::debug!(
                region = %self.label,
                start = self.start,
                end = self.end,
                "degenerate region span"
            );
        }
    }

    /// Shift the resolved span down by `px` of pin spacing inserted above it.
    pub(crate) fn shift(&mut self, px: f64) {
        self.start += px;
        self.end += px;
    }

    /// `clamp((offset - start) / (end - start), 0, 1)`; always 0 for a degenerate span.
    pub fn compute_progress(&self, scroll_offset: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        span_fraction(scroll_offset, self.start, self.end)
    }

    /// Degenerate spans never leave [`RegionPhase::Before`].
    pub fn phase_at(&self, scroll_offset: f64) -> RegionPhase {
        if self.is_degenerate() || scroll_offset < self.start {
            RegionPhase::Before
        } else if scroll_offset <= self.end {
            RegionPhase::Active
        } else {
            RegionPhase::After
        }
    }

    /// Translation that keeps a pinned trigger fixed in the viewport.
    pub fn pin_translation(&self, scroll_offset: f64) -> f64 {
        if !self.pinned || self.is_degenerate() {
            return 0.0;
        }
        (scroll_offset - self.start).clamp(0.0, self.span())
    }

    /// Evaluate the timeline directly at the progress for `scroll_offset`.
    pub fn evaluate(&self, scroll_offset: f64, viewport: Viewport, stage: &mut Stage) {
        self.timeline
            .evaluate(self.compute_progress(scroll_offset), viewport, stage);
    }

    /// Track a new scroll position, handling phase transitions, and write the result.
    pub(crate) fn update(&mut self, scroll_offset: f64, viewport: Viewport, stage: &mut Stage) {
        let phase = self.phase_at(scroll_offset);
        if phase != self.phase {
            tracing::trace!(region = %self.label, from = ?self.phase, to = ?phase, "region phase change");
            if phase == RegionPhase::Before {
                tracing::debug!(region = %self.label, "leave-back; resetting targets to rest");
            }
            if self.phase == RegionPhase::Before {
                // Entering from rest starts the smoothing from the entry edge.
                self.progress = if phase == RegionPhase::After { 1.0 } else { 0.0 };
            }
            self.phase = phase;
        }
        self.target_progress = self.compute_progress(scroll_offset);
        if self.scrub.is_none() || phase == RegionPhase::Before {
            self.progress = self.target_progress;
        }
        self.apply(viewport, stage);
    }

    /// Advance scrub smoothing by `dt` seconds; returns `true` if progress moved.
    pub(crate) fn advance(&mut self, dt: f64, viewport: Viewport, stage: &mut Stage) -> bool {
        let Some(lag) = self.scrub else {
            return false;
        };
        if self.phase == RegionPhase::Before || self.progress == self.target_progress {
            return false;
        }
        let mut next = approach(self.progress, self.target_progress, lag, dt);
        if (next - self.target_progress).abs() < SCRUB_SETTLE {
            next = self.target_progress;
        }
        if next == self.progress {
            return false;
        }
        self.progress = next;
        self.apply(viewport, stage);
        true
    }

    /// Skip the remaining scrub smoothing and write the target progress.
    pub(crate) fn settle(&mut self, viewport: Viewport, stage: &mut Stage) {
        if self.progress != self.target_progress {
            self.progress = self.target_progress;
            self.apply(viewport, stage);
        }
    }

    pub(crate) fn apply(&self, viewport: Viewport, stage: &mut Stage) {
        match self.phase {
            RegionPhase::Before => self.timeline.reset(stage),
            RegionPhase::Active | RegionPhase::After => {
                self.timeline.evaluate(self.progress, viewport, stage)
            }
        }
    }

    /// Force every target to rest and forget playback state.
    pub(crate) fn teardown(&mut self, stage: &mut Stage) {
        self.timeline.reset(stage);
        self.phase = RegionPhase::Before;
        self.progress = 0.0;
        self.target_progress = 0.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/region.rs"]
mod tests;
