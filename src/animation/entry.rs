use crate::{
    animation::timeline::Timeline,
    foundation::core::Viewport,
    scene::stage::Stage,
};

/// Lifecycle of an [`EntryAnimator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    #[default]
    Idle,
    Playing,
    Finished,
}

/// One-shot, wall-clock playback of a timeline whose tween positions are seconds.
///
/// Plays at most once. Scroll input never interrupts it; only teardown does, and
/// teardown forces every target back to rest.
#[derive(Clone, Debug)]
pub struct EntryAnimator {
    timeline: Option<Timeline>,
    elapsed: f64,
    state: EntryState,
}

impl EntryAnimator {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline: Some(timeline),
            elapsed: 0.0,
            state: EntryState::Idle,
        }
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Total playback length in seconds.
    pub fn duration(&self) -> f64 {
        self.timeline.as_ref().map_or(0.0, Timeline::end)
    }

    /// Start playback and write the first frame. Returns `false` if already played.
    pub fn play(&mut self, viewport: Viewport, stage: &mut Stage) -> bool {
        if self.state != EntryState::Idle {
            return false;
        }
        let Some(tl) = self.timeline.as_mut() else {
            return false;
        };
        tl.resolve(stage);
        self.state = EntryState::Playing;
        self.elapsed = 0.0;
        tracing::debug!(duration = self.duration(), "entry animation started");
        self.tick(0.0, viewport, stage);
        true
    }

    /// Advance by `dt` seconds. Returns `true` while still playing.
    pub fn tick(&mut self, dt: f64, viewport: Viewport, stage: &mut Stage) -> bool {
        if self.state != EntryState::Playing {
            return false;
        }
        self.elapsed += dt.max(0.0);
        let duration = self.duration();
        let Some(tl) = self.timeline.as_ref() else {
            return false;
        };
        tl.evaluate(self.elapsed.min(duration), viewport, stage);
        if self.elapsed >= duration {
            self.state = EntryState::Finished;
            self.timeline = None;
            tracing::debug!(elapsed = self.elapsed, "entry animation finished");
            return false;
        }
        true
    }

    /// Re-write the current frame, e.g. after scroll-driven writes touched the same elements.
    pub fn apply(&self, viewport: Viewport, stage: &mut Stage) {
        if self.state != EntryState::Playing {
            return;
        }
        if let Some(tl) = &self.timeline {
            tl.evaluate(self.elapsed, viewport, stage);
        }
    }

    /// Stop playback; an interrupted animation leaves its targets at rest.
    pub fn teardown(&mut self, stage: &mut Stage) {
        if self.state == EntryState::Playing {
            if let Some(tl) = &self.timeline {
                tl.reset(stage);
            }
            tracing::debug!(elapsed = self.elapsed, "entry animation interrupted");
        }
        self.timeline = None;
        self.state = EntryState::Finished;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/entry.rs"]
mod tests;
