use crate::{
    animation::{entry::EntryAnimator, timeline::Timeline},
    foundation::core::{Layout, Viewport},
    foundation::error::ScrollreelResult,
    scene::stage::Stage,
    scroll::{
        region::ScrollRegion,
        registry::{RegionId, RegionRegistry},
        snap::{SnapAnimation, SnapConfig, SnapController, SnapStep},
    },
    session::frame::{ElementFrame, Frame, RegionFrame},
};

/// Offsets within this many pixels of the last requested offset are treated as the
/// host echoing a snap request rather than user input.
const REQUEST_ECHO_PX: f64 = 0.5;

/// Engine-wide tunables.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub snap: SnapConfig,
    /// Insert spacing below pinned regions so pinning does not overlap later content.
    pub pin_spacing: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            pin_spacing: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> ScrollreelResult<()> {
        self.snap.validate()
    }
}

/// A scroll position the host should apply, produced while a snap is in flight.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollRequest {
    pub offset: f64,
    /// `true` on the last request of a snap.
    pub finished: bool,
}

/// Explicitly owned choreography engine.
///
/// The host drives it with [`AnimationEngine::on_scroll`], [`AnimationEngine::on_resize`]
/// and [`AnimationEngine::tick`]; nothing happens between those calls.
pub struct AnimationEngine {
    layout: Layout,
    config: EngineConfig,
    stage: Stage,
    registry: RegionRegistry,
    snap: SnapController,
    entry: Option<EntryAnimator>,
    snap_task: Option<SnapAnimation>,

    scroll_offset: f64,
    last_requested: Option<f64>,
    // User scroll distance accumulated since the previous tick.
    pending_delta: f64,
    awaiting_settle: bool,
    initialized: bool,
}

impl AnimationEngine {
    pub fn new(layout: Layout, config: EngineConfig) -> ScrollreelResult<Self> {
        layout.validate()?;
        config.validate()?;
        Ok(Self {
            layout,
            config,
            stage: Stage::new(),
            registry: RegionRegistry::new(),
            snap: SnapController::new(config.snap),
            entry: None,
            snap_task: None,
            scroll_offset: 0.0,
            last_requested: None,
            pending_delta: 0.0,
            awaiting_settle: false,
            initialized: false,
        })
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable access for inserting elements or updating geometry. Call
    /// [`AnimationEngine::on_resize`] afterwards so spans are recomputed.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn entry(&self) -> Option<&EntryAnimator> {
        self.entry.as_ref()
    }

    pub fn snap_in_flight(&self) -> Option<&SnapAnimation> {
        self.snap_task.as_ref()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn viewport(&self) -> Viewport {
        self.layout.viewport
    }

    /// Document height plus pin spacing, minus the viewport height.
    pub fn total_scrollable(&self) -> f64 {
        self.layout.scrollable_with(self.registry.pin_spacing())
    }

    /// Resolve every region, write the frame for the current offset and start the
    /// entry animation. Calling it again is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.rebuild();
        self.initialized = true;
        self.evaluate_regions();
        let vp = self.viewport();
        if let Some(entry) = &mut self.entry {
            entry.play(vp, &mut self.stage);
        }
        tracing::debug!(
            regions = self.registry.len(),
            total_scrollable = self.total_scrollable(),
            "engine initialized"
        );
    }

    /// Cancel any snap, stop the entry animation and remove every region, leaving all
    /// targets at rest.
    #[tracing::instrument(skip(self))]
    pub fn dispose(&mut self) {
        self.cancel_snap("dispose");
        if let Some(mut entry) = self.entry.take() {
            entry.teardown(&mut self.stage);
        }
        for (_, mut region) in self.registry.drain() {
            region.teardown(&mut self.stage);
        }
        self.initialized = false;
        self.awaiting_settle = false;
        self.pending_delta = 0.0;
        self.last_requested = None;
        tracing::debug!("engine disposed");
    }

    /// Register a region; once initialized, spans are rebuilt and the current frame
    /// re-evaluated immediately.
    pub fn register_region(&mut self, region: ScrollRegion) -> RegionId {
        let id = self.registry.register(region);
        if self.initialized {
            self.rebuild();
            self.evaluate_regions();
        }
        id
    }

    /// Unregister a region, cancelling a snap toward it and forcing its targets to rest.
    pub fn unregister_region(&mut self, id: RegionId) -> bool {
        if self.snap_task.as_ref().is_some_and(|t| t.region() == id) {
            self.cancel_snap("region unregistered");
        }
        let Some(mut region) = self.registry.unregister(id) else {
            return false;
        };
        region.teardown(&mut self.stage);
        if self.initialized {
            self.rebuild();
            self.evaluate_regions();
        }
        true
    }

    /// Replace the entry animation. Once initialized it starts playing immediately.
    pub fn set_entry(&mut self, timeline: Timeline) {
        if let Some(mut old) = self.entry.take() {
            old.teardown(&mut self.stage);
        }
        let mut entry = EntryAnimator::new(timeline);
        if self.initialized {
            entry.play(self.layout.viewport, &mut self.stage);
        }
        self.entry = Some(entry);
    }

    /// Host scroll notification. Offsets not matching the last snap request count as
    /// user input and cancel an in-flight snap.
    pub fn on_scroll(&mut self, offset: f64) {
        if !offset.is_finite() {
            tracing::trace!(offset, "ignoring non-finite scroll offset");
            return;
        }
        let echo = self
            .last_requested
            .is_some_and(|r| (offset - r).abs() < REQUEST_ECHO_PX);
        let moved = (offset - self.scroll_offset).abs() >= REQUEST_ECHO_PX;
        if !echo && moved {
            self.cancel_snap("user scroll");
            self.last_requested = None;
            self.pending_delta += offset - self.scroll_offset;
            self.awaiting_settle = true;
        }
        self.scroll_offset = offset;
        if self.initialized {
            self.evaluate_regions();
        }
    }

    /// Host resize/reflow notification: recompute spans and re-evaluate.
    #[tracing::instrument(skip(self))]
    pub fn on_resize(&mut self, layout: Layout) {
        self.layout = layout;
        self.cancel_snap("resize");
        self.last_requested = None;
        if self.initialized {
            self.rebuild();
            self.evaluate_regions();
        }
    }

    /// Advance time-based work by `dt` seconds: scrub smoothing, the entry animation,
    /// settle detection and the snap transition.
    ///
    /// Returns the scroll offset the host should apply this frame, if any.
    pub fn tick(&mut self, dt: f64) -> Option<ScrollRequest> {
        if !self.initialized || !dt.is_finite() {
            return None;
        }
        let dt = dt.max(0.0);
        let vp = self.viewport();

        let mut scrubbed = false;
        for (_, region) in self.registry.all_mut() {
            scrubbed |= region.advance(dt, vp, &mut self.stage);
        }
        if let Some(entry) = &mut self.entry {
            if scrubbed {
                entry.apply(vp, &mut self.stage);
            }
            entry.tick(dt, vp, &mut self.stage);
        }

        if dt > 0.0 {
            let velocity = self.pending_delta.abs() / dt;
            self.pending_delta = 0.0;
            if self.awaiting_settle && velocity < self.config.snap.settle_velocity {
                self.awaiting_settle = false;
                self.start_snap();
                return None;
            }
        }

        let task = self.snap_task.as_mut()?;
        match task.tick(dt) {
            SnapStep::Waiting => None,
            SnapStep::Moving(offset) => {
                self.last_requested = Some(offset);
                Some(ScrollRequest {
                    offset,
                    finished: false,
                })
            }
            SnapStep::Finished(offset) => {
                tracing::debug!(offset, region = ?task.region(), "snap finished");
                self.snap_task = None;
                self.last_requested = Some(offset);
                Some(ScrollRequest {
                    offset,
                    finished: true,
                })
            }
        }
    }

    /// Resting offset the engine would snap to from a free `candidate` offset.
    pub fn compute_snap_target(&self, candidate: f64) -> f64 {
        self.snap
            .compute_snap_target(candidate, self.total_scrollable(), &self.registry.spans())
    }

    /// Skip all pending scrub smoothing so every region shows its scroll-exact progress.
    pub fn settle(&mut self) {
        let vp = self.viewport();
        for (_, region) in self.registry.all_mut() {
            region.settle(vp, &mut self.stage);
        }
        if let Some(entry) = &self.entry {
            entry.apply(vp, &mut self.stage);
        }
    }

    /// Serializable snapshot of the current output.
    pub fn frame(&self) -> Frame {
        let elements = self
            .stage
            .iter()
            .map(|(_, el)| ElementFrame::new(el.spec.id.clone(), el.state))
            .collect();
        let regions = self
            .registry
            .all()
            .map(|(id, r)| RegionFrame {
                id,
                label: r.name().to_string(),
                start: r.start(),
                end: r.end(),
                phase: r.phase(),
                progress: r.progress(),
                pinned: r.is_pinned(),
                pin_translation: r.pin_translation(self.scroll_offset),
            })
            .collect();
        Frame {
            scroll_offset: self.scroll_offset,
            total_scrollable: self.total_scrollable(),
            elements,
            regions,
        }
    }

    fn rebuild(&mut self) {
        self.registry
            .rebuild(&self.stage, self.layout, self.config.pin_spacing);
    }

    // Regions in registry order, then the entry frame on top.
    fn evaluate_regions(&mut self) {
        let vp = self.viewport();
        let offset = self.scroll_offset;
        for (_, region) in self.registry.all_mut() {
            region.update(offset, vp, &mut self.stage);
        }
        if let Some(entry) = &self.entry {
            entry.apply(vp, &mut self.stage);
        }
    }

    fn start_snap(&mut self) {
        let spans = self.registry.spans();
        let Some(task) = self
            .snap
            .plan(self.scroll_offset, self.total_scrollable(), &spans)
        else {
            return;
        };
        tracing::debug!(
            from = task.origin(),
            to = task.target(),
            duration = task.duration(),
            region = ?task.region(),
            "snap started"
        );
        self.snap_task = Some(task);
    }

    fn cancel_snap(&mut self, reason: &'static str) {
        if let Some(task) = self.snap_task.take() {
            tracing::debug!(reason, region = ?task.region(), "snap cancelled");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/engine.rs"]
mod tests;
