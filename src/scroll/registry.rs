use crate::{
    foundation::core::Layout,
    scene::stage::Stage,
    scroll::region::ScrollRegion,
};

/// Stable identifier handed out by [`RegionRegistry::register`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RegionId(pub u64);

/// Immutable view of one region's resolved span, used for snapping and reporting.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionSpan {
    pub id: RegionId,
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub pinned: bool,
    pub degenerate: bool,
}

/// All active regions, ordered by resolved start offset after each rebuild.
#[derive(Clone, Debug, Default)]
pub struct RegionRegistry {
    regions: Vec<(RegionId, ScrollRegion)>,
    next_id: u64,
    pin_spacing: f64,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region. Its span stays unresolved until the next [`RegionRegistry::rebuild`].
    pub fn register(&mut self, region: ScrollRegion) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        tracing::debug!(?id, region = %region.name(), pinned = region.is_pinned(), "region registered");
        self.regions.push((id, region));
        id
    }

    pub fn unregister(&mut self, id: RegionId) -> Option<ScrollRegion> {
        let idx = self.regions.iter().position(|(rid, _)| *rid == id)?;
        let (_, region) = self.regions.remove(idx);
        tracing::debug!(?id, region = %region.name(), "region unregistered");
        Some(region)
    }

    /// Recompute every span against `layout` and re-sort by start.
    ///
    /// With `pin_spacing`, each pinned region pushes every region whose trigger lies
    /// below its own trigger down by its span, as the inserted spacer would.
    #[tracing::instrument(skip(self, stage))]
    pub fn rebuild(&mut self, stage: &Stage, layout: Layout, pin_spacing: bool) {
        for (_, region) in &mut self.regions {
            region.resolve(stage, layout.viewport);
        }

        self.pin_spacing = 0.0;
        if pin_spacing {
            let pins: Vec<(RegionId, f64, f64)> = self
                .regions
                .iter()
                .filter(|(_, r)| r.is_pinned() && !r.is_degenerate())
                .map(|(id, r)| (*id, r.trigger_bottom(), r.span()))
                .collect();
            for (id, region) in &mut self.regions {
                // A zero-height trigger ends where it starts; it never pushes itself.
                let shift: f64 = pins
                    .iter()
                    .filter(|(pin, bottom, _)| *pin != *id && *bottom <= region.trigger_top())
                    .map(|(_, _, span)| span)
                    .sum();
                if shift > 0.0 {
                    region.shift(shift);
                }
            }
            self.pin_spacing = pins.iter().map(|(_, _, span)| span).sum();
        }

        self.regions
            .sort_by(|(ia, a), (ib, b)| a.start().total_cmp(&b.start()).then(ia.cmp(ib)));
        tracing::debug!(
            regions = self.regions.len(),
            pin_spacing = self.pin_spacing,
            "registry rebuilt"
        );
    }

    /// Total pixels of pin spacing inserted by the last rebuild.
    pub fn pin_spacing(&self) -> f64 {
        self.pin_spacing
    }

    pub fn all(&self) -> impl Iterator<Item = (RegionId, &ScrollRegion)> {
        self.regions.iter().map(|(id, r)| (*id, r))
    }

    pub(crate) fn all_mut(&mut self) -> impl Iterator<Item = (RegionId, &mut ScrollRegion)> {
        self.regions.iter_mut().map(|(id, r)| (*id, r))
    }

    pub fn get(&self, id: RegionId) -> Option<&ScrollRegion> {
        self.regions.iter().find(|(rid, _)| *rid == id).map(|(_, r)| r)
    }

    /// Sorted snapshot of resolved spans.
    pub fn spans(&self) -> Vec<RegionSpan> {
        self.regions
            .iter()
            .map(|(id, r)| RegionSpan {
                id: *id,
                label: r.name().to_string(),
                start: r.start(),
                end: r.end(),
                pinned: r.is_pinned(),
                degenerate: r.is_degenerate(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Remove every region, returning them in registry order.
    pub(crate) fn drain(&mut self) -> Vec<(RegionId, ScrollRegion)> {
        self.pin_spacing = 0.0;
        std::mem::take(&mut self.regions)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/registry.rs"]
mod tests;
