use std::collections::{BTreeSet, HashSet};

use crate::{
    animation::tween::Tween,
    foundation::core::{Property, Viewport},
    foundation::error::ScrollreelResult,
    foundation::math::lerp,
    scene::stage::{ElementHandle, Stage},
};

/// Ordered tweens sharing one progress clock.
///
/// Tweens are applied in registration order and the last write to a (target,
/// property) pair wins. A tween that has not started yet only writes a pair when it
/// is the first tween registered for that pair, so an exit tween queued later on
/// the clock does not clobber an entrance that is still playing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    tweens: Vec<Tween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tween(&mut self, tween: Tween) -> ScrollreelResult<()> {
        tween.validate()?;
        self.tweens.push(tween);
        Ok(())
    }

    /// Builder form of [`Timeline::add_tween`].
    pub fn with(mut self, tween: Tween) -> ScrollreelResult<Self> {
        self.add_tween(tween)?;
        Ok(self)
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Latest end position over all tweens, including stagger; 0 when empty.
    pub fn end(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    pub fn resolve(&mut self, stage: &Stage) {
        for tween in &mut self.tweens {
            tween.resolve(stage);
        }
    }

    /// Every handle any tween writes to.
    pub fn handles(&self) -> BTreeSet<ElementHandle> {
        self.tweens
            .iter()
            .flat_map(|t| t.handles().iter().copied())
            .collect()
    }

    /// Write the interpolated state at `position` to every live target.
    pub fn evaluate(&self, position: f64, viewport: Viewport, stage: &mut Stage) {
        let mut claimed: HashSet<(ElementHandle, Property)> = HashSet::new();
        for tween in &self.tweens {
            for (index, &handle) in tween.handles().iter().enumerate() {
                let Some(rest) = stage.get(handle).map(|el| el.spec.rest) else {
                    tracing::trace!(?handle, "skipping detached tween target");
                    continue;
                };
                let started = position >= tween.start_for(index);
                let t = tween.ease.apply(tween.local_progress(position, index));
                for track in &tween.tracks {
                    let first = claimed.insert((handle, track.property));
                    if !(started || first) {
                        continue;
                    }
                    let (from, to) = track.endpoints(&rest, viewport);
                    stage.write(handle, track.property, lerp(from, to, t));
                }
            }
        }
    }

    /// Every (target, property) pair this timeline drives.
    pub fn driven(&self) -> BTreeSet<(ElementHandle, Property)> {
        self.tweens
            .iter()
            .flat_map(|t| {
                t.handles()
                    .iter()
                    .flat_map(move |&h| t.tracks.iter().map(move |track| (h, track.property)))
            })
            .collect()
    }

    /// Force every driven property back to its element's rest value.
    pub fn reset(&self, stage: &mut Stage) {
        for (handle, property) in self.driven() {
            stage.reset_property(handle, property);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
