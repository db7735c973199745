use crate::{
    animation::{
        ease::Ease,
        timeline::Timeline,
        tween::{PropertyTrack, Tween},
    },
    foundation::core::{Length, Property, Viewport},
    foundation::error::{ScrollreelError, ScrollreelResult},
    scene::selector::Selector,
    scene::stage::ElementSpec,
    scroll::snap::SnapConfig,
    scroll::trigger::{EndCondition, StartCondition},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChoreographyDef {
    pub(crate) viewport: Viewport,
    pub(crate) document_height: f64,
    #[serde(default)]
    pub(crate) elements: Vec<ElementSpec>,
    #[serde(default)]
    pub(crate) entry: Option<EntryDef>,
    #[serde(default)]
    pub(crate) regions: Vec<RegionDef>,
    #[serde(default)]
    pub(crate) snap: SnapConfig,
    #[serde(default = "default_pin_spacing")]
    pub(crate) pin_spacing: bool,
}

fn default_pin_spacing() -> bool {
    true
}

/// Wall-clock entrance sequence; tween positions are seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EntryDef {
    pub(crate) tweens: Vec<TweenDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegionDef {
    #[serde(default)]
    pub(crate) label: String,
    pub(crate) trigger: Selector,
    #[serde(default)]
    pub(crate) start: StartCondition,
    #[serde(default)]
    pub(crate) end: EndCondition,
    #[serde(default)]
    pub(crate) pin: bool,
    #[serde(default)]
    pub(crate) scrub: Option<f64>,
    #[serde(default)]
    pub(crate) tweens: Vec<TweenDef>,
}

impl RegionDef {
    pub(crate) fn name(&self) -> String {
        if self.label.is_empty() {
            self.trigger.as_str().to_string()
        } else {
            self.label.clone()
        }
    }
}

/// A property missing from `from` starts at the target's rest value; one missing
/// from `to` ends there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TweenDef {
    pub(crate) target: Selector,
    #[serde(default)]
    pub(crate) from: BTreeMap<Property, Length>,
    #[serde(default)]
    pub(crate) to: BTreeMap<Property, Length>,
    #[serde(default)]
    pub(crate) at: f64,
    #[serde(default = "default_duration")]
    pub(crate) duration: f64,
    #[serde(default)]
    pub(crate) ease: Ease,
    #[serde(default)]
    pub(crate) stagger: f64,
}

fn default_duration() -> f64 {
    1.0
}

impl TweenDef {
    pub(crate) fn to_tween(&self) -> ScrollreelResult<Tween> {
        if self.from.is_empty() && self.to.is_empty() {
            return Err(ScrollreelError::timeline(format!(
                "tween targeting '{}' animates no properties",
                self.target
            )));
        }
        let mut tween = Tween::new(self.target.clone())
            .at(self.at)
            .duration(self.duration)
            .ease(self.ease)
            .stagger(self.stagger);
        let properties: BTreeSet<Property> =
            self.from.keys().chain(self.to.keys()).copied().collect();
        for property in properties {
            tween = tween.track(PropertyTrack {
                property,
                from: self.from.get(&property).copied(),
                to: self.to.get(&property).copied(),
            });
        }
        tween.validate()?;
        Ok(tween)
    }
}

pub(crate) fn timeline_from_defs(defs: &[TweenDef]) -> ScrollreelResult<Timeline> {
    let mut timeline = Timeline::new();
    for def in defs {
        timeline.add_tween(def.to_tween()?)?;
    }
    Ok(timeline)
}
