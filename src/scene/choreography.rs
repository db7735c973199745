use crate::foundation::core::{Layout, Viewport};
use crate::foundation::error::{ScrollreelError, ScrollreelResult};
use crate::scene::document::{ChoreographyDef, timeline_from_defs};
use crate::scroll::region::ScrollRegion;
use crate::session::engine::{AnimationEngine, EngineConfig};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON choreography document: elements, the entry sequence, scroll regions and
/// engine tunables.
#[derive(Debug, Clone)]
pub struct Choreography {
    def: ChoreographyDef,
}

impl Choreography {
    /// Parse a choreography from a JSON string.
    pub fn from_json_str(s: &str) -> ScrollreelResult<Self> {
        let def: ChoreographyDef = serde_json::from_str(s)
            .map_err(|e| ScrollreelError::serde(format!("parse choreography JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a choreography from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollreelResult<Self> {
        let def: ChoreographyDef = serde_json::from_reader(r)
            .map_err(|e| ScrollreelError::serde(format!("parse choreography JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a choreography from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollreelError::validation(format!(
                "open choreography JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_string(&self) -> ScrollreelResult<String> {
        serde_json::to_string_pretty(&self.def)
            .map_err(|e| ScrollreelError::serde(format!("serialize choreography JSON: {e}")))
    }

    pub fn viewport(&self) -> Viewport {
        self.def.viewport
    }

    pub fn layout(&self) -> ScrollreelResult<Layout> {
        Layout::new(self.def.viewport, self.def.document_height)
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            snap: self.def.snap,
            pin_spacing: self.def.pin_spacing,
        }
    }

    /// Check everything that can be checked without resolving selectors.
    pub fn validate(&self) -> ScrollreelResult<()> {
        self.layout()?;
        self.config().validate()?;

        let mut ids = HashSet::new();
        for el in &self.def.elements {
            if el.id.is_empty() {
                return Err(ScrollreelError::validation("element id must be non-empty"));
            }
            if !ids.insert(el.id.as_str()) {
                return Err(ScrollreelError::validation(format!(
                    "duplicate element id '{}'",
                    el.id
                )));
            }
            if !(el.top.is_finite() && el.height.is_finite() && el.height >= 0.0) {
                return Err(ScrollreelError::validation(format!(
                    "element '{}' geometry must be finite with height >= 0",
                    el.id
                )));
            }
        }

        if let Some(entry) = &self.def.entry {
            timeline_from_defs(&entry.tweens)
                .map_err(|e| ScrollreelError::validation(format!("entry: {e}")))?;
        }
        for region in &self.def.regions {
            timeline_from_defs(&region.tweens).map_err(|e| {
                ScrollreelError::validation(format!("region '{}': {e}", region.name()))
            })?;
            if let Some(lag) = region.scrub {
                if !(lag.is_finite() && lag >= 0.0) {
                    return Err(ScrollreelError::validation(format!(
                        "region '{}': scrub must be finite and >= 0",
                        region.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build an engine with every element, region and the entry sequence registered.
    ///
    /// The engine is not initialized; call [`AnimationEngine::init`] once the host is
    /// ready to receive writes. Regions whose trigger matches no element are skipped.
    #[tracing::instrument(skip(self))]
    pub fn build(&self) -> ScrollreelResult<AnimationEngine> {
        self.validate()?;
        let mut engine = AnimationEngine::new(self.layout()?, self.config())?;
        for el in &self.def.elements {
            engine.stage_mut().insert(el.clone());
        }

        if let Some(entry) = &self.def.entry {
            engine.set_entry(timeline_from_defs(&entry.tweens)?);
        }

        for def in &self.def.regions {
            let name = def.name();
            let matches = engine.stage().resolve(&def.trigger);
            let Some(&trigger) = matches.first() else {
                tracing::warn!(region = %name, trigger = %def.trigger, "trigger matches no element; region skipped");
                continue;
            };
            if matches.len() > 1 {
                tracing::debug!(region = %name, matches = matches.len(), "trigger matches several elements; using the first");
            }
            let region = ScrollRegion::new(trigger, timeline_from_defs(&def.tweens)?)
                .label(name)
                .start_when(def.start)
                .end_when(def.end)
                .pinned(def.pin)
                .scrub(def.scrub)?;
            engine.register_region(region);
        }
        Ok(engine)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/choreography.rs"]
mod tests;
