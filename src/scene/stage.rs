use crate::{
    foundation::core::{Property, VisualState},
    scene::selector::Selector,
};

/// Weak, generational reference to an element on the [`Stage`].
///
/// A handle outlives the element it points to; lookups through a stale handle miss
/// instead of aliasing whatever reuses the slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementHandle {
    index: u32,
    generation: u32,
}

/// Host-supplied description of an element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementSpec {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Top edge in document pixels, before pin spacing.
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    /// State restored on leave-back and teardown.
    #[serde(default)]
    pub rest: VisualState,
}

impl ElementSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: Vec::new(),
            top: 0.0,
            height: 0.0,
            rest: VisualState::REST,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn geometry(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    pub fn rest(mut self, rest: VisualState) -> Self {
        self.rest = rest;
        self
    }
}

/// A live element: its spec plus the current visual state.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub spec: ElementSpec,
    pub state: VisualState,
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Element store owned by the engine. Timelines and regions only hold handles.
#[derive(Clone, Debug, Default)]
pub struct Stage {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: ElementSpec) -> ElementHandle {
        let element = Element {
            state: spec.rest,
            spec,
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.element = Some(element);
            return ElementHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        ElementHandle {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, handle: ElementHandle) -> Option<Element> {
        let slot = self.slot_mut(handle)?;
        let element = slot.element.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(element)
    }

    pub fn contains(&self, handle: ElementHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: ElementHandle) -> Option<&Element> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.element.as_ref()
    }

    fn slot_mut(&mut self, handle: ElementHandle) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        (slot.generation == handle.generation).then_some(slot)
    }

    fn get_mut(&mut self, handle: ElementHandle) -> Option<&mut Element> {
        self.slot_mut(handle)?.element.as_mut()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementHandle, &Element)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let element = slot.element.as_ref()?;
            Some((
                ElementHandle {
                    index: i as u32,
                    generation: slot.generation,
                },
                element,
            ))
        })
    }

    /// Resolve a selector into handles, in slot order.
    pub fn resolve(&self, selector: &Selector) -> Vec<ElementHandle> {
        self.iter()
            .filter(|(_, el)| selector.matches(&el.spec.id, &el.spec.classes))
            .map(|(h, _)| h)
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.iter().find(|(_, el)| el.spec.id == id).map(|(h, _)| h)
    }

    /// Update layout geometry; returns `false` for a stale handle.
    pub fn set_geometry(&mut self, handle: ElementHandle, top: f64, height: f64) -> bool {
        match self.get_mut(handle) {
            Some(el) => {
                el.spec.top = top;
                el.spec.height = height;
                true
            }
            None => false,
        }
    }

    pub fn state(&self, handle: ElementHandle) -> Option<VisualState> {
        self.get(handle).map(|el| el.state)
    }

    /// Write one property; returns `false` for a stale handle.
    pub fn write(&mut self, handle: ElementHandle, property: Property, value: f64) -> bool {
        match self.get_mut(handle) {
            Some(el) => {
                el.state.set(property, value);
                true
            }
            None => false,
        }
    }

    /// Restore one property to the element's rest value; returns `false` for a stale handle.
    pub fn reset_property(&mut self, handle: ElementHandle, property: Property) -> bool {
        match self.get_mut(handle) {
            Some(el) => {
                el.state.set(property, el.spec.rest.get(property));
                true
            }
            None => false,
        }
    }

    /// Restore the element's rest state; returns `false` for a stale handle.
    pub fn reset(&mut self, handle: ElementHandle) -> bool {
        match self.get_mut(handle) {
            Some(el) => {
                el.state = el.spec.rest;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
