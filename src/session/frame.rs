use crate::{
    foundation::core::VisualState,
    scroll::{region::RegionPhase, registry::RegionId},
};

/// Serializable snapshot of everything the engine writes for one scroll position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    pub scroll_offset: f64,
    pub total_scrollable: f64,
    pub elements: Vec<ElementFrame>,
    pub regions: Vec<RegionFrame>,
}

impl Frame {
    pub fn element(&self, id: &str) -> Option<&ElementFrame> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn region(&self, label: &str) -> Option<&RegionFrame> {
        self.regions.iter().find(|r| r.label == label)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementFrame {
    pub id: String,
    pub state: VisualState,
    /// Affine coefficients `[a, b, c, d, e, f]` of the composed transform.
    pub transform: [f64; 6],
}

impl ElementFrame {
    pub fn new(id: String, state: VisualState) -> Self {
        Self {
            id,
            transform: state.to_affine().as_coeffs(),
            state,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionFrame {
    pub id: RegionId,
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub phase: RegionPhase,
    pub progress: f64,
    pub pinned: bool,
    /// Vertical translation keeping a pinned trigger fixed in the viewport.
    pub pin_translation: f64,
}
