use crate::foundation::error::{ScrollreelError, ScrollreelResult};

pub use kurbo::{Affine, Vec2};

/// Visible area of the host scroll container, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ScrollreelResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    pub fn validate(self) -> ScrollreelResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ScrollreelError::validation(
                "viewport width must be finite and > 0",
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ScrollreelError::validation(
                "viewport height must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Host layout snapshot supplied on init and on every resize/reflow.
///
/// `document_height` is the natural height of the document, before any pin spacing
/// is inserted by pinned regions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    pub viewport: Viewport,
    pub document_height: f64,
}

impl Layout {
    pub fn new(viewport: Viewport, document_height: f64) -> ScrollreelResult<Self> {
        let layout = Self {
            viewport,
            document_height,
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(self) -> ScrollreelResult<()> {
        self.viewport.validate()?;
        if !(self.document_height.is_finite() && self.document_height >= 0.0) {
            return Err(ScrollreelError::validation(
                "document_height must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Scrollable distance with `extra` pixels of pin spacing added to the document.
    pub fn scrollable_with(self, extra: f64) -> f64 {
        (self.document_height + extra - self.viewport.height).max(0.0)
    }
}

/// A magnitude in pixels or viewport-relative units.
///
/// Unitless properties (opacity, scale, rotation) are carried as [`Length::Px`]; only
/// offsets accept `vw`/`vh`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LengthRepr", into = "LengthRepr")]
pub enum Length {
    Px(f64),
    Vw(f64),
    Vh(f64),
}

impl Length {
    pub const ZERO: Self = Self::Px(0.0);

    pub fn parse(s: &str) -> ScrollreelResult<Self> {
        let s = s.trim();
        let (num, ctor): (&str, fn(f64) -> Self) = if let Some(n) = s.strip_suffix("vw") {
            (n, Self::Vw)
        } else if let Some(n) = s.strip_suffix("vh") {
            (n, Self::Vh)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Self::Px)
        } else {
            (s, Self::Px)
        };
        let v: f64 = num
            .trim()
            .parse()
            .map_err(|_| ScrollreelError::validation(format!("invalid length '{s}'")))?;
        if !v.is_finite() {
            return Err(ScrollreelError::validation(format!(
                "length '{s}' must be finite"
            )));
        }
        Ok(ctor(v))
    }

    pub fn resolve(self, viewport: Viewport) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Vw(v) => v * viewport.width / 100.0,
            Self::Vh(v) => v * viewport.height / 100.0,
        }
    }

    pub fn is_viewport_relative(self) -> bool {
        !matches!(self, Self::Px(_))
    }

    pub fn is_finite(self) -> bool {
        match self {
            Self::Px(v) | Self::Vw(v) | Self::Vh(v) => v.is_finite(),
        }
    }
}

impl From<f64> for Length {
    fn from(v: f64) -> Self {
        Self::Px(v)
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = ScrollreelError;

    fn try_from(repr: LengthRepr) -> Result<Self, Self::Error> {
        match repr {
            LengthRepr::Number(v) => Ok(Self::Px(v)),
            LengthRepr::Text(s) => Self::parse(&s),
        }
    }
}

impl From<Length> for LengthRepr {
    fn from(len: Length) -> Self {
        match len {
            Length::Px(v) => Self::Number(v),
            Length::Vw(v) => Self::Text(format!("{v}vw")),
            Length::Vh(v) => Self::Text(format!("{v}vh")),
        }
    }
}

/// Animatable visual property of an element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    X,
    Y,
    Scale,
    #[serde(alias = "rotate")]
    Rotation,
}

impl Property {
    /// Whether the property accepts viewport-relative units.
    pub fn is_spatial(self) -> bool {
        matches!(self, Self::X | Self::Y)
    }
}

/// Visual state written by timelines and consumed by the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualState {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Translation in pixels.
    pub offset: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

impl VisualState {
    /// Neutral, non-animated state: fully opaque, no offset, unit scale, no rotation.
    pub const REST: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
        scale: 1.0,
        rotation_deg: 0.0,
    };

    pub fn get(&self, property: Property) -> f64 {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.offset.x,
            Property::Y => self.offset.y,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation_deg,
        }
    }

    pub fn set(&mut self, property: Property, value: f64) {
        match property {
            Property::Opacity => self.opacity = value.clamp(0.0, 1.0),
            Property::X => self.offset.x = value,
            Property::Y => self.offset.y = value,
            Property::Scale => self.scale = value,
            Property::Rotation => self.rotation_deg = value,
        }
    }

    pub fn to_affine(self) -> Affine {
        // T(offset) * R(rotation) * S(scale), pivot at the element origin.
        Affine::translate(self.offset)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
