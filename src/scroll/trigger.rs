use crate::foundation::error::{ScrollreelError, ScrollreelResult};

/// A position along an element or the viewport, measured from its top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percentage of the extent.
    Percent(f64),
    Px(f64),
}

impl Edge {
    pub fn parse(s: &str) -> ScrollreelResult<Self> {
        let s = s.trim();
        let bad = || ScrollreelError::layout(format!("invalid edge '{s}'"));
        let edge = match s {
            "top" => Self::Top,
            "center" => Self::Center,
            "bottom" => Self::Bottom,
            _ => {
                if let Some(n) = s.strip_suffix('%') {
                    Self::Percent(n.trim().parse().map_err(|_| bad())?)
                } else {
                    let n = s.strip_suffix("px").unwrap_or(s);
                    Self::Px(n.trim().parse().map_err(|_| bad())?)
                }
            }
        };
        match edge {
            Self::Percent(v) | Self::Px(v) if !v.is_finite() => Err(bad()),
            _ => Ok(edge),
        }
    }

    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => extent * 0.5,
            Self::Bottom => extent,
            Self::Percent(p) => extent * p / 100.0,
            Self::Px(v) => v,
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Px(v) => write!(f, "{v}px"),
        }
    }
}

/// Viewport-relative predicate "`trigger` edge reaches `viewport` edge".
///
/// Written as `"<trigger-edge> <viewport-edge>"`, e.g. `"top top"` or `"top 85%"`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartCondition {
    pub trigger: Edge,
    pub viewport: Edge,
}

impl StartCondition {
    pub const TOP_TOP: Self = Self {
        trigger: Edge::Top,
        viewport: Edge::Top,
    };

    pub fn parse(s: &str) -> ScrollreelResult<Self> {
        let mut words = s.split_whitespace();
        let (Some(trigger), Some(viewport), None) = (words.next(), words.next(), words.next())
        else {
            return Err(ScrollreelError::layout(format!(
                "trigger condition '{s}' must be '<trigger-edge> <viewport-edge>'"
            )));
        };
        Ok(Self {
            trigger: Edge::parse(trigger)?,
            viewport: Edge::parse(viewport)?,
        })
    }

    /// Scroll offset at which the condition becomes true.
    pub fn resolve(self, trigger_top: f64, trigger_height: f64, viewport_height: f64) -> f64 {
        trigger_top + self.trigger.resolve(trigger_height) - self.viewport.resolve(viewport_height)
    }
}

impl Default for StartCondition {
    fn default() -> Self {
        Self::TOP_TOP
    }
}

impl std::fmt::Display for StartCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.trigger, self.viewport)
    }
}

impl TryFrom<String> for StartCondition {
    type Error = ScrollreelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StartCondition> for String {
    fn from(c: StartCondition) -> Self {
        c.to_string()
    }
}

/// Where a region's span ends.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EndCondition {
    /// `"+=130%"`: span as a percentage of viewport height.
    ViewportPercent(f64),
    /// `"+=600px"`: span in pixels.
    Px(f64),
    /// Another edge pair, e.g. `"top 60%"`.
    Edges(StartCondition),
}

impl EndCondition {
    /// One full viewport height of scrolling.
    pub const ONE_VIEWPORT: Self = Self::ViewportPercent(100.0);

    pub fn parse(s: &str) -> ScrollreelResult<Self> {
        let t = s.trim();
        let Some(rel) = t.strip_prefix("+=") else {
            return StartCondition::parse(t).map(Self::Edges);
        };
        let rel = rel.trim();
        let bad = || ScrollreelError::layout(format!("invalid relative end '{t}'"));
        let parsed = if let Some(n) = rel.strip_suffix('%') {
            Self::ViewportPercent(n.trim().parse().map_err(|_| bad())?)
        } else {
            let n = rel.strip_suffix("px").unwrap_or(rel);
            Self::Px(n.trim().parse().map_err(|_| bad())?)
        };
        match parsed {
            Self::ViewportPercent(v) | Self::Px(v) if !v.is_finite() => Err(bad()),
            _ => Ok(parsed),
        }
    }

    /// Absolute end offset given the resolved start and the trigger geometry.
    pub fn resolve(
        self,
        start: f64,
        trigger_top: f64,
        trigger_height: f64,
        viewport_height: f64,
    ) -> f64 {
        match self {
            Self::ViewportPercent(p) => start + viewport_height * p / 100.0,
            Self::Px(v) => start + v,
            Self::Edges(c) => c.resolve(trigger_top, trigger_height, viewport_height),
        }
    }
}

impl Default for EndCondition {
    fn default() -> Self {
        Self::ONE_VIEWPORT
    }
}

impl std::fmt::Display for EndCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ViewportPercent(p) => write!(f, "+={p}%"),
            Self::Px(v) => write!(f, "+={v}px"),
            Self::Edges(c) => write!(f, "{c}"),
        }
    }
}

impl TryFrom<String> for EndCondition {
    type Error = ScrollreelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<EndCondition> for String {
    fn from(c: EndCondition) -> Self {
        c.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;
