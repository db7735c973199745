use crate::foundation::error::{ScrollreelError, ScrollreelResult};

/// Named easing curve applied to a tween's local progress.
///
/// Serialized by name. Besides the snake_case Rust names, the authoring vocabulary
/// `none`, `powerN`, `powerN.in`, `powerN.out` and `powerN.inOut` is accepted, where
/// power1/2/3 are the quadratic, cubic and quartic families and a bare `powerN`
/// means the ease-out variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    Smoothstep,
}

impl Ease {
    pub const ALL: [Self; 11] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::Smoothstep,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "in_quad",
            Self::OutQuad => "out_quad",
            Self::InOutQuad => "in_out_quad",
            Self::InCubic => "in_cubic",
            Self::OutCubic => "out_cubic",
            Self::InOutCubic => "in_out_cubic",
            Self::InQuart => "in_quart",
            Self::OutQuart => "out_quart",
            Self::InOutQuart => "in_out_quart",
            Self::Smoothstep => "smoothstep",
        }
    }

    pub fn parse(name: &str) -> ScrollreelResult<Self> {
        let key = name.trim().to_ascii_lowercase();
        if let Some(ease) = Self::ALL.into_iter().find(|e| e.name() == key) {
            return Ok(ease);
        }
        if key == "none" {
            return Ok(Self::Linear);
        }

        let unknown = || ScrollreelError::validation(format!("unknown ease '{}'", name.trim()));
        let rest = key.strip_prefix("power").ok_or_else(unknown)?;
        let (degree, dir) = rest.split_once('.').unwrap_or((rest, "out"));
        let family = match degree {
            "1" => [Self::InQuad, Self::OutQuad, Self::InOutQuad],
            "2" => [Self::InCubic, Self::OutCubic, Self::InOutCubic],
            "3" => [Self::InQuart, Self::OutQuart, Self::InOutQuart],
            _ => return Err(unknown()),
        };
        match dir {
            "in" => Ok(family[0]),
            "out" => Ok(family[1]),
            "inout" => Ok(family[2]),
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ScrollreelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.name().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
