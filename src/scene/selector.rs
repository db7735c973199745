use crate::foundation::error::{ScrollreelError, ScrollreelResult};

/// Element selector resolved once against the [`crate::Stage`] into handles.
///
/// Grammar: comma-separated list of `#id`, `.class` or a bare name (matches id or class).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector {
    source: String,
    parts: Vec<SelectorPart>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SelectorPart {
    Id(String),
    Class(String),
    Name(String),
}

impl Selector {
    pub fn parse(s: &str) -> ScrollreelResult<Self> {
        let mut parts = Vec::new();
        for raw in s.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(ScrollreelError::validation(format!(
                    "selector '{s}' has an empty entry"
                )));
            }
            let part = if let Some(id) = raw.strip_prefix('#') {
                SelectorPart::Id(id.to_string())
            } else if let Some(class) = raw.strip_prefix('.') {
                SelectorPart::Class(class.to_string())
            } else {
                SelectorPart::Name(raw.to_string())
            };
            match &part {
                SelectorPart::Id(n) | SelectorPart::Class(n) | SelectorPart::Name(n)
                    if n.is_empty() || n.contains(char::is_whitespace) =>
                {
                    return Err(ScrollreelError::validation(format!(
                        "unsupported selector entry '{raw}'"
                    )));
                }
                _ => {}
            }
            parts.push(part);
        }
        Ok(Self {
            source: s.trim().to_string(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, id: &str, classes: &[String]) -> bool {
        self.parts.iter().any(|p| match p {
            SelectorPart::Id(want) => want == id,
            SelectorPart::Class(want) => classes.iter().any(|c| c == want),
            SelectorPart::Name(want) => want == id || classes.iter().any(|c| c == want),
        })
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for Selector {
    type Error = ScrollreelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Selector> for String {
    fn from(sel: Selector) -> Self {
        sel.source
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/selector.rs"]
mod tests;
