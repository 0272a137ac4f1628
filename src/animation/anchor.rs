use std::fmt;

use crate::foundation::core::Rect;
use crate::foundation::error::{FolioError, FolioResult};

/// Pairs an edge of the trigger element with a line in the viewport.
///
/// `"top 85%"` means: when the element's top edge reaches 85% of the viewport height.
/// Both parts accept `top`, `center`, `bottom` or a percentage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Anchor {
    /// Fraction of the element's height, 0 = top edge.
    pub element: f64,
    /// Fraction of the viewport's height, 0 = top edge.
    pub viewport: f64,
}

impl Anchor {
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    pub fn parse(s: &str) -> FolioResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(FolioError::configuration(format!(
                "anchor '{s}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self {
            element: parse_edge(el)?,
            viewport: parse_edge(vp)?,
        })
    }

    /// Scroll offset at which this anchor lines up, for an element at `bounds`.
    pub fn scroll_offset(self, bounds: Rect, viewport_height: f64) -> f64 {
        bounds.y0 + self.element * bounds.height() - self.viewport * viewport_height
    }
}

fn parse_edge(token: &str) -> FolioResult<f64> {
    match token {
        "top" => Ok(0.0),
        "center" => Ok(0.5),
        "bottom" => Ok(1.0),
        _ => {
            let pct = token
                .strip_suffix('%')
                .and_then(|n| n.parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .ok_or_else(|| FolioError::configuration(format!("bad anchor edge '{token}'")))?;
            Ok(pct / 100.0)
        }
    }
}

fn format_edge(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v == 0.0 {
        f.write_str("top")
    } else if v == 0.5 {
        f.write_str("center")
    } else if v == 1.0 {
        f.write_str("bottom")
    } else {
        write!(f, "{}%", v * 100.0)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_edge(f, self.element)?;
        f.write_str(" ")?;
        format_edge(f, self.viewport)
    }
}

impl TryFrom<String> for Anchor {
    type Error = FolioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Anchor> for String {
    fn from(a: Anchor) -> Self {
        a.to_string()
    }
}

/// Scroll range over which a scrubbed step runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrack {
    pub start: f64,
    pub end: f64,
    degenerate: bool,
}

impl ScrollTrack {
    pub fn new(bounds: Rect, start: Anchor, end: Anchor, viewport_height: f64) -> Self {
        let s = start.scroll_offset(bounds, viewport_height);
        let e = end.scroll_offset(bounds, viewport_height);
        Self {
            start: s,
            end: e,
            degenerate: bounds.height() <= 0.0 || e <= s,
        }
    }

    /// Progress in `[0, 1]`. A zero-height trigger or an empty track is constant 0.
    pub fn progress(&self, offset: f64) -> f64 {
        if self.degenerate || !offset.is_finite() {
            return 0.0;
        }
        ((offset - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anchor.rs"]
mod tests;
