use crate::{foundation::core::ElementId, sequencer::host::Layout};

/// Offset past which the navigation bar switches to its compact look.
pub const SCROLLED_THRESHOLD: f64 = 50.0;

/// Tracks which page section sits under the middle of the viewport.
///
/// The active section only changes when the viewport centre enters another
/// section; in the gaps between sections the last one stays active.
#[derive(Clone, Debug)]
pub struct SectionSpy {
    sections: Vec<(String, ElementId)>,
    active: usize,
    scrolled: bool,
}

impl SectionSpy {
    /// The first section is active until the first update.
    pub fn new(sections: impl IntoIterator<Item = (String, ElementId)>) -> Self {
        Self {
            sections: sections.into_iter().collect(),
            active: 0,
            scrolled: false,
        }
    }

    /// Returns the active section's name after applying `offset`.
    pub fn update(&mut self, offset: f64, layout: &dyn Layout) -> Option<&str> {
        if offset.is_finite() {
            self.scrolled = offset > SCROLLED_THRESHOLD;
            let centre = offset + layout.viewport().height / 2.0;
            let hit = self.sections.iter().position(|(_, el)| {
                layout
                    .bounds(*el)
                    .is_some_and(|b| b.y0 <= centre && centre < b.y1)
            });
            if let Some(i) = hit {
                if i != self.active {
                    tracing::trace!(section = %self.sections[i].0, "active section changed");
                }
                self.active = i;
            }
        }
        self.active()
    }

    pub fn active(&self) -> Option<&str> {
        self.sections.get(self.active).map(|(name, _)| name.as_str())
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/spy.rs"]
mod tests;
