use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::property::{Property, PropertyState},
    foundation::{
        core::{ElementId, Rect, Viewport},
        error::{FolioError, FolioResult},
    },
};

/// Measured geometry the host exposes to the sequencer.
pub trait Layout {
    /// Element bounds in document coordinates (`y0` = distance from page top).
    fn bounds(&self, element: ElementId) -> Option<Rect>;

    fn viewport(&self) -> Viewport;
}

/// Sink for computed visual state.
pub trait Surface {
    /// Merge `state` into the element's current visual properties.
    fn apply(&mut self, element: ElementId, state: &PropertyState) -> FolioResult<()>;
}

/// Layout backed by a fixed table, used by the CLI and tests.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StaticLayout {
    pub viewport: Viewport,
    pub elements: BTreeMap<ElementId, Rect>,
}

impl StaticLayout {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: BTreeMap::new(),
        }
    }

    pub fn with(mut self, element: ElementId, bounds: Rect) -> Self {
        self.elements.insert(element, bounds);
        self
    }

    pub fn insert(&mut self, element: ElementId, bounds: Rect) {
        self.elements.insert(element, bounds);
    }

    pub fn remove(&mut self, element: ElementId) {
        self.elements.remove(&element);
    }
}

impl Layout for StaticLayout {
    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.elements.get(&element).copied()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// In-memory surface that records the latest state per element.
///
/// With [`StyleBuffer::restricted`] it only accepts the listed elements, which
/// mirrors a host where some handles were never mounted.
#[derive(Clone, Debug, Default)]
pub struct StyleBuffer {
    styles: BTreeMap<ElementId, PropertyState>,
    allowed: Option<BTreeSet<ElementId>>,
    writes: usize,
}

impl StyleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restricted(allowed: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            allowed: Some(allowed.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn get(&self, element: ElementId, prop: Property) -> Option<f64> {
        self.styles.get(&element).and_then(|s| s.get(prop))
    }

    pub fn state(&self, element: ElementId) -> Option<&PropertyState> {
        self.styles.get(&element)
    }

    pub fn styles(&self) -> &BTreeMap<ElementId, PropertyState> {
        &self.styles
    }

    /// Number of successful `apply` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Surface for StyleBuffer {
    fn apply(&mut self, element: ElementId, state: &PropertyState) -> FolioResult<()> {
        if let Some(allowed) = &self.allowed {
            if !allowed.contains(&element) {
                return Err(FolioError::configuration(format!(
                    "element {} is not mounted",
                    element.0
                )));
            }
        }
        self.styles.entry(element).or_default().merge(state);
        self.writes += 1;
        Ok(())
    }
}
