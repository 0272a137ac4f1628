//! Folio is the motion layer and contact backend of a single-page portfolio site.
//!
//! The engine is host-driven: the host measures elements, feeds scroll offsets,
//! pointer positions and frame timestamps in, and receives property values out
//! through a [`Surface`].
//!
//! - [`SequencerContext`] binds declarative [`AnimationStep`]s to scroll
//!   positions; [`Section`] and the [`presets`] describe the page itself.
//! - [`GridOverlay`] lights symbol cells around the pointer.
//! - [`TextScramble`] is the hover reveal effect for labels.
//! - [`contact`] holds the form state and the HTTP relay that forwards
//!   submissions to a webhook.
#![forbid(unsafe_code)]

pub mod animation;
pub mod contact;
pub mod effects;
pub mod foundation;
pub mod overlay;
pub mod sequencer;

pub use crate::animation::anchor::{Anchor, ScrollTrack};
pub use crate::animation::ease::Ease;
pub use crate::animation::property::{Lerp, Property, PropertyState};
pub use crate::animation::step::{
    Activation, ActivationMode, AnimationStep, ToggleAction, ToggleActions, Tween,
};
pub use crate::animation::timeline::{Position, Timeline};
pub use crate::contact::config::RelayConfig;
pub use crate::contact::form::{ContactForm, ContactTransport, HttpContactTransport};
pub use crate::contact::model::ContactSubmission;
pub use crate::effects::scramble::TextScramble;
pub use crate::foundation::core::{ElementId, Millis, Point, Rect, Size, Viewport};
pub use crate::foundation::error::{FolioError, FolioResult};
pub use crate::overlay::config::OverlayConfig;
pub use crate::overlay::grid::{GridCell, GridOverlay};
pub use crate::sequencer::context::{SequenceId, SequencerContext};
pub use crate::sequencer::host::{Layout, StaticLayout, StyleBuffer, Surface};
pub use crate::sequencer::presets;
pub use crate::sequencer::section::{Page, Section, SectionPlan};
pub use crate::sequencer::smooth::{ScrollDriver, ScrollProbe, SmoothScroll};
pub use crate::sequencer::spy::SectionSpy;
