//! Shared value types used across the engine.
//!
//! These are the identities the loader, tracker, and controller exchange:
//! which structural slot an image lives in, how far along its fetch is, and
//! how urgently the host should fetch it. All of them are plain value data —
//! the [`crate::structure::Structure`] they come from is owned by exactly one
//! [`crate::Carousel`] instance.

use serde::{Deserialize, Serialize};

/// Structural container an image belongs to.
///
/// Slide images and secondary-slot images share one loading pipeline but are
/// keyed by where they sit in the markup, so the same source URL appearing in
/// two places loads (and spins, and errors) independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKey {
    /// A carousel slide, by 0-based index.
    Slide(usize),
    /// An independently lazy-loaded secondary slot, by slot id.
    Secondary(usize),
}

/// Stable identity of one managed image: resolved source URL plus the
/// structural slot holding it.
///
/// This is the dedupe key for the whole load protocol — requests, spinners,
/// and completion reports all resolve through it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageKey {
    /// Resolved source URL (the deferred source for lazy images).
    pub source: String,
    /// Structural container id.
    pub slot: SlotKey,
}

impl ImageKey {
    pub fn new(source: impl Into<String>, slot: SlotKey) -> Self {
        Self {
            source: source.into(),
            slot,
        }
    }
}

/// Lifecycle of one managed image.
///
/// `Loaded` and `Errored` are terminal: there is no retry, and a request for
/// an image in any state but `Unrequested` is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// No request has been made yet.
    #[default]
    Unrequested,
    /// Source assigned; waiting on the fetch outcome.
    Loading,
    /// Fetch succeeded (terminal).
    Loaded,
    /// Fetch failed (terminal).
    Errored,
}

/// Fetch urgency forwarded to the host's native image loading.
///
/// Eager images are fetched immediately and prioritized; lazy images fetch in
/// the background without blocking perceived readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Eager,
    Lazy,
}

/// Handle for one live-region announcement element.
///
/// The presenter creates a fresh element per announcement (re-using a node
/// defeats assistive-technology re-announcement of identical text) and hands
/// back an id so the engine can schedule its removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnnouncementId(pub u64);
