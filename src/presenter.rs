//! The DOM-capability seam.
//!
//! All imperative UI mutation — spinners, state classes, source swaps, dot
//! and counter updates, live-region announcements — goes through the
//! [`Presenter`] trait, so the state machines in [`crate::loader`],
//! [`crate::tracker`], and [`crate::controller`] stay headless. A browser
//! host implements it against real elements; tests substitute the recording
//! fake in `test_helpers`.
//!
//! ## Host obligations
//!
//! - [`Presenter::set_source`] must register the image's success and failure
//!   completion hooks *before* assigning the live source attribute, so a
//!   synchronously available (cached) resource cannot complete unobserved.
//!   Completions are then reported back through
//!   [`Carousel::image_loaded`](crate::Carousel::image_loaded) /
//!   [`Carousel::image_failed`](crate::Carousel::image_failed).
//! - [`Presenter::announce`] must create a fresh visually-hidden live-region
//!   element per call (never reuse a node) and return an id the engine uses
//!   to schedule its removal.

use crate::types::{AnnouncementId, ImageKey, Priority, SlotKey};

/// Capability set the engine needs from the embedding page.
///
/// Methods are grouped by the component driving them; every call identifies
/// its target by value ([`ImageKey`], slide index, slot id) rather than by
/// element reference, which keeps the engine free of DOM types.
pub trait Presenter {
    // --- image loading -----------------------------------------------------

    /// Insert a spinner element immediately before the image. Called at most
    /// once per image; the engine guarantees no duplicate insertions.
    fn insert_spinner(&mut self, key: &ImageKey);

    /// Apply the "loading" class to the image and the "visible" class to its
    /// spinner.
    fn show_loading(&mut self, key: &ImageKey);

    /// Assign the resolved source to the image's live source attribute and
    /// remove the deferred-source attribute, with the given fetch priority.
    /// See the module docs for the hook-registration obligation.
    fn set_source(&mut self, key: &ImageKey, priority: Priority);

    /// Success treatment: swap "loading" for "loaded" on the image.
    fn show_loaded(&mut self, key: &ImageKey);

    /// Mark the enclosing slot as holding a loaded image (controls caption
    /// visibility on secondary slots).
    fn mark_slot_loaded(&mut self, slot: SlotKey);

    /// Begin the spinner's fade-out.
    fn fade_spinner(&mut self, key: &ImageKey);

    /// Remove the spinner element from the document.
    fn remove_spinner(&mut self, key: &ImageKey);

    /// Failure treatment: drop the loading class, apply the error styling,
    /// and insert a centered message into the image's container.
    fn show_error(&mut self, key: &ImageKey, message: &str);

    /// Attach the diagnostic filename overlay atop a loaded image
    /// (debug-only, see [`crate::loader::LoaderOptions::filename_overlay`]).
    fn attach_overlay(&mut self, key: &ImageKey, filename: &str);

    /// Whether the image element already reports itself complete. Used by
    /// the one-shot cache-hit re-check.
    fn image_complete(&self, key: &ImageKey) -> bool;

    // --- slide presentation ------------------------------------------------

    /// Toggle a slide's active class and flip `aria-hidden` accordingly.
    fn set_slide_active(&mut self, index: usize, active: bool);

    /// Toggle the transient "prev" class on an outgoing slide.
    fn set_prev_class(&mut self, index: usize, on: bool);

    /// Toggle a dot indicator's active class and `aria-selected` state.
    fn set_dot_active(&mut self, index: usize, active: bool);

    /// Update the numeric counter display (1-based).
    fn set_counter(&mut self, current: usize);

    /// Append a fresh screen-reader announcement element and return its id.
    fn announce(&mut self, text: &str) -> AnnouncementId;

    /// Remove a previously created announcement element.
    fn remove_announcement(&mut self, id: AnnouncementId);
}
