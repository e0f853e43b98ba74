//! Shared test utilities for the simple-carousel test suite.
//!
//! The centerpiece is [`RecordingPresenter`], a fake [`Presenter`] that
//! records every call as a typed [`Call`] value, so state-machine tests
//! assert on exact effect sequences without any DOM.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let carousel = Carousel::new(
//!     RecordingPresenter::default(),
//!     structure_with_slides(4),
//!     &autoplay_raw(true, 5),
//!     LoaderOptions::default(),
//!     0,
//! )
//! .unwrap();
//! assert!(carousel.presenter().calls.contains(&Call::ShowLoading(key(0))));
//! ```

use crate::presenter::Presenter;
use crate::settings::RawSettings;
use crate::structure::{ImageSpec, SlideSpec, Structure};
use crate::types::{AnnouncementId, ImageKey, Priority, SlotKey};
use std::collections::HashSet;

// =========================================================================
// Fixture builders
// =========================================================================

/// `count` slides named `photo-{i}.avif` with alt `photo {i}`. Slide 0 is
/// rendered eager (provided source); the rest are deferred, matching the
/// server renderer's markup.
pub fn slides(count: usize) -> Vec<SlideSpec> {
    (0..count)
        .map(|i| SlideSpec {
            image: ImageSpec {
                source: format!("photo-{i}.avif"),
                alt: Some(format!("photo {i}")),
                deferred: i != 0,
            },
        })
        .collect()
}

/// A valid container with `count` slides and all three controls present.
pub fn structure_with_slides(count: usize) -> Structure {
    Structure {
        slides: slides(count),
        secondary: Vec::new(),
        has_dots: true,
        has_arrows: true,
        has_counter: true,
    }
}

/// Load key for the fixture slide `index`.
pub fn key(index: usize) -> ImageKey {
    ImageKey::new(format!("photo-{index}.avif"), SlotKey::Slide(index))
}

/// Raw attributes with a well-formed autoplay payload.
pub fn autoplay_raw(enabled: bool, duration: u32) -> RawSettings {
    RawSettings {
        autoplay: Some(format!(
            r#"{{"enabled": {enabled}, "duration": {duration}}}"#
        )),
        ..Default::default()
    }
}

// =========================================================================
// Recording presenter
// =========================================================================

/// One recorded presenter invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    InsertSpinner(ImageKey),
    ShowLoading(ImageKey),
    SetSource(ImageKey, Priority),
    ShowLoaded(ImageKey),
    MarkSlotLoaded(SlotKey),
    FadeSpinner(ImageKey),
    RemoveSpinner(ImageKey),
    ShowError(ImageKey, String),
    AttachOverlay(ImageKey, String),
    SetSlideActive(usize, bool),
    SetPrevClass(usize, bool),
    SetDotActive(usize, bool),
    SetCounter(usize),
    Announce(String),
    RemoveAnnouncement(AnnouncementId),
}

/// Recording fake for headless state-machine tests.
///
/// `complete` simulates the host-side "image element already reports itself
/// complete" query used by the cache-hit re-check: insert a key to make the
/// re-check treat that image as done.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Call>,
    pub complete: HashSet<ImageKey>,
    /// Announcements issued so far; doubles as the fresh-id source.
    pub announced: u64,
}

impl Presenter for RecordingPresenter {
    fn insert_spinner(&mut self, key: &ImageKey) {
        self.calls.push(Call::InsertSpinner(key.clone()));
    }

    fn show_loading(&mut self, key: &ImageKey) {
        self.calls.push(Call::ShowLoading(key.clone()));
    }

    fn set_source(&mut self, key: &ImageKey, priority: Priority) {
        self.calls.push(Call::SetSource(key.clone(), priority));
    }

    fn show_loaded(&mut self, key: &ImageKey) {
        self.calls.push(Call::ShowLoaded(key.clone()));
    }

    fn mark_slot_loaded(&mut self, slot: SlotKey) {
        self.calls.push(Call::MarkSlotLoaded(slot));
    }

    fn fade_spinner(&mut self, key: &ImageKey) {
        self.calls.push(Call::FadeSpinner(key.clone()));
    }

    fn remove_spinner(&mut self, key: &ImageKey) {
        self.calls.push(Call::RemoveSpinner(key.clone()));
    }

    fn show_error(&mut self, key: &ImageKey, message: &str) {
        self.calls.push(Call::ShowError(key.clone(), message.to_string()));
    }

    fn attach_overlay(&mut self, key: &ImageKey, filename: &str) {
        self.calls
            .push(Call::AttachOverlay(key.clone(), filename.to_string()));
    }

    fn image_complete(&self, key: &ImageKey) -> bool {
        self.complete.contains(key)
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        self.calls.push(Call::SetSlideActive(index, active));
    }

    fn set_prev_class(&mut self, index: usize, on: bool) {
        self.calls.push(Call::SetPrevClass(index, on));
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        self.calls.push(Call::SetDotActive(index, active));
    }

    fn set_counter(&mut self, current: usize) {
        self.calls.push(Call::SetCounter(current));
    }

    fn announce(&mut self, text: &str) -> AnnouncementId {
        self.announced += 1;
        self.calls.push(Call::Announce(text.to_string()));
        AnnouncementId(self.announced)
    }

    fn remove_announcement(&mut self, id: AnnouncementId) {
        self.calls.push(Call::RemoveAnnouncement(id));
    }
}
