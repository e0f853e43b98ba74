//! Current-slide ownership and navigation.
//!
//! The [`SlideTracker`] owns the ordered slides, the current index, and the
//! rule that keeps navigation feeling instant: immediately after any
//! successful transition (and at initialization), the current slide's image
//! and both circular neighbors have been requested — the target eagerly, the
//! neighbors lazily.
//!
//! Navigation to the current index or out of `[0, slide_count)` returns a
//! [`NavError`] so tests can tell a refused transition from a real one; the
//! controller swallows it, because boundary hits (rapid repeated key presses,
//! a dot click on the active slide) are normal. `current` is never corrupted
//! by a refused call.
//!
//! A single-slide carousel disables navigation entirely: no preloads, no
//! transitions, no autoplay.

use crate::loader::ImageLoader;
use crate::presenter::Presenter;
use crate::settings::Transition;
use crate::structure::SlideSpec;
use crate::timer::{Task, TimerQueue};
use crate::tuning::timing::{ANNOUNCEMENT_MS, PREV_CLASS_MS};
use crate::types::{ImageKey, Priority, SlotKey};
use thiserror::Error;

/// A refused navigation. Distinguishable for testability; presented to users
/// as a silent no-op.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavError {
    #[error("slide {target} out of range 0..{count}")]
    OutOfRange { target: usize, count: usize },
    #[error("slide {0} is already current")]
    AlreadyCurrent(usize),
    #[error("navigation disabled for a single-slide carousel")]
    NavigationDisabled,
}

/// Owns the slides and the current index; drives transitions.
#[derive(Debug)]
pub struct SlideTracker {
    slides: Vec<SlideSpec>,
    current: usize,
    transition: Transition,
    has_dots: bool,
    has_counter: bool,
}

impl SlideTracker {
    pub fn new(
        slides: Vec<SlideSpec>,
        transition: Transition,
        has_dots: bool,
        has_counter: bool,
    ) -> Self {
        Self {
            slides,
            current: 0,
            transition,
            has_dots,
            has_counter,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Whether navigation (and with it autoplay and control interaction) is
    /// disabled. True for zero- and single-slide carousels.
    pub fn navigation_disabled(&self) -> bool {
        self.slides.len() <= 1
    }

    /// Circular successor.
    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.slides.len()
    }

    /// Circular predecessor.
    pub fn prev_index(&self) -> usize {
        (self.current + self.slides.len() - 1) % self.slides.len()
    }

    /// Index of the last slide.
    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    /// Load key for a slide's image.
    pub fn slide_key(&self, index: usize) -> ImageKey {
        ImageKey::new(self.slides[index].image.source.clone(), SlotKey::Slide(index))
    }

    /// Establish the preload invariant for the initial slide (index 0, active
    /// in the markup). The first slide is rendered eager by the server, so
    /// its request keeps the provided source.
    pub fn initialize<P: Presenter>(
        &mut self,
        presenter: &mut P,
        loader: &mut ImageLoader,
        timers: &mut TimerQueue,
        now: u64,
    ) {
        if self.navigation_disabled() {
            return;
        }
        self.request_slide(presenter, loader, timers, now, 0, Priority::Eager);
        self.request_neighbors(presenter, loader, timers, now, 0);
    }

    /// Transition to `target`, maintaining the preload invariant and applying
    /// the presentation side effects in order: deactivate outgoing, activate
    /// incoming, transient `prev` class (slide modes only), dots, counter,
    /// announcement.
    pub fn go_to<P: Presenter>(
        &mut self,
        presenter: &mut P,
        loader: &mut ImageLoader,
        timers: &mut TimerQueue,
        now: u64,
        target: usize,
    ) -> Result<(), NavError> {
        if self.navigation_disabled() {
            return Err(NavError::NavigationDisabled);
        }
        if target >= self.slides.len() {
            return Err(NavError::OutOfRange {
                target,
                count: self.slides.len(),
            });
        }
        if target == self.current {
            return Err(NavError::AlreadyCurrent(target));
        }

        let previous = self.current;
        self.current = target;
        log::debug!("slide {previous} -> {target}");

        self.request_slide(presenter, loader, timers, now, target, Priority::Eager);
        self.request_neighbors(presenter, loader, timers, now, target);

        presenter.set_slide_active(previous, false);
        presenter.set_slide_active(target, true);
        if self.transition.uses_prev_class() {
            // Purely presentational; cleared on a timer, never blocking.
            presenter.set_prev_class(previous, true);
            timers.schedule(now + PREV_CLASS_MS, Task::ClearPrevClass { index: previous });
        }
        if self.has_dots {
            presenter.set_dot_active(previous, false);
            presenter.set_dot_active(target, true);
        }
        if self.has_counter {
            presenter.set_counter(target + 1);
        }
        self.announce(presenter, timers, now);
        Ok(())
    }

    /// Request one slide's image without transitioning. The controller uses
    /// this to prefetch the upcoming slide ahead of an autoplay advance.
    pub(crate) fn request_slide<P: Presenter>(
        &self,
        presenter: &mut P,
        loader: &mut ImageLoader,
        timers: &mut TimerQueue,
        now: u64,
        index: usize,
        priority: Priority,
    ) {
        let use_provided_source = !self.slides[index].image.deferred;
        loader.request(
            presenter,
            timers,
            now,
            self.slide_key(index),
            priority,
            use_provided_source,
        );
    }

    fn request_neighbors<P: Presenter>(
        &self,
        presenter: &mut P,
        loader: &mut ImageLoader,
        timers: &mut TimerQueue,
        now: u64,
        index: usize,
    ) {
        let count = self.slides.len();
        let next = (index + 1) % count;
        let prev = (index + count - 1) % count;
        self.request_slide(presenter, loader, timers, now, next, Priority::Lazy);
        self.request_slide(presenter, loader, timers, now, prev, Priority::Lazy);
    }

    fn announce<P: Presenter>(&self, presenter: &mut P, timers: &mut TimerQueue, now: u64) {
        let position = format!("Slide {} of {}", self.current + 1, self.slides.len());
        let text = match self.slides[self.current].image.alt.as_deref() {
            Some(alt) if !alt.is_empty() => format!("{position}: {alt}"),
            _ => position,
        };
        let id = presenter.announce(&text);
        timers.schedule(now + ANNOUNCEMENT_MS, Task::RemoveAnnouncement { id });
    }
}
