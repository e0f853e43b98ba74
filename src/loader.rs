//! The load-with-visual-feedback protocol for a single image.
//!
//! One [`ImageLoader`] per carousel instance owns the [`LoadState`] of every
//! managed image — slide images and secondary-slot images alike — keyed by
//! [`ImageKey`]. Requests are fire-and-forget: completion is observed through
//! the state map (via [`crate::Carousel::image_loaded`] /
//! [`crate::Carousel::image_failed`]), never through a return value.
//!
//! ## Protocol
//!
//! 1. A request for an image not in `Unrequested` is a no-op (idempotent).
//! 2. A spinner is inserted before the image, never duplicated.
//! 3. The image enters `Loading` with the loading visual classes applied.
//! 4. The resolved source is assigned (hooks registered first — see
//!    [`crate::Presenter`] host obligations), unless the debug
//!    [`LoaderOptions::prevent_loading`] freeze is active, in which case the
//!    spinner stays visible indefinitely and nothing further runs.
//! 5. A one-shot re-check ~100 ms later fires the success path for images
//!    that were already complete when hooks were registered (cache hit).
//! 6. Success and failure are terminal; there is no retry. Failure gets the
//!    error styling plus a single "failed to load" message.
//!
//! Spinner removal is scheduled, not immediate, and the removal task checks
//! the spinner still exists before touching it — the state may have moved on
//! during the fade grace.

use crate::presenter::Presenter;
use crate::timer::{Task, TimerQueue};
use crate::tuning::timing::{COMPLETE_RECHECK_MS, SPINNER_FADE_MS};
use crate::types::{ImageKey, LoadState, Priority};
use std::collections::{HashMap, HashSet};

/// Message inserted into an image's container when its fetch fails.
pub const LOAD_ERROR_MESSAGE: &str = "Image failed to load";

/// Debug switches for the loading pipeline. Both default off.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderOptions {
    /// Freeze the pipeline after the spinner appears: no source assignment,
    /// no completion, spinner visible indefinitely. Used to inspect the
    /// loading visuals on a live page.
    pub prevent_loading: bool,
    /// Attach a filename overlay atop each image as it loads (diagnostic
    /// marker for identifying which asset a slot resolved to).
    pub filename_overlay: bool,
}

/// Per-instance image load state and the protocol that advances it.
#[derive(Debug, Default)]
pub struct ImageLoader {
    options: LoaderOptions,
    states: HashMap<ImageKey, LoadState>,
    spinners: HashSet<ImageKey>,
}

impl ImageLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            states: HashMap::new(),
            spinners: HashSet::new(),
        }
    }

    /// Current state for an image; images never requested are `Unrequested`.
    pub fn state(&self, key: &ImageKey) -> LoadState {
        self.states.get(key).copied().unwrap_or_default()
    }

    /// Begin loading an image. No-op for anything past `Unrequested`.
    ///
    /// `use_provided_source` marks images whose live source attribute already
    /// holds the resolved URL (the eager-rendered first slide): the spinner
    /// protocol and the completeness re-check still run, but no source swap
    /// is issued.
    pub fn request<P: Presenter>(
        &mut self,
        presenter: &mut P,
        timers: &mut TimerQueue,
        now: u64,
        key: ImageKey,
        priority: Priority,
        use_provided_source: bool,
    ) {
        if self.state(&key) != LoadState::Unrequested {
            return;
        }
        log::debug!("load {:?}: requested ({:?})", key.slot, priority);

        if self.spinners.insert(key.clone()) {
            presenter.insert_spinner(&key);
        }
        self.states.insert(key.clone(), LoadState::Loading);
        presenter.show_loading(&key);

        if self.options.prevent_loading {
            // Diagnostic freeze: the spinner stays, the fetch never starts.
            return;
        }
        if !use_provided_source {
            presenter.set_source(&key, priority);
        }
        timers.schedule(now + COMPLETE_RECHECK_MS, Task::RecheckComplete { key });
    }

    /// Success signal from the host. No-op unless the image is `Loading`.
    pub fn report_loaded<P: Presenter>(
        &mut self,
        presenter: &mut P,
        timers: &mut TimerQueue,
        now: u64,
        key: &ImageKey,
    ) {
        if self.state(key) != LoadState::Loading {
            return;
        }
        self.complete_loaded(presenter, timers, now, key);
    }

    /// Failure signal from the host. No-op unless the image is `Loading`.
    pub fn report_failed<P: Presenter>(
        &mut self,
        presenter: &mut P,
        timers: &mut TimerQueue,
        now: u64,
        key: &ImageKey,
    ) {
        if self.state(key) != LoadState::Loading {
            return;
        }
        log::debug!("load {:?}: failed", key.slot);
        self.states.insert(key.clone(), LoadState::Errored);
        presenter.show_error(key, LOAD_ERROR_MESSAGE);
        self.retire_spinner(presenter, timers, now, key);
    }

    /// Fired by [`Task::RecheckComplete`]: rescue a cache hit whose load
    /// event fired before hooks could observe it.
    pub(crate) fn recheck_complete<P: Presenter>(
        &mut self,
        presenter: &mut P,
        timers: &mut TimerQueue,
        now: u64,
        key: &ImageKey,
    ) {
        if self.state(key) == LoadState::Loading && presenter.image_complete(key) {
            log::debug!("load {:?}: already complete on re-check", key.slot);
            self.complete_loaded(presenter, timers, now, key);
        }
    }

    /// Fired by [`Task::RemoveSpinner`] once the fade grace has elapsed.
    pub(crate) fn spinner_fade_elapsed<P: Presenter>(&mut self, presenter: &mut P, key: &ImageKey) {
        // The spinner may already be gone; firing late is harmless.
        if self.spinners.remove(key) {
            presenter.remove_spinner(key);
        }
    }

    fn complete_loaded<P: Presenter>(
        &mut self,
        presenter: &mut P,
        timers: &mut TimerQueue,
        now: u64,
        key: &ImageKey,
    ) {
        log::debug!("load {:?}: loaded", key.slot);
        self.states.insert(key.clone(), LoadState::Loaded);
        presenter.show_loaded(key);
        presenter.mark_slot_loaded(key.slot);
        self.retire_spinner(presenter, timers, now, key);
        if self.options.filename_overlay {
            presenter.attach_overlay(key, filename_of(&key.source));
        }
    }

    fn retire_spinner<P: Presenter>(
        &mut self,
        presenter: &mut P,
        timers: &mut TimerQueue,
        now: u64,
        key: &ImageKey,
    ) {
        if self.spinners.contains(key) {
            presenter.fade_spinner(key);
            timers.schedule(now + SPINNER_FADE_MS, Task::RemoveSpinner { key: key.clone() });
        }
    }
}

/// Last path segment of a source URL, query and fragment stripped. Feeds the
/// diagnostic overlay.
pub fn filename_of(source: &str) -> &str {
    let end = source
        .find(['?', '#'])
        .unwrap_or(source.len());
    let path = &source[..end];
    path.rsplit('/').next().unwrap_or(path)
}
