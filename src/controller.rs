//! The per-container carousel instance.
//!
//! [`Carousel`] wires every input source — pointer, keyboard, touch, dot and
//! arrow clicks, page visibility, intersection coverage, the autoplay timer —
//! to [`SlideTracker`](crate::tracker::SlideTracker) transitions, and owns
//! the play-state machine:
//!
//! ```text
//!            autoplay.enabled                 pause trigger
//! (start) ──────────────────► Autoplaying ◄──────────────────┐
//!    │                             │  ▲                      │
//!    │ otherwise                   ▼  │ resume signal        ▼
//!    └────────► Idle        PausedByInteraction ─────► (idempotent re-entry)
//! ```
//!
//! `Idle` is terminal for autoplay-disabled instances: no trigger ever starts
//! a timer. Pause triggers are pointer-enter, focus-in, the page going
//! hidden, or intersection coverage dropping below the 0.5 threshold; each
//! has a complementary resume signal, and both directions are idempotent
//! (resuming never stacks a second timer).
//!
//! Time is host-driven: the embedding page calls [`Carousel::tick`] with its
//! monotonic millisecond clock, and reports image completions via
//! [`Carousel::image_loaded`] / [`Carousel::image_failed`]. Secondary-slot
//! images live outside the play-state machine entirely — each is requested
//! exactly once, the first time its slot's coverage crosses the 0.1
//! threshold.

use crate::loader::{ImageLoader, LoaderOptions};
use crate::presenter::Presenter;
use crate::settings::{self, Correction, RawSettings, Settings};
use crate::structure::{SecondarySlotSpec, Structure, StructureError};
use crate::timer::{Task, TimerQueue};
use crate::tracker::SlideTracker;
use crate::tuning::gesture::SWIPE_THRESHOLD_PX;
use crate::tuning::timing::AUTOPLAY_PREFETCH_GAP_MS;
use crate::tuning::visibility::{CAROUSEL_THRESHOLD, SECONDARY_THRESHOLD};
use crate::types::{ImageKey, LoadState, Priority, SlotKey};

/// Autoplay lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Autoplay disabled (terminal) or instance shut down.
    Idle,
    /// Timer running.
    Autoplaying,
    /// Timer cancelled by an interaction; resumable.
    PausedByInteraction,
}

/// Keyboard inputs the carousel consumes. The host adapter is responsible
/// for `preventDefault` on the native events it translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Home,
    End,
}

/// One routed input or system event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    Key(Key),
    TouchStart { x: f64 },
    TouchEnd { x: f64 },
    DotClick { index: usize },
    PrevClick,
    NextClick,
    /// Document-level visibility change, dispatched through the
    /// [`crate::registry::VisibilityHub`].
    PageVisibility { visible: bool },
    /// Intersection coverage of the carousel root.
    Intersection { ratio: f64 },
    /// Intersection coverage of one secondary slot.
    SecondaryIntersection { slot: usize, ratio: f64 },
}

/// One carousel instance. Owns its slides, load states, and timers
/// exclusively; nothing is shared across instances.
#[derive(Debug)]
pub struct Carousel<P: Presenter> {
    presenter: P,
    settings: Settings,
    corrections: Vec<Correction>,
    tracker: SlideTracker,
    loader: ImageLoader,
    timers: TimerQueue,
    secondary: Vec<SecondarySlotSpec>,
    has_arrows: bool,
    play: PlayState,
    now: u64,
    touch_start_x: Option<f64>,
}

impl<P: Presenter> Carousel<P> {
    /// Build an instance from a validated container description.
    ///
    /// Fails fast on a [`StructureError`] before any state is wired; settings
    /// decoding is total and never contributes to failure. Establishes the
    /// initial preload invariant and, when autoplay is enabled on a
    /// multi-slide carousel, starts the timer.
    pub fn new(
        presenter: P,
        structure: Structure,
        raw: &RawSettings,
        options: LoaderOptions,
        now: u64,
    ) -> Result<Self, StructureError> {
        structure.validate()?;
        let parsed = settings::parse(raw);
        let Structure {
            slides,
            secondary,
            has_dots,
            has_arrows,
            has_counter,
        } = structure;

        let mut instance = Self {
            presenter,
            settings: parsed.settings,
            corrections: parsed.corrections,
            tracker: SlideTracker::new(slides, parsed.settings.transition, has_dots, has_counter),
            loader: ImageLoader::new(options),
            timers: TimerQueue::new(),
            secondary,
            has_arrows,
            play: PlayState::Idle,
            now,
            touch_start_x: None,
        };
        instance.tracker.initialize(
            &mut instance.presenter,
            &mut instance.loader,
            &mut instance.timers,
            now,
        );
        if instance.settings.autoplay.enabled && !instance.tracker.navigation_disabled() {
            instance.play = PlayState::Autoplaying;
            instance
                .timers
                .schedule(now + instance.settings.autoplay.period_ms(), Task::AutoplayTick);
            log::debug!("autoplay started, period {}ms", instance.settings.autoplay.period_ms());
        }
        Ok(instance)
    }

    // --- accessors ---------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Field corrections applied while decoding this instance's settings.
    pub fn corrections(&self) -> &[Correction] {
        &self.corrections
    }

    pub fn play_state(&self) -> PlayState {
        self.play
    }

    pub fn current_index(&self) -> usize {
        self.tracker.current()
    }

    pub fn slide_count(&self) -> usize {
        self.tracker.slide_count()
    }

    /// Load state of a slide's image. Out-of-range indices read as
    /// `Unrequested`, same as unknown secondary slots.
    pub fn slide_state(&self, index: usize) -> LoadState {
        if index >= self.tracker.slide_count() {
            return LoadState::Unrequested;
        }
        self.loader.state(&self.tracker.slide_key(index))
    }

    /// Load state of a secondary slot's image.
    pub fn secondary_state(&self, slot: usize) -> LoadState {
        match self.secondary.iter().find(|spec| spec.slot == slot) {
            Some(spec) => self
                .loader
                .state(&ImageKey::new(spec.image.source.clone(), SlotKey::Secondary(slot))),
            None => LoadState::Unrequested,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // --- input -------------------------------------------------------------

    /// Route one event. Refused navigation (out-of-range targets, the current
    /// index, single-slide carousels) is a silent no-op here; the strict
    /// errors stay inside [`crate::tracker`].
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::PointerEnter | Event::FocusIn => self.pause(),
            Event::PointerLeave | Event::FocusOut => self.resume(),
            Event::PageVisibility { visible } => {
                if visible {
                    self.resume();
                } else {
                    self.pause();
                }
            }
            Event::Intersection { ratio } => {
                if ratio >= CAROUSEL_THRESHOLD {
                    self.resume();
                } else {
                    self.pause();
                }
            }
            Event::Key(key) => self.handle_key(key),
            Event::TouchStart { x } => self.touch_start_x = Some(x),
            Event::TouchEnd { x } => self.touch_end(x),
            Event::DotClick { index } => self.go_to(index),
            // Arrow-button events only exist when the renderer emitted the
            // buttons; stray ones are dropped.
            Event::PrevClick => {
                if self.has_arrows {
                    self.previous_slide();
                }
            }
            Event::NextClick => {
                if self.has_arrows {
                    self.next_slide();
                }
            }
            Event::SecondaryIntersection { slot, ratio } => {
                if ratio >= SECONDARY_THRESHOLD {
                    self.request_secondary(slot);
                }
            }
        }
    }

    /// Advance the host clock and run every due task to completion.
    pub fn tick(&mut self, now: u64) {
        self.now = now;
        for task in self.timers.drain_due(now) {
            self.run_task(task, now);
        }
    }

    /// Success signal for an image this instance requested.
    pub fn image_loaded(&mut self, key: &ImageKey) {
        self.loader
            .report_loaded(&mut self.presenter, &mut self.timers, self.now, key);
    }

    /// Failure signal for an image this instance requested. Terminal and
    /// non-fatal: every other slide keeps working.
    pub fn image_failed(&mut self, key: &ImageKey) {
        self.loader
            .report_failed(&mut self.presenter, &mut self.timers, self.now, key);
    }

    /// Release the instance's long-lived resources: every pending timer task
    /// is dropped and the state machine parks in `Idle`. The host releases
    /// its observers (and the [`crate::registry::VisibilityHub`]
    /// subscription) alongside.
    pub fn shutdown(&mut self) {
        self.timers.clear();
        self.play = PlayState::Idle;
        self.touch_start_x = None;
        log::debug!("carousel shut down");
    }

    // --- internals ---------------------------------------------------------

    fn run_task(&mut self, task: Task, now: u64) {
        match task {
            Task::AutoplayTick => self.autoplay_tick(now),
            Task::AutoplayAdvance { target } => {
                // The instance may have paused during the prefetch gap.
                if self.play == PlayState::Autoplaying {
                    self.go_to(target);
                }
            }
            Task::ClearPrevClass { index } => self.presenter.set_prev_class(index, false),
            Task::RemoveSpinner { key } => {
                self.loader.spinner_fade_elapsed(&mut self.presenter, &key)
            }
            Task::RecheckComplete { key } => {
                self.loader
                    .recheck_complete(&mut self.presenter, &mut self.timers, now, &key)
            }
            Task::RemoveAnnouncement { id } => self.presenter.remove_announcement(id),
        }
    }

    /// One autoplay interval elapsed: eager-request the upcoming slide so its
    /// fetch starts ahead of the transition, schedule the transition after
    /// the prefetch gap, and keep the cadence.
    fn autoplay_tick(&mut self, now: u64) {
        if self.play != PlayState::Autoplaying || self.tracker.navigation_disabled() {
            return;
        }
        let target = self.tracker.next_index();
        self.tracker.request_slide(
            &mut self.presenter,
            &mut self.loader,
            &mut self.timers,
            now,
            target,
            Priority::Eager,
        );
        self.timers
            .schedule(now + AUTOPLAY_PREFETCH_GAP_MS, Task::AutoplayAdvance { target });
        self.timers
            .schedule(now + self.settings.autoplay.period_ms(), Task::AutoplayTick);
    }

    fn handle_key(&mut self, key: Key) {
        if self.tracker.navigation_disabled() {
            return;
        }
        match key {
            Key::ArrowLeft => self.previous_slide(),
            Key::ArrowRight => self.next_slide(),
            Key::Home => self.go_to(0),
            Key::End => self.go_to(self.tracker.last_index()),
            Key::Space => match self.play {
                PlayState::Autoplaying => self.pause(),
                PlayState::PausedByInteraction => self.resume(),
                // Terminal for autoplay-disabled instances.
                PlayState::Idle => {}
            },
        }
    }

    fn touch_end(&mut self, x: f64) {
        let Some(start) = self.touch_start_x.take() else {
            return;
        };
        let delta = start - x;
        if delta.abs() > SWIPE_THRESHOLD_PX {
            if delta > 0.0 {
                self.next_slide();
            } else {
                self.previous_slide();
            }
        }
    }

    fn next_slide(&mut self) {
        if !self.tracker.navigation_disabled() {
            self.go_to(self.tracker.next_index());
        }
    }

    fn previous_slide(&mut self) {
        if !self.tracker.navigation_disabled() {
            self.go_to(self.tracker.prev_index());
        }
    }

    /// Manual and autoplay navigation both land here. Manually triggered
    /// navigation deliberately leaves a running autoplay timer on its
    /// original schedule.
    fn go_to(&mut self, target: usize) {
        let _ = self.tracker.go_to(
            &mut self.presenter,
            &mut self.loader,
            &mut self.timers,
            self.now,
            target,
        );
    }

    fn pause(&mut self) {
        match self.play {
            PlayState::Idle => {}
            PlayState::Autoplaying => {
                self.timers.cancel_autoplay();
                self.play = PlayState::PausedByInteraction;
                log::debug!("autoplay paused");
            }
            // Repeated pause triggers re-enter the state idempotently.
            PlayState::PausedByInteraction => {}
        }
    }

    fn resume(&mut self) {
        if !self.settings.autoplay.enabled
            || self.play != PlayState::PausedByInteraction
            || self.timers.has_autoplay()
        {
            return;
        }
        self.play = PlayState::Autoplaying;
        self.timers
            .schedule(self.now + self.settings.autoplay.period_ms(), Task::AutoplayTick);
        log::debug!("autoplay resumed");
    }

    fn request_secondary(&mut self, slot: usize) {
        let Some(spec) = self.secondary.iter().find(|spec| spec.slot == slot) else {
            return;
        };
        let key = ImageKey::new(spec.image.source.clone(), SlotKey::Secondary(slot));
        let use_provided_source = !spec.image.deferred;
        self.loader.request(
            &mut self.presenter,
            &mut self.timers,
            self.now,
            key,
            Priority::Lazy,
            use_provided_source,
        );
    }
}
