//! Presentation and UX tuning constants.
//!
//! These encode timing and threshold decisions, not correctness requirements:
//! the state machines in [`crate::loader`], [`crate::tracker`], and
//! [`crate::controller`] reference them by name so a host (or a test) can see
//! every magic number in one place. Tuning should happen here so all
//! instances on a page behave consistently.

/// Delays for timer-scheduled visual choreography.
pub mod timing {
    /// How long the transient `prev` class stays on the outgoing slide for
    /// `slide`/`slide-vertical` transitions (ms).
    pub const PREV_CLASS_MS: u64 = 500;
    /// Grace period between a spinner starting its fade-out and its removal
    /// from the document (ms).
    pub const SPINNER_FADE_MS: u64 = 300;
    /// Gap between eager-requesting the upcoming slide's image and the
    /// autoplay-driven transition, so the fetch starts before the visual
    /// swap and the placeholder flash is shortened (ms).
    pub const AUTOPLAY_PREFETCH_GAP_MS: u64 = 50;
    /// Lifetime of one screen-reader announcement element (ms).
    pub const ANNOUNCEMENT_MS: u64 = 1000;
    /// One-shot delay after source assignment before re-checking whether the
    /// image was already complete (cache hit that fired no load event) (ms).
    pub const COMPLETE_RECHECK_MS: u64 = 100;
}

/// Touch gesture classification.
pub mod gesture {
    /// Minimum horizontal displacement between touch-start and touch-end for
    /// a swipe to count as navigation (px).
    pub const SWIPE_THRESHOLD_PX: f64 = 50.0;
}

/// Intersection-observer coverage thresholds.
pub mod visibility {
    /// Coverage below which the carousel counts as off-screen and autoplay
    /// pauses.
    pub const CAROUSEL_THRESHOLD: f64 = 0.5;
    /// Coverage at which a secondary slot's one-shot lazy load triggers.
    pub const SECONDARY_THRESHOLD: f64 = 0.1;
}

/// Autoplay duration policy.
pub mod autoplay {
    /// Default dwell per slide when the attribute is absent or malformed (s).
    pub const DEFAULT_DURATION_SECS: u32 = 5;
    /// Inclusive clamp bounds for externally supplied durations (s). The
    /// internal default is not reclamped.
    pub const MIN_DURATION_SECS: u32 = 2;
    pub const MAX_DURATION_SECS: u32 = 10;
}
