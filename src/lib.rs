//! # Simple Carousel
//!
//! A headless engine for a progressively-loading image carousel: slide
//! navigation, lazy/eager image fetch scheduling, per-image loading-state
//! visualization, autoplay with pause-on-interaction, accessibility
//! announcements, and touch/keyboard input — with no host framework and no
//! DOM types anywhere in the crate.
//!
//! # Architecture: Engine Behind Three Seams
//!
//! The server-side renderer produces the markup; this crate runs the state
//! machines. Everything impure crosses one of three narrow seams:
//!
//! ```text
//! 1. Presenter   trait        ←  every DOM mutation (classes, spinners,
//!                                source swaps, announcements)
//! 2. tick(now)   host clock   ←  every delayed effect, as queued tasks
//! 3. Event       enum         ←  every input (pointer, key, touch, dots,
//!                                visibility, intersection)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Testability**: the whole state machine — load protocol, navigation,
//!   autoplay — runs headlessly against a recording fake presenter and a
//!   hand-driven clock; timing-sensitive properties become deterministic
//!   assertions.
//! - **Host independence**: a wasm shell, a server-side prerenderer, or a
//!   test harness adapt the same engine; none of them leak their element
//!   types into it.
//! - **Run-to-completion semantics**: with time explicit, every state
//!   transition finishes before the next queued event is processed, exactly
//!   like the browser event loop the engine targets.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`settings`] | Total-function decode of the container's declarative attributes into typed [`settings::Settings`] plus correction diagnostics |
//! | [`structure`] | Typed description of the pre-built container markup; fail-fast validation |
//! | [`presenter`] | The DOM-capability seam: [`Presenter`] |
//! | [`loader`] | Per-image load-with-visual-feedback protocol and [`types::LoadState`] machine |
//! | [`tracker`] | Current-slide ownership, circular navigation, neighbor preload invariant |
//! | [`controller`] | The per-container [`Carousel`]: play-state machine, input routing, autoplay |
//! | [`timer`] | Deterministic delayed-task queue drained by [`Carousel::tick`] |
//! | [`registry`] | Page-level visibility broadcast with panic-isolated delivery |
//! | [`tuning`] | Named UX timing/threshold constants |
//! | [`types`] | Shared value types (`ImageKey`, `SlotKey`, `LoadState`, …) |
//!
//! # Design Decisions
//!
//! ## Settings Never Fail
//!
//! Attribute decoding is a total function: a malformed `autoplay` payload or
//! an unknown transition name is corrected to its documented default, logged
//! once, and surfaced as a typed [`settings::Correction`] — never an error.
//! A content editor's typo degrades one option, not the page. Structural
//! problems are different: a container missing its required substructure
//! fails construction fast ([`structure::StructureError`]) before any
//! listener is wired.
//!
//! ## Loads Are Terminal
//!
//! An image is requested at most once per (source, slot) key. Success and
//! failure are both terminal: no retry, no spinner resurrection, and a
//! failed slide shows its error treatment while every other slide keeps
//! working. Browsers dedupe duplicate fetches of the same resource, so rapid
//! navigation away from a loading slide simply lets the fetch finish in the
//! background.
//!
//! ## Time Is Data
//!
//! The 500 ms transition class, 300 ms spinner fade, 50 ms autoplay
//! prefetch gap, 1000 ms announcement lifetime, and 100 ms cache re-check
//! are UX decisions, not protocol. They live as named constants in
//! [`tuning`], and they execute as [`timer::Task`] values against the host's
//! clock — which is why the test suite can prove properties like "pausing
//! during the prefetch gap suppresses the pending advance" without sleeping.

pub mod controller;
pub mod loader;
pub mod presenter;
pub mod registry;
pub mod settings;
pub mod structure;
pub mod timer;
pub mod tracker;
pub mod tuning;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use controller::{Carousel, Event, Key, PlayState};
pub use presenter::Presenter;
