//! Instance settings decoding.
//!
//! Each carousel container carries three declarative attributes written by
//! the server-side renderer:
//!
//! ```text
//! transition = "fade" | "slide" | "slide-vertical"
//! autoplay   = {"enabled": true, "duration": 5}     (JSON object)
//! controls   = ["dots", "arrows", "counter"]        (JSON array)
//! ```
//!
//! [`parse`] is a total function: it never fails and never panics. Each
//! attribute is decoded independently; a decode error or out-of-domain value
//! replaces that field with its documented default and records a
//! [`Correction`] naming the field (also emitted as a single `log::warn!`
//! line). The `autoplay` object recovers field by field: a bad `duration`
//! never discards a good `enabled`, and vice versa. Well-formed input
//! produces no corrections.
//!
//! ## Defaults
//!
//! | Field | Default |
//! |-------|---------|
//! | `transition` | `fade` |
//! | `autoplay` | `{enabled: false, duration: 5}` |
//! | `controls` | empty set |
//!
//! Externally supplied durations are clamped to the documented 2–10 second
//! range; the internal default is not reclamped.

use crate::tuning::autoplay::{DEFAULT_DURATION_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual transition mode between slides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    #[default]
    Fade,
    Slide,
    SlideVertical,
}

impl Transition {
    /// Parse an attribute value. Returns `None` for out-of-domain input.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "fade" => Some(Self::Fade),
            "slide" => Some(Self::Slide),
            "slide-vertical" => Some(Self::SlideVertical),
            _ => None,
        }
    }

    /// Whether this mode uses the transient `prev` class on the outgoing
    /// slide.
    pub fn uses_prev_class(self) -> bool {
        matches!(self, Self::Slide | Self::SlideVertical)
    }
}

/// Autoplay policy decoded from the `autoplay` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Autoplay {
    pub enabled: bool,
    /// Dwell per slide, in whole seconds.
    pub duration: u32,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self {
            enabled: false,
            duration: DEFAULT_DURATION_SECS,
        }
    }
}

impl Autoplay {
    /// Timer period in milliseconds.
    pub fn period_ms(&self) -> u64 {
        u64::from(self.duration) * 1000
    }
}

/// Which optional controls the instance enables.
///
/// Derived from the `controls` attribute's JSON array; membership, not order,
/// is what matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub dots: bool,
    pub arrows: bool,
    pub counter: bool,
}

/// Fully decoded instance settings. Immutable after construction; value data
/// copied into the instance, never referenced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub transition: Transition,
    pub autoplay: Autoplay,
    pub controls: Controls,
}

/// Raw attribute values as read off the container element. `None` means the
/// attribute is absent (a normal condition, defaulted silently).
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    pub transition: Option<String>,
    pub autoplay: Option<String>,
    pub controls: Option<String>,
}

/// One field-level correction applied during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Dotted path of the corrected field, e.g. `"autoplay.duration"`.
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Result of [`parse`]: the typed settings plus whatever corrections were
/// applied to reach them.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub settings: Settings,
    pub corrections: Vec<Correction>,
}

/// Decode raw attributes into typed [`Settings`].
///
/// Total function: malformed input is corrected field-by-field, never
/// surfaced as an error. Each correction is logged exactly once.
pub fn parse(raw: &RawSettings) -> Parsed {
    let mut corrections = Vec::new();

    let transition = match raw.transition.as_deref() {
        None => Transition::default(),
        Some(value) => match Transition::parse(value) {
            Some(t) => t,
            None => {
                correct(
                    &mut corrections,
                    "transition",
                    format!("unknown mode {value:?}"),
                );
                Transition::default()
            }
        },
    };

    let autoplay = match raw.autoplay.as_deref() {
        None => Autoplay::default(),
        Some(value) => decode_autoplay(value, &mut corrections),
    };

    let controls = match raw.controls.as_deref() {
        None => Controls::default(),
        Some(value) => match serde_json::from_str::<Vec<String>>(value) {
            Ok(names) => decode_controls(&names, &mut corrections),
            Err(err) => {
                correct(&mut corrections, "controls", format!("invalid JSON: {err}"));
                Controls::default()
            }
        },
    };

    Parsed {
        settings: Settings {
            transition,
            autoplay,
            controls,
        },
        corrections,
    }
}

fn correct(corrections: &mut Vec<Correction>, field: &'static str, reason: String) {
    log::warn!("settings: {field}: {reason}; using default");
    corrections.push(Correction { field, reason });
}

/// Decode the `autoplay` JSON object one field at a time, so a bad
/// `duration` corrects on its own instead of discarding `enabled` with it.
/// Unknown keys are ignored.
fn decode_autoplay(value: &str, corrections: &mut Vec<Correction>) -> Autoplay {
    use serde_json::Value;

    let object = match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            correct(
                corrections,
                "autoplay",
                format!("expected an object, got {other}"),
            );
            return Autoplay::default();
        }
        Err(err) => {
            correct(corrections, "autoplay", format!("invalid JSON: {err}"));
            return Autoplay::default();
        }
    };

    let enabled = match object.get("enabled") {
        None => false,
        Some(Value::Bool(enabled)) => *enabled,
        Some(other) => {
            correct(
                corrections,
                "autoplay.enabled",
                format!("expected a boolean, got {other}"),
            );
            false
        }
    };
    let duration = match object.get("duration") {
        None => DEFAULT_DURATION_SECS,
        Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(seconds) if seconds >= 1 => seconds,
            _ => {
                correct(
                    corrections,
                    "autoplay.duration",
                    format!("expected a whole second count of at least 1, got {value}"),
                );
                DEFAULT_DURATION_SECS
            }
        },
    };
    clamp_duration(Autoplay { enabled, duration }, corrections)
}

fn clamp_duration(decoded: Autoplay, corrections: &mut Vec<Correction>) -> Autoplay {
    let clamped = decoded
        .duration
        .clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
    if clamped != decoded.duration {
        correct(
            corrections,
            "autoplay.duration",
            format!(
                "{} out of range {MIN_DURATION_SECS}..={MAX_DURATION_SECS}, clamped to {clamped}",
                decoded.duration
            ),
        );
    }
    Autoplay {
        duration: clamped,
        ..decoded
    }
}

fn decode_controls(names: &[String], corrections: &mut Vec<Correction>) -> Controls {
    let mut controls = Controls::default();
    let mut unknown = Vec::new();
    for name in names {
        match name.as_str() {
            "dots" => controls.dots = true,
            "arrows" => controls.arrows = true,
            "counter" => controls.counter = true,
            other => unknown.push(other.to_string()),
        }
    }
    if !unknown.is_empty() {
        correct(
            corrections,
            "controls",
            format!("unknown control names: {}", unknown.join(", ")),
        );
    }
    controls
}
