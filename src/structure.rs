//! Typed description of the pre-built container markup.
//!
//! The server-side renderer produces the DOM; the host adapter reads it once
//! at construction and hands the engine a [`Structure`]: the ordered slides,
//! which controls exist, and the secondary slots. The engine assumes the
//! description is well-formed except for the checks in
//! [`Structure::validate`], which run before any wiring so a structurally
//! broken container fails fast with a descriptive [`StructureError`] and no
//! partially attached listeners.
//!
//! ## Expected markup shape
//!
//! ```text
//! container [transition=…] [autoplay=…] [controls=…]
//! ├── slideshow root
//! │   ├── slide 0 (active)  — one image, eager src
//! │   ├── slide 1..n        — one image each, placeholder src + deferred source
//! │   ├── dots / arrows / counter   (optional, per controls)
//! └── secondary slots       — one lazily-loaded image each, optional caption
//! ```
//!
//! Images destined for lazy load carry a provisional placeholder source and a
//! deferred-source attribute ([`ImageSpec::deferred`]); assigning the real
//! source and dropping the deferred attribute is the host's
//! [`crate::Presenter::set_source`] implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Structural validation failures. Fatal to instance construction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StructureError {
    #[error("slideshow root has no slides")]
    NoSlides,
    #[error("slide {0} has an empty image source")]
    EmptySlideSource(usize),
    #[error("secondary slot {0} has an empty image source")]
    EmptySecondarySource(usize),
    #[error("duplicate secondary slot id {0}")]
    DuplicateSecondarySlot(usize),
}

/// One image element in the markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSpec {
    /// Resolved source URL. For deferred images this is the deferred-source
    /// attribute value, not the placeholder.
    pub source: String,
    /// Alt text, used in slide-change announcements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Whether the live `src` currently holds a placeholder and the real
    /// source must be swapped in on request. The first slide is typically
    /// rendered eager (`deferred = false`).
    #[serde(default)]
    pub deferred: bool,
}

impl ImageSpec {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt: None,
            deferred: false,
        }
    }

    pub fn deferred(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt: None,
            deferred: true,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

/// One navigable slide. Index is positional in [`Structure::slides`], stable
/// for the instance lifetime and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSpec {
    pub image: ImageSpec,
}

/// One independently lazy-loaded slot outside the carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondarySlotSpec {
    /// Slot id from the markup (`data-slot-number`), unique per container.
    pub slot: usize,
    pub image: ImageSpec,
    /// Whether the slot carries a caption element (revealed once its image
    /// loads).
    #[serde(default)]
    pub has_caption: bool,
}

/// Everything the engine needs to know about one container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structure {
    pub slides: Vec<SlideSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<SecondarySlotSpec>,
    /// Which control elements the renderer actually emitted. The engine only
    /// issues presenter updates (and accepts control events) for controls
    /// that exist.
    #[serde(default)]
    pub has_dots: bool,
    #[serde(default)]
    pub has_arrows: bool,
    #[serde(default)]
    pub has_counter: bool,
}

impl Structure {
    /// Check the structural contract. Runs before any listener wiring.
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.slides.is_empty() {
            return Err(StructureError::NoSlides);
        }
        for (index, slide) in self.slides.iter().enumerate() {
            if slide.image.source.is_empty() {
                return Err(StructureError::EmptySlideSource(index));
            }
        }
        let mut seen = HashSet::new();
        for slot in &self.secondary {
            if slot.image.source.is_empty() {
                return Err(StructureError::EmptySecondarySource(slot.slot));
            }
            if !seen.insert(slot.slot) {
                return Err(StructureError::DuplicateSecondarySlot(slot.slot));
            }
        }
        Ok(())
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::structure_with_slides;

    #[test]
    fn valid_structure_passes() {
        let structure = structure_with_slides(3);
        assert!(structure.validate().is_ok());
        assert_eq!(structure.slide_count(), 3);
    }

    #[test]
    fn no_slides_is_fatal() {
        let structure = Structure::default();
        assert_eq!(structure.validate(), Err(StructureError::NoSlides));
    }

    #[test]
    fn single_slide_is_structurally_valid() {
        let structure = structure_with_slides(1);
        assert!(structure.validate().is_ok());
    }

    #[test]
    fn empty_slide_source_is_fatal() {
        let mut structure = structure_with_slides(2);
        structure.slides[1].image.source.clear();
        assert_eq!(
            structure.validate(),
            Err(StructureError::EmptySlideSource(1))
        );
    }

    #[test]
    fn empty_secondary_source_is_fatal() {
        let mut structure = structure_with_slides(2);
        structure.secondary.push(SecondarySlotSpec {
            slot: 4,
            image: ImageSpec::deferred(""),
            has_caption: false,
        });
        assert_eq!(
            structure.validate(),
            Err(StructureError::EmptySecondarySource(4))
        );
    }

    #[test]
    fn duplicate_secondary_slot_is_fatal() {
        let mut structure = structure_with_slides(2);
        for _ in 0..2 {
            structure.secondary.push(SecondarySlotSpec {
                slot: 3,
                image: ImageSpec::deferred("slot.avif"),
                has_caption: false,
            });
        }
        assert_eq!(
            structure.validate(),
            Err(StructureError::DuplicateSecondarySlot(3))
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            StructureError::EmptySlideSource(2).to_string(),
            "slide 2 has an empty image source"
        );
    }

    #[test]
    fn structure_round_trips_through_json() {
        let structure = structure_with_slides(2);
        let json = serde_json::to_string(&structure).unwrap();
        let back: Structure = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slide_count(), 2);
        assert!(back.validate().is_ok());
    }
}
