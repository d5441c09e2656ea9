//! The slide list shown by the carousel.
//!
//! Slides are fixed at build time and never change while the page is open.
//! [`Slides`] can only be built from a non-empty list, so every index
//! computation downstream may assume `len() >= 1`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlideError {
    #[error("carousel needs at least one slide")]
    Empty,
}

/// One image in the carousel sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    /// Image URL relative to the site root (e.g. `slides/010-foto1.png`).
    pub src: String,
    /// Alternative text for the `<img>` element.
    pub alt: String,
}

impl Slide {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Ordered, immutable, non-empty list of slides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Slide>", into = "Vec<Slide>")]
pub struct Slides(Vec<Slide>);

impl Slides {
    pub fn new(slides: Vec<Slide>) -> Result<Self, SlideError> {
        if slides.is_empty() {
            return Err(SlideError::Empty);
        }
        Ok(Self(slides))
    }

    /// Build `count` slides with synthetic sources, for simulations where
    /// only the length matters.
    pub fn numbered(count: usize) -> Result<Self, SlideError> {
        Self::new(
            (1..=count)
                .map(|n| Slide::new(format!("slide-{n}"), format!("Wedding image {n}")))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present so clippy's `len_without_is_empty` stays quiet.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.0.iter()
    }
}

impl TryFrom<Vec<Slide>> for Slides {
    type Error = SlideError;

    fn try_from(slides: Vec<Slide>) -> Result<Self, Self::Error> {
        Self::new(slides)
    }
}

impl From<Slides> for Vec<Slide> {
    fn from(slides: Slides) -> Self {
        slides.0
    }
}

impl<'a> IntoIterator for &'a Slides {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
