//! Pure mapping from carousel state to what the page shows.
//!
//! The renderer never looks at [`CarouselState`] directly; it asks
//! [`describe`] which slide and which indicator are active and renders that.

use super::slides::Slides;
use super::state::CarouselState;

/// One slide as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView<'a> {
    pub index: usize,
    pub src: &'a str,
    pub alt: &'a str,
    pub active: bool,
    /// Load eagerly; only the first slide is visible before any script runs.
    pub priority: bool,
}

impl SlideView<'_> {
    pub fn class(&self) -> &'static str {
        if self.active { "slide is-active" } else { "slide" }
    }
}

/// One jump-to-slide control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorView {
    pub index: usize,
    pub active: bool,
    /// Accessible label, e.g. `Go to image 2`.
    pub label: String,
}

impl IndicatorView {
    pub fn class(&self) -> &'static str {
        if self.active { "dot is-active" } else { "dot" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView<'a> {
    pub slides: Vec<SlideView<'a>>,
    pub indicators: Vec<IndicatorView>,
    pub transitioning: bool,
}

pub fn describe<'a>(slides: &'a Slides, state: &CarouselState) -> CarouselView<'a> {
    CarouselView {
        slides: slides
            .iter()
            .enumerate()
            .map(|(index, slide)| SlideView {
                index,
                src: &slide.src,
                alt: &slide.alt,
                active: index == state.active_index,
                priority: index == 0,
            })
            .collect(),
        indicators: (0..slides.len())
            .map(|index| IndicatorView {
                index,
                active: index == state.active_index,
                label: format!("Go to image {}", index + 1),
            })
            .collect(),
        transitioning: state.is_transitioning,
    }
}
