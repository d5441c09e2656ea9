//! The carousel controller and everything it needs to run without a browser.
//!
//! The page has exactly one piece of behavior: an image carousel that rotates
//! on a timer and responds to previous/next/jump controls. This module models
//! it as an explicit state machine driven by a virtual clock, so the same
//! rules the generated page follows in JavaScript can be exercised (and
//! tested) in Rust.
//!
//! ```text
//!            next / prev / go_to / auto-advance
//!   ┌──────┐ ─────────────────────────────────▶ ┌───────────────┐
//!   │ Idle │                                    │ Transitioning │
//!   └──────┘ ◀───────────────────────────────── └───────────────┘
//!                   unlock (transition_ms)
//! ```
//!
//! The active index is orthogonal to the phase: it changes on every move and
//! wraps in both directions.
//!
//! | Submodule | Role |
//! |-----------|------|
//! | [`slides`] | The fixed, non-empty slide list |
//! | [`state`] | `CarouselState` and its `Phase` |
//! | [`timer`] | Deterministic single-threaded timer queue |
//! | [`controller`] | `Carousel`: the only place state is mutated |
//! | [`view`] | Pure state → render description mapping |

pub mod controller;
pub mod slides;
pub mod state;
pub mod timer;
pub mod view;

pub use controller::{Carousel, CarouselError, CarouselEvent, EventKind, Outcome, RearmPolicy, Timing};
pub use slides::{Slide, SlideError, Slides};
pub use state::{CarouselState, Phase};
pub use view::{CarouselView, IndicatorView, SlideView, describe};
