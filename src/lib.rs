//! # Save the Date
//!
//! A single-page static generator for wedding save-the-date announcements.
//! Your content directory is the data source: numbered images become the
//! slides of a crossfading carousel, `config.toml` supplies the couple, the
//! date, the links and the carousel timing.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML page)
//! ```
//!
//! The manifest is human-readable JSON, so a scan can be inspected before
//! anything is written to the output directory.
//!
//! # The Carousel
//!
//! The page's only behavior is the image carousel. Its rules live in
//! [`carousel`] as a plain state machine over a virtual clock: slides are
//! rotated on a fixed interval, user navigation is locked while a crossfade
//! is in flight, and all timers go away on unmount. The same rules are
//! mirrored by the inline script shipped with the page, and can be replayed
//! from the command line with the `simulate` subcommand ([`simulate`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the content directory, orders slides, loads config |
//! | [`generate`] | Stage 2: renders the page with Maud and copies slides and assets |
//! | [`carousel`] | Carousel state, timers, navigation and the render description |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | `NNN-name` filename convention parser for slide ordering |
//! | [`simulate`] | Scripted carousel runs on a virtual clock |
//! | [`output`] | CLI output formatting for every subcommand |

pub mod carousel;
pub mod config;
pub mod generate;
pub mod naming;
pub mod output;
pub mod scan;
pub mod simulate;

#[cfg(test)]
pub(crate) mod test_helpers;
