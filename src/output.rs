//! CLI output formatting.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Slides
//! 001 foto1
//!     Source: 010-foto1.png
//! 002 (020.png)
//!     Source: 020.png
//!
//! Event
//!     Katherine & Charles
//!     June 18, 2025 | Curitiba, PR
//!
//! Carousel
//!     every 5000ms, 500ms transition, rearm: independent
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Page → index.html
//! 001 foto1 → slides/010-foto1.png
//!
//! Generated 1 page, 2 slides
//! ```
//!
//! ## Simulate
//!
//! ```text
//!      0ms  mount        [0] idle
//!   1200ms  next         [1] transitioning  (0 → 1)
//!   1700ms  unlock       [1] idle
//! ```

use crate::carousel::{CarouselState, Phase, Timing};
use crate::generate::SLIDES_DIR;
use crate::scan::{Manifest, SlideSource};
use crate::simulate::{Entry, Source};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Titled slides show the title, untitled ones the filename in parens.
fn slide_line(index: usize, slide: &SlideSource) -> String {
    match slide.title.as_deref() {
        Some(t) if !t.is_empty() => format!("{} {}", format_index(index), t),
        _ => format!("{} ({})", format_index(index), slide.filename),
    }
}

fn timing_line(timing: &Timing) -> String {
    if timing.autoplay {
        format!(
            "every {}ms, {}ms transition, rearm: {}",
            timing.interval.as_millis(),
            timing.transition.as_millis(),
            timing.rearm
        )
    } else {
        format!(
            "autoplay off, {}ms transition",
            timing.transition.as_millis()
        )
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Slides".to_string()];
    for (i, slide) in manifest.slides.iter().enumerate() {
        lines.push(slide_line(i + 1, slide));
        lines.push(format!("{}Source: {}", indent(1), slide.filename));
    }

    let event = &manifest.config.event;
    lines.push(String::new());
    lines.push("Event".to_string());
    lines.push(format!("{}{}", indent(1), event.couple));
    let details = event.details_line();
    if !details.is_empty() {
        lines.push(format!("{}{}", indent(1), details));
    }

    lines.push(String::new());
    lines.push("Carousel".to_string());
    lines.push(format!(
        "{}{}",
        indent(1),
        timing_line(&manifest.config.carousel.timing())
    ));

    let has_config = source_root.join("config.toml").is_file();
    if has_config || manifest.assets.is_some() {
        lines.push(String::new());
        lines.push("Config".to_string());
        if has_config {
            lines.push(format!("{}config.toml", indent(1)));
        }
        if let Some(assets) = &manifest.assets {
            lines.push(format!("{}{}/", indent(1), assets));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Page → index.html".to_string()];
    for (i, slide) in manifest.slides.iter().enumerate() {
        lines.push(format!(
            "{} → {}/{}",
            slide_line(i + 1, slide),
            SLIDES_DIR,
            slide.filename
        ));
    }
    if let Some(assets) = &manifest.assets {
        lines.push(format!("Assets → {}/", assets));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated 1 page, {}",
        plural(manifest.slides.len(), "slide")
    ));
    lines
}

pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Simulate output
// ============================================================================

fn state_column(state: &CarouselState) -> String {
    let phase = match state.phase() {
        Phase::Idle => "idle",
        Phase::Transitioning => "transitioning",
    };
    format!("[{}] {}", state.active_index, phase)
}

pub fn format_timeline(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let label = entry.source.label();
            let mut line = format!(
                "{:>7}ms  {:<11}  {:<17}",
                entry.at.as_millis(),
                label,
                state_column(&entry.state)
            );
            match entry.source {
                Source::Ignored(_) => line.push_str("  (ignored)"),
                _ => {
                    if let Some((from, to)) = entry.moved {
                        line.push_str(&format!("  ({from} → {to})"));
                    }
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}

pub fn print_timeline(entries: &[Entry]) {
    for line in format_timeline(entries) {
        println!("{}", line);
    }
}
