//! Content directory scanning and manifest generation.
//!
//! Stage 1 of the build. Reads the content root, discovers the slide images
//! and the site configuration, and produces a [`Manifest`] that the generate
//! stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml        # Site configuration (optional)
//! ├── assets/            # Copied verbatim to dist/assets/ (optional)
//! ├── 010-foto1.png      # Slides, ordered by number prefix
//! ├── 020-foto2.png
//! └── rings.jpg          # Unnumbered slides come last, by filename
//! ```
//!
//! ## Validation
//!
//! - At least one slide must exist
//! - No two slides may share a number prefix

use crate::config::{self, SiteConfig};
use crate::naming::parse_slide_name;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Duplicate slide number {number}: {first} and {second}")]
    DuplicateNumber {
        number: u32,
        first: String,
        second: String,
    },
    #[error("No slide images found in {0}")]
    NoSlides(PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Slides in display order.
    pub slides: Vec<SlideSource>,
    /// Name of the assets directory, relative to the content root, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<String>,
    pub config: SiteConfig,
}

/// A slide image found in the content root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

pub const SLIDE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif", "gif", "svg"];

pub const ASSETS_DIR: &str = "assets";

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let entries = collect_entries(root)?;

    let mut slides: Vec<SlideSource> = entries
        .iter()
        .filter(|p| is_slide(p))
        .filter_map(|p| {
            let filename = p.file_name()?.to_string_lossy().to_string();
            let stem = p.file_stem()?.to_string_lossy().to_string();
            let parsed = parse_slide_name(&stem);
            Some(SlideSource {
                number: parsed.number,
                filename,
                title: parsed.title,
            })
        })
        .collect();

    if slides.is_empty() {
        return Err(ScanError::NoSlides(root.to_path_buf()));
    }

    check_duplicate_numbers(&slides)?;

    slides.sort_by(|a, b| {
        let key_a = (a.number.is_none(), a.number.unwrap_or(0), &a.filename);
        let key_b = (b.number.is_none(), b.number.unwrap_or(0), &b.filename);
        key_a.cmp(&key_b)
    });

    let assets = root
        .join(ASSETS_DIR)
        .is_dir()
        .then(|| ASSETS_DIR.to_string());

    // Load site config (uses defaults if config.toml doesn't exist)
    let config = config::load_config(root)?;

    debug!(slides = slides.len(), has_assets = assets.is_some(), "scan complete");

    Ok(Manifest {
        slides,
        assets,
        config,
    })
}

fn check_duplicate_numbers(slides: &[SlideSource]) -> Result<(), ScanError> {
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for slide in slides {
        let Some(number) = slide.number else {
            continue;
        };
        if let Some(first) = seen.insert(number, &slide.filename) {
            let (first, second) = if first <= slide.filename.as_str() {
                (first, slide.filename.as_str())
            } else {
                (slide.filename.as_str(), first)
            };
            return Err(ScanError::DuplicateNumber {
                number,
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }
    Ok(())
}

fn collect_entries(path: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .map(|n| !n.to_string_lossy().starts_with('.'))
                .unwrap_or(false)
        })
        .collect();

    entries.sort();
    Ok(entries)
}

fn is_slide(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    SLIDE_EXTENSIONS.contains(&ext.as_str())
}
