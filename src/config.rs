//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! reproduce the reference announcement; a user `config.toml` in the content
//! root overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! lang = "en"
//! title = "Katherine & Charles - Save the Date"
//! description = "Join us for our wedding on June 18, 2025 in Curitiba, PR"
//!
//! [event]
//! headline = "Save the Date"
//! couple = "Katherine & Charles"
//! date = "June 18, 2025"
//! place = "Curitiba, PR"
//!
//! [links.location]
//! label = "Localização"
//! href = "#location"
//!
//! [links.rsvp]
//! label = "Confirmar presença"
//! href = "#cp"
//!
//! [carousel]
//! autoplay = true
//! interval_ms = 5000
//! transition_ms = 500
//! rearm = "independent"     # or "on-change"
//!
//! [colors]
//! background = "#f9f7f5"
//! headline = "#3c3c3c"
//! names = "#5a5a5a"
//! details = "#7a7a7a"
//! accent = "#d4c9b9"
//! accent_hover = "#c5b9a8"
//! outline_hover = "#f5f2ee"
//! control = "rgba(255, 255, 255, 0.7)"
//! control_text = "#3c3c3c"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::{RearmPolicy, Timing};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document-level settings (`<html lang>`, `<title>`, description meta).
    pub site: SiteMeta,
    /// The text of the hero section.
    pub event: EventConfig,
    /// The two call-to-action links.
    pub links: LinksConfig,
    /// Carousel timing and auto-advance policy.
    pub carousel: CarouselConfig,
    /// Palette, emitted as CSS custom properties.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.interval_ms must be greater than 0".into(),
            ));
        }
        if self.carousel.transition_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.transition_ms must be greater than 0".into(),
            ));
        }
        if self.carousel.transition_ms >= self.carousel.interval_ms {
            return Err(ConfigError::Validation(
                "carousel.transition_ms must be shorter than carousel.interval_ms".into(),
            ));
        }
        for (key, link) in [("location", &self.links.location), ("rsvp", &self.links.rsvp)] {
            if link.label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "links.{key}.label must not be empty"
                )));
            }
            if link.href.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "links.{key}.href must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub lang: String,
    pub title: String,
    pub description: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            title: "Katherine & Charles - Save the Date".to_string(),
            description: "Join us for our wedding on June 18, 2025 in Curitiba, PR".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventConfig {
    /// Large headline, "Save the Date".
    pub headline: String,
    /// Names line under the headline.
    pub couple: String,
    pub date: String,
    pub place: String,
}

impl EventConfig {
    /// The `date | place` line shown under the names.
    pub fn details_line(&self) -> String {
        match (self.date.is_empty(), self.place.is_empty()) {
            (false, false) => format!("{} | {}", self.date, self.place),
            (false, true) => self.date.clone(),
            (true, false) => self.place.clone(),
            (true, true) => String::new(),
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            headline: "Save the Date".to_string(),
            couple: "Katherine & Charles".to_string(),
            date: "June 18, 2025".to_string(),
            place: "Curitiba, PR".to_string(),
        }
    }
}

/// A call-to-action link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub label: String,
    /// Usually an in-page anchor such as `#location`.
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Primary (filled) button.
    pub location: LinkConfig,
    /// Secondary (outlined) button.
    pub rsvp: LinkConfig,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            location: LinkConfig {
                label: "Localização".to_string(),
                href: "#location".to_string(),
            },
            rsvp: LinkConfig {
                label: "Confirmar presença".to_string(),
                href: "#cp".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Rotate slides automatically.
    pub autoplay: bool,
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,
    /// Cross-fade duration in milliseconds; controls are locked this long.
    pub transition_ms: u64,
    /// Whether a slide change restarts the auto-advance countdown.
    pub rearm: RearmPolicy,
}

impl CarouselConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            interval: Duration::from_millis(self.interval_ms),
            transition: Duration::from_millis(self.transition_ms),
            autoplay: self.autoplay,
            rearm: self.rearm,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: 5000,
            transition_ms: 500,
            rearm: RearmPolicy::Independent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Content panel background.
    pub background: String,
    pub headline: String,
    pub names: String,
    /// Date and place line.
    pub details: String,
    /// Filled button background, outlined button border/text, active dot.
    pub accent: String,
    pub accent_hover: String,
    /// Outlined button hover background.
    pub outline_hover: String,
    /// Translucent background of carousel controls and inactive dots.
    pub control: String,
    pub control_text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#f9f7f5".to_string(),
            headline: "#3c3c3c".to_string(),
            names: "#5a5a5a".to_string(),
            details: "#7a7a7a".to_string(),
            accent: "#d4c9b9".to_string(),
            accent_hover: "#c5b9a8".to_string(),
            outline_hover: "#f5f2ee".to_string(),
            control: "rgba(255, 255, 255, 0.7)".to_string(),
            control_text: "#3c3c3c".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of the
/// stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Save the Date Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of the content directory, next to the slide
# images. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document
# ---------------------------------------------------------------------------
[site]
# Value of <html lang>.
lang = "en"

# Browser tab title.
title = "Katherine & Charles - Save the Date"

# <meta name="description"> content.
description = "Join us for our wedding on June 18, 2025 in Curitiba, PR"

# ---------------------------------------------------------------------------
# Hero text
# ---------------------------------------------------------------------------
[event]
headline = "Save the Date"
couple = "Katherine & Charles"

# Shown as "date | place".
date = "June 18, 2025"
place = "Curitiba, PR"

# ---------------------------------------------------------------------------
# Call-to-action links
# ---------------------------------------------------------------------------
# Primary (filled) button.
[links.location]
label = "Localização"
href = "#location"

# Secondary (outlined) button.
[links.rsvp]
label = "Confirmar presença"
href = "#cp"

# ---------------------------------------------------------------------------
# Carousel
# ---------------------------------------------------------------------------
[carousel]
# Rotate slides automatically.
autoplay = true

# Milliseconds between automatic slide changes.
interval_ms = 5000

# Cross-fade duration in milliseconds. Controls ignore clicks this long
# after each slide change. Must be shorter than interval_ms.
transition_ms = 500

# "independent": the automatic rotation keeps its own rhythm.
# "on-change":   every slide change (including clicks) restarts the
#                countdown to the next automatic change.
rearm = "independent"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#f9f7f5"
headline = "#3c3c3c"
names = "#5a5a5a"
details = "#7a7a7a"         # Date and place line
accent = "#d4c9b9"          # Buttons and active indicator
accent_hover = "#c5b9a8"
outline_hover = "#f5f2ee"   # Outlined button hover background
control = "rgba(255, 255, 255, 0.7)"
control_text = "#3c3c3c"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-headline: {headline};
    --color-names: {names};
    --color-details: {details};
    --color-accent: {accent};
    --color-accent-hover: {accent_hover};
    --color-outline-hover: {outline_hover};
    --color-control: {control};
    --color-control-text: {control_text};
}}"#,
        background = colors.background,
        headline = colors.headline,
        names = colors.names,
        details = colors.details,
        accent = colors.accent,
        accent_hover = colors.accent_hover,
        outline_hover = colors.outline_hover,
        control = colors.control,
        control_text = colors.control_text,
    )
}
