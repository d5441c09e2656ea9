//! HTML page generation.
//!
//! Stage 2 of the build. Takes the scan manifest and writes the final site:
//!
//! ```text
//! dist/
//! ├── index.html          # The announcement page
//! ├── slides/             # Slide images, copied unchanged
//! │   ├── 010-foto1.png
//! │   └── 020-foto2.png
//! └── assets/             # Copied from content/assets/ if present
//! ```
//!
//! ## Layouts
//!
//! The page carries both layouts and lets CSS pick one at the 768px
//! breakpoint:
//!
//! - **Desktop**: hero text on the left (3/5), full-height carousel on the
//!   right (2/5) with up/down arrows and a vertical column of dots.
//! - **Mobile**: 40vh carousel on top with left/right arrows and a row of
//!   dots, hero text below with the links stacked.
//!
//! Both carousels are driven by one script (`static/carousel.js`) so they
//! always show the same slide.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into the page:
//! - `static/style.css`: layout and component styles (colors injected from config)
//! - `static/carousel.js`: the in-browser carousel controller
//!
//! Initial classes come from [`describe`] applied to the mount state, so
//! the page renders correctly before the script runs.

use crate::carousel::{CarouselState, CarouselView, Slide, SlideError, Slides, Timing, describe};
use crate::config::{self, EventConfig, LinksConfig, SiteConfig, SiteMeta};
use crate::scan::Manifest;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Slide error: {0}")]
    Slides(#[from] SlideError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Output subdirectory for slide images.
pub const SLIDES_DIR: &str = "slides";

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/carousel.js");

/// Read the manifest at `manifest_path` and write the site to `output_dir`.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    write_site(&manifest, source_root, output_dir)
}

/// Write the site for an in-memory manifest.
pub fn write_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    let slides = carousel_slides(manifest)?;

    let slides_dir = output_dir.join(SLIDES_DIR);
    fs::create_dir_all(&slides_dir)?;
    for slide in &manifest.slides {
        fs::copy(
            source_root.join(&slide.filename),
            slides_dir.join(&slide.filename),
        )?;
    }
    info!(count = manifest.slides.len(), dir = %slides_dir.display(), "copied slides");

    if let Some(assets) = &manifest.assets {
        let copied = copy_dir_recursive(&source_root.join(assets), &output_dir.join(assets))?;
        info!(count = copied, "copied assets");
    }

    let page = render_page(&manifest.config, &slides);
    let index_path = output_dir.join("index.html");
    fs::write(&index_path, page.into_string())?;
    info!(path = %index_path.display(), "wrote page");

    Ok(())
}

/// Map manifest slides to the carousel's slide list, in display order.
///
/// The alt text is the title from the filename, or `Wedding image {n}`
/// (1-based position) for number-only filenames.
pub fn carousel_slides(manifest: &Manifest) -> Result<Slides, SlideError> {
    Slides::new(
        manifest
            .slides
            .iter()
            .enumerate()
            .map(|(idx, slide)| {
                let alt = match slide.title.as_deref() {
                    Some(title) if !title.trim().is_empty() => title.to_string(),
                    _ => format!("Wedding image {}", idx + 1),
                };
                Slide::new(format!("{SLIDES_DIR}/{}", slide.filename), alt)
            })
            .collect(),
    )
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// CSS custom properties derived from carousel timing.
fn generate_timing_css(timing: &Timing) -> String {
    format!(
        ":root {{\n    --transition-duration: {}ms;\n}}",
        timing.transition.as_millis()
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &SiteMeta, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (site.title) }
                meta name="description" content=(site.description);
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Chevron {
    Up,
    Down,
    Left,
    Right,
}

impl Chevron {
    fn path(self) -> &'static str {
        match self {
            Chevron::Up => "m18 15-6-6-6 6",
            Chevron::Down => "m6 9 6 6 6-6",
            Chevron::Left => "m15 18-6-6 6-6",
            Chevron::Right => "m9 18 6-6-6-6",
        }
    }
}

fn icon(chevron: Chevron) -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none"
            stroke="currentColor" stroke-width="2" stroke-linecap="round"
            stroke-linejoin="round" aria-hidden="true" {
            path d=(chevron.path()) {}
        }
    }
}

/// Headline, names, date line and the two call-to-action links.
fn hero(event: &EventConfig, links: &LinksConfig) -> Markup {
    html! {
        section.hero {
            div.hero-inner {
                h1.hero-headline { (event.headline) }
                h2.hero-names { (event.couple) }
                p.hero-details { (event.details_line()) }
                div.hero-links {
                    a.cta.cta-primary href=(links.location.href) { (links.location.label) }
                    a.cta.cta-secondary href=(links.rsvp.href) { (links.rsvp.label) }
                }
            }
        }
    }
}

/// Stacked slides; only the active one is opaque.
fn slide_stack(view: &CarouselView<'_>, sizes: &str) -> Markup {
    html! {
        @for slide in &view.slides {
            div class=(slide.class()) data-slide=(slide.index) {
                img src=(slide.src) alt=(slide.alt) sizes=(sizes)
                    loading=(if slide.priority { "eager" } else { "lazy" })
                    fetchpriority=[slide.priority.then_some("high")];
            }
        }
    }
}

/// One jump button per slide.
fn indicators(view: &CarouselView<'_>) -> Markup {
    html! {
        div.dots {
            @for dot in &view.indicators {
                button type="button" class=(dot.class()) data-goto=(dot.index)
                    aria-label=(dot.label)
                    aria-current=[dot.active.then_some("true")] {}
            }
        }
    }
}

fn arrow(action: &str, label: &str, chevron: Chevron, class: &str) -> Markup {
    html! {
        button type="button" class=(class) data-action=(action) aria-label=(label) {
            (icon(chevron))
        }
    }
}

fn desktop_layout(config: &SiteConfig, view: &CarouselView<'_>) -> Markup {
    html! {
        div.layout-desktop {
            (hero(&config.event, &config.links))
            div.carousel.carousel-vertical {
                (slide_stack(view, "50vw"))
                div.controls.controls-vertical {
                    (arrow("prev", "Previous image", Chevron::Up, "arrow arrow-prev"))
                    (indicators(view))
                    (arrow("next", "Next image", Chevron::Down, "arrow arrow-next"))
                }
            }
        }
    }
}

fn mobile_layout(config: &SiteConfig, view: &CarouselView<'_>) -> Markup {
    html! {
        div.layout-mobile {
            div.carousel.carousel-horizontal {
                (slide_stack(view, "100vw"))
                div.controls.controls-horizontal {
                    (indicators(view))
                }
                (arrow("prev", "Previous image", Chevron::Left, "arrow arrow-side arrow-left"))
                (arrow("next", "Next image", Chevron::Right, "arrow arrow-side arrow-right"))
            }
            (hero(&config.event, &config.links))
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the announcement page with the carousel in its mount state.
pub fn render_page(config: &SiteConfig, slides: &Slides) -> Markup {
    let timing = config.carousel.timing();
    let view = describe(slides, &CarouselState::default());

    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        generate_timing_css(&timing),
        CSS_STATIC
    );

    let content = html! {
        main.page data-carousel
            data-count=(slides.len())
            data-interval=(timing.interval.as_millis().to_string())
            data-transition=(timing.transition.as_millis().to_string())
            data-autoplay=(timing.autoplay.to_string())
            data-rearm=(timing.rearm.as_str()) {
            (desktop_layout(config, &view))
            (mobile_layout(config, &view))
        }
        script { (PreEscaped(JS)) }
    };

    base_document(&config.site, &css, content)
}

// ============================================================================
// Tests
// ============================================================================
