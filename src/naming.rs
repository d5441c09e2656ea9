//! Filename parsing for the `NNN-name` slide convention.
//!
//! Slide images are ordered by an optional numeric prefix:
//!
//! - `010-foto1.png` → number 10, title "foto1"
//! - `020-First-Dance.jpg` → number 20, title "First Dance"
//! - `030.jpg` / `030-.jpg` → number 30, no title
//! - `rings.jpg` → unnumbered, title "rings"
//!
//! Numbered slides come first in number order; unnumbered ones follow in
//! filename order.

/// Result of parsing a slide file stem like `020-First-Dance`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideName {
    /// Number prefix if present.
    pub number: Option<u32>,
    /// Display title: the name part with dashes turned into spaces.
    /// `None` when the stem is number-only.
    pub title: Option<String>,
}

/// Parse a file stem (extension already removed).
pub fn parse_slide_name(stem: &str) -> SlideName {
    let digits = stem.bytes().take_while(u8::is_ascii_digit).count();
    let rest = &stem[digits..];

    let number = if digits > 0 && (rest.is_empty() || rest.starts_with('-')) {
        stem[..digits].parse::<u32>().ok()
    } else {
        None
    };

    let raw = match number {
        Some(_) => rest.strip_prefix('-').unwrap_or(rest),
        None => stem,
    };
    let title = (!raw.is_empty()).then(|| raw.replace('-', " "));

    SlideName { number, title }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_with_title() {
        let p = parse_slide_name("010-foto1");
        assert_eq!(p.number, Some(10));
        assert_eq!(p.title.as_deref(), Some("foto1"));
    }

    #[test]
    fn dashes_become_spaces() {
        let p = parse_slide_name("020-First-Dance");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.title.as_deref(), Some("First Dance"));
    }

    #[test]
    fn number_only() {
        assert_eq!(
            parse_slide_name("030"),
            SlideName {
                number: Some(30),
                title: None
            }
        );
    }

    #[test]
    fn number_with_trailing_dash() {
        let p = parse_slide_name("030-");
        assert_eq!(p.number, Some(30));
        assert_eq!(p.title, None);
    }

    #[test]
    fn unnumbered() {
        let p = parse_slide_name("rings");
        assert_eq!(p.number, None);
        assert_eq!(p.title.as_deref(), Some("rings"));
    }

    #[test]
    fn digits_without_dash_are_part_of_name() {
        // "foto1" style names must not be mistaken for a prefix
        let p = parse_slide_name("2025beach");
        assert_eq!(p.number, None);
        assert_eq!(p.title.as_deref(), Some("2025beach"));
    }

    #[test]
    fn zero_prefix() {
        let p = parse_slide_name("000-First");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.title.as_deref(), Some("First"));
    }
}
