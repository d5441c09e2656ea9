//! Shared test utilities.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! assert_eq!(slide_filenames(&manifest), vec!["010-foto1.png", "020-foto2.png"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a placeholder slide file. Scanning only looks at the extension.
pub fn write_slide(dir: &Path, filename: &str) {
    std::fs::write(dir.join(filename), "fake image").unwrap();
}

// =========================================================================
// Manifest lookups
// =========================================================================

/// Slide filenames in display order.
pub fn slide_filenames(manifest: &Manifest) -> Vec<&str> {
    manifest
        .slides
        .iter()
        .map(|s| s.filename.as_str())
        .collect()
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
