//! Shared test utilities for the shearline test suite.
//!
//! Lookup helpers that panic with a readable message on a miss, so a test
//! failure says which page was missing instead of `called Option::unwrap()`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let page = find_page(&manifest, "/products/alligator-shear");
//! assert_eq!(page.page.hero.title, "Alligator Shears");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::{Listing, Manifest, PageEntry};
use crate::types::Collection;

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

// =========================================================================
// Manifest lookups
// =========================================================================

/// Find a page by route. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, route: &str) -> &'a PageEntry {
    manifest.find_page(route).unwrap_or_else(|| {
        let routes: Vec<&str> = manifest.pages.iter().map(|p| p.route.as_str()).collect();
        panic!("page '{route}' not found. Available: {routes:?}")
    })
}

/// Find the listing for a collection. Panics if the collection has none.
pub fn find_listing(manifest: &Manifest, collection: Collection) -> &Listing {
    manifest
        .listings
        .iter()
        .find(|l| l.collection == collection)
        .unwrap_or_else(|| panic!("no listing for {collection:?}"))
}

/// Routes of a listing's entries, in listing order.
pub fn listing_routes(manifest: &Manifest, collection: Collection) -> Vec<&str> {
    find_listing(manifest, collection)
        .entries
        .iter()
        .map(|e| e.route.as_str())
        .collect()
}

// =========================================================================
// Markup helpers
// =========================================================================

/// Non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
