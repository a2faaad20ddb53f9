//! Render cache for incremental builds.
//!
//! Rendering is cheap, but rewriting every file on every build touches
//! every mtime in `dist/`, which defeats rsync-style deploys and CDN
//! revalidation. This module lets the generate stage skip writing documents
//! whose bytes have not changed since the last build.
//!
//! # Design
//!
//! The cache is **content-addressed per output path**: each entry maps a
//! path relative to the output directory (`products/gantry-shear/index.html`)
//! to the SHA-256 of the bytes last written there. A page is skipped when:
//!
//! 1. An entry for its output path exists with the same hash
//! 2. The file is still on disk
//!
//! Paths present in the previous cache but not produced by the current build
//! belong to pages that were deleted or renamed; the generate stage removes
//! them (see [`RenderCache::stale_paths`]).
//!
//! ## Storage
//!
//! The cache is a JSON file at `<output_dir>/.render-cache.json`, so it
//! travels with the output directory when `dist/` is cached in CI.
//!
//! ## Bypassing the cache
//!
//! Pass `--no-cache` to `generate` or `build`. Every document is
//! rewritten, but the previous cache is still read so outputs of deleted
//! pages are pruned.
//!
//! ## Untrusted entries
//!
//! Entries are joined onto the output directory, so on load any key with a
//! component other than a plain name is dropped. A tampered cache cannot
//! name a file outside `dist/`.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Name of the cache file within the output directory.
const MANIFEST_FILENAME: &str = ".render-cache.json";

/// Bump to invalidate all existing caches when the format changes.
const MANIFEST_VERSION: u32 = 1;

/// On-disk map of output paths to content hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderCache {
    pub version: u32,
    pub entries: BTreeMap<String, String>,
}

impl RenderCache {
    /// Create an empty cache (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }

    /// Load from the output directory. Returns an empty cache if the
    /// file doesn't exist or can't be parsed (version mismatch, corruption).
    /// Entries whose path escapes the output directory are discarded.
    pub fn load(output_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(manifest_path(output_dir)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(mut cache) if cache.version == MANIFEST_VERSION => {
                cache.entries.retain(|path, _| is_contained(path));
                cache
            }
            _ => Self::empty(),
        }
    }

    /// Save to the output directory.
    pub fn save(&self, output_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(output_dir), json)
    }

    /// Whether `output_path` already holds content with `hash`.
    pub fn is_fresh(&self, output_path: &str, hash: &str, output_dir: &Path) -> bool {
        self.entries.get(output_path).is_some_and(|h| h == hash)
            && output_dir.join(output_path).is_file()
    }

    pub fn insert(&mut self, output_path: String, hash: String) {
        self.entries.insert(output_path, hash);
    }

    /// Cached paths not in `current`, in sorted order.
    pub fn stale_paths(&self, current: &HashSet<String>) -> Vec<String> {
        self.entries
            .keys()
            .filter(|path| !current.contains(*path))
            .cloned()
            .collect()
    }
}

/// Whether `rel` is a plain relative path made only of normal components.
fn is_contained(rel: &str) -> bool {
    let path = Path::new(rel);
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// SHA-256 of rendered bytes, as a hex string.
pub fn hash_content(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Summary of what a generate run did to the output directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub written: u32,
    pub unchanged: u32,
    pub removed: u32,
}

impl CacheStats {
    pub fn written(&mut self) {
        self.written += 1;
    }

    pub fn unchanged(&mut self) {
        self.unchanged += 1;
    }

    pub fn removed(&mut self) {
        self.removed += 1;
    }

    pub fn total(&self) -> u32 {
        self.written + self.unchanged
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unchanged > 0 {
            write!(
                f,
                "{} unchanged, {} written ({} total)",
                self.unchanged,
                self.written,
                self.total()
            )?;
        } else {
            write!(f, "{} written", self.written)?;
        }
        if self.removed > 0 {
            write!(f, ", {} removed", self.removed)?;
        }
        Ok(())
    }
}

/// Resolve the cache file path for an output directory.
pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(MANIFEST_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cache_with(path: &str, hash: &str) -> RenderCache {
        let mut cache = RenderCache::empty();
        cache.insert(path.into(), hash.into());
        cache
    }

    // =========================================================================
    // RenderCache basics
    // =========================================================================

    #[test]
    fn empty_cache_has_no_entries() {
        let cache = RenderCache::empty();
        assert_eq!(cache.version, MANIFEST_VERSION);
        assert!(cache.entries.is_empty());
    }

    #[test]
    fn fresh_when_hash_matches_and_file_exists() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("about")).unwrap();
        fs::write(tmp.path().join("about/index.html"), "x").unwrap();
        let cache = cache_with("about/index.html", "abc");
        assert!(cache.is_fresh("about/index.html", "abc", tmp.path()));
    }

    #[test]
    fn not_fresh_when_hash_differs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "x").unwrap();
        let cache = cache_with("index.html", "abc");
        assert!(!cache.is_fresh("index.html", "def", tmp.path()));
    }

    #[test]
    fn not_fresh_when_file_deleted() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_with("index.html", "abc");
        assert!(!cache.is_fresh("index.html", "abc", tmp.path()));
    }

    #[test]
    fn not_fresh_without_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "x").unwrap();
        assert!(!RenderCache::empty().is_fresh("index.html", "abc", tmp.path()));
    }

    #[test]
    fn stale_paths_lists_entries_not_generated() {
        let mut cache = RenderCache::empty();
        cache.insert("index.html".into(), "a".into());
        cache.insert("products/old-baler/index.html".into(), "b".into());
        cache.insert("about/index.html".into(), "c".into());
        let current: HashSet<String> = ["index.html", "about/index.html"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            cache.stale_paths(&current),
            vec!["products/old-baler/index.html".to_string()]
        );
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_with("blog/index.html", "123");
        cache.save(tmp.path()).unwrap();
        assert_eq!(RenderCache::load(tmp.path()), cache);
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(RenderCache::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn load_corrupt_json_returns_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(manifest_path(tmp.path()), "not json {{{").unwrap();
        assert!(RenderCache::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn load_wrong_version_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"version": {}, "entries": {{"index.html": "abc"}}}}"#,
            MANIFEST_VERSION + 99
        );
        fs::write(manifest_path(tmp.path()), json).unwrap();
        assert!(RenderCache::load(tmp.path()).entries.is_empty());
    }

    #[test]
    fn load_drops_entries_outside_output_dir() {
        let tmp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"version": {MANIFEST_VERSION}, "entries": {{
                "../victim.txt": "a",
                "/etc/hosts": "b",
                "blog/../../up.html": "c",
                "./index.html": "d",
                "": "e",
                "about/index.html": "f"
            }}}}"#
        );
        fs::write(manifest_path(tmp.path()), json).unwrap();
        let cache = RenderCache::load(tmp.path());
        let keys: Vec<&str> = cache.entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["about/index.html"]);
    }

    #[test]
    fn contained_paths() {
        assert!(is_contained("index.html"));
        assert!(is_contained("products/gantry-shear/index.html"));
        assert!(!is_contained("../victim.txt"));
        assert!(!is_contained("/tmp/victim.txt"));
        assert!(!is_contained("./index.html"));
        assert!(!is_contained(""));
    }

    // =========================================================================
    // Hashing
    // =========================================================================

    #[test]
    fn hash_content_is_sha256_hex() {
        assert_eq!(
            hash_content(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(hash_content(b"<p>a</p>"), hash_content(b"<p>a</p>"));
        assert_ne!(hash_content(b"<p>a</p>"), hash_content(b"<p>b</p>"));
    }

    // =========================================================================
    // CacheStats
    // =========================================================================

    #[test]
    fn cache_stats_display_with_unchanged() {
        let s = CacheStats {
            written: 2,
            unchanged: 5,
            removed: 0,
        };
        assert_eq!(s.to_string(), "5 unchanged, 2 written (7 total)");
    }

    #[test]
    fn cache_stats_display_first_build() {
        let mut s = CacheStats::default();
        s.written();
        s.written();
        s.written();
        assert_eq!(s.to_string(), "3 written");
    }

    #[test]
    fn cache_stats_display_with_removed() {
        let mut s = CacheStats::default();
        s.unchanged();
        s.written();
        s.removed();
        assert_eq!(s.to_string(), "1 unchanged, 1 written (2 total), 1 removed");
    }
}
