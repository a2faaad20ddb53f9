//! HTML site generation.
//!
//! Final stage of the build pipeline. Takes the scan manifest (already
//! validated) and writes the static site.
//!
//! ## Generated Files
//!
//! - **Content pages** (`/{route}/index.html`): one per scanned page
//! - **Listing pages** (`/products/index.html`, …): one per non-empty collection
//! - **`sitemap.xml`**: every listed URL, absolute against `site.base_url`
//! - **`robots.txt`**: allows everything and points at the sitemap
//! - **Assets**: the content `assets/` directory, copied verbatim
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                      # /
//! ├── about/index.html                # /about
//! ├── products/
//! │   ├── index.html                  # /products listing
//! │   └── gantry-shear/index.html     # /products/gantry-shear
//! ├── blog/…
//! ├── assets/…
//! ├── sitemap.xml
//! ├── robots.txt
//! └── .render-cache.json
//! ```
//!
//! ## Parallel Rendering
//!
//! Pages are rendered and written in parallel using
//! [rayon](https://docs.rs/rayon). Each document is hashed and compared with
//! the [render cache](crate::cache); unchanged files are left untouched.
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time and inlined into each document:
//! - `static/style.css`: base styles (theme variables injected from config)
//! - `static/quote.js`: quote dialog wiring
//! - `static/carousel.js`: carousel paging (carousel pages only)

use crate::cache::{CacheStats, RenderCache, hash_content};
use crate::config::generate_theme_css;
use crate::render::{RenderContext, render_listing, render_page};
use crate::scan::Manifest;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to copy assets: {0}")]
    Assets(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    Unchanged,
}

/// One file produced by a generate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Route the file serves; `None` for `sitemap.xml` and `robots.txt`.
    pub route: Option<String>,
    /// Path relative to the output directory.
    pub output_path: String,
    pub status: WriteStatus,
}

#[derive(Debug)]
pub struct GenerateResult {
    /// Pages in manifest order, then listings, then sitemap and robots.
    pub files: Vec<GeneratedFile>,
    pub assets_copied: usize,
    /// Output paths of pages from the previous build that no longer exist.
    pub removed: Vec<String>,
    pub cache_stats: CacheStats,
}

/// Output path (relative to the output directory) for a route.
///
/// `/` → `index.html`, `/products/gantry-shear` → `products/gantry-shear/index.html`.
pub fn output_path_for(route: &str) -> String {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else {
        format!("{trimmed}/index.html")
    }
}

struct Document {
    route: Option<String>,
    output_path: String,
    contents: String,
}

pub fn generate(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<GenerateResult, GenerateError> {
    let config = &manifest.config;
    let css = format!("{}\n\n{}", generate_theme_css(&config.theme), CSS_STATIC);
    let ctx = RenderContext::new(config, &css);

    fs::create_dir_all(output_dir)?;
    let assets_copied = copy_assets(
        &source_root.join(&config.assets_dir),
        &output_dir.join(&config.assets_dir),
    )?;

    let mut documents: Vec<Document> = manifest
        .pages
        .par_iter()
        .map(|entry| Document {
            route: Some(entry.route.clone()),
            output_path: output_path_for(&entry.route),
            contents: render_page(entry, &ctx).into_string(),
        })
        .collect();
    documents.par_extend(manifest.listings.par_iter().map(|listing| Document {
        route: Some(listing.route.clone()),
        output_path: output_path_for(&listing.route),
        contents: render_listing(listing, &ctx).into_string(),
    }));
    documents.push(Document {
        route: None,
        output_path: "sitemap.xml".to_string(),
        contents: render_sitemap(manifest),
    });
    documents.push(Document {
        route: None,
        output_path: "robots.txt".to_string(),
        contents: render_robots(&config.site.base_url),
    });

    // Read even with `use_cache` off: stale detection needs the previous outputs.
    let cache = RenderCache::load(output_dir);

    let written: Vec<(GeneratedFile, String)> = documents
        .par_iter()
        .map(|doc| -> io::Result<(GeneratedFile, String)> {
            let hash = hash_content(doc.contents.as_bytes());
            let status = if use_cache && cache.is_fresh(&doc.output_path, &hash, output_dir) {
                WriteStatus::Unchanged
            } else {
                let path = output_dir.join(&doc.output_path);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, &doc.contents)?;
                WriteStatus::Written
            };
            let file = GeneratedFile {
                route: doc.route.clone(),
                output_path: doc.output_path.clone(),
                status,
            };
            Ok((file, hash))
        })
        .collect::<io::Result<_>>()?;

    let mut stats = CacheStats::default();
    let mut next_cache = RenderCache::empty();
    let mut files = Vec::with_capacity(written.len());
    for (file, hash) in written {
        match file.status {
            WriteStatus::Written => stats.written(),
            WriteStatus::Unchanged => stats.unchanged(),
        }
        next_cache.insert(file.output_path.clone(), hash);
        files.push(file);
    }

    let current: HashSet<String> = files.iter().map(|f| f.output_path.clone()).collect();
    let mut removed = Vec::new();
    for stale in cache.stale_paths(&current) {
        remove_output(output_dir, &stale)?;
        stats.removed();
        removed.push(stale);
    }

    next_cache.save(output_dir)?;

    Ok(GenerateResult {
        files,
        assets_copied,
        removed,
        cache_stats: stats,
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
/// A missing assets directory copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Delete a stale output file and any directories it leaves empty.
fn remove_output(output_dir: &Path, rel: &str) -> io::Result<()> {
    let path = output_dir.join(rel);
    match fs::remove_file(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    }
    let mut dir = path.parent();
    while let Some(d) = dir {
        if d == output_dir || fs::remove_dir(d).is_err() {
            break;
        }
        dir = d.parent();
    }
    Ok(())
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `sitemap.xml` listing every page except hidden collection entries,
/// sorted by route. Blog posts carry their article date as `lastmod`.
pub fn render_sitemap(manifest: &Manifest) -> String {
    let mut urls: BTreeMap<&str, Option<&str>> = BTreeMap::new();
    for entry in &manifest.pages {
        if entry.collection.is_some() && !entry.listed {
            continue;
        }
        let lastmod = entry.page.article.as_ref().map(|a| a.date.as_str());
        urls.insert(&entry.route, lastmod);
    }
    for listing in &manifest.listings {
        urls.insert(&listing.route, None);
    }

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for (route, lastmod) in urls {
        let loc = xml_escape(&manifest.config.absolute_url(route));
        match lastmod {
            Some(date) => xml.push_str(&format!(
                "  <url><loc>{loc}</loc><lastmod>{}</lastmod></url>\n",
                xml_escape(date)
            )),
            None => xml.push_str(&format!("  <url><loc>{loc}</loc></url>\n")),
        }
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {base_url}/sitemap.xml\n")
}

// ============================================================================
// Tests
// ============================================================================
