//! Content directory scanning and manifest generation.
//!
//! Stage 1 of the build. Reads the content directory, deserializes every
//! page dataset and produces a [`Manifest`] the later stages consume.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                       # Site configuration (optional)
//! ├── index.toml                        # Home page  → /
//! ├── about.toml                        # About page → /about
//! ├── assets/                           # Copied to the output root
//! ├── products/
//! │   ├── 010-alligator-shear.toml      # → /products/alligator-shear
//! │   ├── 020-gantry-shear.toml
//! │   └── shear-prototype.toml          # Unnumbered: generated, not listed
//! ├── applications/
//! │   └── 010-scrap-yards.toml          # → /applications/scrap-yards
//! └── blog/
//!     └── 010-choosing-a-scrap-shear.md # → /blog/choosing-a-scrap-shear
//! ```
//!
//! ## Blog Articles
//!
//! Blog entries are markdown with TOML front matter between `+++` lines.
//! The front matter is a regular page dataset and must include an
//! `[article]` table; the markdown after it becomes the article body.
//!
//! ```text
//! +++
//! [meta]
//! title = "Choosing a Scrap Shear"
//! description = "..."
//!
//! [hero]
//! title = "Choosing a Scrap Shear"
//!
//! [article]
//! date = "2026-03-04"
//! author = "Dana Whitfield"
//! +++
//!
//! Markdown body...
//! ```
//!
//! ## Validation
//!
//! The scanner only rejects what prevents building a manifest: unreadable
//! files, malformed datasets, blog files without front matter or
//! `[article]`, unusable slugs, and a slug used twice within a collection.
//! Cross-page rules (links, CTA sources, metadata) live in
//! [`validate`](crate::validate).

use crate::config::{self, SiteConfig};
use crate::content::ContentPage;
use crate::naming::{is_valid_slug, parse_entry_name};
use crate::types::{Collection, PageKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid page data in {path}: {source}")]
    Page {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Blog article has no +++ front matter: {0}")]
    MissingFrontMatter(PathBuf),
    #[error("Blog article has no [article] table: {0}")]
    MissingArticle(PathBuf),
    #[error("Unusable slug `{slug}` from {path} (use lowercase letters, digits and dashes)")]
    InvalidSlug { slug: String, path: PathBuf },
    #[error("Slug `{slug}` used twice in {collection}/")]
    DuplicateSlug { slug: String, collection: String },
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub pages: Vec<PageEntry>,
    pub listings: Vec<Listing>,
    pub config: SiteConfig,
}

/// One routed page and where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    pub route: String,
    pub kind: PageKind,
    /// Source file, relative to the content root.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    /// Whether the entry appears on its collection's listing page.
    pub listed: bool,
    pub sort_key: u32,
    pub page: ContentPage,
}

/// A generated collection index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub collection: Collection,
    pub route: String,
    pub entries: Vec<ListingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingEntry {
    pub route: String,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Blog date, shown on blog listing cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Manifest {
    /// Every route the site will serve, pages and listings.
    pub fn routes(&self) -> BTreeSet<&str> {
        self.pages
            .iter()
            .map(|p| p.route.as_str())
            .chain(self.listings.iter().map(|l| l.route.as_str()))
            .collect()
    }

    pub fn find_page(&self, route: &str) -> Option<&PageEntry> {
        self.pages.iter().find(|p| p.route == route)
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let mut pages = Vec::new();

    for (file, route, kind) in [
        ("index.toml", "/", PageKind::Home),
        ("about.toml", "/about", PageKind::About),
    ] {
        let path = root.join(file);
        if path.is_file() {
            pages.push(PageEntry {
                route: route.to_string(),
                kind,
                source: file.to_string(),
                collection: None,
                listed: false,
                sort_key: 0,
                page: parse_toml_page(&path)?,
            });
        }
    }

    let mut listings = Vec::new();
    for collection in Collection::ALL {
        let entries = scan_collection(root, collection)?;
        let listing_entries: Vec<ListingEntry> = entries
            .iter()
            .filter(|e| e.listed)
            .map(listing_entry)
            .collect();
        if !listing_entries.is_empty() {
            listings.push(Listing {
                collection,
                route: collection.route(),
                entries: listing_entries,
            });
        }
        pages.extend(entries);
    }

    Ok(Manifest {
        pages,
        listings,
        config,
    })
}

fn listing_entry(entry: &PageEntry) -> ListingEntry {
    ListingEntry {
        route: entry.route.clone(),
        title: entry.page.hero.title.clone(),
        summary: entry.page.meta.description.clone(),
        image: entry.page.hero.image.clone(),
        date: entry.page.article.as_ref().map(|a| a.date.clone()),
    }
}

/// Read every entry of one collection directory, sorted by number prefix
/// then slug. Unnumbered entries sort last and are not listed.
fn scan_collection(root: &Path, collection: Collection) -> Result<Vec<PageEntry>, ScanError> {
    let dir = root.join(collection.dir_name());
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case(collection.extension()))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for path in files {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed = parse_entry_name(&stem);
        if !is_valid_slug(&parsed.slug) {
            return Err(ScanError::InvalidSlug {
                slug: parsed.slug,
                path,
            });
        }
        if !seen.insert(parsed.slug.clone()) {
            return Err(ScanError::DuplicateSlug {
                slug: parsed.slug,
                collection: collection.dir_name().to_string(),
            });
        }

        let page = match collection {
            Collection::Blog => parse_blog_page(&path)?,
            _ => parse_toml_page(&path)?,
        };
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_default();

        entries.push(PageEntry {
            route: collection.entry_route(&parsed.slug),
            kind: PageKind::for_collection(collection),
            source: format!("{}/{}", collection.dir_name(), file_name),
            collection: Some(collection),
            listed: parsed.number.is_some(),
            sort_key: parsed.number.unwrap_or(u32::MAX),
            page,
        });
    }

    entries.sort_by(|a, b| (a.sort_key, &a.route).cmp(&(b.sort_key, &b.route)));
    Ok(entries)
}

fn parse_toml_page(path: &Path) -> Result<ContentPage, ScanError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| ScanError::Page {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_blog_page(path: &Path) -> Result<ContentPage, ScanError> {
    let content = fs::read_to_string(path)?;
    let (front, body) = split_front_matter(&content)
        .ok_or_else(|| ScanError::MissingFrontMatter(path.to_path_buf()))?;
    let mut page: ContentPage = toml::from_str(front).map_err(|source| ScanError::Page {
        path: path.to_path_buf(),
        source,
    })?;
    let article = page
        .article
        .as_mut()
        .ok_or_else(|| ScanError::MissingArticle(path.to_path_buf()))?;
    article.body = body.trim().to_string();
    Ok(page)
}

/// Split `+++`-delimited front matter from the body that follows it.
///
/// The opening delimiter must be the first line; the closing one is the
/// next line consisting solely of `+++`.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content
        .strip_prefix("+++\r\n")
        .or_else(|| content.strip_prefix("+++\n"))?;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "+++" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
