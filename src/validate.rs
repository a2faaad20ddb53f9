//! Build-time content checks.
//!
//! Runs between scan and generate. Every rule is checked for every page and
//! all issues are collected before failing, so one `shearline check` run
//! reports everything that needs fixing.
//!
//! ## Rules
//!
//! | Rule | Applies to |
//! |------|------------|
//! | Internal hrefs resolve to a route or an asset file | page links, blog body links, navigation |
//! | `#fragment` names a section present on the target page | same |
//! | CTA `source` tags are unique within a page | hero, feature, application and closing CTAs |
//! | Title and description are non-empty and within `[seo]` limits | pages and listings |
//! | At least one keyword | pages |
//! | Spec rows supply exactly the declared columns | spec tables |
//! | Referenced images under `/assets/` exist | og image, hero image, slides |
//! | Blog dates are `YYYY-MM-DD` | articles |
//!
//! External links (`https://…`, `mailto:`, `tel:`) are not checked.

use crate::scan::Manifest;
use crate::types::NavItem;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// A single problem found in the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Route of the page the problem is on, or `config.toml`.
    pub location: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("link to `{0}` does not match any page or asset")]
    BrokenLink(String),
    #[error("link to `{href}` targets section `#{anchor}`, which that page does not have")]
    MissingAnchor { href: String, anchor: String },
    #[error("CTA source `{0}` is used more than once")]
    DuplicateCtaSource(String),
    #[error("title is empty")]
    EmptyTitle,
    #[error("description is empty")]
    EmptyDescription,
    #[error("title is {len} characters (max {max})")]
    TitleTooLong { len: usize, max: usize },
    #[error("description is {len} characters (max {max})")]
    DescriptionTooLong { len: usize, max: usize },
    #[error("no keywords")]
    NoKeywords,
    #[error("spec row `{model}` is missing columns {missing:?} and has undeclared columns {extra:?}")]
    SpecColumnMismatch {
        model: String,
        missing: Vec<String>,
        extra: Vec<String>,
    },
    #[error("image `{0}` not found in the assets directory")]
    MissingAsset(String),
    #[error("article date `{0}` is not YYYY-MM-DD")]
    InvalidDate(String),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

#[derive(Debug, Error)]
#[error("{} content problem(s) found", issues.len())]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

/// Where an href points, after stripping query and fragment.
#[derive(Debug, PartialEq, Eq)]
enum LinkTarget<'a> {
    /// Not checked: other scheme, protocol-relative or empty.
    External,
    /// `#anchor` on the current page; a bare `#` carries no anchor.
    SamePage { anchor: Option<&'a str> },
    Internal {
        path: String,
        anchor: Option<&'a str>,
    },
}

fn classify(href: &str) -> LinkTarget<'_> {
    if let Some(anchor) = href.strip_prefix('#') {
        return LinkTarget::SamePage {
            anchor: Some(anchor).filter(|a| !a.is_empty()),
        };
    }
    if !href.starts_with('/') || href.starts_with("//") {
        return LinkTarget::External;
    }
    let (rest, anchor) = match href.split_once('#') {
        Some((rest, anchor)) => (rest, Some(anchor)),
        None => (href, None),
    };
    let path = rest.split('?').next().unwrap_or(rest);
    LinkTarget::Internal {
        path: normalize_route(path),
        anchor: anchor.filter(|a| !a.is_empty()),
    }
}

/// `/products/` → `/products`; `/` stays `/`.
pub fn normalize_route(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

struct Checker<'a> {
    manifest: &'a Manifest,
    routes: BTreeSet<&'a str>,
    anchors: HashMap<&'a str, Vec<&'static str>>,
    assets_root: std::path::PathBuf,
    assets_prefix: String,
    issues: Vec<Issue>,
}

impl<'a> Checker<'a> {
    fn new(manifest: &'a Manifest, source_root: &Path) -> Self {
        let anchors = manifest
            .pages
            .iter()
            .map(|p| (p.route.as_str(), p.page.anchor_ids()))
            .collect();
        Self {
            manifest,
            routes: manifest.routes(),
            anchors,
            assets_root: source_root.join(&manifest.config.assets_dir),
            assets_prefix: format!("/{}/", manifest.config.assets_dir),
            issues: Vec::new(),
        }
    }

    fn push(&mut self, location: &str, kind: IssueKind) {
        self.issues.push(Issue {
            location: location.to_string(),
            kind,
        });
    }

    fn asset_exists(&self, path: &str) -> bool {
        path.strip_prefix(&self.assets_prefix)
            .is_some_and(|rel| !rel.contains("..") && self.assets_root.join(rel).is_file())
    }

    /// `current` is the route the link sits on; `None` for navigation,
    /// where same-page anchors make no sense.
    fn check_link(&mut self, location: &str, current: Option<&str>, href: &str) {
        match classify(href) {
            LinkTarget::External => {}
            LinkTarget::SamePage { anchor } => match (current, anchor) {
                (Some(route), Some(anchor)) => self.check_anchor(location, route, href, anchor),
                (Some(_), None) => {}
                (None, _) => self.push(location, IssueKind::BrokenLink(href.to_string())),
            },
            LinkTarget::Internal { path, anchor } => {
                if self.routes.contains(path.as_str()) {
                    if let Some(anchor) = anchor {
                        self.check_anchor(location, &path, href, anchor);
                    }
                } else if !self.asset_exists(&path) {
                    self.push(location, IssueKind::BrokenLink(href.to_string()));
                }
            }
        }
    }

    fn check_anchor(&mut self, location: &str, route: &str, href: &str, anchor: &str) {
        // Listing pages have a single section and no anchors to target.
        let known = self
            .anchors
            .get(route)
            .is_some_and(|ids| ids.iter().any(|id| *id == anchor));
        if !known {
            self.push(
                location,
                IssueKind::MissingAnchor {
                    href: href.to_string(),
                    anchor: anchor.to_string(),
                },
            );
        }
    }

    fn check_meta(&mut self, location: &str, title: &str, description: &str) {
        let seo = &self.manifest.config.seo;
        let title_len = title.trim().chars().count();
        let desc_len = description.trim().chars().count();
        if title_len == 0 {
            self.push(location, IssueKind::EmptyTitle);
        } else if title_len > seo.max_title_len {
            self.push(
                location,
                IssueKind::TitleTooLong {
                    len: title_len,
                    max: seo.max_title_len,
                },
            );
        }
        if desc_len == 0 {
            self.push(location, IssueKind::EmptyDescription);
        } else if desc_len > seo.max_description_len {
            self.push(
                location,
                IssueKind::DescriptionTooLong {
                    len: desc_len,
                    max: seo.max_description_len,
                },
            );
        }
    }

    fn check_navigation(&mut self, items: &'a [NavItem]) {
        for item in items {
            self.check_link("config.toml", None, &item.path);
            self.check_navigation(&item.children);
        }
    }

    fn run(mut self) -> Vec<Issue> {
        let manifest = self.manifest;
        self.check_navigation(&manifest.config.navigation);

        for entry in &manifest.pages {
            let route = entry.route.as_str();
            let page = &entry.page;

            self.check_meta(route, &page.meta.title, &page.meta.description);
            if page.meta.keywords.iter().all(|k| k.trim().is_empty()) {
                self.push(route, IssueKind::NoKeywords);
            }

            let mut seen = HashSet::new();
            for source in page.cta_sources() {
                if !seen.insert(source) {
                    self.push(route, IssueKind::DuplicateCtaSource(source.to_string()));
                }
            }

            for href in page.links() {
                self.check_link(route, Some(route), &href);
            }

            for image in page.asset_refs() {
                if image.starts_with(&self.assets_prefix) && !self.asset_exists(&image) {
                    self.push(route, IssueKind::MissingAsset(image));
                }
            }

            if let Some(specs) = &page.specs {
                for row in &specs.rows {
                    let (missing, extra) = specs.column_mismatch(row);
                    if !missing.is_empty() || !extra.is_empty() {
                        self.push(
                            route,
                            IssueKind::SpecColumnMismatch {
                                model: row.model.clone(),
                                missing,
                                extra,
                            },
                        );
                    }
                }
            }

            if let Some(article) = &page.article
                && !is_iso_date(&article.date)
            {
                self.push(route, IssueKind::InvalidDate(article.date.clone()));
            }
        }

        for listing in &manifest.listings {
            let copy = manifest.config.listings.for_collection(listing.collection);
            self.check_meta(&listing.route, &copy.title, &copy.description);
        }

        let default_image = &manifest.config.site.default_og_image;
        if default_image.starts_with(&self.assets_prefix) && !self.asset_exists(default_image) {
            self.push(
                "config.toml",
                IssueKind::MissingAsset(default_image.clone()),
            );
        }

        self.issues
    }
}

/// `YYYY-MM-DD` with a plausible month and day.
fn is_iso_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return false;
    };
    let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(all_digits(year, 4) && all_digits(month, 2) && all_digits(day, 2)) {
        return false;
    }
    let month: u32 = month.parse().unwrap_or(0);
    let day: u32 = day.parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Check every page in the manifest. `source_root` is the content directory
/// (asset links are resolved against its assets directory).
pub fn validate(manifest: &Manifest, source_root: &Path) -> Result<(), ValidationError> {
    let issues = Checker::new(manifest, source_root).run();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}
