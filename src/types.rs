//! Shared types used across the scan, validate and generate stages.
//!
//! These are serialized into `manifest.json` between stages and must stay
//! identical on both sides of the file.

use serde::{Deserialize, Serialize};

/// Navigation tree item, declared in `config.toml` under `[[navigation]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// A directory of numbered page files that share a route prefix and get a
/// generated listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Products,
    Applications,
    Blog,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Products,
        Collection::Applications,
        Collection::Blog,
    ];

    /// Directory name under the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Applications => "applications",
            Collection::Blog => "blog",
        }
    }

    /// File extension of entries in this collection.
    pub fn extension(self) -> &'static str {
        match self {
            Collection::Blog => "md",
            _ => "toml",
        }
    }

    /// Route of the listing page, also the prefix of every entry route.
    pub fn route(self) -> String {
        format!("/{}", self.dir_name())
    }

    pub fn entry_route(self, slug: &str) -> String {
        format!("/{}/{}", self.dir_name(), slug)
    }
}

/// What kind of page a dataset renders as. Decides the route and
/// `og:type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    About,
    Product,
    Application,
    Blog,
}

impl PageKind {
    pub fn for_collection(collection: Collection) -> Self {
        match collection {
            Collection::Products => PageKind::Product,
            Collection::Applications => PageKind::Application,
            Collection::Blog => PageKind::Blog,
        }
    }

    pub fn og_type(self) -> &'static str {
        match self {
            PageKind::Blog => "article",
            PageKind::Product => "product",
            _ => "website",
        }
    }
}
