//! Site configuration module.
//!
//! Handles loading, validating and merging `content/config.toml`. The file is
//! sparse: stock defaults are serialized to a TOML table, the user's file is
//! merged on top key by key, and the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! assets_dir = "assets"           # Copied verbatim to the output root
//!
//! [site]
//! name = "Northline Machinery"
//! tagline = "Recycling equipment built to last"
//! base_url = "https://www.example.com"   # No trailing slash
//! default_og_image = "/assets/og-default.svg"
//! language = "en"
//!
//! [contact]
//! phone = "+1 555 0100"
//! email = "sales@example.com"
//! address = "1200 Foundry Road, Hamilton, OH"
//! hours = "Mon-Fri 8:00-17:00"
//!
//! [[navigation]]
//! title = "Products"
//! path = "/products"
//!
//! [seo]
//! max_title_len = 70
//! max_description_len = 160
//!
//! [quote]
//! endpoint = "/api/quote"
//!
//! [listings.products]
//! title = "Products"
//!
//! [theme.colors]
//! primary = "#c2410c"
//!
//! [processing]
//! max_processes = 4               # Omit for auto (= CPU cores)
//! ```
//!
//! Arrays (such as `navigation`) replace the default wholesale; tables merge.
//! Unknown keys are rejected to catch typos early.

use crate::types::NavItem;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
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
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory under the content root copied to the output root.
    pub assets_dir: String,
    pub site: SiteInfo,
    pub contact: ContactInfo,
    /// Header navigation tree.
    pub navigation: Vec<NavItem>,
    pub theme: ThemeConfig,
    pub seo: SeoConfig,
    pub quote: QuoteConfig,
    pub listings: ListingsConfig,
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            site: SiteInfo::default(),
            contact: ContactInfo::default(),
            navigation: default_navigation(),
            theme: ThemeConfig::default(),
            seo: SeoConfig::default(),
            quote: QuoteConfig::default(),
            listings: ListingsConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

fn default_navigation() -> Vec<NavItem> {
    [
        ("Products", "/products"),
        ("Applications", "/applications"),
        ("Blog", "/blog"),
        ("About", "/about"),
    ]
    .into_iter()
    .map(|(title, path)| NavItem {
        title: title.to_string(),
        path: path.to_string(),
        children: vec![],
    })
    .collect()
}

/// Exactly one normal path component, with no separators.
fn is_single_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains(['/', '\\'])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.site.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if base.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with '/'".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        if self.seo.max_title_len == 0 || self.seo.max_description_len == 0 {
            return Err(ConfigError::Validation(
                "seo length limits must be non-zero".into(),
            ));
        }
        if self.quote.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "quote.endpoint must not be empty".into(),
            ));
        }
        if !is_single_dir_name(&self.assets_dir) {
            return Err(ConfigError::Validation(
                "assets_dir must be a plain directory name".into(),
            ));
        }
        Ok(())
    }

    /// Absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.site.base_url, path)
        } else {
            format!("{}/{}", self.site.base_url, path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    /// Origin used for canonical links, Open Graph URLs and the sitemap.
    pub base_url: String,
    pub default_og_image: String,
    pub language: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Shearline".to_string(),
            tagline: "Industrial equipment".to_string(),
            base_url: "https://www.example.com".to_string(),
            default_og_image: "/assets/og-default.svg".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Contact details shown in the footer. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub hours: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeoConfig {
    /// Longest `<title>` accepted, in characters.
    pub max_title_len: usize,
    /// Longest meta description accepted, in characters.
    pub max_description_len: usize,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            max_title_len: 70,
            max_description_len: 160,
        }
    }
}

/// Lead-capture form settings for the quote dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuoteConfig {
    /// Form `action`. The form posts `name`, `email`, `phone`, `message`
    /// and the hidden `source` / `kind` / `page` fields.
    pub endpoint: String,
    pub dialog_title: String,
    pub submit_label: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/quote".to_string(),
            dialog_title: "Request a Quote".to_string(),
            submit_label: "Send Request".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    pub title: String,
    pub description: String,
    pub heading: String,
    #[serde(default)]
    pub intro: String,
}

/// Titles and copy for the generated collection listing pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingsConfig {
    pub products: ListingConfig,
    pub applications: ListingConfig,
    pub blog: ListingConfig,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            products: ListingConfig {
                title: "Products".to_string(),
                description: "Our full range of industrial equipment.".to_string(),
                heading: "Products".to_string(),
                intro: String::new(),
            },
            applications: ListingConfig {
                title: "Applications".to_string(),
                description: "Industries and processes our equipment serves.".to_string(),
                heading: "Applications".to_string(),
                intro: String::new(),
            },
            blog: ListingConfig {
                title: "Blog".to_string(),
                description: "Guides, case notes and news.".to_string(),
                heading: "Blog".to_string(),
                intro: String::new(),
            },
        }
    }
}

impl ListingsConfig {
    pub fn for_collection(&self, collection: crate::types::Collection) -> &ListingConfig {
        use crate::types::Collection;
        match collection {
            Collection::Products => &self.products,
            Collection::Applications => &self.applications,
            Collection::Blog => &self.blog,
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of render workers. When absent, defaults to the
    /// number of CPU cores. Larger values are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// A responsive CSS size expressed as `clamp(min, size, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampSize {
    /// Preferred/fluid value, typically viewport-relative (e.g. `"6vw"`).
    pub size: String,
    pub min: String,
    pub max: String,
}

impl ClampSize {
    fn new(min: &str, size: &str, max: &str) -> Self {
        Self {
            size: size.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Render as a CSS `clamp()` expression.
    pub fn to_css(&self) -> String {
        format!("clamp({}, {}, {})", self.min, self.size, self.max)
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Max width of the centered content column (CSS value).
    pub container_width: String,
    /// Vertical section padding for `size = "compact"`.
    pub section_compact: ClampSize,
    /// Vertical section padding for the default size.
    pub section_default: ClampSize,
    /// Vertical section padding for `size = "spacious"`.
    pub section_spacious: ClampSize,
    /// Gap between cards in grids (CSS value).
    pub card_gap: String,
    pub colors: ColorScheme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            container_width: "72rem".to_string(),
            section_compact: ClampSize::new("2rem", "4vw", "3rem"),
            section_default: ClampSize::new("3rem", "7vw", "6rem"),
            section_spacious: ClampSize::new("4rem", "10vw", "9rem"),
            card_gap: "1.5rem".to_string(),
            colors: ColorScheme::default(),
        }
    }
}

/// Brand palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Light section background.
    pub surface: String,
    /// Dark section background (hero, closing CTA).
    pub surface_dark: String,
    pub text: String,
    pub text_muted: String,
    /// Text on dark and brand sections.
    pub text_inverse: String,
    pub border: String,
    pub primary: String,
    pub primary_hover: String,
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f4f5f7".to_string(),
            surface_dark: "#1f2933".to_string(),
            text: "#1a1d21".to_string(),
            text_muted: "#5f6b7a".to_string(),
            text_inverse: "#f8fafc".to_string(),
            border: "#d9dee5".to_string(),
            primary: "#c2410c".to_string(),
            primary_hover: "#9a3412".to_string(),
            accent: "#f59e0b".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
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
/// Returns `Ok(None)` if the file doesn't exist.
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

/// Load config from `config.toml` in the content root, over stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Shearline Configuration
# =======================
# All settings are optional. Values shown below are the defaults.
# Tables merge with the defaults key by key; arrays replace them.
# Unknown keys will cause an error.

# Directory under the content root copied verbatim to the output root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
name = "Shearline"
tagline = "Industrial equipment"
# Origin for canonical links, Open Graph URLs and sitemap.xml. No trailing slash.
base_url = "https://www.example.com"
# Open Graph image for pages that do not set meta.og_image.
default_og_image = "/assets/og-default.svg"
language = "en"

# ---------------------------------------------------------------------------
# Contact details (footer). Empty values are omitted.
# ---------------------------------------------------------------------------
[contact]
phone = ""
email = ""
address = ""
hours = ""

# ---------------------------------------------------------------------------
# Header navigation. Declaring any entry replaces this whole list.
# ---------------------------------------------------------------------------
[[navigation]]
title = "Products"
path = "/products"

[[navigation]]
title = "Applications"
path = "/applications"

[[navigation]]
title = "Blog"
path = "/blog"

[[navigation]]
title = "About"
path = "/about"

# ---------------------------------------------------------------------------
# Metadata limits enforced by `shearline check`
# ---------------------------------------------------------------------------
[seo]
max_title_len = 70
max_description_len = 160

# ---------------------------------------------------------------------------
# Quote dialog (lead-capture form)
# ---------------------------------------------------------------------------
[quote]
endpoint = "/api/quote"
dialog_title = "Request a Quote"
submit_label = "Send Request"

# ---------------------------------------------------------------------------
# Generated listing pages
# ---------------------------------------------------------------------------
[listings.products]
title = "Products"
description = "Our full range of industrial equipment."
heading = "Products"
intro = ""

[listings.applications]
title = "Applications"
description = "Industries and processes our equipment serves."
heading = "Applications"
intro = ""

[listings.blog]
title = "Blog"
description = "Guides, case notes and news."
heading = "Blog"
intro = ""

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
container_width = "72rem"
card_gap = "1.5rem"

# Vertical section padding, as CSS clamp(min, size, max).
[theme.section_compact]
min = "2rem"
size = "4vw"
max = "3rem"

[theme.section_default]
min = "3rem"
size = "7vw"
max = "6rem"

[theme.section_spacious]
min = "4rem"
size = "10vw"
max = "9rem"

[theme.colors]
background = "#ffffff"
surface = "#f4f5f7"
surface_dark = "#1f2933"
text = "#1a1d21"
text_muted = "#5f6b7a"
text_inverse = "#f8fafc"
border = "#d9dee5"
primary = "#c2410c"
primary_hover = "#9a3412"
accent = "#f59e0b"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from the theme.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    let c = &theme.colors;
    format!(
        r#":root {{
    --color-bg: {bg};
    --color-surface: {surface};
    --color-surface-dark: {surface_dark};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-text-inverse: {text_inverse};
    --color-border: {border};
    --color-primary: {primary};
    --color-primary-hover: {primary_hover};
    --color-accent: {accent};
    --container-width: {container};
    --card-gap: {gap};
    --section-compact: {compact};
    --section-default: {default};
    --section-spacious: {spacious};
}}"#,
        bg = c.background,
        surface = c.surface,
        surface_dark = c.surface_dark,
        text = c.text,
        text_muted = c.text_muted,
        text_inverse = c.text_inverse,
        border = c.border,
        primary = c.primary,
        primary_hover = c.primary_hover,
        accent = c.accent,
        container = theme.container_width,
        gap = theme.card_gap,
        compact = theme.section_compact.to_css(),
        default = theme.section_default.to_css(),
        spacious = theme.section_spacious.to_css(),
    )
}
