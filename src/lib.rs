//! # Shearline
//!
//! A static site generator for industrial equipment catalogs. Every page of
//! the site is a literal dataset (a TOML file, or a markdown post with TOML
//! front matter) describing hero copy, feature cards, spec rows, application
//! scenarios, comparisons, case studies and FAQs. Shearline turns each
//! dataset into a fixed sequence of presentational sections.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (datasets → structured data)
//! 2. Check     manifest  →  issues           (links, anchors, CTAs, metadata)
//! 3. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so a scan can be inspected before
//! anything is rendered. Check and generate are both pure functions of the
//! manifest and the content directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads `content/` into the manifest |
//! | [`validate`] | Stage 2: link integrity, anchors, CTA uniqueness, SEO metadata |
//! | [`generate`] | Stage 3: parallel rendering, render cache, sitemap |
//! | [`content`] | Page dataset schema and the section order derived from it |
//! | [`render`] | Document shell and section renderers (Maud) |
//! | [`widgets`] | Section wrapper, buttons, CTA blocks, quote dialog |
//! | [`carousel`] | Scroll carousel paging, computed at build time |
//! | [`icons`] | Symbolic icon names resolved to inline SVG glyphs |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`cache`] | Content-hash cache so unchanged pages are not rewritten |
//! | [`types`] | Shared types (`NavItem`, `Collection`, `PageKind`) |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, template variables are
//! plain Rust expressions, and all interpolation is auto-escaped.
//!
//! ## Failing the Build, Not the Page
//!
//! Content errors never degrade into a half-rendered page. Unknown keys and
//! unknown icon names fail at scan time; broken links, missing anchors and
//! reused CTA sources fail at check time. A page either renders fully or the
//! build stops.
//!
//! ## NNN-Prefix Ordering
//!
//! Collection entries use a numeric prefix (`010-`, `020-`) for explicit
//! ordering on listing pages. Entries without a prefix are still rendered
//! but stay off listings and the sitemap, which is useful for unreleased
//! products that need a reviewable URL.

pub mod cache;
pub mod carousel;
pub mod config;
pub mod content;
pub mod generate;
pub mod icons;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;
pub mod validate;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_helpers;
