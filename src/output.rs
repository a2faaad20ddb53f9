//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every page is its semantic identity (position, title and route), with
//! the content file shown as secondary context on an indented `Source:` line.
//! This makes the output readable as a site inventory while still letting
//! users trace every page back to its dataset.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 Heavy Scrap Processing Equipment → /
//!     Source: index.toml
//!
//! Products
//! 001 Alligator Shears → /products/alligator-shear
//!     Source: products/010-alligator-shear.toml
//!     Sections: top, features, specs, faq, get-a-quote
//! --- Shear Prototype → /products/shear-prototype (hidden)
//!     Source: products/shear-prototype.toml
//!
//! Navigation
//!     Products → /products
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Check
//!
//! ```text
//! /products/gantry-shear
//!     CTA source `gantry_shear_hero` is used more than once
//!
//! 1 problem found
//! ```
//!
//! ## Generate
//!
//! ```text
//! / → index.html (written)
//! /products/gantry-shear → products/gantry-shear/index.html (unchanged)
//! sitemap.xml (written)
//! Removed products/old-baler/index.html
//!
//! Copied 3 assets
//! Cache: 11 unchanged, 3 written (14 total)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::{GenerateResult, WriteStatus};
use crate::scan::{Manifest, PageEntry};
use crate::types::{Collection, NavItem};
use crate::validate::Issue;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for a page. Hidden entries show `---` instead of a position.
fn page_header(index: Option<usize>, entry: &PageEntry) -> String {
    let title = &entry.page.hero.title;
    match index {
        Some(i) => format!("{} {} → {}", format_index(i), title, entry.route),
        None => format!("--- {} → {} (hidden)", title, entry.route),
    }
}

fn page_lines(index: Option<usize>, entry: &PageEntry, lines: &mut Vec<String>) {
    lines.push(page_header(index, entry));
    lines.push(format!("{}Source: {}", indent(1), entry.source));
    let sections: Vec<&str> = entry.page.anchor_ids();
    lines.push(format!("{}Sections: {}", indent(1), sections.join(", ")));
}

fn nav_lines(items: &[NavItem], depth: usize, lines: &mut Vec<String>) {
    for item in items {
        lines.push(format!("{}{} → {}", indent(depth), item.title, item.path));
        nav_lines(&item.children, depth + 1, lines);
    }
}

fn collection_heading(collection: Collection) -> &'static str {
    match collection {
        Collection::Products => "Products",
        Collection::Applications => "Applications",
        Collection::Blog => "Blog",
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    let standalone: Vec<&PageEntry> = manifest
        .pages
        .iter()
        .filter(|p| p.collection.is_none())
        .collect();
    if !standalone.is_empty() {
        lines.push("Pages".to_string());
        for (i, entry) in standalone.iter().enumerate() {
            page_lines(Some(i + 1), entry, &mut lines);
        }
    }

    for collection in Collection::ALL {
        let entries: Vec<&PageEntry> = manifest
            .pages
            .iter()
            .filter(|p| p.collection == Some(collection))
            .collect();
        if entries.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(collection_heading(collection).to_string());
        let mut position = 0;
        for entry in entries {
            let index = entry.listed.then(|| {
                position += 1;
                position
            });
            page_lines(index, entry, &mut lines);
        }
    }

    if !manifest.config.navigation.is_empty() {
        lines.push(String::new());
        lines.push("Navigation".to_string());
        nav_lines(&manifest.config.navigation, 1, &mut lines);
    }

    let mut config_lines = Vec::new();
    if source_root.join("config.toml").is_file() {
        config_lines.push(format!("{}config.toml", indent(1)));
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        config_lines.push(format!("{}{}/", indent(1), manifest.config.assets_dir));
    }
    if !config_lines.is_empty() {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.extend(config_lines);
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Issues grouped by location, in the order first seen.
pub fn format_check_output(issues: &[Issue]) -> Vec<String> {
    if issues.is_empty() {
        return vec!["No problems found".to_string()];
    }

    let mut locations: Vec<&str> = Vec::new();
    for issue in issues {
        if !locations.contains(&issue.location.as_str()) {
            locations.push(&issue.location);
        }
    }

    let mut lines = Vec::new();
    for location in locations {
        lines.push(location.to_string());
        for issue in issues.iter().filter(|i| i.location == location) {
            lines.push(format!("{}{}", indent(1), issue.kind));
        }
    }
    lines.push(String::new());
    let noun = if issues.len() == 1 { "problem" } else { "problems" };
    lines.push(format!("{} {} found", issues.len(), noun));
    lines
}

pub fn print_check_output(issues: &[Issue]) {
    for line in format_check_output(issues) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(result: &GenerateResult) -> Vec<String> {
    let mut lines = Vec::new();
    for file in &result.files {
        let status = match file.status {
            WriteStatus::Written => "written",
            WriteStatus::Unchanged => "unchanged",
        };
        match &file.route {
            Some(route) => lines.push(format!("{} → {} ({})", route, file.output_path, status)),
            None => lines.push(format!("{} ({})", file.output_path, status)),
        }
    }
    for removed in &result.removed {
        lines.push(format!("Removed {}", removed));
    }
    lines.push(String::new());
    if result.assets_copied > 0 {
        let noun = if result.assets_copied == 1 { "asset" } else { "assets" };
        lines.push(format!("Copied {} {}", result.assets_copied, noun));
    }
    lines.push(format!("Cache: {}", result.cache_stats));
    lines
}

pub fn print_generate_output(result: &GenerateResult) {
    for line in format_generate_output(result) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use crate::generate::GeneratedFile;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use crate::validate::IssueKind;

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn scan_output_lists_pages_with_source() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Pages");
        let home = find_page(&manifest, "/");
        assert_eq!(lines[1], format!("001 {} → /", home.page.hero.title));
        assert_eq!(lines[2], "    Source: index.toml");
        assert!(lines.contains(&"Products".to_string()));
        assert!(lines.contains(&"    Source: products/010-alligator-shear.toml".to_string()));
    }

    #[test]
    fn scan_output_numbers_listed_entries_and_marks_hidden() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        let gantry = find_page(&manifest, "/products/gantry-shear");
        assert!(lines.contains(&format!(
            "002 {} → /products/gantry-shear",
            gantry.page.hero.title
        )));
        assert!(
            lines
                .iter()
                .any(|l| l.starts_with("--- ") && l.ends_with("/products/shear-prototype (hidden)"))
        );
    }

    #[test]
    fn scan_output_shows_sections_navigation_and_config() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());
        assert!(lines.iter().any(|l| l.starts_with("    Sections: top, ")));
        assert!(lines.contains(&"Navigation".to_string()));
        assert!(lines.contains(&"    Products → /products".to_string()));
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    assets/".to_string()));
    }

    #[test]
    fn check_output_without_issues() {
        assert_eq!(format_check_output(&[]), vec!["No problems found"]);
    }

    #[test]
    fn check_output_groups_by_location() {
        let issues = vec![
            Issue {
                location: "/about".into(),
                kind: IssueKind::EmptyTitle,
            },
            Issue {
                location: "/".into(),
                kind: IssueKind::NoKeywords,
            },
            Issue {
                location: "/about".into(),
                kind: IssueKind::BrokenLink("/nope".into()),
            },
        ];
        let lines = format_check_output(&issues);
        assert_eq!(
            lines,
            vec![
                "/about",
                "    title is empty",
                "    link to `/nope` does not match any page or asset",
                "/",
                "    no keywords",
                "",
                "3 problems found",
            ]
        );
    }

    #[test]
    fn check_output_singular() {
        let issues = vec![Issue {
            location: "config.toml".into(),
            kind: IssueKind::BrokenLink("/careers".into()),
        }];
        assert_eq!(format_check_output(&issues).last().unwrap(), "1 problem found");
    }

    #[test]
    fn generate_output_lists_files_and_stats() {
        let result = GenerateResult {
            files: vec![
                GeneratedFile {
                    route: Some("/".into()),
                    output_path: "index.html".into(),
                    status: WriteStatus::Written,
                },
                GeneratedFile {
                    route: Some("/about".into()),
                    output_path: "about/index.html".into(),
                    status: WriteStatus::Unchanged,
                },
                GeneratedFile {
                    route: None,
                    output_path: "sitemap.xml".into(),
                    status: WriteStatus::Written,
                },
            ],
            assets_copied: 1,
            removed: vec!["products/old/index.html".into()],
            cache_stats: CacheStats {
                written: 2,
                unchanged: 1,
                removed: 1,
            },
        };
        assert_eq!(
            format_generate_output(&result),
            vec![
                "/ → index.html (written)",
                "/about → about/index.html (unchanged)",
                "sitemap.xml (written)",
                "Removed products/old/index.html",
                "",
                "Copied 1 asset",
                "Cache: 1 unchanged, 2 written (3 total), 1 removed",
            ]
        );
    }
}
