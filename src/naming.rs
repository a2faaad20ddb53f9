//! Filename parsing for collection entries.
//!
//! Product, application and blog files share one naming pattern: an optional
//! numeric prefix (`NNN-`) followed by the slug that ends up in the URL.
//!
//! - `010-alligator-shear.toml` → ordered by `10`, route `/products/alligator-shear`
//! - `gantry-shear-prototype.toml` → generated, but hidden from the listing
//!
//! The number only orders entries; it never appears in a route.

/// Result of parsing a collection file stem like `010-alligator-shear`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g. `10` from `010-alligator-shear`)
    pub number: Option<u32>,
    /// URL slug: everything after `NNN-`, or the full stem when unnumbered.
    pub slug: String,
}

/// Parse a file stem following the `NNN-slug` convention.
///
/// - `"010-alligator-shear"` → number=Some(10), slug="alligator-shear"
/// - `"030-briquetting-machine"` → number=Some(30), slug="briquetting-machine"
/// - `"007"` → number=Some(7), slug=""
/// - `"shear-prototype"` → number=None, slug="shear-prototype"
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            slug: rest.to_string(),
        };
    }
    if let Ok(num) = stem.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            slug: String::new(),
        };
    }
    ParsedName {
        number: None,
        slug: stem.to_string(),
    }
}

/// A slug is usable in a route when it is non-empty lowercase ASCII
/// alphanumerics separated by single dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_multi_word_slug() {
        let p = parse_entry_name("010-alligator-shear");
        assert_eq!(p.number, Some(10));
        assert_eq!(p.slug, "alligator-shear");
    }

    #[test]
    fn number_only() {
        let p = parse_entry_name("007");
        assert_eq!(p.number, Some(7));
        assert_eq!(p.slug, "");
    }

    #[test]
    fn number_with_trailing_dash() {
        let p = parse_entry_name("007-");
        assert_eq!(p.number, Some(7));
        assert_eq!(p.slug, "");
    }

    #[test]
    fn unnumbered_keeps_full_stem() {
        let p = parse_entry_name("shear-prototype");
        assert_eq!(p.number, None);
        assert_eq!(p.slug, "shear-prototype");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-first");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.slug, "first");
    }

    #[test]
    fn leading_word_that_is_not_a_number() {
        let p = parse_entry_name("v2-baler");
        assert_eq!(p.number, None);
        assert_eq!(p.slug, "v2-baler");
    }

    #[test]
    fn valid_slugs() {
        assert!(is_valid_slug("alligator-shear"));
        assert!(is_valid_slug("as400"));
    }

    #[test]
    fn invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Alligator-Shear"));
        assert!(!is_valid_slug("-shear"));
        assert!(!is_valid_slug("shear-"));
        assert!(!is_valid_slug("big--shear"));
        assert!(!is_valid_slug("shear_400"));
        assert!(!is_valid_slug("shear 400"));
    }
}
