//! Page datasets: the schema every content file deserializes into.
//!
//! A page is a bag of optional blocks around a mandatory `[meta]` and
//! `[hero]`. Which blocks are present decides which sections render, in the
//! fixed order given by [`SectionKind::ORDER`]. All structs reject unknown
//! keys, so a misspelled field name fails the build instead of silently
//! vanishing from the page.
//!
//! ```toml
//! [meta]
//! title = "Alligator Shears | Northline Machinery"
//! description = "Hydraulic alligator shears for scrap yards."
//! keywords = ["alligator shear", "scrap shear"]
//!
//! [hero]
//! title = "Alligator Shears"
//! cta = { label = "Request a Quote", source = "alligator_shear_hero" }
//!
//! [[features.items]]
//! title = "Hardox Jaws"
//! description = "Wear-resistant jaws."
//! benefit = "Longer blade life"
//! icon = "shield"
//! ```

use crate::icons::Icon;
use pulldown_cmark::{Event, Parser, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One routed page, exactly as written in its content file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentPage {
    pub meta: PageMeta,
    pub hero: Hero,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<Intro>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<SpecTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<ApplicationSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_studies: Option<CaseStudySection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carousel: Option<CarouselSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_cta: Option<ClosingCta>,
}

/// Head metadata consumed by crawlers and link previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Site-relative image path; falls back to `site.default_og_image`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// Background variant of a [`Section`](crate::widgets::Section).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    White,
    Light,
    Dark,
    Brand,
}

/// Vertical padding variant of a [`Section`](crate::widgets::Section).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionSize {
    Compact,
    #[default]
    Default,
    Spacious,
}

/// Which lead-capture variant a CTA opens. Only changes the data attributes
/// the dialog script reads; the form is the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaKind {
    #[default]
    Quote,
    Product,
    Application,
}

/// A call-to-action button that opens the quote dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cta {
    pub label: String,
    /// Attribution tag, unique per page (e.g. `"gantry_shear_hero"`).
    pub source: String,
    #[serde(default)]
    pub kind: CtaKind,
}

/// A plain navigational link, rendered as a secondary button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "hero_background")]
    pub background: Background,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Cta>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

fn hero_background() -> Background {
    Background::Dark
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsBlock {
    pub items: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Intro {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

/// Blog article block. `body` is filled from the markdown after the front
/// matter, never written in the front matter itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Article {
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<Link>,
}

impl Article {
    /// Whole minutes at 200 words per minute, never less than one.
    pub fn reading_minutes(&self) -> usize {
        self.body.split_whitespace().count().div_ceil(200).max(1)
    }

    /// Link destinations inside the markdown body, in document order.
    pub fn body_links(&self) -> Vec<String> {
        Parser::new(&self.body)
            .filter_map(|event| match event {
                Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Image sources inside the markdown body, in document order.
    pub fn body_images(&self) -> Vec<String> {
        Parser::new(&self.body)
            .filter_map(|event| match event {
                Event::Start(Tag::Image { dest_url, .. }) => Some(dest_url.to_string()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureSection {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    pub items: Vec<FeatureCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Cta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureCard {
    pub title: String,
    pub description: String,
    pub benefit: String,
    pub icon: Icon,
}

/// Specification table. Columns are declared once; every row supplies a
/// value for each column key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecTable {
    pub heading: String,
    /// Header of the first column, which holds the model name.
    #[serde(default = "model_label")]
    pub model_label: String,
    pub columns: Vec<SpecColumn>,
    pub rows: Vec<SpecRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn model_label() -> String {
    "Model".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecColumn {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecRow {
    pub model: String,
    pub values: BTreeMap<String, String>,
}

impl SpecTable {
    /// Column keys a row is missing, then keys it has that no column
    /// declares.
    pub fn column_mismatch(&self, row: &SpecRow) -> (Vec<String>, Vec<String>) {
        let missing = self
            .columns
            .iter()
            .filter(|c| !row.values.contains_key(&c.key))
            .map(|c| c.key.clone())
            .collect();
        let extra = row
            .values
            .keys()
            .filter(|k| !self.columns.iter().any(|c| &c.key == *k))
            .cloned()
            .collect();
        (missing, extra)
    }

    /// Row values in column order. Missing cells render empty.
    pub fn cells<'a>(&'a self, row: &'a SpecRow) -> impl Iterator<Item = &'a str> + 'a {
        self.columns
            .iter()
            .map(|c| row.values.get(&c.key).map(String::as_str).unwrap_or(""))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationSection {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheading: Option<String>,
    pub items: Vec<ApplicationScenario>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<Cta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationScenario {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub materials: Vec<String>,
    pub capacity: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonTable {
    pub heading: String,
    #[serde(default = "competitor_label")]
    pub competitor_label: String,
    pub product_label: String,
    pub rows: Vec<ComparisonRow>,
}

fn competitor_label() -> String {
    "Typical Alternative".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComparisonRow {
    pub feature: String,
    pub competitor_value: String,
    pub product_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advantage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseStudySection {
    pub heading: String,
    pub items: Vec<CaseStudy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseStudy {
    pub title: String,
    pub location: String,
    pub equipment: String,
    pub results: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselSection {
    pub heading: String,
    /// Slides visible at once on wide screens.
    #[serde(default = "per_view")]
    pub per_view: usize,
    #[serde(default = "wrap")]
    pub wrap: bool,
    pub slides: Vec<Slide>,
}

fn per_view() -> usize {
    3
}

fn wrap() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub title: String,
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqSection {
    #[serde(default = "faq_heading")]
    pub heading: String,
    pub items: Vec<Faq>,
}

fn faq_heading() -> String {
    "Frequently Asked Questions".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClosingCta {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub cta: Cta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// The sections a page can render, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Stats,
    Intro,
    Article,
    Features,
    Specs,
    Applications,
    Comparison,
    CaseStudies,
    Carousel,
    Faq,
    ClosingCta,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 12] = [
        SectionKind::Hero,
        SectionKind::Stats,
        SectionKind::Intro,
        SectionKind::Article,
        SectionKind::Features,
        SectionKind::Specs,
        SectionKind::Applications,
        SectionKind::Comparison,
        SectionKind::CaseStudies,
        SectionKind::Carousel,
        SectionKind::Faq,
        SectionKind::ClosingCta,
    ];

    /// Element id of the section, the target of `#fragment` links.
    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Hero => "top",
            SectionKind::Stats => "highlights",
            SectionKind::Intro => "overview",
            SectionKind::Article => "article",
            SectionKind::Features => "features",
            SectionKind::Specs => "specs",
            SectionKind::Applications => "applications",
            SectionKind::Comparison => "comparison",
            SectionKind::CaseStudies => "case-studies",
            SectionKind::Carousel => "gallery",
            SectionKind::Faq => "faq",
            SectionKind::ClosingCta => "get-a-quote",
        }
    }
}

impl ContentPage {
    /// Sections present on this page, in render order.
    pub fn sections(&self) -> Vec<SectionKind> {
        SectionKind::ORDER
            .into_iter()
            .filter(|kind| match kind {
                SectionKind::Hero => true,
                SectionKind::Stats => self.stats.is_some(),
                SectionKind::Intro => self.intro.is_some(),
                SectionKind::Article => self.article.is_some(),
                SectionKind::Features => self.features.is_some(),
                SectionKind::Specs => self.specs.is_some(),
                SectionKind::Applications => self.applications.is_some(),
                SectionKind::Comparison => self.comparison.is_some(),
                SectionKind::CaseStudies => self.case_studies.is_some(),
                SectionKind::Carousel => self.carousel.is_some(),
                SectionKind::Faq => self.faq.is_some(),
                SectionKind::ClosingCta => self.closing_cta.is_some(),
            })
            .collect()
    }

    pub fn anchor_ids(&self) -> Vec<&'static str> {
        self.sections().into_iter().map(SectionKind::id).collect()
    }

    /// Every CTA on the page, in render order.
    pub fn ctas(&self) -> Vec<&Cta> {
        let mut ctas = Vec::new();
        ctas.extend(self.hero.cta.as_ref());
        ctas.extend(self.features.as_ref().and_then(|f| f.cta.as_ref()));
        ctas.extend(self.applications.as_ref().and_then(|a| a.cta.as_ref()));
        ctas.extend(self.closing_cta.as_ref().map(|c| &c.cta));
        ctas
    }

    pub fn cta_sources(&self) -> Vec<&str> {
        self.ctas().into_iter().map(|c| c.source.as_str()).collect()
    }

    /// Every href the page links to, including links in a blog body.
    pub fn links(&self) -> Vec<String> {
        let mut links: Vec<String> = self.hero.links.iter().map(|l| l.href.clone()).collect();
        if let Some(article) = &self.article {
            links.extend(article.body_links());
            links.extend(article.related.iter().map(|l| l.href.clone()));
        }
        if let Some(apps) = &self.applications {
            links.extend(apps.items.iter().map(|a| a.href.clone()));
        }
        if let Some(closing) = &self.closing_cta {
            links.extend(closing.links.iter().map(|l| l.href.clone()));
        }
        links
    }

    /// Image paths the page references, including images in a blog body.
    pub fn asset_refs(&self) -> Vec<String> {
        let mut refs: Vec<String> = Vec::new();
        refs.extend(self.meta.og_image.clone());
        refs.extend(self.hero.image.clone());
        if let Some(carousel) = &self.carousel {
            refs.extend(carousel.slides.iter().filter_map(|s| s.image.clone()));
        }
        if let Some(article) = &self.article {
            refs.extend(article.body_images());
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_page() -> ContentPage {
        toml::from_str(
            r#"
[meta]
title = "Gantry Shears"
description = "Heavy gantry shears."

[hero]
title = "Gantry Shears"
"#,
        )
        .unwrap()
    }

    #[test]
    fn minimal_page_parses_with_defaults() {
        let page = minimal_page();
        assert!(page.meta.keywords.is_empty());
        assert_eq!(page.hero.background, Background::Dark);
        assert!(page.hero.links.is_empty());
        assert_eq!(page.sections(), vec![SectionKind::Hero]);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<ContentPage, _> = toml::from_str(
            r#"
[meta]
title = "t"
description = "d"
[hero]
title = "t"
subtitel = "typo"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn cta_kind_defaults_to_quote() {
        let cta: Cta = toml::from_str(r#"label = "Quote"
source = "hero""#)
        .unwrap();
        assert_eq!(cta.kind, CtaKind::Quote);
    }

    #[test]
    fn sections_follow_fixed_order() {
        let mut page = minimal_page();
        page.faq = Some(FaqSection {
            heading: faq_heading(),
            items: vec![],
        });
        page.intro = Some(Intro {
            heading: "Overview".into(),
            paragraphs: vec![],
        });
        assert_eq!(
            page.sections(),
            vec![SectionKind::Hero, SectionKind::Intro, SectionKind::Faq]
        );
        assert_eq!(page.anchor_ids(), vec!["top", "overview", "faq"]);
    }

    #[test]
    fn cta_sources_in_render_order() {
        let mut page = minimal_page();
        page.hero.cta = Some(Cta {
            label: "Quote".into(),
            source: "gantry_hero".into(),
            kind: CtaKind::Quote,
        });
        page.closing_cta = Some(ClosingCta {
            heading: "Ready?".into(),
            body: None,
            cta: Cta {
                label: "Talk to us".into(),
                source: "gantry_closing".into(),
                kind: CtaKind::Product,
            },
            links: vec![],
        });
        assert_eq!(page.cta_sources(), vec!["gantry_hero", "gantry_closing"]);
    }

    #[test]
    fn spec_cells_follow_column_order() {
        let table: SpecTable = toml::from_str(
            r#"
heading = "Specs"
columns = [{ key = "force", label = "Force" }, { key = "blade", label = "Blade" }]
[[rows]]
model = "AS-100"
values = { blade = "600 mm", force = "100 t" }
"#,
        )
        .unwrap();
        let cells: Vec<&str> = table.cells(&table.rows[0]).collect();
        assert_eq!(cells, vec!["100 t", "600 mm"]);
        assert_eq!(table.model_label, "Model");
    }

    #[test]
    fn spec_column_mismatch_reports_both_sides() {
        let table = SpecTable {
            heading: "Specs".into(),
            model_label: model_label(),
            columns: vec![
                SpecColumn {
                    key: "force".into(),
                    label: "Force".into(),
                },
                SpecColumn {
                    key: "blade".into(),
                    label: "Blade".into(),
                },
            ],
            rows: vec![],
            note: None,
        };
        let row = SpecRow {
            model: "AS-100".into(),
            values: BTreeMap::from([
                ("force".to_string(), "100 t".to_string()),
                ("weight".to_string(), "2 t".to_string()),
            ]),
        };
        let (missing, extra) = table.column_mismatch(&row);
        assert_eq!(missing, vec!["blade"]);
        assert_eq!(extra, vec!["weight"]);
    }

    #[test]
    fn article_body_links_extracted() {
        let article = Article {
            date: "2026-03-01".into(),
            author: "Dana".into(),
            category: None,
            body: "See [our shears](/products/alligator-shear#specs) and [news](https://example.com).".into(),
            related: vec![],
        };
        assert_eq!(
            article.body_links(),
            vec!["/products/alligator-shear#specs", "https://example.com"]
        );
    }

    #[test]
    fn article_body_images_extracted() {
        let article = Article {
            date: "2026-03-01".into(),
            author: "Dana".into(),
            category: None,
            body: "Throughput:\n\n![chart](/assets/images/throughput.svg)\n\nSee [specs](/products).".into(),
            related: vec![],
        };
        assert_eq!(article.body_images(), vec!["/assets/images/throughput.svg"]);
        assert_eq!(article.body_links(), vec!["/products"]);
    }

    #[test]
    fn reading_time_rounds_up() {
        let mut article = Article {
            date: "2026-03-01".into(),
            author: "Dana".into(),
            category: None,
            body: String::new(),
            related: vec![],
        };
        assert_eq!(article.reading_minutes(), 1);
        article.body = "word ".repeat(401);
        assert_eq!(article.reading_minutes(), 3);
    }

    #[test]
    fn links_cover_every_block() {
        let mut page = minimal_page();
        page.hero.links.push(Link {
            label: "Specs".into(),
            href: "#specs".into(),
        });
        page.applications = Some(ApplicationSection {
            heading: "Uses".into(),
            subheading: None,
            items: vec![ApplicationScenario {
                title: "Scrap yards".into(),
                description: "d".into(),
                materials: vec![],
                capacity: "10 t/h".into(),
                href: "/applications/scrap-yards".into(),
                icon: None,
            }],
            cta: None,
        });
        assert_eq!(page.links(), vec!["#specs", "/applications/scrap-yards"]);
    }
}
