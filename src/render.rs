//! Page rendering.
//!
//! Turns a [`PageEntry`] into a complete HTML document. Rendering is a pure
//! function of the entry and the [`RenderContext`]: no I/O, no clocks, so the
//! same dataset always renders to the same bytes (the render cache depends
//! on it).
//!
//! ## Document Shell
//!
//! ```text
//! <head>   title, description, keywords, canonical, og:*, inline CSS
//! <header> site name + navigation (current item marked)
//! <main>   one <section> per block present, in SectionKind::ORDER
//! <footer> contact details
//!          quote dialog, quote.js, carousel.js (only with a carousel)
//! ```
//!
//! Every repeated block (feature cards, application cards, case studies,
//! listing cards) goes through [`render_card_grid`].

use crate::carousel::ScrollCarousel;
use crate::config::SiteConfig;
use crate::content::{
    ApplicationSection, Article, Background, CarouselSection, CaseStudySection, ClosingCta,
    ComparisonTable, ContentPage, FaqSection, FeatureSection, Hero, Intro, SectionKind,
    SectionSize, SpecTable, StatsBlock,
};
use crate::scan::{Listing, PageEntry};
use crate::types::{NavItem, PageKind};
use crate::widgets::{
    ButtonVariant, Section, application_cta, button_link, product_cta, quote_dialog,
    quote_trigger,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const QUOTE_JS: &str = include_str!("../static/quote.js");
const CAROUSEL_JS: &str = include_str!("../static/carousel.js");

/// Element id of the carousel container on pages with a `[carousel]` block.
pub const CAROUSEL_ID: &str = "gallery-carousel";

/// Site-wide inputs shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    /// Complete stylesheet, inlined into every document.
    pub css: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a SiteConfig, css: &'a str) -> Self {
        Self { config, css }
    }
}

/// Render items through `card` inside a `.card-grid` container.
pub fn render_card_grid<T>(items: &[T], class: &str, card: impl Fn(&T) -> Markup) -> Markup {
    html! {
        div class={ "card-grid " (class) } {
            @for item in items {
                (card(item))
            }
        }
    }
}

// ============================================================================
// Document shell
// ============================================================================

struct Head<'a> {
    title: &'a str,
    description: &'a str,
    keywords: &'a [String],
    og_image: Option<&'a str>,
    og_type: &'static str,
}

fn base_document(
    head: &Head,
    ctx: &RenderContext,
    route: &str,
    body_class: &str,
    content: Markup,
    with_carousel: bool,
) -> Markup {
    let config = ctx.config;
    let og_image = config.absolute_url(head.og_image.unwrap_or(&config.site.default_og_image));
    let canonical = config.absolute_url(route);
    html! {
        (DOCTYPE)
        html lang=(config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (head.title) }
                meta name="description" content=(head.description);
                @if !head.keywords.is_empty() {
                    meta name="keywords" content=(head.keywords.join(", "));
                }
                link rel="canonical" href=(canonical);
                meta property="og:site_name" content=(config.site.name);
                meta property="og:title" content=(head.title);
                meta property="og:description" content=(head.description);
                meta property="og:type" content=(head.og_type);
                meta property="og:url" content=(canonical);
                meta property="og:image" content=(og_image);
                style { (PreEscaped(ctx.css)) }
            }
            body class=(body_class) {
                (site_header(config, route))
                main { (content) }
                (site_footer(config))
                (quote_dialog(&config.quote))
                script { (PreEscaped(QUOTE_JS)) }
                @if with_carousel {
                    script { (PreEscaped(CAROUSEL_JS)) }
                }
            }
        }
    }
}

fn site_header(config: &SiteConfig, route: &str) -> Markup {
    html! {
        header.site-header {
            div.container.site-header-inner {
                a.site-brand href="/" {
                    span.site-name { (config.site.name) }
                    @if !config.site.tagline.is_empty() {
                        span.site-tagline { (config.site.tagline) }
                    }
                }
                nav.site-nav aria-label="Main" {
                    (render_nav(&config.navigation, route))
                }
            }
        }
    }
}

/// Whether `route` is `path` itself or lives under it.
fn nav_matches(path: &str, route: &str) -> bool {
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        return route == "/";
    }
    route == path || route.starts_with(&format!("{path}/"))
}

/// Renders the navigation menu (collapses behind a toggle on small screens).
pub fn render_nav(items: &[NavItem], route: &str) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label="Menu" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        ul.nav-list {
            @for item in items {
                (render_nav_item(item, route))
            }
        }
    }
}

fn render_nav_item(item: &NavItem, route: &str) -> Markup {
    let is_current = nav_matches(&item.path, route)
        || item.children.iter().any(|c| nav_matches(&c.path, route));
    let is_page = item.path == route;
    html! {
        li class=[is_current.then_some("current")] {
            a href=(item.path) aria-current=[is_page.then_some("page")] { (item.title) }
            @if !item.children.is_empty() {
                ul.nav-children {
                    @for child in &item.children {
                        (render_nav_item(child, route))
                    }
                }
            }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    let contact = &config.contact;
    let tel: String = contact
        .phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    html! {
        footer.site-footer {
            div.container.site-footer-inner {
                div.footer-brand {
                    p.site-name { (config.site.name) }
                    @if !config.site.tagline.is_empty() {
                        p.site-tagline { (config.site.tagline) }
                    }
                }
                address.footer-contact {
                    @if !contact.phone.is_empty() {
                        a href={ "tel:" (tel) } { (contact.phone) }
                    }
                    @if !contact.email.is_empty() {
                        a href={ "mailto:" (contact.email) } { (contact.email) }
                    }
                    @if !contact.address.is_empty() {
                        span { (contact.address) }
                    }
                    @if !contact.hours.is_empty() {
                        span { (contact.hours) }
                    }
                }
            }
        }
    }
}

fn body_class(kind: PageKind) -> &'static str {
    match kind {
        PageKind::Home => "page-home",
        PageKind::About => "page-about",
        PageKind::Product => "page-product",
        PageKind::Application => "page-application",
        PageKind::Blog => "page-blog",
    }
}

// ============================================================================
// Page renderers
// ============================================================================

/// Render one content page as a complete document.
pub fn render_page(entry: &PageEntry, ctx: &RenderContext) -> Markup {
    let page = &entry.page;
    let head = Head {
        title: &page.meta.title,
        description: &page.meta.description,
        keywords: &page.meta.keywords,
        og_image: page.meta.og_image.as_deref(),
        og_type: entry.kind.og_type(),
    };
    base_document(
        &head,
        ctx,
        &entry.route,
        body_class(entry.kind),
        render_sections(page, &entry.route),
        page.carousel.is_some(),
    )
}

/// The page body: every present section in order.
pub fn render_sections(page: &ContentPage, route: &str) -> Markup {
    html! {
        @for kind in page.sections() {
            (render_section(page, kind, route))
        }
    }
}

fn render_section(page: &ContentPage, kind: SectionKind, route: &str) -> Markup {
    let id = kind.id();
    match kind {
        SectionKind::Hero => Some(render_hero(&page.hero, route)),
        SectionKind::Stats => page.stats.as_ref().map(|s| render_stats(s, id)),
        SectionKind::Intro => page.intro.as_ref().map(|i| render_intro(i, id)),
        SectionKind::Article => page.article.as_ref().map(|a| render_article(a, id)),
        SectionKind::Features => page
            .features
            .as_ref()
            .map(|f| render_features(f, &page.hero.title, id, route)),
        SectionKind::Specs => page.specs.as_ref().map(|s| render_specs(s, id)),
        SectionKind::Applications => page
            .applications
            .as_ref()
            .map(|a| render_applications(a, id, route)),
        SectionKind::Comparison => page.comparison.as_ref().map(|c| render_comparison(c, id)),
        SectionKind::CaseStudies => page
            .case_studies
            .as_ref()
            .map(|c| render_case_studies(c, id)),
        SectionKind::Carousel => page.carousel.as_ref().map(|c| render_carousel(c, id)),
        SectionKind::Faq => page.faq.as_ref().map(|f| render_faq(f, id)),
        SectionKind::ClosingCta => page
            .closing_cta
            .as_ref()
            .map(|c| render_closing_cta(c, id, route)),
    }
    .unwrap_or_else(|| html! {})
}

fn section_heading(heading: &str, subheading: Option<&str>) -> Markup {
    html! {
        header.section-header {
            h2 { (heading) }
            @if let Some(sub) = subheading {
                p.section-subheading { (sub) }
            }
        }
    }
}

fn render_hero(hero: &Hero, route: &str) -> Markup {
    let body = html! {
        div.hero {
            div.hero-copy {
                @if let Some(eyebrow) = &hero.eyebrow {
                    p.eyebrow { (eyebrow) }
                }
                h1 { (hero.title) }
                @if let Some(subtitle) = &hero.subtitle {
                    p.hero-subtitle { (subtitle) }
                }
                @if hero.cta.is_some() || !hero.links.is_empty() {
                    div.hero-actions {
                        @if let Some(cta) = &hero.cta {
                            (quote_trigger(cta, route))
                        }
                        @for link in &hero.links {
                            (button_link(&link.label, &link.href, ButtonVariant::Outline))
                        }
                    }
                }
            }
            @if let Some(image) = &hero.image {
                div.hero-media {
                    img src=(image) alt=(hero.title) loading="eager";
                }
            }
        }
    };
    Section::new(SectionKind::Hero.id())
        .background(hero.background)
        .size(SectionSize::Spacious)
        .render(body)
}

fn render_stats(stats: &StatsBlock, id: &str) -> Markup {
    Section::new(id)
        .background(Background::Brand)
        .size(SectionSize::Compact)
        .render(html! {
            dl.stats {
                @for stat in &stats.items {
                    div.stat {
                        dt.stat-value { (stat.value) }
                        dd.stat-label { (stat.label) }
                    }
                }
            }
        })
}

fn render_intro(intro: &Intro, id: &str) -> Markup {
    Section::new(id).render(html! {
        div.prose {
            h2 { (intro.heading) }
            @for paragraph in &intro.paragraphs {
                p { (paragraph) }
            }
        }
    })
}

fn render_article(article: &Article, id: &str) -> Markup {
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, Parser::new(&article.body));

    Section::new(id).render(html! {
        article.article {
            div.article-meta {
                @if let Some(category) = &article.category {
                    span.article-category { (category) }
                }
                time datetime=(article.date) { (article.date) }
                span.article-author { "By " (article.author) }
                span.reading-time { (article.reading_minutes()) " min read" }
            }
            div.article-body.prose {
                (PreEscaped(body_html))
            }
            @if !article.related.is_empty() {
                nav.related aria-label="Related" {
                    h2 { "Related" }
                    ul {
                        @for link in &article.related {
                            li { a href=(link.href) { (link.label) } }
                        }
                    }
                }
            }
        }
    })
}

fn render_features(features: &FeatureSection, product: &str, id: &str, route: &str) -> Markup {
    let pitch = format!("Interested in {product}?");
    Section::new(id).background(Background::Light).render(html! {
        (section_heading(&features.heading, features.subheading.as_deref()))
        (render_card_grid(&features.items, "feature-grid", |card| html! {
            article class="card feature-card" {
                div.card-icon { (card.icon.glyph()) }
                h3 { (card.title) }
                p.card-description { (card.description) }
                p.card-benefit { (card.benefit) }
            }
        }))
        @if let Some(cta) = &features.cta {
            (product_cta(&pitch, cta, route))
        }
    })
}

fn render_specs(specs: &SpecTable, id: &str) -> Markup {
    Section::new(id).render(html! {
        (section_heading(&specs.heading, None))
        div.table-scroll {
            table.spec-table {
                thead {
                    tr {
                        th scope="col" { (specs.model_label) }
                        @for column in &specs.columns {
                            th scope="col" { (column.label) }
                        }
                    }
                }
                tbody {
                    @for row in &specs.rows {
                        tr {
                            th scope="row" { (row.model) }
                            @for cell in specs.cells(row) {
                                td { (cell) }
                            }
                        }
                    }
                }
            }
        }
        @if let Some(note) = &specs.note {
            p.table-note { (note) }
        }
    })
}

fn render_applications(apps: &ApplicationSection, id: &str, route: &str) -> Markup {
    Section::new(id).background(Background::Light).render(html! {
        (section_heading(&apps.heading, apps.subheading.as_deref()))
        (render_card_grid(&apps.items, "application-grid", |app| html! {
            article class="card application-card" {
                @if let Some(icon) = app.icon {
                    div.card-icon { (icon.glyph()) }
                }
                h3 { a href=(app.href) { (app.title) } }
                p.card-description { (app.description) }
                @if !app.materials.is_empty() {
                    ul.materials {
                        @for material in &app.materials {
                            li { (material) }
                        }
                    }
                }
                p.capacity { span.capacity-label { "Capacity: " } (app.capacity) }
            }
        }))
        @if let Some(cta) = &apps.cta {
            (application_cta(
                "Tell us about your material and we will size the right machine.",
                cta,
                route,
            ))
        }
    })
}

fn render_comparison(table: &ComparisonTable, id: &str) -> Markup {
    Section::new(id).render(html! {
        (section_heading(&table.heading, None))
        div.table-scroll {
            table.comparison-table {
                thead {
                    tr {
                        th scope="col" { "Feature" }
                        th scope="col" { (table.competitor_label) }
                        th scope="col" class="is-product" { (table.product_label) }
                    }
                }
                tbody {
                    @for row in &table.rows {
                        tr {
                            th scope="row" { (row.feature) }
                            td { (row.competitor_value) }
                            td class="is-product" {
                                (row.product_value)
                                @if let Some(advantage) = &row.advantage {
                                    " "
                                    span.advantage { (advantage) }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

fn render_case_studies(studies: &CaseStudySection, id: &str) -> Markup {
    Section::new(id).background(Background::Light).render(html! {
        (section_heading(&studies.heading, None))
        (render_card_grid(&studies.items, "case-study-grid", |study| html! {
            article class="card case-study" {
                h3 { (study.title) }
                p.case-meta { (study.location) " · " (study.equipment) }
                ul.case-results {
                    @for result in &study.results {
                        li { (result) }
                    }
                }
                @if let Some(t) = &study.testimonial {
                    blockquote.testimonial {
                        p { (t.quote) }
                        footer {
                            cite { (t.author) }
                            @if let Some(role) = &t.role {
                                ", " (role)
                            }
                        }
                    }
                }
            }
        }))
    })
}

fn render_carousel(section: &CarouselSection, id: &str) -> Markup {
    let carousel = ScrollCarousel::new(section.slides.len(), section.per_view, section.wrap);
    let slides = html! {
        @for slide in &section.slides {
            figure.carousel-slide {
                @if let Some(image) = &slide.image {
                    img src=(image) alt=(slide.title) loading="lazy";
                }
                figcaption {
                    strong { (slide.title) }
                    span { (slide.caption) }
                }
            }
        }
    };
    Section::new(id).render(html! {
        (section_heading(&section.heading, None))
        (carousel.attach(CAROUSEL_ID, slides))
    })
}

fn render_faq(faq: &FaqSection, id: &str) -> Markup {
    Section::new(id).background(Background::Light).render(html! {
        (section_heading(&faq.heading, None))
        div.faq-list {
            @for item in &faq.items {
                details.faq-item {
                    summary { (item.question) }
                    p { (item.answer) }
                }
            }
        }
    })
}

fn render_closing_cta(closing: &ClosingCta, id: &str, route: &str) -> Markup {
    Section::new(id)
        .background(Background::Brand)
        .size(SectionSize::Spacious)
        .render(html! {
            div.closing-cta {
                h2 { (closing.heading) }
                @if let Some(body) = &closing.body {
                    p { (body) }
                }
                div.closing-actions {
                    (quote_trigger(&closing.cta, route))
                    @for link in &closing.links {
                        (button_link(&link.label, &link.href, ButtonVariant::Secondary))
                    }
                }
            }
        })
}

/// Render a collection listing: one card per listed entry, in order.
pub fn render_listing(listing: &Listing, ctx: &RenderContext) -> Markup {
    let copy = ctx.config.listings.for_collection(listing.collection);
    let head = Head {
        title: &copy.title,
        description: &copy.description,
        keywords: &[],
        og_image: None,
        og_type: "website",
    };
    let content = html! {
        (Section::new(SectionKind::Hero.id())
            .background(Background::Dark)
            .size(SectionSize::Compact)
            .render(html! {
                h1 { (copy.heading) }
                @if !copy.intro.is_empty() {
                    p.hero-subtitle { (copy.intro) }
                }
            }))
        (Section::new("listing").render(render_card_grid(&listing.entries, "listing-grid", |entry| html! {
            a class="card listing-card" href=(entry.route) {
                @if let Some(image) = &entry.image {
                    img src=(image) alt=(entry.title) loading="lazy";
                }
                div.card-body {
                    @if let Some(date) = &entry.date {
                        time datetime=(date) { (date) }
                    }
                    h2 { (entry.title) }
                    p.card-description { (entry.summary) }
                }
            }
        })))
    };
    base_document(&head, ctx, &listing.route, "page-listing", content, false)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Manifest, scan};
    use crate::test_helpers::*;
    use crate::types::Collection;

    fn fixture_manifest() -> Manifest {
        let tmp = setup_fixtures();
        scan(tmp.path()).unwrap()
    }

    fn render_route(manifest: &Manifest, route: &str) -> String {
        let ctx = RenderContext::new(&manifest.config, "body{}");
        render_page(find_page(manifest, route), &ctx).into_string()
    }

    /// Substring between the first `open` and the following `close`.
    fn between<'a>(html: &'a str, open: &str, close: &str) -> &'a str {
        let start = html.find(open).unwrap_or_else(|| panic!("{open} not found")) + open.len();
        let len = html[start..].find(close).unwrap();
        &html[start..start + len]
    }

    #[test]
    fn alligator_shear_specs_render_four_rows_in_order() {
        let manifest = fixture_manifest();
        let html = render_route(&manifest, "/products/alligator-shear");
        let tbody = between(&html, "<tbody>", "</tbody>");
        assert_eq!(count_occurrences(tbody, "<tr>"), 4);

        let positions: Vec<usize> = ["AS-100", "AS-200", "AS-300", "AS-400"]
            .iter()
            .map(|m| tbody.find(m).unwrap_or_else(|| panic!("{m} missing")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn alligator_shear_renders_six_feature_cards_verbatim() {
        let manifest = fixture_manifest();
        let html = render_route(&manifest, "/products/alligator-shear");
        let features = manifest
            .find_page("/products/alligator-shear")
            .and_then(|p| p.page.features.as_ref())
            .unwrap();
        assert_eq!(features.items.len(), 6);
        assert_eq!(count_occurrences(&html, r#"class="card feature-card""#), 6);
        for card in &features.items {
            assert!(html.contains(&format!("<h3>{}</h3>", card.title)));
            assert!(html.contains(&card.description));
            assert!(html.contains(&card.benefit));
        }
    }

    #[test]
    fn spec_cells_follow_column_order() {
        let manifest = fixture_manifest();
        let html = render_route(&manifest, "/products/briquetting-machine");
        let specs = manifest
            .find_page("/products/briquetting-machine")
            .and_then(|p| p.page.specs.as_ref())
            .unwrap();
        let first = &specs.rows[0];
        let expected: String = specs.cells(first).map(|c| format!("<td>{c}</td>")).collect();
        assert!(html.contains(&expected));
    }

    #[test]
    fn rendering_is_idempotent() {
        let manifest = fixture_manifest();
        let a = render_route(&manifest, "/products/briquetting-machine");
        let b = render_route(&manifest, "/products/briquetting-machine");
        assert_eq!(a, b);
        let tbody = between(&a, "<tbody>", "</tbody>");
        assert_eq!(tbody, between(&b, "<tbody>", "</tbody>"));
        assert_eq!(count_occurrences(tbody, "<tr>"), 4);
        for model in ["BM-60", "BM-80", "BM-100", "BM-120"] {
            assert!(tbody.contains(model), "{model} missing");
        }
    }

    #[test]
    fn sections_render_in_fixed_order() {
        let manifest = fixture_manifest();
        let entry = find_page(&manifest, "/products/alligator-shear");
        let html = render_route(&manifest, "/products/alligator-shear");
        let positions: Vec<usize> = entry
            .page
            .anchor_ids()
            .iter()
            .map(|id| html.find(&format!(r#"id="{id}""#)).unwrap())
            .collect();
        assert!(positions.len() > 3);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn head_carries_metadata() {
        let manifest = fixture_manifest();
        let entry = find_page(&manifest, "/products/alligator-shear");
        let html = render_route(&manifest, "/products/alligator-shear");
        let base = &manifest.config.site.base_url;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(&format!("<title>{}</title>", entry.page.meta.title)));
        assert!(html.contains(r#"<meta name="description""#));
        assert!(html.contains(r#"<meta name="keywords""#));
        assert!(html.contains(&format!(
            r#"<link rel="canonical" href="{base}/products/alligator-shear">"#
        )));
        assert!(html.contains(r#"<meta property="og:type" content="product">"#));
    }

    #[test]
    fn og_image_falls_back_to_default_and_is_absolute() {
        let mut manifest = fixture_manifest();
        let route = "/applications/demolition";
        let page = &mut manifest
            .pages
            .iter_mut()
            .find(|p| p.route == route)
            .unwrap()
            .page;
        page.meta.og_image = None;
        let html = render_route(&manifest, route);
        let expected = manifest
            .config
            .absolute_url(&manifest.config.site.default_og_image);
        assert!(html.contains(&format!(r#"<meta property="og:image" content="{expected}">"#)));
    }

    #[test]
    fn nav_marks_current_section() {
        let manifest = fixture_manifest();
        let html = render_route(&manifest, "/products/gantry-shear");
        assert!(html.contains(r#"<li class="current"><a href="/products">"#));
        assert!(!html.contains(r#"aria-current="page""#));
    }

    #[test]
    fn nav_matching_rules() {
        assert!(nav_matches("/products", "/products"));
        assert!(nav_matches("/products", "/products/gantry-shear"));
        assert!(nav_matches("/products/", "/products/gantry-shear"));
        assert!(!nav_matches("/products", "/products-archive"));
        assert!(nav_matches("/", "/"));
        assert!(!nav_matches("/", "/about"));
    }

    #[test]
    fn nested_nav_children_render() {
        let items = vec![NavItem {
            title: "Products".into(),
            path: "/products".into(),
            children: vec![NavItem {
                title: "Gantry Shears".into(),
                path: "/products/gantry-shear".into(),
                children: vec![],
            }],
        }];
        let html = render_nav(&items, "/products/gantry-shear").into_string();
        assert!(html.contains(r#"<ul class="nav-children">"#));
        assert!(html.contains(r#"href="/products/gantry-shear" aria-current="page""#));
    }

    #[test]
    fn carousel_script_only_on_carousel_pages() {
        let manifest = fixture_manifest();
        let about = render_route(&manifest, "/about");
        let product = render_route(&manifest, "/products/gantry-shear");
        let marker = "data-stops";
        assert!(about.contains(marker));
        assert!(about.contains(&format!(r#"id="{CAROUSEL_ID}""#)));
        assert!(about.contains(CAROUSEL_JS.trim()));
        assert!(!product.contains(CAROUSEL_JS.trim()));
        assert!(product.contains(QUOTE_JS.trim()));
    }

    #[test]
    fn every_cta_is_tagged_with_its_source() {
        let manifest = fixture_manifest();
        for entry in &manifest.pages {
            let html = render_route(&manifest, &entry.route);
            for source in entry.page.cta_sources() {
                assert_eq!(
                    count_occurrences(&html, &format!(r#"data-quote-source="{source}""#)),
                    1,
                    "{} on {}",
                    source,
                    entry.route
                );
            }
        }
    }

    #[test]
    fn blog_article_renders_markdown_and_byline() {
        let manifest = fixture_manifest();
        let html = render_route(&manifest, "/blog/choosing-a-scrap-shear");
        assert!(html.contains(r#"<time datetime="2026-03-04">"#));
        assert!(html.contains(" min read"));
        assert!(html.contains("<p>Picking a shear"));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
    }

    #[test]
    fn content_text_is_escaped() {
        let mut manifest = fixture_manifest();
        let route = "/about";
        manifest
            .pages
            .iter_mut()
            .find(|p| p.route == route)
            .unwrap()
            .page
            .hero
            .title = "<script>alert(1)</script>".into();
        let html = render_route(&manifest, route);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn footer_shows_contact_details() {
        let manifest = fixture_manifest();
        let html = render_route(&manifest, "/");
        let contact = &manifest.config.contact;
        assert!(html.contains(&format!(r#"href="mailto:{}""#, contact.email)));
        assert!(html.contains(&contact.address));
    }

    #[test]
    fn listing_renders_one_card_per_entry_in_order() {
        let manifest = fixture_manifest();
        let listing = find_listing(&manifest, Collection::Products);
        let ctx = RenderContext::new(&manifest.config, "");
        let html = render_listing(listing, &ctx).into_string();
        assert_eq!(
            count_occurrences(&html, r#"class="card listing-card""#),
            listing.entries.len()
        );
        let positions: Vec<usize> = listing_routes(&manifest, Collection::Products)
            .iter()
            .map(|r| html.find(&format!(r#"href="{r}""#)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!html.contains("/products/shear-prototype"));
        assert!(html.contains(&format!(
            "<title>{}</title>",
            manifest.config.listings.products.title
        )));
    }

    #[test]
    fn card_grid_renders_each_item() {
        let html = render_card_grid(&["a", "b", "c"], "letters", |s| html! { span { (s) } })
            .into_string();
        assert_eq!(
            html,
            r#"<div class="card-grid letters"><span>a</span><span>b</span><span>c</span></div>"#
        );
    }
}
