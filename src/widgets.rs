//! Shared presentational widgets.
//!
//! Nothing here knows about page datasets; every widget takes plain props
//! and returns [`Markup`]. The quote dialog is rendered once per document and
//! opened by any CTA button through `static/quote.js`, which copies the
//! button's `data-quote-*` attributes into the form's hidden fields.

use crate::config::QuoteConfig;
use crate::content::{Background, Cta, CtaKind, SectionSize};
use maud::{Markup, html};

/// Layout wrapper controlling background, vertical padding and anchor id.
#[derive(Debug, Clone, Default)]
pub struct Section<'a> {
    pub background: Background,
    pub size: SectionSize,
    pub id: Option<&'a str>,
}

impl<'a> Section<'a> {
    pub fn new(id: &'a str) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn size(mut self, size: SectionSize) -> Self {
        self.size = size;
        self
    }

    pub fn render(&self, children: Markup) -> Markup {
        html! {
            section id=[self.id] class={ "section " (background_class(self.background)) " " (size_class(self.size)) } {
                div.container {
                    (children)
                }
            }
        }
    }
}

fn background_class(background: Background) -> &'static str {
    match background {
        Background::White => "bg-white",
        Background::Light => "bg-light",
        Background::Dark => "bg-dark",
        Background::Brand => "bg-brand",
    }
}

fn size_class(size: SectionSize) -> &'static str {
    match size {
        SectionSize::Compact => "size-compact",
        SectionSize::Default => "size-default",
        SectionSize::Spacious => "size-spacious",
    }
}

/// Visual weight of a [`button_link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Outline,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "button button-primary",
            ButtonVariant::Secondary => "button button-secondary",
            ButtonVariant::Outline => "button button-outline",
        }
    }
}

/// An anchor styled as a button.
pub fn button_link(label: &str, href: &str, variant: ButtonVariant) -> Markup {
    html! {
        a class=(variant.class()) href=(href) { (label) }
    }
}

fn kind_name(kind: CtaKind) -> &'static str {
    match kind {
        CtaKind::Quote => "quote",
        CtaKind::Product => "product",
        CtaKind::Application => "application",
    }
}

/// Button that opens the quote dialog, tagged with the CTA's source.
///
/// `context` is the route of the page the button sits on; product and
/// application CTAs pass it through so the lead arrives with the item the
/// visitor was looking at.
pub fn quote_trigger(cta: &Cta, context: &str) -> Markup {
    let variant = match cta.kind {
        CtaKind::Quote => ButtonVariant::Primary,
        CtaKind::Product | CtaKind::Application => ButtonVariant::Secondary,
    };
    html! {
        button type="button" class={ (variant.class()) " quote-trigger" }
            data-quote-source=(cta.source)
            data-quote-kind=(kind_name(cta.kind))
            data-quote-page=(context) {
            (cta.label)
        }
    }
}

/// Product CTA block: a short pitch next to a product-kind trigger.
pub fn product_cta(pitch: &str, cta: &Cta, context: &str) -> Markup {
    html! {
        div.cta-band.cta-product {
            p.cta-pitch { (pitch) }
            (quote_trigger(cta, context))
        }
    }
}

/// Application CTA block, same shape as [`product_cta`].
pub fn application_cta(pitch: &str, cta: &Cta, context: &str) -> Markup {
    html! {
        div.cta-band.cta-application {
            p.cta-pitch { (pitch) }
            (quote_trigger(cta, context))
        }
    }
}

/// The lead-capture dialog shared by every trigger on a page.
pub fn quote_dialog(quote: &QuoteConfig) -> Markup {
    html! {
        dialog #quote-dialog .quote-dialog aria-labelledby="quote-dialog-title" {
            form method="post" action=(quote.endpoint) {
                header.quote-dialog-header {
                    h2 #quote-dialog-title { (quote.dialog_title) }
                    button type="button" class="quote-close" aria-label="Close" { "×" }
                }
                input type="hidden" name="source" value="";
                input type="hidden" name="kind" value="";
                input type="hidden" name="page" value="";
                label {
                    span { "Name" }
                    input type="text" name="name" autocomplete="name" required;
                }
                label {
                    span { "Email" }
                    input type="email" name="email" autocomplete="email" required;
                }
                label {
                    span { "Phone" }
                    input type="tel" name="phone" autocomplete="tel";
                }
                label {
                    span { "Tell us about your material and throughput" }
                    textarea name="message" rows="4" {}
                }
                button type="submit" class="button button-primary" { (quote.submit_label) }
            }
        }
    }
}
