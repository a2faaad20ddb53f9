//! Symbolic icon names and their inline SVG glyphs.
//!
//! Content files refer to icons by name (`icon = "shield"`). The name is
//! deserialized straight into [`Icon`], so a typo is a load error pointing at
//! the offending file rather than a blank square on the published page.
//!
//! `TABLE` is the only list of names. Serde goes through `FromStr` and
//! `Icon::name`, so the two directions cannot disagree.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Icon {
    Shield,
    Gauge,
    Bolt,
    Wrench,
    Cog,
    Recycle,
    Truck,
    Clock,
    Leaf,
    Hammer,
    Factory,
    Award,
    Layers,
    Scissors,
}

/// Name → icon table. Order matches the enum declaration.
const TABLE: &[(&str, Icon)] = &[
    ("shield", Icon::Shield),
    ("gauge", Icon::Gauge),
    ("bolt", Icon::Bolt),
    ("wrench", Icon::Wrench),
    ("cog", Icon::Cog),
    ("recycle", Icon::Recycle),
    ("truck", Icon::Truck),
    ("clock", Icon::Clock),
    ("leaf", Icon::Leaf),
    ("hammer", Icon::Hammer),
    ("factory", Icon::Factory),
    ("award", Icon::Award),
    ("layers", Icon::Layers),
    ("scissors", Icon::Scissors),
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown icon `{0}`")]
pub struct UnknownIcon(pub String);

impl Icon {
    pub fn name(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, icon)| *icon == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// SVG path data, drawn on a 24×24 stroke grid.
    fn path_data(self) -> &'static str {
        match self {
            Icon::Shield => "M12 3l8 3v6c0 5-3.5 8-8 9-4.5-1-8-4-8-9V6z",
            Icon::Gauge => "M4 16a8 8 0 1 1 16 0M12 16l4-5",
            Icon::Bolt => "M13 2L4 14h7l-1 8 9-12h-7z",
            Icon::Wrench => "M14 6a4 4 0 0 0 5 5l-9 9-3-3 9-9a4 4 0 0 1-2-2z",
            Icon::Cog => "M12 8a4 4 0 1 0 0 8 4 4 0 0 0 0-8zM12 2v3M12 19v3M2 12h3M19 12h3",
            Icon::Recycle => "M7 19l-3-5 3-5M17 5l3 5-3 5M9 4h6l3 5M15 20H9l-3-5",
            Icon::Truck => "M2 6h11v9H2zM13 9h4l3 3v3h-7M6 18a2 2 0 1 0 0-.1M17 18a2 2 0 1 0 0-.1",
            Icon::Clock => "M12 3a9 9 0 1 0 0 18 9 9 0 0 0 0-18zM12 7v5l3 3",
            Icon::Leaf => "M5 19c0-9 6-14 15-14 0 9-5 15-14 15M5 19l7-7",
            Icon::Hammer => "M14 4l6 6-3 3-6-6zM11 7l-8 8 3 3 8-8",
            Icon::Factory => "M2 21V9l6 4V9l6 4V5h4v16z",
            Icon::Award => "M12 2a6 6 0 1 0 0 12 6 6 0 0 0 0-12zM8 13l-2 9 6-3 6 3-2-9",
            Icon::Layers => "M12 3l9 5-9 5-9-5zM3 13l9 5 9-5",
            Icon::Scissors => "M6 6a3 3 0 1 0 0 .1M6 18a3 3 0 1 0 0 .1M8 8l12 10M8 16L20 6",
        }
    }

    /// Inline SVG glyph, decorative (hidden from assistive technology).
    pub fn glyph(self) -> Markup {
        html! {
            svg class={ "icon icon-" (self.name()) } viewBox="0 0 24 24" width="24" height="24"
                fill="none" stroke="currentColor" stroke-width="2"
                stroke-linecap="round" stroke-linejoin="round" aria-hidden="true" {
                path d=(self.path_data()) {}
            }
        }
    }
}

impl FromStr for Icon {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TABLE
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, icon)| *icon)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

impl TryFrom<String> for Icon {
    type Error = UnknownIcon;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        icon.name().to_string()
    }
}
