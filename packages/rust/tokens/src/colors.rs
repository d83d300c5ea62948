//! Color passes.
//!
//! Two independent sources feed the palette: literals in inline `style`
//! attributes ([`inline_colors`]) and color nodes of the parsed style tree
//! ([`tree_colors`]). [`merge_palette`] combines them, inline first.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use brandscope_shared::Result;
use brandscope_styles::{StyleSheet, ValueNode};
use regex::Regex;
use scraper::Html;

use crate::collector::{collect_bounded, collect_unique};
use crate::dom::inline_styles;

pub const PALETTE_CAP: usize = 20;
pub const PRIMARY_CAP: usize = 5;
pub const BRAND_CAP: usize = 3;

const COLOR_FUNCTIONS: &[&str] = &["rgb", "rgba", "hsl", "hsla"];

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#(?:[0-9a-f]{6}|[0-9a-f]{3})\b|\brgba?\([^)]*\)|\bhsla?\([^)]*\)")
        .expect("valid regex")
});

/// Every color literal in inline `style` attributes, in document order.
/// Repeats are kept so callers can count usage.
pub fn inline_colors(doc: &Html) -> Result<Vec<String>> {
    Ok(inline_styles(doc)?
        .into_iter()
        .flat_map(|style| COLOR_RE.find_iter(style).map(|m| m.as_str().to_string()))
        .collect())
}

/// Hex and `rgb/rgba/hsl/hsla` nodes of the style tree, in tree order.
/// An absent tree contributes nothing.
pub fn tree_colors(sheet: Option<&StyleSheet>) -> Vec<String> {
    let Some(sheet) = sheet else {
        return Vec::new();
    };

    let mut found = Vec::new();
    sheet.walk_values(|node| match node {
        ValueNode::Hash(hex) if is_hex_color(hex) => found.push(format!("#{hex}")),
        ValueNode::Function { name, .. }
            if COLOR_FUNCTIONS
                .iter()
                .any(|f| name.eq_ignore_ascii_case(f)) =>
        {
            found.push(node.to_css())
        }
        _ => {}
    });
    found
}

fn is_hex_color(hex: &str) -> bool {
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Inline colors first, then tree colors; deduplicated, capped at 20.
pub fn merge_palette(inline: &[String], tree: &[String]) -> Vec<String> {
    collect_unique(inline.iter().chain(tree.iter()).cloned(), PALETTE_CAP)
}

/// Placeholder saliency: the first five palette entries.
pub fn primary_colors(palette: &[String]) -> Vec<String> {
    collect_bounded(palette.iter().cloned(), PRIMARY_CAP)
}

/// Placeholder brand colors: the first three distinct inline colors.
/// The style tree is deliberately not consulted.
pub fn brand_colors(inline: &[String]) -> Vec<String> {
    collect_unique(inline.iter().cloned(), BRAND_CAP)
}

/// Occurrence count of each inline color literal.
pub fn color_usage(inline: &[String]) -> BTreeMap<String, usize> {
    let mut usage = BTreeMap::new();
    for color in inline {
        *usage.entry(color.clone()).or_insert(0) += 1;
    }
    usage
}
