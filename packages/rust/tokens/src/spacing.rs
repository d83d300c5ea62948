//! Spacing passes and the fixed scale/breakpoint stubs.

use std::sync::LazyLock;

use brandscope_shared::Breakpoint;
use regex::Regex;

use crate::collector::collect_unique;

pub const SPACING_CAP: usize = 10;

static MARGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*margin(?:-[a-z-]+)?\s*:\s*([^;]+)").expect("valid regex")
});

static PADDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*padding(?:-[a-z-]+)?\s*:\s*([^;]+)").expect("valid regex")
});

/// `margin` and `margin-*` values from inline styles.
pub fn margins(inline_styles: &[&str]) -> Vec<String> {
    property_values(&MARGIN_RE, inline_styles)
}

/// `padding` and `padding-*` values from inline styles.
pub fn paddings(inline_styles: &[&str]) -> Vec<String> {
    property_values(&PADDING_RE, inline_styles)
}

fn property_values(re: &Regex, inline_styles: &[&str]) -> Vec<String> {
    collect_unique(
        inline_styles
            .iter()
            .flat_map(|style| re.captures_iter(style))
            .map(|caps| caps[1].trim().to_string())
            .filter(|value| !value.is_empty()),
        SPACING_CAP,
    )
}

/// Stub: a fixed 4/8/16/32 scale. Not derived from the page.
pub fn spacing_scale() -> Vec<String> {
    ["4px", "8px", "16px", "32px"].map(String::from).to_vec()
}

/// Stub: common `sm`/`md`/`lg` breakpoints. Not derived from media queries.
pub fn breakpoints() -> Vec<Breakpoint> {
    [("sm", "640px"), ("md", "768px"), ("lg", "1024px")]
        .into_iter()
        .map(|(name, min_width)| Breakpoint {
            name: name.to_string(),
            min_width: min_width.to_string(),
        })
        .collect()
}
