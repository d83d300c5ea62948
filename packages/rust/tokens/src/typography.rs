//! Typography passes: font families, headings, text samples.

use std::sync::LazyLock;

use brandscope_shared::{Heading, Result};
use regex::Regex;
use scraper::Html;

use crate::collector::{BoundedCollector, collect_bounded};
use crate::dom::{selector, trimmed_text, truncate_chars};

pub const FONT_CAP: usize = 10;
pub const HEADING_CAP: usize = 10;
pub const TEXT_SAMPLE_CAP: usize = 5;
pub const TEXT_SAMPLE_MAX_CHARS: usize = 200;
const TEXT_SAMPLE_MIN_CHARS: usize = 20;

/// Appended to every font list.
pub const DEFAULT_FONTS: [&str; 2] = ["system-ui", "sans-serif"];

static FONT_FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)font-family\s*:\s*([^;]+)").expect("valid regex")
});

/// `font-family` values from inline styles, followed by [`DEFAULT_FONTS`].
///
/// Page fonts are limited so the defaults always fit under the cap.
pub fn font_families(inline_styles: &[&str]) -> Vec<String> {
    let mut fonts = BoundedCollector::unique(FONT_CAP - DEFAULT_FONTS.len());
    fonts.extend(
        inline_styles
            .iter()
            .flat_map(|style| FONT_FAMILY_RE.captures_iter(style))
            .map(|caps| caps[1].replace(['"', '\''], "").trim().to_string())
            .filter(|family| !family.is_empty()),
    );

    let mut all = BoundedCollector::unique(FONT_CAP);
    all.extend(fonts.into_vec());
    all.extend(DEFAULT_FONTS.iter().map(|f| f.to_string()));
    all.into_vec()
}

/// Non-empty `h1`–`h6` elements in document order.
pub fn headings(doc: &Html) -> Result<Vec<Heading>> {
    let sel = selector("h1, h2, h3, h4, h5, h6")?;
    Ok(collect_bounded(
        doc.select(&sel).filter_map(|el| {
            let text = trimmed_text(el);
            if text.is_empty() {
                return None;
            }
            let tag = el.value().name().to_ascii_lowercase();
            let level: u8 = tag[1..].parse().unwrap_or(1);
            Some(Heading { tag, text, level })
        }),
        HEADING_CAP,
    ))
}

/// Paragraph excerpts longer than 20 characters, truncated to 200.
pub fn text_samples(doc: &Html) -> Result<Vec<String>> {
    let sel = selector("p")?;
    Ok(collect_bounded(
        doc.select(&sel)
            .map(trimmed_text)
            .filter(|text| text.chars().count() > TEXT_SAMPLE_MIN_CHARS)
            .map(|text| truncate_chars(&text, TEXT_SAMPLE_MAX_CHARS)),
        TEXT_SAMPLE_CAP,
    ))
}
