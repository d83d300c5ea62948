//! Small DOM helpers shared by the passes.

use brandscope_shared::{BrandscopeError, Result};
use scraper::{ElementRef, Html, Selector};

/// Compile a selector. An invalid selector is an extraction failure.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| BrandscopeError::extraction(format!("invalid selector `{css}`: {e}")))
}

/// Every inline `style` attribute value, in document order.
pub(crate) fn inline_styles(doc: &Html) -> Result<Vec<&str>> {
    let sel = selector("[style]")?;
    Ok(doc
        .select(&sel)
        .filter_map(|el| el.value().attr("style"))
        .collect())
}

/// Concatenated descendant text, trimmed.
pub(crate) fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Attribute value if present and not blank.
pub(crate) fn attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Keep the first `max` characters.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Whether anything in the document matches `css`.
pub(crate) fn exists(doc: &Html, css: &str) -> Result<bool> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).next().is_some())
}

/// Number of elements matching `css`.
pub(crate) fn count(doc: &Html, css: &str) -> Result<usize> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).count())
}
