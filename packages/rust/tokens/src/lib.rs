//! Design-token and voice extraction over a parsed page.
//!
//! This crate provides:
//! - [`extract_design_tokens`]: runs every token pass and fills [`DesignTokens`]
//! - [`analyze_voice`]: the keyword tone heuristic
//! - [`page_meta`]: title, description, favicon
//!
//! Passes are pure functions of the document and the optional style tree.
//! Any pass error aborts the whole extraction.

mod collector;
mod dom;

pub mod colors;
pub mod components;
pub mod content;
pub mod forms;
pub mod layout;
pub mod meta;
pub mod spacing;
pub mod typography;
pub mod variables;
pub mod voice;

use brandscope_shared::{DesignTokens, Result};
use brandscope_styles::StyleSheet;
use scraper::Html;
use tracing::debug;

pub use collector::{BoundedCollector, collect_bounded, collect_unique};
pub use meta::{PageMeta, page_meta};
pub use voice::{analyze_tone, analyze_voice};

/// Run every token pass over `doc` and the optional style tree.
///
/// `inline_css` is the concatenated `<style>` block text, used for `rawCSS`.
pub fn extract_design_tokens(
    doc: &Html,
    sheet: Option<&StyleSheet>,
    inline_css: &str,
) -> Result<DesignTokens> {
    let styles = dom::inline_styles(doc)?;

    let inline = colors::inline_colors(doc)?;
    let tree = colors::tree_colors(sheet);
    let color_palette = colors::merge_palette(&inline, &tree);

    let tokens = DesignTokens {
        primary_colors: colors::primary_colors(&color_palette),
        color_usage: colors::color_usage(&inline),
        brand_colors: colors::brand_colors(&inline),
        color_palette,
        font_families: typography::font_families(&styles),
        headings: typography::headings(doc)?,
        text_samples: typography::text_samples(doc)?,
        margins: spacing::margins(&styles),
        paddings: spacing::paddings(&styles),
        spacing_scale: spacing::spacing_scale(),
        layout_structure: layout::layout_structure(doc)?,
        grid_system: layout::grid_system(doc, &styles)?,
        breakpoints: spacing::breakpoints(),
        buttons: components::buttons(doc)?,
        form_fields: components::form_fields(doc)?,
        cards: components::cards(doc)?,
        navigation: components::navigation(doc)?,
        images: components::images(doc)?,
        css_variables: variables::css_variables(sheet),
        raw_css: content::raw_css(inline_css),
        form_schema: forms::form_schema(doc)?,
        logo: content::logo(doc)?,
        icons: components::icons(doc)?,
        messaging: content::messaging(doc)?,
        preview_html: content::preview_html(doc)?,
    };

    debug!(
        palette = tokens.color_palette.len(),
        headings = tokens.headings.len(),
        buttons = tokens.buttons.len(),
        forms = tokens.form_schema.len(),
        variables = tokens.css_variables.len(),
        "design tokens extracted"
    );
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandscope_styles::parse_or_absent;

    const PAGE: &str = r#"<html><head><title>Acme</title></head><body>
        <header><img src="/logo.svg" alt="Acme logo"></header>
        <nav><a href="/">Home</a></nav>
        <main style="margin: 0 auto; color: #ff0000">
          <h1>Build better</h1>
          <p>Acme builds reliable tools for every kind of team.</p>
          <button class="btn">Start</button>
          <form><input name="email" required></form>
        </main>
        <footer style="padding: 16px; background: rgb(0, 0, 0)">Fin</footer>
    </body></html>"#;

    #[test]
    fn all_passes_populate_their_slice() {
        let doc = Html::parse_document(PAGE);
        let css = ":root{--brand:#0055ff} body{color:#112233}";
        let sheet = parse_or_absent(css);
        let tokens = extract_design_tokens(&doc, sheet.as_ref(), css).unwrap();

        assert_eq!(
            tokens.color_palette,
            vec!["#ff0000", "rgb(0, 0, 0)", "#0055ff", "#112233"]
        );
        assert_eq!(tokens.primary_colors, tokens.color_palette);
        assert_eq!(tokens.brand_colors, vec!["#ff0000", "rgb(0, 0, 0)"]);
        assert_eq!(tokens.color_usage.len(), 2);
        assert_eq!(tokens.font_families, vec!["system-ui", "sans-serif"]);
        assert_eq!(tokens.headings[0].text, "Build better");
        assert_eq!(tokens.text_samples.len(), 1);
        assert_eq!(tokens.margins, vec!["0 auto"]);
        assert_eq!(tokens.paddings, vec!["16px"]);
        assert!(tokens.layout_structure.has_header);
        assert!(tokens.layout_structure.has_main);
        assert_eq!(tokens.buttons[0].text, "Start");
        assert_eq!(tokens.form_fields.len(), 1);
        assert_eq!(tokens.navigation.len(), 1);
        assert_eq!(tokens.css_variables["--brand"], "#0055ff");
        assert_eq!(tokens.raw_css, css);
        assert_eq!(tokens.form_schema.len(), 1);
        assert_eq!(tokens.logo, "/logo.svg");
        assert_eq!(tokens.messaging, vec!["Build better"]);
        assert!(tokens.preview_html.starts_with("<header>"));
        assert_eq!(tokens.spacing_scale.len(), 4);
        assert_eq!(tokens.breakpoints.len(), 3);
    }

    #[test]
    fn absent_tree_only_drops_tree_contributions() {
        let doc = Html::parse_document(PAGE);
        let tokens = extract_design_tokens(&doc, None, "").unwrap();

        assert_eq!(tokens.color_palette, vec!["#ff0000", "rgb(0, 0, 0)"]);
        assert!(tokens.css_variables.is_empty());
        assert_eq!(tokens.raw_css, "");
        assert_eq!(tokens.headings.len(), 1);
    }
}
