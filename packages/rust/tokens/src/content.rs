//! Brand content: messaging, logo, raw CSS, preview HTML.

use brandscope_shared::Result;
use scraper::{ElementRef, Html};

use crate::collector::{collect_bounded, collect_unique};
use crate::dom::{attr, selector, trimmed_text, truncate_chars};

pub const MESSAGING_CAP: usize = 5;
const MESSAGE_MAX_CHARS: usize = 200;
pub const RAW_CSS_MAX_CHARS: usize = 10_000;
pub const PREVIEW_MAX_CHARS: usize = 1000;
const PREVIEW_ELEMENTS: usize = 3;

const MESSAGING: &str =
    r#"h1, h2, .hero p, .tagline, .subtitle, .slogan, [class*="headline"]"#;
const LOGO: &str =
    r#"img[src*="logo"], img[alt*="logo"], img[alt*="Logo"], .logo img, #logo img, [class*="logo"] img, header img"#;

/// Short, distinct headline and tagline copy.
pub fn messaging(doc: &Html) -> Result<Vec<String>> {
    let sel = selector(MESSAGING)?;
    Ok(collect_unique(
        doc.select(&sel)
            .map(trimmed_text)
            .filter(|text| !text.is_empty() && text.chars().count() < MESSAGE_MAX_CHARS),
        MESSAGING_CAP,
    ))
}

/// `src` of the first logo-like image, or empty.
pub fn logo(doc: &Html) -> Result<String> {
    let sel = selector(LOGO)?;
    Ok(doc
        .select(&sel)
        .find_map(|img| attr(img, "src"))
        .unwrap_or_default())
}

/// Inline `<style>` text, truncated.
pub fn raw_css(inline_css: &str) -> String {
    truncate_chars(inline_css, RAW_CSS_MAX_CHARS)
}

/// Outer HTML of the first few element children of `<body>`, truncated.
pub fn preview_html(doc: &Html) -> Result<String> {
    let sel = selector("body")?;
    let Some(body) = doc.select(&sel).next() else {
        return Ok(String::new());
    };

    let html: String = collect_bounded(
        body.children().filter_map(ElementRef::wrap).map(|el| el.html()),
        PREVIEW_ELEMENTS,
    )
    .concat();
    Ok(truncate_chars(&html, PREVIEW_MAX_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messaging_is_short_unique_and_capped() {
        let long = "y".repeat(250);
        let html = format!(
            r#"<h1>Build faster</h1><h2>Build faster</h2><h2>{long}</h2>
               <div class="hero"><p>Ship today</p></div>
               <p class="tagline">Less config</p><p class="slogan">More craft</p>
               <div class="section-headline">Trusted</div><h2>Overflow</h2><h2>   </h2>"#
        );
        let doc = Html::parse_document(&html);

        assert_eq!(
            messaging(&doc).unwrap(),
            vec!["Build faster", "Ship today", "Less config", "More craft", "Trusted"]
        );
    }

    #[test]
    fn logo_first_match_in_document_order() {
        let doc = Html::parse_document(
            r#"<header><a class="site-logo"><img src="/brand.svg"></a></header>
               <img src="/img/logo.png">"#,
        );
        assert_eq!(logo(&doc).unwrap(), "/brand.svg");
    }

    #[test]
    fn logo_empty_when_absent() {
        let doc = Html::parse_document(r#"<img src="/hero.jpg" alt="hero">"#);
        assert_eq!(logo(&doc).unwrap(), "");
    }

    #[test]
    fn raw_css_truncated() {
        let css = "a{}".repeat(5000);
        assert_eq!(raw_css(&css).chars().count(), RAW_CSS_MAX_CHARS);
        assert_eq!(raw_css("b{}"), "b{}");
    }

    #[test]
    fn preview_takes_first_three_elements() {
        let doc = Html::parse_document(
            "<body>text<div>one</div><!-- c --><p>two</p><span>three</span><footer>four</footer></body>",
        );
        assert_eq!(
            preview_html(&doc).unwrap(),
            "<div>one</div><p>two</p><span>three</span>"
        );
    }

    #[test]
    fn preview_truncated() {
        let body: String = (0..3)
            .map(|_| format!("<div>{}</div>", "z".repeat(600)))
            .collect();
        let doc = Html::parse_document(&format!("<body>{body}</body>"));
        assert_eq!(preview_html(&doc).unwrap().chars().count(), PREVIEW_MAX_CHARS);
    }
}
