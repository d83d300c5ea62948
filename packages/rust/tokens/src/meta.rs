//! Page metadata: title, description, favicon.

use brandscope_shared::Result;
use scraper::Html;
use tracing::debug;
use url::Url;

use crate::dom::{attr, selector, trimmed_text};

/// Metadata fields of the root document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub favicon: String,
}

pub fn page_meta(doc: &Html, page_url: &Url) -> Result<PageMeta> {
    Ok(PageMeta {
        title: title(doc)?,
        description: description(doc)?,
        favicon: favicon(doc, page_url)?,
    })
}

fn title(doc: &Html) -> Result<String> {
    let sel = selector("title")?;
    Ok(doc.select(&sel).next().map(trimmed_text).unwrap_or_default())
}

fn description(doc: &Html) -> Result<String> {
    for css in [r#"meta[name="description"]"#, r#"meta[property="og:description"]"#] {
        let sel = selector(css)?;
        if let Some(content) = doc.select(&sel).find_map(|m| attr(m, "content")) {
            return Ok(content);
        }
    }
    Ok(String::new())
}

/// First icon link resolved against the page URL.
fn favicon(doc: &Html, page_url: &Url) -> Result<String> {
    let sel = selector(r#"link[rel~="icon"], link[rel="shortcut icon"]"#)?;
    let Some(href) = doc.select(&sel).find_map(|link| attr(link, "href")) else {
        return Ok(String::new());
    };
    match page_url.join(&href) {
        Ok(resolved) => Ok(resolved.to_string()),
        Err(e) => {
            debug!(href = %href, error = %e, "unresolvable favicon href");
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/products/item").unwrap()
    }

    #[test]
    fn reads_title_description_and_favicon() {
        let doc = Html::parse_document(
            r#"<html><head>
                 <title>  Acme Tools </title>
                 <meta name="description" content="Tools for builders">
                 <link rel="shortcut icon" href="/favicon.ico">
               </head><body></body></html>"#,
        );
        let meta = page_meta(&doc, &page()).unwrap();

        assert_eq!(meta.title, "Acme Tools");
        assert_eq!(meta.description, "Tools for builders");
        assert_eq!(meta.favicon, "https://example.com/favicon.ico");
    }

    #[test]
    fn description_falls_back_to_open_graph() {
        let doc = Html::parse_document(
            r#"<head><meta property="og:description" content="OG text"></head>"#,
        );
        assert_eq!(page_meta(&doc, &page()).unwrap().description, "OG text");
    }

    #[test]
    fn relative_favicon_resolves_against_page_path() {
        let doc = Html::parse_document(r#"<head><link rel="icon" href="icon.png"></head>"#);
        assert_eq!(
            page_meta(&doc, &page()).unwrap().favicon,
            "https://example.com/products/icon.png"
        );
    }

    #[test]
    fn missing_metadata_is_empty() {
        let doc = Html::parse_document("<p>bare</p>");
        assert_eq!(page_meta(&doc, &page()).unwrap(), PageMeta::default());
    }
}
