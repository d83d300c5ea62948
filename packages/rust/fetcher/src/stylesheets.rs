//! Style source aggregation: inline `<style>` blocks and linked stylesheets.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::Fetcher;

static STYLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("style").expect("valid selector"));

static STYLESHEET_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel~="stylesheet"][href]"#).expect("valid selector")
});

/// Style references found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSources {
    /// Contents of each inline `<style>` block, in document order.
    pub inline: Vec<String>,
    /// Absolute stylesheet URLs, in reference order, already capped.
    pub stylesheets: Vec<Url>,
}

/// Result of aggregating every style source of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedStyles {
    /// Inline blocks only, joined by newlines.
    pub inline_css: String,
    /// Inline blocks, then successfully fetched stylesheets in reference order.
    pub combined_css: String,
    pub stylesheets_fetched: usize,
    pub stylesheets_failed: usize,
}

/// Collect inline style blocks and the first `max_stylesheets` linked
/// stylesheets, resolved against `base`.
///
/// Hrefs that do not resolve to a URL are skipped before the cap applies.
pub fn collect_style_sources(doc: &Html, base: &Url, max_stylesheets: usize) -> StyleSources {
    let inline = doc
        .select(&STYLE_SEL)
        .map(|el| el.text().collect::<String>())
        .collect();

    let stylesheets = doc
        .select(&STYLESHEET_LINK_SEL)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| match base.join(href.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!(href, error = %e, "unresolvable stylesheet href");
                None
            }
        })
        .take(max_stylesheets)
        .collect();

    StyleSources {
        inline,
        stylesheets,
    }
}

/// Gather all style text for a page from its collected sources.
///
/// Takes [`StyleSources`] rather than a parsed document so the returned
/// future stays `Send`. Linked stylesheets are fetched concurrently with the
/// fetcher's stylesheet timeout and no retry. Each slot is awaited on its
/// own, so one failure neither cancels nor delays its siblings; a failed
/// slot contributes nothing.
#[instrument(skip_all, fields(stylesheets = sources.stylesheets.len()))]
pub async fn aggregate_styles(fetcher: &Fetcher, sources: StyleSources) -> AggregatedStyles {
    let timeout = fetcher.policy().stylesheet_timeout;

    let handles: Vec<_> = sources
        .stylesheets
        .into_iter()
        .map(|url| {
            let fetcher = fetcher.clone();
            let task_url = url.clone();
            let handle =
                tokio::spawn(async move { fetcher.fetch_once(&task_url, timeout).await });
            (url, handle)
        })
        .collect();

    // Await in reference order: output order never depends on completion order.
    let mut fetched = Vec::with_capacity(handles.len());
    let mut failed = 0usize;
    for (url, handle) in handles {
        match handle.await {
            Ok(Ok(css)) => fetched.push(css),
            Ok(Err(e)) => {
                warn!(%url, error = %e, "stylesheet fetch failed, skipping");
                failed += 1;
            }
            Err(e) => {
                warn!(%url, error = %e, "stylesheet task aborted, skipping");
                failed += 1;
            }
        }
    }

    let inline_css = sources.inline.join("\n");
    let combined_css = sources
        .inline
        .iter()
        .chain(fetched.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    info!(
        inline_blocks = sources.inline.len(),
        stylesheets_fetched = fetched.len(),
        stylesheets_failed = failed,
        "style sources aggregated"
    );

    AggregatedStyles {
        inline_css,
        combined_css,
        stylesheets_fetched: fetched.len(),
        stylesheets_failed: failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchPolicy;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sources_of(html: &str, base: &Url) -> StyleSources {
        collect_style_sources(&Html::parse_document(html), base, 5)
    }

    fn test_fetcher() -> Fetcher {
        Fetcher::new(FetchPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(10),
            page_timeout: Duration::from_secs(5),
            stylesheet_timeout: Duration::from_secs(2),
            max_stylesheets: 5,
        })
        .unwrap()
    }

    #[test]
    fn collects_inline_blocks_in_order() {
        let html = "<html><head><style>a{color:red}</style></head>\
                    <body><style>b{color:blue}</style></body></html>";
        let base = Url::parse("https://example.com/").unwrap();
        let sources = collect_style_sources(&Html::parse_document(html), &base, 5);

        assert_eq!(sources.inline, vec!["a{color:red}", "b{color:blue}"]);
        assert!(sources.stylesheets.is_empty());
    }

    #[test]
    fn caps_and_resolves_stylesheet_links() {
        let links: String = (1..=7)
            .map(|i| format!(r#"<link rel="stylesheet" href="/css/{i}.css">"#))
            .collect();
        let html = format!(
            r#"<html><head>{links}<link rel="icon" href="/favicon.ico"></head></html>"#
        );
        let base = Url::parse("https://example.com/docs/page").unwrap();
        let sources = collect_style_sources(&Html::parse_document(&html), &base, 5);

        assert_eq!(sources.stylesheets.len(), 5);
        assert_eq!(
            sources.stylesheets[0].as_str(),
            "https://example.com/css/1.css"
        );
        assert_eq!(
            sources.stylesheets[4].as_str(),
            "https://example.com/css/5.css"
        );
    }

    #[test]
    fn relative_href_resolves_against_page() {
        let html = r#"<link rel="stylesheet" href="theme.css">"#;
        let base = Url::parse("https://example.com/blog/post").unwrap();
        let sources = collect_style_sources(&Html::parse_document(html), &base, 5);
        assert_eq!(
            sources.stylesheets[0].as_str(),
            "https://example.com/blog/theme.css"
        );
    }

    #[tokio::test]
    async fn keeps_reference_order_and_skips_failures() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow.css"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(".slow{}")
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing.css"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fast.css"))
            .respond_with(ResponseTemplate::new(200).set_body_string(".fast{}"))
            .mount(&server)
            .await;

        let html = r#"<html><head>
            <style>.inline{}</style>
            <link rel="stylesheet" href="/slow.css">
            <link rel="stylesheet" href="/missing.css">
            <link rel="stylesheet" href="/fast.css">
        </head><body></body></html>"#;

        let base = Url::parse(&server.uri()).unwrap();
        let styles = aggregate_styles(&test_fetcher(), sources_of(html, &base)).await;

        assert_eq!(styles.inline_css, ".inline{}");
        assert_eq!(styles.combined_css, ".inline{}\n.slow{}\n.fast{}");
        assert_eq!(styles.stylesheets_fetched, 2);
        assert_eq!(styles.stylesheets_failed, 1);

        // The 404 was requested exactly once.
        let requests = server.received_requests().await.unwrap();
        let missing = requests
            .iter()
            .filter(|r| r.url.path() == "/missing.css")
            .count();
        assert_eq!(missing, 1);
    }

    #[tokio::test]
    async fn all_stylesheets_failing_leaves_inline_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let html = r#"<style>body{margin:0}</style>
            <link rel="stylesheet" href="/a.css">
            <link rel="stylesheet" href="/b.css">"#;
        let base = Url::parse(&server.uri()).unwrap();
        let styles = aggregate_styles(&test_fetcher(), sources_of(html, &base)).await;

        assert_eq!(styles.combined_css, "body{margin:0}");
        assert_eq!(styles.stylesheets_failed, 2);
    }
}
