//! End-to-end extraction: URL → fetch → styles → parse → tokens → voice → document.

use std::time::Instant;

use scraper::Html;
use tracing::{info, instrument};
use url::Url;

use brandscope_fetcher::{Fetcher, aggregate_styles, collect_style_sources};
use brandscope_shared::{BrandscopeError, ExtractedData, Result};
use brandscope_styles::parse_or_absent;
use brandscope_tokens::{analyze_voice, extract_design_tokens, page_meta};

use crate::assembler::assemble;

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called once linked stylesheets have settled.
    fn stylesheets_settled(&self, fetched: usize, failed: usize);
    /// Called when the document is assembled.
    fn done(&self, data: &ExtractedData);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn stylesheets_settled(&self, _fetched: usize, _failed: usize) {}
    fn done(&self, _data: &ExtractedData) {}
}

/// Parse a user-supplied target into an absolute `http(s)` URL.
pub fn parse_target_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())
        .map_err(|e| BrandscopeError::validation(format!("invalid URL '{input}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(BrandscopeError::validation(format!(
            "unsupported URL scheme '{other}': expected http or https"
        ))),
    }
}

/// Run the full extraction for one page.
///
/// 1. Fetch the page (retried per the fetcher's policy)
/// 2. Aggregate inline and linked styles
/// 3. Parse the aggregate into a style tree (absent on failure)
/// 4. Run every token pass
/// 5. Analyze voice
/// 6. Assemble the document
///
/// Returns a complete document or the first fetch/extraction error.
#[instrument(skip_all, fields(url = %url))]
pub async fn extract_website(
    url: &Url,
    fetcher: &Fetcher,
    progress: &dyn ProgressReporter,
) -> Result<ExtractedData> {
    let start = Instant::now();
    info!(url = %url, "starting extraction");

    // --- Phase 1: Fetch ---
    progress.phase("Fetching page");
    let html = fetcher.fetch_page(url).await?;

    // --- Phase 2: Styles ---
    progress.phase("Collecting stylesheets");
    // Html is not Send, so it is dropped before the stylesheet awaits and
    // parsed again for the token passes.
    let sources = {
        let doc = Html::parse_document(&html);
        collect_style_sources(&doc, url, fetcher.policy().max_stylesheets)
    };
    let styles = aggregate_styles(fetcher, sources).await;
    progress.stylesheets_settled(styles.stylesheets_fetched, styles.stylesheets_failed);

    // --- Phase 3: Parse ---
    // No awaits past this point: the parsed document is not Send.
    progress.phase("Parsing styles");
    let sheet = parse_or_absent(&styles.combined_css);

    // --- Phase 4: Tokens ---
    progress.phase("Extracting design tokens");
    let doc = Html::parse_document(&html);
    let meta = page_meta(&doc, url)?;
    let tokens = extract_design_tokens(&doc, sheet.as_ref(), &styles.inline_css)?;

    // --- Phase 5: Voice ---
    progress.phase("Analyzing voice");
    let voice = analyze_voice(&doc)?;

    // --- Phase 6: Assemble ---
    let data = assemble(url, meta, tokens, voice);

    info!(
        url = %url,
        colors = data.design_tokens.color_palette.len(),
        headings = data.design_tokens.headings.len(),
        tone = %data.voice_analysis.tone.primary,
        style_tree = sheet.is_some(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction complete"
    );
    progress.done(&data);
    Ok(data)
}
