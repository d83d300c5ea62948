//! Final document assembly.

use brandscope_shared::{DesignTokens, ExtractedData, VoiceAnalysis};
use brandscope_tokens::PageMeta;
use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

/// Combine every slice into the root document, stamped with the current time.
pub fn assemble(
    url: &Url,
    meta: PageMeta,
    design_tokens: DesignTokens,
    voice_analysis: VoiceAnalysis,
) -> ExtractedData {
    assemble_at(url, meta, design_tokens, voice_analysis, Utc::now())
}

/// [`assemble`] with an explicit capture time.
pub fn assemble_at(
    url: &Url,
    meta: PageMeta,
    design_tokens: DesignTokens,
    voice_analysis: VoiceAnalysis,
    captured_at: DateTime<Utc>,
) -> ExtractedData {
    ExtractedData {
        url: url.to_string(),
        title: meta.title,
        description: meta.description,
        favicon: meta.favicon,
        design_tokens,
        voice_analysis,
        captured_at: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
