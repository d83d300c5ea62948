//! The extracted document model.
//!
//! Every type here serializes with camelCase keys so the JSON document matches
//! what downstream consumers of `ExtractedData` expect.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ExtractedData
// ---------------------------------------------------------------------------

/// Root document produced by one extraction. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    /// The page URL the extraction ran against.
    pub url: String,
    /// Trimmed `<title>` text, empty if absent.
    pub title: String,
    /// Meta description, empty if absent.
    pub description: String,
    /// Absolute favicon URL, empty if absent.
    pub favicon: String,
    pub design_tokens: DesignTokens,
    pub voice_analysis: VoiceAnalysis,
    /// ISO-8601 capture time, stamped at assembly.
    pub captured_at: String,
}

// ---------------------------------------------------------------------------
// DesignTokens
// ---------------------------------------------------------------------------

/// All design-token slices of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    pub color_palette: Vec<String>,
    pub primary_colors: Vec<String>,
    pub color_usage: BTreeMap<String, usize>,
    pub font_families: Vec<String>,
    pub headings: Vec<Heading>,
    pub text_samples: Vec<String>,
    pub margins: Vec<String>,
    pub paddings: Vec<String>,
    pub spacing_scale: Vec<String>,
    pub layout_structure: LayoutStructure,
    pub grid_system: GridSystem,
    pub breakpoints: Vec<Breakpoint>,
    pub buttons: Vec<ButtonDescriptor>,
    pub form_fields: Vec<FormFieldDescriptor>,
    pub cards: Vec<CardDescriptor>,
    pub navigation: Vec<NavigationGroup>,
    pub images: Vec<ImageDescriptor>,
    pub css_variables: BTreeMap<String, String>,
    #[serde(rename = "rawCSS")]
    pub raw_css: String,
    pub form_schema: Vec<FormSchema>,
    pub logo: String,
    pub brand_colors: Vec<String>,
    pub icons: Vec<IconDescriptor>,
    pub messaging: Vec<String>,
    #[serde(rename = "previewHTML")]
    pub preview_html: String,
}

/// An `h1`–`h6` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub tag: String,
    pub text: String,
    pub level: u8,
}

/// Presence flags for the page's landmark regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStructure {
    pub has_header: bool,
    pub has_footer: bool,
    pub has_sidebar: bool,
    pub has_main: bool,
    pub section_count: usize,
}

/// Element counts hinting at the grid framework in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSystem {
    pub containers: usize,
    pub grids: usize,
    pub columns: usize,
    pub flex_containers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub name: String,
    pub min_width: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonDescriptor {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Tag name, or `input` for submit/button inputs.
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldDescriptor {
    pub tag: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub has_image: bool,
}

/// One `<nav>` and its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationGroup {
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

/// Field layout of one `<form>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub method: String,
    pub fields: Vec<FormFieldSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldSchema {
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    /// `favicon`, `svg`, or `font`.
    pub kind: String,
    /// `href` for favicons, class list for icon fonts, `viewBox` (or empty) for inline SVG.
    pub source: String,
}

// ---------------------------------------------------------------------------
// VoiceAnalysis
// ---------------------------------------------------------------------------

/// Heuristic voice profile of the page copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysis {
    pub tone: ToneAnalysis,
    pub personality_traits: Vec<String>,
    pub audience_analysis: AudienceAnalysis,
}

/// Keyword register categories, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Authoritative,
}

impl Tone {
    /// All categories in enumeration order. Ties resolve to the earliest.
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Friendly, Tone::Authoritative];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Authoritative => "authoritative",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneAnalysis {
    pub primary: Tone,
    pub scores: Vec<ToneScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneScore {
    pub tone: Tone,
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceAnalysis {
    pub primary_audience: String,
    pub expertise_level: String,
    pub industries: Vec<String>,
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for stored extraction identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionId(pub Uuid);

impl ExtractionId {
    /// Generate a new time-sortable identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ExtractionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ExtractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ExtractionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A stored extraction with its generated id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    pub id: ExtractionId,
    pub url: String,
    pub title: String,
    pub data: ExtractedData,
    /// SHA-256 of the serialized document.
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ExtractedData {
        ExtractedData {
            url: "https://example.com/".into(),
            title: "Example".into(),
            description: String::new(),
            favicon: String::new(),
            design_tokens: DesignTokens {
                raw_css: "body{color:red}".into(),
                preview_html: "<h1>Hi</h1>".into(),
                ..DesignTokens::default()
            },
            voice_analysis: VoiceAnalysis {
                tone: ToneAnalysis {
                    primary: Tone::Friendly,
                    scores: vec![ToneScore {
                        tone: Tone::Friendly,
                        score: 2,
                    }],
                },
                personality_traits: vec![],
                audience_analysis: AudienceAnalysis {
                    primary_audience: "General".into(),
                    expertise_level: "Intermediate".into(),
                    industries: vec![],
                },
            },
            captured_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn document_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_document()).expect("serialize");
        let tokens = &json["designTokens"];
        assert!(tokens.get("colorPalette").is_some());
        assert_eq!(tokens["rawCSS"], "body{color:red}");
        assert_eq!(tokens["previewHTML"], "<h1>Hi</h1>");
        assert_eq!(json["voiceAnalysis"]["tone"]["primary"], "friendly");
        assert_eq!(json["capturedAt"], "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn form_field_type_key() {
        let field = FormFieldSchema {
            field_type: "email".into(),
            name: "email".into(),
            placeholder: None,
            required: true,
        };
        let json = serde_json::to_value(&field).expect("serialize");
        assert_eq!(json["type"], "email");
        assert!(json.get("placeholder").is_none());
    }

    #[test]
    fn extraction_id_roundtrip() {
        let id = ExtractionId::new();
        let parsed: ExtractionId = id.to_string().parse().expect("parse id");
        assert_eq!(id, parsed);
    }
}
