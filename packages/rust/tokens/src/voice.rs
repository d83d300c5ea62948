//! Keyword-frequency tone heuristic and the placeholder voice profile.

use std::sync::LazyLock;

use brandscope_shared::{AudienceAnalysis, Result, Tone, ToneAnalysis, ToneScore, VoiceAnalysis};
use regex::Regex;
use scraper::{Html, Node};

use crate::dom::selector;

const PROFESSIONAL: &[&str] = &[
    "solution", "solutions", "enterprise", "business", "professional", "service", "services",
    "industry", "efficient", "strategy", "clients", "quality", "reliable", "integrated",
];
const FRIENDLY: &[&str] = &[
    "hello", "hi", "welcome", "love", "happy", "fun", "friends", "together", "easy", "enjoy",
    "awesome", "community", "thanks", "you'll",
];
const AUTHORITATIVE: &[&str] = &[
    "leading", "leader", "expert", "experts", "proven", "trusted", "guarantee", "certified",
    "official", "authority", "established", "award", "must", "best",
];

/// Elements whose text is never rendered.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

static TONE_RES: LazyLock<[(Tone, Regex); 3]> = LazyLock::new(|| {
    [
        (Tone::Professional, keyword_regex(PROFESSIONAL)),
        (Tone::Friendly, keyword_regex(FRIENDLY)),
        (Tone::Authoritative, keyword_regex(AUTHORITATIVE)),
    ]
});

fn keyword_regex(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b")).expect("valid regex")
}

/// Tone, traits, and audience for the page body.
pub fn analyze_voice(doc: &Html) -> Result<VoiceAnalysis> {
    let text = visible_body_text(doc)?;
    Ok(VoiceAnalysis {
        tone: analyze_tone(&text),
        personality_traits: personality_traits(),
        audience_analysis: audience_analysis(),
    })
}

/// Score each category by whole-word keyword matches in the lowercased text.
///
/// The primary tone is the strictly highest score; ties go to the category
/// listed first in [`Tone::ALL`].
pub fn analyze_tone(text: &str) -> ToneAnalysis {
    let lowered = text.to_lowercase();
    let scores: Vec<ToneScore> = TONE_RES
        .iter()
        .map(|(tone, re)| ToneScore {
            tone: *tone,
            score: re.find_iter(&lowered).count(),
        })
        .collect();

    let mut primary = &scores[0];
    for candidate in &scores[1..] {
        if candidate.score > primary.score {
            primary = candidate;
        }
    }

    ToneAnalysis {
        primary: primary.tone,
        scores,
    }
}

/// Stub: fixed traits, not derived from the page.
pub fn personality_traits() -> Vec<String> {
    ["innovative", "reliable", "approachable"]
        .map(String::from)
        .to_vec()
}

/// Stub: fixed audience profile, not derived from the page.
pub fn audience_analysis() -> AudienceAnalysis {
    AudienceAnalysis {
        primary_audience: "general".to_string(),
        expertise_level: "intermediate".to_string(),
        industries: vec!["technology".to_string()],
    }
}

/// Text nodes under `<body>`, skipping non-rendered elements, space-joined.
fn visible_body_text(doc: &Html) -> Result<String> {
    let sel = selector("body")?;
    let Some(body) = doc.select(&sel).next() else {
        return Ok(String::new());
    };

    let parts: Vec<&str> = body
        .descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|el| HIDDEN.contains(&el.name()));
            (!hidden).then_some(&**text)
        })
        .collect();
    Ok(parts.join(" "))
}
