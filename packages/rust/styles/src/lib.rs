//! CSS parsing into a walkable style tree.
//!
//! This crate provides:
//! - [`parse_stylesheet`]: strict parse, returning [`StyleParseError`] on failure
//! - [`parse_or_absent`]: the pipeline entry point, which degrades to `None`
//! - The tree types ([`StyleSheet`], [`Rule`], [`Declaration`], [`ValueNode`])

mod parser;
mod tree;

use tracing::{debug, warn};

pub use parser::{StyleParseError, parse_stylesheet};
pub use tree::{AtBlock, Declaration, Rule, StyleSheet, ValueNode, serialize_nodes};

/// Parse aggregated style text, returning `None` instead of an error.
///
/// Token passes treat `None` as "no tree-derived contribution".
pub fn parse_or_absent(css: &str) -> Option<StyleSheet> {
    match parse_stylesheet(css) {
        Ok(sheet) => {
            debug!(
                rules = sheet.rules.len(),
                declarations = sheet.declarations().len(),
                "style tree parsed"
            );
            Some(sheet)
        }
        Err(e) => {
            warn!(error = %e, "style parse failed, continuing without a style tree");
            None
        }
    }
}
