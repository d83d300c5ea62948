//! Layout and grid detection.

use std::sync::LazyLock;

use brandscope_shared::{GridSystem, LayoutStructure, Result};
use regex::Regex;
use scraper::Html;

use crate::dom::{count, exists};

const HEADER: &str = r#"header, [role="banner"], .header, #header"#;
const FOOTER: &str = r#"footer, [role="contentinfo"], .footer, #footer"#;
const SIDEBAR: &str = r#"aside, [role="complementary"], .sidebar, #sidebar"#;
const MAIN: &str = r#"main, [role="main"], .main, #main"#;

const CONTAINERS: &str = ".container, .container-fluid, .wrapper";
const GRIDS: &str = r#".grid, .row, [class*="grid-"]"#;
const COLUMNS: &str = r#"[class*="col-"]"#;

static FLEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)display\s*:\s*(?:inline-)?flex\b").expect("valid regex")
});

pub fn layout_structure(doc: &Html) -> Result<LayoutStructure> {
    Ok(LayoutStructure {
        has_header: exists(doc, HEADER)?,
        has_footer: exists(doc, FOOTER)?,
        has_sidebar: exists(doc, SIDEBAR)?,
        has_main: exists(doc, MAIN)?,
        section_count: count(doc, "section")?,
    })
}

/// Grid counts. Flex containers are detected from inline styles only.
pub fn grid_system(doc: &Html, inline_styles: &[&str]) -> Result<GridSystem> {
    Ok(GridSystem {
        containers: count(doc, CONTAINERS)?,
        grids: count(doc, GRIDS)?,
        columns: count(doc, COLUMNS)?,
        flex_containers: inline_styles
            .iter()
            .filter(|style| FLEX_RE.is_match(style))
            .count(),
    })
}
