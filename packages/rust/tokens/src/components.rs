//! Component inventories: buttons, form fields, cards, navigation, images, icons.
//!
//! Each pass walks a fixed selector set in document order and stops at its cap.

use brandscope_shared::{
    ButtonDescriptor, CardDescriptor, FormFieldDescriptor, IconDescriptor, ImageDescriptor,
    NavLink, NavigationGroup, Result,
};
use scraper::{ElementRef, Html};

use crate::collector::collect_bounded;
use crate::dom::{attr, selector, trimmed_text};

pub const BUTTON_CAP: usize = 10;
pub const FORM_FIELD_CAP: usize = 20;
pub const CARD_CAP: usize = 5;
pub const NAV_LINK_CAP: usize = 10;
pub const IMAGE_CAP: usize = 5;
pub const ICON_CAP: usize = 10;

const BUTTONS: &str =
    r#"button, input[type="submit"], input[type="button"], a.btn, a.button, [role="button"]"#;
const FORM_FIELDS: &str = "input, textarea, select";
const CARDS: &str = r#".card, [class$="-card"], [class*="-card "], article"#;
const NAVIGATION: &str = r#"nav, [role="navigation"]"#;
const ICONS: &str =
    r#"link[rel~="icon"], link[rel="apple-touch-icon"], svg, [class*="icon"], [class*="fa-"]"#;

fn tag(el: ElementRef<'_>) -> String {
    el.value().name().to_ascii_lowercase()
}

pub fn buttons(doc: &Html) -> Result<Vec<ButtonDescriptor>> {
    let sel = selector(BUTTONS)?;
    Ok(collect_bounded(
        doc.select(&sel).map(|el| {
            let kind = tag(el);
            let text = if kind == "input" {
                attr(el, "value").unwrap_or_default()
            } else {
                trimmed_text(el)
            };
            ButtonDescriptor {
                text,
                class_name: attr(el, "class"),
                kind,
            }
        }),
        BUTTON_CAP,
    ))
}

/// `input` fields report their `type` (default `text`); `textarea` and
/// `select` report their tag name.
pub fn form_fields(doc: &Html) -> Result<Vec<FormFieldDescriptor>> {
    let sel = selector(FORM_FIELDS)?;
    Ok(collect_bounded(
        doc.select(&sel).map(|el| {
            let tag = tag(el);
            let field_type = if tag == "input" {
                attr(el, "type")
                    .map(|t| t.to_ascii_lowercase())
                    .unwrap_or_else(|| "text".to_string())
            } else {
                tag.clone()
            };
            FormFieldDescriptor {
                tag,
                field_type,
                name: attr(el, "name"),
                placeholder: attr(el, "placeholder"),
            }
        }),
        FORM_FIELD_CAP,
    ))
}

pub fn cards(doc: &Html) -> Result<Vec<CardDescriptor>> {
    let sel = selector(CARDS)?;
    let heading_sel = selector("h1, h2, h3, h4, h5, h6")?;
    let img_sel = selector("img")?;
    Ok(collect_bounded(
        doc.select(&sel).map(|el| CardDescriptor {
            class_name: attr(el, "class"),
            heading: el
                .select(&heading_sel)
                .map(trimmed_text)
                .find(|text| !text.is_empty()),
            has_image: el.select(&img_sel).next().is_some(),
        }),
        CARD_CAP,
    ))
}

/// One group per navigation landmark. Groups without links are dropped.
pub fn navigation(doc: &Html) -> Result<Vec<NavigationGroup>> {
    let sel = selector(NAVIGATION)?;
    let link_sel = selector("a[href]")?;
    Ok(doc
        .select(&sel)
        .map(|nav| NavigationGroup {
            links: collect_bounded(
                nav.select(&link_sel).filter_map(|a| {
                    let text = trimmed_text(a);
                    let href = a.value().attr("href")?;
                    (!text.is_empty()).then(|| NavLink {
                        text,
                        href: href.to_string(),
                    })
                }),
                NAV_LINK_CAP,
            ),
        })
        .filter(|group| !group.links.is_empty())
        .collect())
}

pub fn images(doc: &Html) -> Result<Vec<ImageDescriptor>> {
    let sel = selector("img[src]")?;
    Ok(collect_bounded(
        doc.select(&sel).map(|el| ImageDescriptor {
            src: el.value().attr("src").unwrap_or_default().to_string(),
            alt: el.value().attr("alt").unwrap_or_default().to_string(),
            width: attr(el, "width"),
            height: attr(el, "height"),
        }),
        IMAGE_CAP,
    ))
}

/// Favicon links, inline SVGs, and icon-font elements.
pub fn icons(doc: &Html) -> Result<Vec<IconDescriptor>> {
    let sel = selector(ICONS)?;
    Ok(collect_bounded(
        doc.select(&sel).map(|el| {
            let (kind, source) = match tag(el).as_str() {
                "link" => ("favicon", el.value().attr("href")),
                "svg" => (
                    "svg",
                    el.value().attr("viewBox").or_else(|| el.value().attr("viewbox")),
                ),
                _ => ("font", el.value().attr("class")),
            };
            IconDescriptor {
                kind: kind.to_string(),
                source: source.unwrap_or_default().to_string(),
            }
        }),
        ICON_CAP,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_cover_tags_inputs_and_roles() {
        let doc = Html::parse_document(
            r#"<button class="btn primary"> Go </button>
               <input type="submit" value="Send">
               <a class="btn" href="/x">Link button</a>
               <div role="button">Div</div>
               <a href="/plain">Not a button</a>"#,
        );
        let found = buttons(&doc).unwrap();

        assert_eq!(found.len(), 4);
        assert_eq!(
            found[0],
            ButtonDescriptor {
                text: "Go".into(),
                class_name: Some("btn primary".into()),
                kind: "button".into(),
            }
        );
        assert_eq!(found[1].text, "Send");
        assert_eq!(found[1].kind, "input");
        assert_eq!(found[2].kind, "a");
        assert_eq!(found[3].text, "Div");
        assert_eq!(found[3].class_name, None);
    }

    #[test]
    fn buttons_capped() {
        let html: String = (0..14).map(|i| format!("<button>B{i}</button>")).collect();
        let doc = Html::parse_document(&html);
        assert_eq!(buttons(&doc).unwrap().len(), BUTTON_CAP);
    }

    #[test]
    fn form_fields_default_type() {
        let doc = Html::parse_document(
            r#"<input name="q" placeholder="Search">
               <input type="EMAIL" name="email">
               <textarea name="msg"></textarea>
               <select name="size"><option>S</option></select>"#,
        );
        let fields = form_fields(&doc).unwrap();
        let types: Vec<_> = fields.iter().map(|f| f.field_type.as_str()).collect();

        assert_eq!(types, vec!["text", "email", "textarea", "select"]);
        assert_eq!(fields[0].placeholder.as_deref(), Some("Search"));
        assert_eq!(fields[1].placeholder, None);
        assert_eq!(fields[3].tag, "select");
    }

    #[test]
    fn cards_record_heading_and_image() {
        let doc = Html::parse_document(
            r#"<div class="card"><h3>Plan</h3><img src="a.png"></div>
               <div class="pricing-card"><p>no heading</p></div>
               <div class="product-card featured"><h4> </h4><h5>Later</h5></div>
               <article><h2>Post</h2></article>
               <div class="cardigan">not a card</div>"#,
        );
        let found = cards(&doc).unwrap();

        assert_eq!(found.len(), 4);
        assert_eq!(found[0].heading.as_deref(), Some("Plan"));
        assert!(found[0].has_image);
        assert_eq!(found[1].heading, None);
        assert!(!found[1].has_image);
        assert_eq!(found[2].heading.as_deref(), Some("Later"));
        assert_eq!(found[3].class_name, None);
    }

    #[test]
    fn navigation_groups_drop_empty() {
        let doc = Html::parse_document(
            r#"<nav><a href="/">Home</a><a href="/about"> About </a><a href="/x"></a><a>No href</a></nav>
               <nav><span>nothing</span></nav>
               <div role="navigation"><a href="/docs">Docs</a></div>"#,
        );
        let groups = navigation(&doc).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0].links,
            vec![
                NavLink { text: "Home".into(), href: "/".into() },
                NavLink { text: "About".into(), href: "/about".into() },
            ]
        );
        assert_eq!(groups[1].links[0].href, "/docs");
    }

    #[test]
    fn navigation_links_capped_per_group() {
        let links: String = (0..25).map(|i| format!(r#"<a href="/{i}">L{i}</a>"#)).collect();
        let doc = Html::parse_document(&format!("<nav>{links}</nav>"));
        assert_eq!(navigation(&doc).unwrap()[0].links.len(), NAV_LINK_CAP);
    }

    #[test]
    fn images_keep_optional_dimensions() {
        let doc = Html::parse_document(
            r#"<img src="/a.png" alt="A" width="10"><img alt="no src"><img src="/b.png">"#,
        );
        let found = images(&doc).unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].width.as_deref(), Some("10"));
        assert_eq!(found[0].height, None);
        assert_eq!(found[1].alt, "");
    }

    #[test]
    fn icons_classified_by_kind() {
        let doc = Html::parse_document(
            r#"<html><head><link rel="icon" href="/favicon.ico"></head>
               <body><svg viewBox="0 0 24 24"></svg><i class="fa fa-star"></i><span class="icon-home"></span></body></html>"#,
        );
        let found = icons(&doc).unwrap();
        let kinds: Vec<_> = found.iter().map(|i| i.kind.as_str()).collect();

        assert_eq!(kinds, vec!["favicon", "svg", "font", "font"]);
        assert_eq!(found[0].source, "/favicon.ico");
        assert_eq!(found[1].source, "0 0 24 24");
        assert_eq!(found[2].source, "fa fa-star");
    }
}
