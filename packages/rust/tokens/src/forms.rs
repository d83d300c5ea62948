//! Per-form field schema.

use brandscope_shared::{FormFieldSchema, FormSchema, Result};
use scraper::{ElementRef, Html};

use crate::dom::{attr, selector};

/// Input types that trigger an action rather than collect data.
const ACTION_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "image"];

/// One schema per `<form>` that has at least one data-collecting field.
pub fn form_schema(doc: &Html) -> Result<Vec<FormSchema>> {
    let form_sel = selector("form")?;
    let field_sel = selector("input, textarea, select")?;

    Ok(doc
        .select(&form_sel)
        .filter_map(|form| {
            let fields: Vec<FormFieldSchema> =
                form.select(&field_sel).filter_map(field_schema).collect();
            if fields.is_empty() {
                return None;
            }
            Some(FormSchema {
                id: attr(form, "id"),
                action: attr(form, "action"),
                method: attr(form, "method")
                    .map(|m| m.to_ascii_lowercase())
                    .unwrap_or_else(|| "get".to_string()),
                fields,
            })
        })
        .collect())
}

/// A qualifying field collects data and is named by `name` or, failing
/// that, `id`.
fn field_schema(el: ElementRef<'_>) -> Option<FormFieldSchema> {
    let tag = el.value().name().to_ascii_lowercase();
    let field_type = if tag == "input" {
        attr(el, "type")
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string())
    } else {
        tag
    };
    if ACTION_INPUT_TYPES.contains(&field_type.as_str()) {
        return None;
    }

    let name = attr(el, "name").or_else(|| attr(el, "id"))?;

    Some(FormFieldSchema {
        name,
        placeholder: attr(el, "placeholder"),
        required: el.value().attr("required").is_some(),
        field_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_forms_three_schemas() {
        let doc = Html::parse_document(
            r#"<form id="login" action="/login" method="POST">
                 <input type="email" name="email" required>
                 <input type="password" name="password" required>
                 <button type="submit">Sign in</button>
               </form>
               <form action="/search">
                 <input name="q" placeholder="Search">
               </form>
               <form id="contact">
                 <input id="full-name">
                 <textarea name="message" required></textarea>
                 <select name="topic"></select>
                 <input type="submit" value="Send">
               </form>"#,
        );
        let forms = form_schema(&doc).unwrap();

        assert_eq!(forms.len(), 3);

        assert_eq!(forms[0].id.as_deref(), Some("login"));
        assert_eq!(forms[0].method, "post");
        assert_eq!(forms[0].fields.len(), 2);
        assert!(forms[0].fields.iter().all(|f| f.required));

        assert_eq!(forms[1].id, None);
        assert_eq!(forms[1].method, "get");
        assert_eq!(forms[1].fields.len(), 1);
        assert_eq!(forms[1].fields[0].placeholder.as_deref(), Some("Search"));
        assert!(!forms[1].fields[0].required);

        let contact = &forms[2];
        assert_eq!(contact.fields.len(), 3);
        assert_eq!(contact.fields[0].name, "full-name");
        assert_eq!(contact.fields[0].field_type, "text");
        assert_eq!(
            contact.fields.iter().map(|f| f.required).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(contact.fields[2].field_type, "select");
    }

    #[test]
    fn forms_with_only_action_inputs_are_skipped() {
        let doc = Html::parse_document(
            r#"<form><input type="submit"><input type="reset"><input type="image" src="go.png"></form>
               <form></form>"#,
        );
        assert!(form_schema(&doc).unwrap().is_empty());
    }

    #[test]
    fn anonymous_fields_do_not_qualify() {
        let doc = Html::parse_document(
            r#"<form><input placeholder="Email"><select></select></form>
               <form><input placeholder="Name"><input name="email" type="email"></form>"#,
        );
        let forms = form_schema(&doc).unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].fields.len(), 1);
        assert_eq!(forms[0].fields[0].name, "email");
        assert_eq!(forms[0].fields[0].field_type, "email");
    }
}
