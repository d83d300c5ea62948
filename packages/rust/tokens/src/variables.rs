//! Custom property extraction from the style tree.

use std::collections::BTreeMap;

use brandscope_styles::StyleSheet;

/// `--name: value` declarations keyed by name. Later declarations win.
pub fn css_variables(sheet: Option<&StyleSheet>) -> BTreeMap<String, String> {
    sheet
        .map(|sheet| {
            sheet
                .declarations()
                .into_iter()
                .filter(|decl| decl.is_custom_property())
                .map(|decl| (decl.property.clone(), decl.raw.clone()))
                .collect()
        })
        .unwrap_or_default()
}
