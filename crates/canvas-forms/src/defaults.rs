//! Initial values for freshly initialized forms

use crate::definition::{ChoiceFields, ElementKind, FormElement};

/// First option flagged `default`, in declaration order. Hidden options take
/// part in the scan.
fn choice_default(fields: &ChoiceFields) -> String {
    fields
        .options()
        .iter()
        .find(|option| option.is_default())
        .map(|option| option.effective_value().to_string())
        .unwrap_or_default()
}

/// Initial value for `element`, or `None` for buttons, which get no state entry.
pub fn compute_default(element: &FormElement, default_color: &str) -> Option<String> {
    match &element.kind {
        ElementKind::Dropdown(fields) | ElementKind::Radio(fields) => Some(choice_default(fields)),
        ElementKind::Color(_) => Some(default_color.to_string()),
        ElementKind::SubmitButton(_) => None,
        ElementKind::Text(_)
        | ElementKind::Numeric(_)
        | ElementKind::Checkbox(_)
        | ElementKind::Date(_)
        | ElementKind::Time(_) => Some(String::new()),
    }
}
