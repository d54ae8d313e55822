//! Single-line text input

use super::{BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl FieldRenderer for TextRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Text(fields) = &field.element().kind else {
            return None;
        };
        let control = Control::Text {
            input_type: fields.input_type.as_ref().map(|p| p.value).unwrap_or_default(),
            placeholder: fields.placeholder.as_ref().map(|p| p.value.clone()).unwrap_or_default(),
        };
        Some(field.view(state, control))
    }
}
