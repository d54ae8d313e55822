//! Date picker

use super::{BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

#[derive(Debug, Default, Clone, Copy)]
pub struct DateRenderer;

impl FieldRenderer for DateRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Date
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Date(fields) = &field.element().kind else {
            return None;
        };
        let control = Control::Date {
            default_hint: fields.default_value.as_ref().map(|p| p.value.clone()),
        };
        Some(field.view(state, control))
    }
}
