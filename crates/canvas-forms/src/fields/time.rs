//! Time picker

use super::{BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

#[derive(Debug, Default, Clone, Copy)]
pub struct TimeRenderer;

impl FieldRenderer for TimeRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Time
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Time(_) = &field.element().kind else {
            return None;
        };
        Some(field.view(state, Control::Time))
    }
}
