//! Colour picker

use super::{BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

#[derive(Debug, Default, Clone, Copy)]
pub struct ColorRenderer;

impl FieldRenderer for ColorRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Color
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Color(_) = &field.element().kind else {
            return None;
        };
        Some(field.view(state, Control::Color))
    }
}
