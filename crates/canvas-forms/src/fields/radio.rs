//! Radio group

use super::{option_views, BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

/// Hidden options are left out of the group entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct RadioRenderer;

impl FieldRenderer for RadioRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Radio
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Radio(fields) = &field.element().kind else {
            return None;
        };
        let current = state.value(field.identifier());
        let control = Control::Radio {
            options: option_views(field, fields.options(), current, false),
        };
        Some(field.view(state, control))
    }
}
