//! Single checkbox

use super::{BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

#[derive(Debug, Default, Clone, Copy)]
pub struct CheckboxRenderer;

impl FieldRenderer for CheckboxRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Checkbox
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Checkbox(_) = &field.element().kind else {
            return None;
        };
        let checked = state.value(field.identifier()) == "true";
        Some(field.view(state, Control::Checkbox { checked }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::*;
    use crate::fields::FieldInput;
    use crate::store::FormStore;

    #[test]
    fn test_checked_round_trips_through_store() {
        let store = FormStore::default();
        let element = FormElement::new(
            ElementKind::Checkbox(BasicFields {
                identifier: Some(Param::new("Newsletter".into())),
                ..Default::default()
            }),
            0,
        );
        store.initialize_form(std::slice::from_ref(&element));
        let field = BoundField::mount(&store, &element).unwrap();

        let view = CheckboxRenderer.render(&field, &store.snapshot()).unwrap();
        assert_eq!(view.control, Control::Checkbox { checked: false });

        field.input(&store, FieldInput::Checked(true));
        let view = CheckboxRenderer.render(&field, &store.snapshot()).unwrap();
        assert_eq!(view.control, Control::Checkbox { checked: true });
        assert_eq!(view.value, "true");

        field.input(&store, FieldInput::Checked(false));
        assert_eq!(store.snapshot().value("newsletter"), "false");
    }
}
