//! Select box

use super::{option_views, BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

/// Every option is rendered; hidden and disabled ones carry their flags so
/// they cannot be picked.
#[derive(Debug, Default, Clone, Copy)]
pub struct DropdownRenderer;

impl FieldRenderer for DropdownRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Dropdown
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Dropdown(fields) = &field.element().kind else {
            return None;
        };
        let current = state.value(field.identifier());
        let control = Control::Dropdown {
            options: option_views(field, fields.options(), current, true),
        };
        Some(field.view(state, control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::*;
    use crate::fields::FieldInput;
    use crate::store::FormStore;

    fn country() -> FormElement {
        FormElement::new(
            ElementKind::Dropdown(ChoiceFields {
                identifier: Some(Param::new("Country".into())),
                required: Some(Param::new(true)),
                options: Some(Param::new(vec![
                    ChoiceOption::new(
                        "none",
                        "Select a country",
                        &[OptionFlag::Default, OptionFlag::Hidden, OptionFlag::Disabled],
                    ),
                    ChoiceOption::new("de", "Germany", &[]),
                    ChoiceOption::new("fr", "France", &[OptionFlag::Disabled]),
                ])),
                ..Default::default()
            }),
            0,
        )
    }

    #[test]
    fn test_placeholder_option_selected_and_invalid() {
        let store = FormStore::default();
        let element = country();
        store.initialize_form(std::slice::from_ref(&element));
        let field = BoundField::mount(&store, &element).unwrap();

        let view = DropdownRenderer.render(&field, &store.snapshot()).unwrap();
        assert_eq!(view.value, "");
        assert!(view.invalid);
        let Control::Dropdown { options } = view.control else {
            panic!("not a dropdown");
        };
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "");
        assert!(options[0].selected && options[0].hidden && options[0].disabled);
        assert!(options[2].disabled && !options[2].hidden);
    }

    #[test]
    fn test_selection_follows_store() {
        let store = FormStore::default();
        let element = country();
        store.initialize_form(std::slice::from_ref(&element));
        let field = BoundField::mount(&store, &element).unwrap();

        field.input(&store, FieldInput::Text("de".into()));
        let view = DropdownRenderer.render(&field, &store.snapshot()).unwrap();
        let Control::Dropdown { options } = view.control else {
            panic!("not a dropdown");
        };
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.value.as_str()).collect();
        assert_eq!(selected, vec!["de"]);
        assert!(!view.invalid);
    }
}
