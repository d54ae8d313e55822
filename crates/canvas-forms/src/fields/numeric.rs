//! Number and range inputs

use super::{BoundField, Control, FieldRenderer, FieldView};
use crate::definition::{ElementKind, FieldKind};
use crate::store::FormState;

#[derive(Debug, Default, Clone, Copy)]
pub struct NumericRenderer;

impl FieldRenderer for NumericRenderer {
    fn kind(&self) -> FieldKind {
        FieldKind::Numeric
    }

    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        let ElementKind::Numeric(fields) = &field.element().kind else {
            return None;
        };
        let control = Control::Numeric {
            input_type: fields.input_type.as_ref().map(|p| p.value).unwrap_or_default(),
            placeholder: fields.placeholder.as_ref().map(|p| p.value.clone()).unwrap_or_default(),
            minimum: fields.minimum.as_ref().map(|p| p.value),
            maximum: fields.maximum.as_ref().map(|p| p.value),
            step: fields.step.as_ref().map(|p| p.value),
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

    #[test]
    fn test_range_config_and_decimal_values() {
        let store = FormStore::default();
        let element = FormElement::new(
            ElementKind::Numeric(NumericFields {
                identifier: Some(Param::new("Team Size".into())),
                input_type: Some(Param::new(NumericInputType::Range)),
                minimum: Some(Param::new(1.0)),
                maximum: Some(Param::new(50.0)),
                step: Some(Param::new(0.5)),
                ..Default::default()
            }),
            0,
        );
        store.initialize_form(std::slice::from_ref(&element));
        let field = BoundField::mount(&store, &element).unwrap();

        field.input(&store, FieldInput::Number(12.5));
        let view = NumericRenderer.render(&field, &store.snapshot()).unwrap();
        assert_eq!(view.value, "12.5");
        assert!(!view.invalid);
        match view.control {
            Control::Numeric { input_type, minimum, maximum, step, .. } => {
                assert_eq!(input_type, NumericInputType::Range);
                assert_eq!((minimum, maximum, step), (Some(1.0), Some(50.0), Some(0.5)));
            }
            other => panic!("unexpected control {:?}", other),
        }
    }
}
