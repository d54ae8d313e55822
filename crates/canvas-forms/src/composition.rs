//! Extraction of form elements from a CMS composition tree

use crate::definition::{FormElement, FormEventAction, RawElement};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Slot holding the form's fields
pub const FIELDS_SLOT: &str = "formFields";
/// Slot holding the form's buttons
pub const BUTTONS_SLOT: &str = "formButtons";

/// One node of a composition
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ComponentInstance {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub slots: HashMap<String, Vec<ComponentInstance>>,
}

impl ComponentInstance {
    fn string_parameter(&self, name: &str) -> Option<String> {
        self.parameters
            .get(name)
            .and_then(|p| p.get("value"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

/// Form-level parameters of the hosting form component
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormProps {
    pub form_name: String,
    pub form_identifier: String,
    pub form_actions: Vec<FormEventAction>,
}

impl FormProps {
    pub fn from_component(component: &ComponentInstance) -> Self {
        let form_actions = component
            .parameters
            .get("formActions")
            .and_then(|p| p.get("value"))
            .cloned()
            .map(|value| {
                serde_json::from_value::<Vec<FormEventAction>>(value).unwrap_or_else(|e| {
                    warn!(error = %e, "Ignoring malformed formActions parameter");
                    Vec::new()
                })
            })
            .unwrap_or_default();

        Self {
            form_name: component.string_parameter("formName").unwrap_or_default(),
            form_identifier: component.string_parameter("formIdentifier").unwrap_or_default(),
            form_actions,
        }
    }
}

/// Fields then buttons, in authoring order, indexed by position.
/// Components of unknown type are skipped.
pub fn extract_form_elements(component: &ComponentInstance) -> Vec<FormElement> {
    let fields = component.slots.get(FIELDS_SLOT).map(Vec::as_slice).unwrap_or(&[]);
    let buttons = component.slots.get(BUTTONS_SLOT).map(Vec::as_slice).unwrap_or(&[]);

    fields
        .iter()
        .chain(buttons.iter())
        .enumerate()
        .filter_map(|(index, instance)| {
            let raw = RawElement {
                element_type: instance.component_type.clone(),
                fields: serde_json::to_value(&instance.parameters).unwrap_or_default(),
                index: Some(index as u32),
            };
            match FormElement::try_from(raw) {
                Ok(element) => Some(element),
                Err(e) => {
                    warn!(component = %instance.component_type, error = %e, "Skipping form element");
                    None
                }
            }
        })
        .collect()
}
