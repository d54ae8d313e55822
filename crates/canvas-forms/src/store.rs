//! Form state store
//!
//! A single mapping from field identifier to `{ index, value }`, shared by the
//! hosting form, every mounted field and the submission controller. All
//! mutations go through [`reduce`], so each `set_value`/`reset` replaces the
//! state under one write lock and readers never see a half-applied update.

use crate::config::DEFAULT_COLOR;
use crate::defaults::compute_default;
use crate::definition::{FieldKind, FormElement};
use crate::error::{FormError, Result};
use crate::identifier::IdentifierNormalizer;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// State of one field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Identifier → field state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, FieldState>);

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &str) -> Option<&FieldState> {
        self.0.get(identifier)
    }

    /// Current value, `""` when the field has no entry or no value
    pub fn value(&self, identifier: &str) -> &str {
        self.0
            .get(identifier)
            .and_then(|s| s.value.as_deref())
            .unwrap_or("")
    }

    pub fn insert(&mut self, identifier: impl Into<String>, state: FieldState) {
        self.0.insert(identifier.into(), state);
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.0.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldState)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldState)> for FormState {
    fn from_iter<I: IntoIterator<Item = (String, FieldState)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Store mutations
#[derive(Clone, Debug, PartialEq)]
pub enum FormAction {
    SetValue { name: String, value: String },
    Reset(FormState),
}

/// Apply `action` to `state`. `SetValue` keeps an existing index.
pub fn reduce(mut state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetValue { name, value } => {
            state.0.entry(name).or_default().value = Some(value);
            state
        }
        FormAction::Reset(next) => next,
    }
}

/// Element together with the identifier it was bound to at initialization
#[derive(Clone, Debug, PartialEq)]
pub struct BoundElement {
    pub identifier: String,
    pub element: FormElement,
}

/// Shared form state
#[derive(Debug)]
pub struct FormStore {
    state: RwLock<FormState>,
    elements: RwLock<Vec<BoundElement>>,
    normalizer: IdentifierNormalizer,
    default_color: String,
}

impl FormStore {
    pub fn new(normalizer: IdentifierNormalizer, default_color: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(FormState::new()),
            elements: RwLock::new(Vec::new()),
            normalizer,
            default_color: default_color.into(),
        }
    }

    pub fn normalizer(&self) -> &IdentifierNormalizer {
        &self.normalizer
    }

    /// Entry for `identifier`
    pub fn get(&self, identifier: &str) -> Option<FieldState> {
        self.state.read().get(identifier).cloned()
    }

    /// Copy of the whole state
    pub fn snapshot(&self) -> FormState {
        self.state.read().clone()
    }

    /// Upsert a field value
    pub fn set_value(&self, identifier: impl Into<String>, value: impl Into<String>) {
        self.dispatch(FormAction::SetValue {
            name: identifier.into(),
            value: value.into(),
        });
    }

    /// Replace the whole state
    pub fn reset(&self, state: FormState) {
        self.dispatch(FormAction::Reset(state));
    }

    fn dispatch(&self, action: FormAction) {
        let mut state = self.state.write();
        let current = std::mem::take(&mut *state);
        *state = reduce(current, action);
    }

    /// Bind identifiers to `elements` and replace the state with their
    /// default values. Entries of fields that are no longer part of the form
    /// disappear.
    pub fn initialize_form(&self, elements: &[FormElement]) {
        let bound: Vec<BoundElement> = elements
            .iter()
            .map(|element| BoundElement {
                identifier: self.normalizer.normalize(element.name()),
                element: element.clone(),
            })
            .collect();

        let defaults = self.defaults_for(&bound);
        debug!(fields = defaults.len(), "Initializing form state");

        *self.elements.write() = bound;
        self.reset(defaults);
    }

    /// Default state for the currently bound elements
    pub fn defaults(&self) -> FormState {
        self.defaults_for(&self.elements.read())
    }

    /// Reset to [`FormStore::defaults`]
    pub fn restore_defaults(&self) {
        let defaults = self.defaults();
        self.reset(defaults);
    }

    fn defaults_for(&self, bound: &[BoundElement]) -> FormState {
        bound
            .iter()
            .filter_map(|b| {
                compute_default(&b.element, &self.default_color).map(|value| {
                    (
                        b.identifier.clone(),
                        FieldState {
                            index: b.element.index,
                            value: Some(value),
                        },
                    )
                })
            })
            .collect()
    }

    /// Elements bound at the last initialization, in authoring order
    pub fn elements(&self) -> Vec<BoundElement> {
        self.elements.read().clone()
    }

    /// Identifier bound to the element at `index`
    pub fn identifier_for(&self, index: u32) -> Option<String> {
        self.elements
            .read()
            .iter()
            .find(|b| b.element.index == Some(index))
            .map(|b| b.identifier.clone())
    }

    /// Check every required field has a value. A required checkbox must be
    /// checked.
    pub fn validate(&self) -> Result<()> {
        let state = self.state.read();
        for bound in self.elements.read().iter() {
            let element = &bound.element;
            if element.is_button() || !element.required() {
                continue;
            }
            let value = state.value(&bound.identifier);
            let missing = match element.field_kind() {
                FieldKind::Checkbox => value != "true",
                _ => value.is_empty(),
            };
            if missing {
                return Err(FormError::Validation {
                    field: element.label().unwrap_or(&bound.identifier).to_string(),
                    reason: "this field is required".into(),
                });
            }
        }
        Ok(())
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(IdentifierNormalizer::default(), DEFAULT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::*;
    use crate::identifier::{SequentialIds, Separator};
    use std::sync::Arc;

    fn text(name: &str, index: u32) -> FormElement {
        FormElement::new(
            ElementKind::Text(TextFields {
                identifier: Some(Param::new(name.into())),
                ..Default::default()
            }),
            index,
        )
    }

    fn deterministic_store() -> FormStore {
        FormStore::new(
            IdentifierNormalizer::new(Separator::Dash, Arc::new(SequentialIds::new("field"))),
            DEFAULT_COLOR,
        )
    }

    #[test]
    fn test_reduce_set_value_keeps_index() {
        let mut state = FormState::new();
        state.insert("email", FieldState { index: Some(3), value: Some(String::new()) });

        let state = reduce(
            state,
            FormAction::SetValue { name: "email".into(), value: "a@b.com".into() },
        );
        assert_eq!(
            state.get("email"),
            Some(&FieldState { index: Some(3), value: Some("a@b.com".into()) })
        );

        let state = reduce(
            state,
            FormAction::SetValue { name: "new".into(), value: "x".into() },
        );
        assert_eq!(state.get("new"), Some(&FieldState { index: None, value: Some("x".into()) }));
    }

    #[test]
    fn test_initialize_form_seeds_defaults() {
        let store = deterministic_store();
        store.initialize_form(&[
            text("Email Address", 0),
            FormElement::new(ElementKind::Color(BasicFields::default()), 1),
            FormElement::new(ElementKind::SubmitButton(SubmitButtonFields::default()), 2),
        ]);

        let state = store.snapshot();
        assert_eq!(state.len(), 2);
        assert_eq!(
            store.get("email-address"),
            Some(FieldState { index: Some(0), value: Some(String::new()) })
        );
        assert_eq!(
            store.get("field-1"),
            Some(FieldState { index: Some(1), value: Some("#000000".into()) })
        );
        assert_eq!(store.identifier_for(1), Some("field-1".into()));
    }

    #[test]
    fn test_reinitialize_drops_stale_fields() {
        let store = deterministic_store();
        store.initialize_form(&[text("Field A", 0)]);
        store.set_value("field-a", "typed");

        store.initialize_form(&[text("Field B", 0)]);
        assert!(store.get("field-a").is_none());
        assert!(store.get("field-b").is_some());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_colliding_names_last_writer_wins() {
        let store = deterministic_store();
        store.initialize_form(&[text("E-mail", 0), text("e mail", 1)]);
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.get("e-mail").and_then(|s| s.index), Some(1));
    }

    #[test]
    fn test_restore_defaults_reuses_generated_identifiers() {
        let store = deterministic_store();
        store.initialize_form(&[FormElement::new(ElementKind::Time(BasicFields::default()), 0)]);
        store.set_value("field-1", "10:30");

        store.restore_defaults();
        assert_eq!(
            store.get("field-1"),
            Some(FieldState { index: Some(0), value: Some(String::new()) })
        );
    }

    #[test]
    fn test_validate_required_fields() {
        let store = deterministic_store();
        store.initialize_form(&[
            FormElement::new(
                ElementKind::Text(TextFields {
                    identifier: Some(Param::new("Name".into())),
                    label: Some(Param::new("Your name".into())),
                    required: Some(Param::new(true)),
                    ..Default::default()
                }),
                0,
            ),
            FormElement::new(
                ElementKind::Checkbox(BasicFields {
                    identifier: Some(Param::new("Terms".into())),
                    required: Some(Param::new(true)),
                    ..Default::default()
                }),
                1,
            ),
        ]);

        match store.validate() {
            Err(FormError::Validation { field, .. }) => assert_eq!(field, "Your name"),
            other => panic!("unexpected {:?}", other),
        }

        store.set_value("name", "Ada");
        store.set_value("terms", "false");
        assert!(matches!(store.validate(), Err(FormError::Validation { field, .. }) if field == "terms"));

        store.set_value("terms", "true");
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_state_serializes_as_object() {
        let mut state = FormState::new();
        state.insert("email", FieldState { index: Some(0), value: Some("a@b.com".into()) });
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({ "email": { "index": 0, "value": "a@b.com" } })
        );
    }
}
