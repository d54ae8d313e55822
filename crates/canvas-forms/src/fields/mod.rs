//! Field renderers
//!
//! One renderer per field kind. A renderer turns a mounted field plus the
//! current store contents into a [`FieldView`]; it never keeps a value of its
//! own, so what it shows is always what the store holds. User interaction
//! flows back through [`BoundField::input`], which writes the serialized value
//! with `FormStore::set_value`.

mod checkbox;
mod color;
mod date;
mod dropdown;
mod numeric;
mod radio;
mod text;
mod time;

pub use checkbox::CheckboxRenderer;
pub use color::ColorRenderer;
pub use date::DateRenderer;
pub use dropdown::DropdownRenderer;
pub use numeric::NumericRenderer;
pub use radio::RadioRenderer;
pub use text::TextRenderer;
pub use time::TimeRenderer;

use crate::definition::{ChoiceOption, FieldKind, FormElement, NumericInputType, TextInputType};
use crate::identifier::{sanitize_name, Separator};
use crate::store::{BoundElement, FormState, FormStore};
use serde::Serialize;
use std::collections::HashMap;

/// A user interaction with a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
    Number(f64),
}

impl FieldInput {
    /// Store representation: booleans as `"true"`/`"false"`, numbers in
    /// decimal form. A non-finite number is stored as `""`.
    pub fn serialize(&self) -> String {
        match self {
            FieldInput::Text(text) => text.clone(),
            FieldInput::Checked(checked) => checked.to_string(),
            FieldInput::Number(n) if n.is_finite() => n.to_string(),
            FieldInput::Number(_) => String::new(),
        }
    }
}

/// Rendered option of a dropdown or radio field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub id: String,
    pub value: String,
    pub label: String,
    pub hidden: bool,
    pub disabled: bool,
    pub selected: bool,
}

/// Type-specific part of a rendered field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum Control {
    Text {
        input_type: TextInputType,
        placeholder: String,
    },
    Numeric {
        input_type: NumericInputType,
        placeholder: String,
        minimum: Option<f64>,
        maximum: Option<f64>,
        step: Option<f64>,
    },
    Dropdown {
        options: Vec<OptionView>,
    },
    Radio {
        options: Vec<OptionView>,
    },
    Checkbox {
        checked: bool,
    },
    Date {
        /// Authored default, shown as a hint only
        default_hint: Option<String>,
    },
    Time,
    Color,
}

/// What a field shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub identifier: String,
    pub label: Option<String>,
    pub required: bool,
    /// `required` and the value is empty
    pub invalid: bool,
    pub value: String,
    pub control: Control,
}

/// A field mounted against a store, with its identifier fixed
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    identifier: String,
    element: FormElement,
    separator: Separator,
}

impl BoundField {
    fn bind(bound: BoundElement, separator: Separator) -> Self {
        Self {
            identifier: bound.identifier,
            element: bound.element,
            separator,
        }
    }

    /// One field per element bound at the store's last initialization, in
    /// the same order, each under the identifier the store seeded for it.
    pub fn mount_all(store: &FormStore) -> Vec<Self> {
        let separator = store.normalizer().separator();
        store
            .elements()
            .into_iter()
            .map(|bound| Self::bind(bound, separator))
            .collect()
    }

    /// The field for `element`, if the store bound it at initialization
    pub fn mount(store: &FormStore, element: &FormElement) -> Option<Self> {
        let separator = store.normalizer().separator();
        store
            .elements()
            .into_iter()
            .find(|bound| bound.element == *element)
            .map(|bound| Self::bind(bound, separator))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn element(&self) -> &FormElement {
        &self.element
    }

    pub fn kind(&self) -> FieldKind {
        self.element.field_kind()
    }

    /// Record a user interaction
    pub fn input(&self, store: &FormStore, input: FieldInput) {
        store.set_value(self.identifier.clone(), input.serialize());
    }

    fn view(&self, state: &FormState, control: Control) -> FieldView {
        let value = state.value(&self.identifier).to_string();
        let required = self.element.required();
        FieldView {
            identifier: self.identifier.clone(),
            label: self.element.label().map(str::to_string),
            required,
            invalid: required && value.is_empty(),
            value,
            control,
        }
    }
}

/// Option views for a choice field. Hidden options are dropped unless
/// `keep_hidden` is set.
fn option_views(
    field: &BoundField,
    options: &[ChoiceOption],
    current: &str,
    keep_hidden: bool,
) -> Vec<OptionView> {
    let field_id = field.identifier();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| keep_hidden || !option.is_hidden())
        .map(|(index, option)| {
            let id = option
                .identifier()
                .map(|raw| sanitize_name(raw, field.separator))
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| {
                    let sep = field.separator.as_char();
                    format!("{}{}option{}{}", field_id, sep, sep, index)
                });
            let value = option.effective_value().to_string();
            OptionView {
                id,
                selected: value == current,
                value,
                label: option.label().to_string(),
                hidden: option.is_hidden(),
                disabled: option.is_disabled(),
            }
        })
        .collect()
}

/// Renders one field kind
pub trait FieldRenderer: Send + Sync {
    fn kind(&self) -> FieldKind;

    /// `None` when `field` is not of this renderer's kind
    fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView>;
}

/// Field kind → renderer
pub struct RendererRegistry {
    renderers: HashMap<FieldKind, Box<dyn FieldRenderer>>,
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Registry with a renderer for every field kind
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(TextRenderer));
        registry.register(Box::new(NumericRenderer));
        registry.register(Box::new(DropdownRenderer));
        registry.register(Box::new(CheckboxRenderer));
        registry.register(Box::new(RadioRenderer));
        registry.register(Box::new(DateRenderer));
        registry.register(Box::new(TimeRenderer));
        registry.register(Box::new(ColorRenderer));
        registry
    }

    /// Replaces any renderer already registered for the same kind
    pub fn register(&mut self, renderer: Box<dyn FieldRenderer>) {
        self.renderers.insert(renderer.kind(), renderer);
    }

    pub fn get(&self, kind: FieldKind) -> Option<&dyn FieldRenderer> {
        self.renderers.get(&kind).map(|r| r.as_ref())
    }

    pub fn render(&self, field: &BoundField, state: &FormState) -> Option<FieldView> {
        self.get(field.kind())?.render(field, state)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
