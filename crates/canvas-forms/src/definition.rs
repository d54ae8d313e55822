//! Form field definitions as authored in the CMS
//!
//! Every attribute arrives wrapped as `{ "value": T }`. The element's `type`
//! decides which attributes are read; anything else in `fields` is ignored.

use crate::error::FormError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

// =============================================================================
// Attribute wrappers
// =============================================================================

/// One CMS parameter, `{ "value": T }`. Extra keys such as the parameter's
/// own `type` are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param<T> {
    pub value: T,
}

impl<T> Param<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

fn param_str(param: &Option<Param<String>>) -> Option<&str> {
    param.as_ref().map(|p| p.value.as_str())
}

fn param_flag(param: &Option<Param<bool>>) -> bool {
    param.as_ref().map(|p| p.value).unwrap_or(false)
}

/// An attribute whose value doesn't fit its type is dropped, not the element.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<Param<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(param) = Option::<Param<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value(param.value) {
        Ok(value) => Ok(Some(Param::new(value))),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable field attribute");
            Ok(None)
        }
    }
}

/// Numbers may also arrive as numeric strings (`"18"`).
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Param<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(param) = Option::<Param<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let number = match &param.value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    };
    if number.is_none() {
        warn!(value = %param.value, "Ignoring non-numeric field attribute");
    }
    Ok(number.map(Param::new))
}

/// Unknown option flags are skipped, the known ones kept.
fn lenient_flags<'de, D>(deserializer: D) -> Result<Option<Param<Vec<OptionFlag>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(param) = Option::<Param<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let serde_json::Value::Array(raw) = param.value else {
        warn!(value = %param.value, "Ignoring option flags that are not a list");
        return Ok(None);
    };
    let flags = raw
        .into_iter()
        .filter_map(|flag| match serde_json::from_value::<OptionFlag>(flag.clone()) {
            Ok(flag) => Some(flag),
            Err(_) => {
                warn!(flag = %flag, "Ignoring unknown option flag");
                None
            }
        })
        .collect();
    Ok(Some(Param::new(flags)))
}

// =============================================================================
// Field kinds
// =============================================================================

/// Tag of every supported element type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "formTextField")]
    Text,
    #[serde(rename = "formNumericField")]
    Numeric,
    #[serde(rename = "formDropdownField")]
    Dropdown,
    #[serde(rename = "formCheckboxField")]
    Checkbox,
    #[serde(rename = "formRadioField")]
    Radio,
    #[serde(rename = "formDateField")]
    Date,
    #[serde(rename = "formTimeField")]
    Time,
    #[serde(rename = "formColorField")]
    Color,
    #[serde(rename = "formSubmitButton")]
    SubmitButton,
}

impl FieldKind {
    pub const FIELDS: [FieldKind; 8] = [
        FieldKind::Text,
        FieldKind::Numeric,
        FieldKind::Dropdown,
        FieldKind::Checkbox,
        FieldKind::Radio,
        FieldKind::Date,
        FieldKind::Time,
        FieldKind::Color,
    ];

    /// CMS component type name
    pub fn type_name(self) -> &'static str {
        match self {
            FieldKind::Text => "formTextField",
            FieldKind::Numeric => "formNumericField",
            FieldKind::Dropdown => "formDropdownField",
            FieldKind::Checkbox => "formCheckboxField",
            FieldKind::Radio => "formRadioField",
            FieldKind::Date => "formDateField",
            FieldKind::Time => "formTimeField",
            FieldKind::Color => "formColorField",
            FieldKind::SubmitButton => "formSubmitButton",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        FieldKind::FIELDS
            .into_iter()
            .chain(std::iter::once(FieldKind::SubmitButton))
            .find(|kind| kind.type_name() == name)
    }

    pub fn is_button(self) -> bool {
        matches!(self, FieldKind::SubmitButton)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// =============================================================================
// Type-specific attribute sets
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextInputType {
    #[default]
    Text,
    Number,
    Email,
    Password,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericInputType {
    #[default]
    Number,
    Range,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFields {
    pub identifier: Option<Param<String>>,
    pub label: Option<Param<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<Param<bool>>,
    pub placeholder: Option<Param<String>>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub input_type: Option<Param<TextInputType>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericFields {
    pub identifier: Option<Param<String>>,
    pub label: Option<Param<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<Param<bool>>,
    pub placeholder: Option<Param<String>>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub input_type: Option<Param<NumericInputType>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub minimum: Option<Param<f64>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub maximum: Option<Param<f64>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub step: Option<Param<f64>>,
}

/// Shared by dropdown and radio fields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceFields {
    pub identifier: Option<Param<String>>,
    pub label: Option<Param<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<Param<bool>>,
    pub options: Option<Param<Vec<ChoiceOption>>>,
}

impl ChoiceFields {
    pub fn options(&self) -> &[ChoiceOption] {
        self.options.as_ref().map(|p| p.value.as_slice()).unwrap_or(&[])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFields {
    pub identifier: Option<Param<String>>,
    pub label: Option<Param<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<Param<bool>>,
    pub default_value: Option<Param<String>>,
}

/// Checkbox, time and colour fields carry only the common attributes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicFields {
    pub identifier: Option<Param<String>>,
    pub label: Option<Param<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<Param<bool>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitButtonFields {
    pub identifier: Option<Param<String>>,
    pub label: Option<Param<String>>,
    pub include_in_response: Option<Param<bool>>,
}

// =============================================================================
// Choice options
// =============================================================================

/// Flag an author can put on a dropdown or radio option
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionFlag {
    Default,
    Hidden,
    Disabled,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOptionFields {
    pub identifier: Option<Param<String>>,
    pub label: Option<Param<String>>,
    pub value: Option<Param<String>>,
    #[serde(default, deserialize_with = "lenient_flags")]
    pub options: Option<Param<Vec<OptionFlag>>>,
}

/// One option of a dropdown or radio field
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(default)]
    pub fields: ChoiceOptionFields,
}

impl ChoiceOption {
    pub fn new(value: &str, label: &str, flags: &[OptionFlag]) -> Self {
        Self {
            fields: ChoiceOptionFields {
                identifier: None,
                label: Some(Param::new(label.to_string())),
                value: Some(Param::new(value.to_string())),
                options: (!flags.is_empty()).then(|| Param::new(flags.to_vec())),
            },
        }
    }

    pub fn has_flag(&self, flag: OptionFlag) -> bool {
        self.fields
            .options
            .as_ref()
            .map(|p| p.value.contains(&flag))
            .unwrap_or(false)
    }

    pub fn is_default(&self) -> bool {
        self.has_flag(OptionFlag::Default)
    }

    pub fn is_hidden(&self) -> bool {
        self.has_flag(OptionFlag::Hidden)
    }

    pub fn is_disabled(&self) -> bool {
        self.has_flag(OptionFlag::Disabled)
    }

    pub fn identifier(&self) -> Option<&str> {
        param_str(&self.fields.identifier)
    }

    pub fn label(&self) -> &str {
        param_str(&self.fields.label).unwrap_or("")
    }

    /// Authored value, `""` when absent
    pub fn raw_value(&self) -> &str {
        param_str(&self.fields.value).unwrap_or("")
    }

    /// Value submitted when this option is chosen. An option flagged
    /// `default`, `hidden` and `disabled` at once is a "no real default"
    /// placeholder and submits `""`.
    pub fn effective_value(&self) -> &str {
        if self.is_default() && self.is_hidden() && self.is_disabled() {
            ""
        } else {
            self.raw_value()
        }
    }
}

// =============================================================================
// Elements
// =============================================================================

/// Typed attributes of one form element
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    Text(TextFields),
    Numeric(NumericFields),
    Dropdown(ChoiceFields),
    Checkbox(BasicFields),
    Radio(ChoiceFields),
    Date(DateFields),
    Time(BasicFields),
    Color(BasicFields),
    SubmitButton(SubmitButtonFields),
}

/// Wire shape of an element: `{ "type", "fields", "index" }`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawElement {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub fields: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// One form field or button, in authoring order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElement", into = "RawElement")]
pub struct FormElement {
    pub kind: ElementKind,
    pub index: Option<u32>,
}

fn fields_or_default<T>(fields: serde_json::Value) -> Result<T, serde_json::Error>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if fields.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(fields)
    }
}

impl TryFrom<RawElement> for FormElement {
    type Error = FormError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let kind = FieldKind::from_type_name(&raw.element_type).ok_or_else(|| {
            FormError::InvalidElement(format!("unknown element type {}", raw.element_type))
        })?;
        let fields = raw.fields;
        let parsed = match kind {
            FieldKind::Text => fields_or_default(fields).map(ElementKind::Text),
            FieldKind::Numeric => fields_or_default(fields).map(ElementKind::Numeric),
            FieldKind::Dropdown => fields_or_default(fields).map(ElementKind::Dropdown),
            FieldKind::Checkbox => fields_or_default(fields).map(ElementKind::Checkbox),
            FieldKind::Radio => fields_or_default(fields).map(ElementKind::Radio),
            FieldKind::Date => fields_or_default(fields).map(ElementKind::Date),
            FieldKind::Time => fields_or_default(fields).map(ElementKind::Time),
            FieldKind::Color => fields_or_default(fields).map(ElementKind::Color),
            FieldKind::SubmitButton => fields_or_default(fields).map(ElementKind::SubmitButton),
        };
        let kind = parsed.map_err(|e| FormError::InvalidElement(format!("{}: {}", kind, e)))?;
        Ok(FormElement {
            kind,
            index: raw.index,
        })
    }
}

impl From<FormElement> for RawElement {
    fn from(element: FormElement) -> Self {
        let element_type = element.field_kind().type_name().to_string();
        let fields = match &element.kind {
            ElementKind::Text(f) => serde_json::to_value(f),
            ElementKind::Numeric(f) => serde_json::to_value(f),
            ElementKind::Dropdown(f) | ElementKind::Radio(f) => serde_json::to_value(f),
            ElementKind::Checkbox(f) | ElementKind::Time(f) | ElementKind::Color(f) => {
                serde_json::to_value(f)
            }
            ElementKind::Date(f) => serde_json::to_value(f),
            ElementKind::SubmitButton(f) => serde_json::to_value(f),
        }
        .unwrap_or(serde_json::Value::Null);
        RawElement {
            element_type,
            fields,
            index: element.index,
        }
    }
}

impl FormElement {
    pub fn new(kind: ElementKind, index: u32) -> Self {
        Self {
            kind,
            index: Some(index),
        }
    }

    pub fn field_kind(&self) -> FieldKind {
        match &self.kind {
            ElementKind::Text(_) => FieldKind::Text,
            ElementKind::Numeric(_) => FieldKind::Numeric,
            ElementKind::Dropdown(_) => FieldKind::Dropdown,
            ElementKind::Checkbox(_) => FieldKind::Checkbox,
            ElementKind::Radio(_) => FieldKind::Radio,
            ElementKind::Date(_) => FieldKind::Date,
            ElementKind::Time(_) => FieldKind::Time,
            ElementKind::Color(_) => FieldKind::Color,
            ElementKind::SubmitButton(_) => FieldKind::SubmitButton,
        }
    }

    pub fn is_button(&self) -> bool {
        self.field_kind().is_button()
    }

    /// Author-supplied name the identifier is derived from
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(f) => param_str(&f.identifier),
            ElementKind::Numeric(f) => param_str(&f.identifier),
            ElementKind::Dropdown(f) | ElementKind::Radio(f) => param_str(&f.identifier),
            ElementKind::Checkbox(f) | ElementKind::Time(f) | ElementKind::Color(f) => {
                param_str(&f.identifier)
            }
            ElementKind::Date(f) => param_str(&f.identifier),
            ElementKind::SubmitButton(f) => param_str(&f.identifier),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(f) => param_str(&f.label),
            ElementKind::Numeric(f) => param_str(&f.label),
            ElementKind::Dropdown(f) | ElementKind::Radio(f) => param_str(&f.label),
            ElementKind::Checkbox(f) | ElementKind::Time(f) | ElementKind::Color(f) => {
                param_str(&f.label)
            }
            ElementKind::Date(f) => param_str(&f.label),
            ElementKind::SubmitButton(f) => param_str(&f.label),
        }
    }

    pub fn required(&self) -> bool {
        match &self.kind {
            ElementKind::Text(f) => param_flag(&f.required),
            ElementKind::Numeric(f) => param_flag(&f.required),
            ElementKind::Dropdown(f) | ElementKind::Radio(f) => param_flag(&f.required),
            ElementKind::Checkbox(f) | ElementKind::Time(f) | ElementKind::Color(f) => {
                param_flag(&f.required)
            }
            ElementKind::Date(f) => param_flag(&f.required),
            ElementKind::SubmitButton(_) => false,
        }
    }
}

// =============================================================================
// Post-submit actions
// =============================================================================

pub const SET_QUIRK_ACTION: &str = "formSetQuirkAction";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEventActionFields {
    pub name: Option<Param<String>>,
    pub quirk_name: Option<Param<String>>,
    pub quirk_value: Option<Param<String>>,
}

/// Action as configured on the form in the CMS
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormEventAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub fields: Option<FormEventActionFields>,
}

impl FormEventAction {
    pub fn set_quirk(name: &str, value: &str) -> Self {
        Self {
            action_type: SET_QUIRK_ACTION.into(),
            fields: Some(FormEventActionFields {
                name: None,
                quirk_name: Some(Param::new(name.into())),
                quirk_value: Some(Param::new(value.into())),
            }),
        }
    }
}

/// Recognized action applied after a successful submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostSubmitAction {
    SetQuirk { name: String, value: String },
}

impl PostSubmitAction {
    /// `None` for unrecognized types and for quirk actions missing a name or value.
    pub fn from_event(action: &FormEventAction) -> Option<Self> {
        if action.action_type != SET_QUIRK_ACTION {
            return None;
        }
        let fields = action.fields.as_ref()?;
        let name = fields.quirk_name.as_ref()?.value.clone();
        let value = fields.quirk_value.as_ref()?.value.clone();
        Some(PostSubmitAction::SetQuirk { name, value })
    }

    pub fn from_events(actions: &[FormEventAction]) -> Vec<Self> {
        actions.iter().filter_map(Self::from_event).collect()
    }
}
