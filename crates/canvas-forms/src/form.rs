//! Hosting form
//!
//! Ties the pieces together for one form on a page: it owns the shared store,
//! mounts a field per definition, renders them through the registry and
//! hands submissions to the controller.

use crate::composition::{extract_form_elements, ComponentInstance, FormProps};
use crate::config::FormsConfig;
use crate::definition::{ElementKind, FormElement, PostSubmitAction};
use crate::error::{FormError, Result};
use crate::fields::{BoundField, FieldInput, FieldView, RendererRegistry};
use crate::identifier::{IdGenerator, IdentifierNormalizer, UuidGenerator};
use crate::personalization::PersonalizationContext;
use crate::store::FormStore;
use crate::submit::{SubmissionController, SubmissionState, TracingNotifier, UserNotifier};
use crate::transport::{HttpTransport, SubmissionTransport, SubmitResponse};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Collaborators a form needs
#[derive(Clone)]
pub struct FormServices {
    pub config: FormsConfig,
    pub transport: Arc<dyn SubmissionTransport>,
    pub personalization: Arc<dyn PersonalizationContext>,
    pub notifier: Arc<dyn UserNotifier>,
    pub id_generator: Arc<dyn IdGenerator>,
}

impl FormServices {
    /// HTTP transport from `config`, UUID fallback identifiers, logging notifier
    pub fn from_config(
        config: FormsConfig,
        personalization: Arc<dyn PersonalizationContext>,
    ) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::from_config(&config)?);
        Ok(Self {
            config,
            transport,
            personalization,
            notifier: Arc::new(TracingNotifier),
            id_generator: Arc::new(UuidGenerator),
        })
    }
}

/// Rendered submit button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub identifier: String,
    pub label: String,
    pub include_in_response: bool,
}

/// Everything a form shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub name: String,
    pub fields: Vec<FieldView>,
    pub buttons: Vec<ButtonView>,
    /// Whether the submit buttons are enabled
    pub can_submit: bool,
}

pub struct Form {
    props: FormProps,
    store: Arc<FormStore>,
    fields: Vec<BoundField>,
    buttons: Vec<ButtonView>,
    registry: RendererRegistry,
    controller: SubmissionController,
    notifier: Arc<dyn UserNotifier>,
}

impl Form {
    pub fn new(props: FormProps, elements: Vec<FormElement>, services: FormServices) -> Self {
        let normalizer =
            IdentifierNormalizer::new(services.config.identifier_separator, services.id_generator);
        let store = Arc::new(FormStore::new(normalizer, services.config.default_color.clone()));
        let controller = SubmissionController::new(
            props.form_identifier.clone(),
            PostSubmitAction::from_events(&props.form_actions),
            store.clone(),
            services.transport,
            services.personalization,
        )
        .with_notifier(services.notifier.clone());

        let mut form = Self {
            props,
            store,
            fields: Vec::new(),
            buttons: Vec::new(),
            registry: RendererRegistry::standard(),
            controller,
            notifier: services.notifier,
        };
        form.update_elements(elements);
        form
    }

    /// Build from the form component of a composition
    pub fn from_component(component: &ComponentInstance, services: FormServices) -> Self {
        Self::new(
            FormProps::from_component(component),
            extract_form_elements(component),
            services,
        )
    }

    pub fn with_registry(mut self, registry: RendererRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Re-initialize the store and re-mount every field for a new element list
    pub fn update_elements(&mut self, mut elements: Vec<FormElement>) {
        elements.sort_by_key(|e| e.index.unwrap_or(u32::MAX));
        self.store.initialize_form(&elements);

        let (buttons, fields): (Vec<_>, Vec<_>) = BoundField::mount_all(&self.store)
            .into_iter()
            .partition(|field| field.element().is_button());

        self.buttons = buttons
            .into_iter()
            .map(|button| {
                let include_in_response = match &button.element().kind {
                    ElementKind::SubmitButton(f) => {
                        f.include_in_response.as_ref().map(|p| p.value).unwrap_or(false)
                    }
                    _ => false,
                };
                ButtonView {
                    identifier: button.identifier().to_string(),
                    label: button.element().label().unwrap_or("Submit").to_string(),
                    include_in_response,
                }
            })
            .collect();
        self.fields = fields;
        debug!(form = %self.props.form_identifier, fields = self.fields.len(), "Mounted form fields");
    }

    pub fn props(&self) -> &FormProps {
        &self.props
    }

    pub fn store(&self) -> &Arc<FormStore> {
        &self.store
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.controller.state()
    }

    pub fn field(&self, identifier: &str) -> Option<&BoundField> {
        self.fields.iter().find(|f| f.identifier() == identifier)
    }

    pub fn render(&self) -> FormView {
        let state = self.store.snapshot();
        FormView {
            name: self.props.form_name.clone(),
            fields: self
                .fields
                .iter()
                .filter_map(|field| self.registry.render(field, &state))
                .collect(),
            buttons: self.buttons.clone(),
            can_submit: self.controller.can_submit(),
        }
    }

    /// Route a user interaction to the field with `identifier`
    pub fn input(&self, identifier: &str, input: FieldInput) -> Result<()> {
        let field = self
            .field(identifier)
            .ok_or_else(|| FormError::UnknownField(identifier.to_string()))?;
        field.input(&self.store, input);
        Ok(())
    }

    /// Check required fields, then submit
    pub async fn submit(&self) -> Result<SubmitResponse> {
        if let Err(e) = self.store.validate() {
            self.notifier.notify(&e.user_message());
            return Err(e);
        }
        self.controller.submit().await
    }
}
