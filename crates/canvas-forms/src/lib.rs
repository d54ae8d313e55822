//! Canvas Forms - Dynamic CMS Form Engine
//!
//! Forms authored in a headless CMS arrive as a list of typed field
//! definitions. This crate turns them into client-side form state, renders
//! each field against that state, and submits the collected values to a
//! persistence endpoint, optionally setting personalization quirks on success.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            CANVAS FORMS                                 │
//! │                                                                         │
//! │  CMS composition ──▶ FormElement[] ──▶ Default-Value ──▶ FormStore      │
//! │  (formFields slot)   (definition)      Resolver          (shared state) │
//! │                                                             ▲   │       │
//! │                                         set_value(id, v)    │   │ get   │
//! │                                                             │   ▼       │
//! │                                                       Field Renderers   │
//! │                                                                         │
//! │  FormStore ──snapshot──▶ SubmissionController ──POST──▶ /api/form-submit│
//! │                               │ ok                                      │
//! │                               ├──▶ PersonalizationContext::update       │
//! │                               └──▶ FormStore::restore_defaults          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod composition;
pub mod config;
pub mod defaults;
pub mod definition;
pub mod error;
pub mod fields;
pub mod form;
pub mod identifier;
pub mod personalization;
pub mod store;
pub mod submit;
pub mod transport;

pub use composition::{extract_form_elements, ComponentInstance, FormProps};
pub use config::FormsConfig;
pub use defaults::compute_default;
pub use definition::{ElementKind, FieldKind, FormElement, FormEventAction, PostSubmitAction};
pub use error::{FormError, Result};
pub use fields::{BoundField, FieldInput, FieldView, RendererRegistry};
pub use form::{Form, FormServices, FormView};
pub use identifier::{sanitize_name, IdGenerator, IdentifierNormalizer, Separator};
pub use personalization::{ContextUpdate, InMemoryQuirks, PersonalizationContext};
pub use store::{FieldState, FormState, FormStore};
pub use submit::{SubmissionController, SubmissionState, UserNotifier};
pub use transport::{HttpTransport, SubmissionPayload, SubmissionTransport, SubmitResponse};
