//! Form engine submitting to a live API server

use canvas_forms::definition::{BasicFields, ElementKind, FormEventAction, Param, TextFields};
use canvas_forms::identifier::SequentialIds;
use canvas_forms::submit::TracingNotifier;
use canvas_forms::{
    FieldInput, Form, FormElement, FormProps, FormServices, FormsConfig, HttpTransport,
    InMemoryQuirks, SubmissionState,
};
use canvas_forms_api::repository::{InMemorySubmissionRepository, SubmissionRepository};
use canvas_forms_api::{build_router, AppState};
use std::sync::Arc;

async fn spawn_api(repository: Arc<InMemorySubmissionRepository>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(AppState::new(repository));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/form-submit", addr)
}

fn contact_form(endpoint: String, quirks: Arc<InMemoryQuirks>) -> Form {
    let config = FormsConfig {
        submit_endpoint: endpoint,
        ..Default::default()
    };
    let services = FormServices {
        transport: Arc::new(HttpTransport::from_config(&config).unwrap()),
        config,
        personalization: quirks,
        notifier: Arc::new(TracingNotifier),
        id_generator: Arc::new(SequentialIds::new("field")),
    };
    Form::new(
        FormProps {
            form_name: "Contact".into(),
            form_identifier: "contact-us".into(),
            form_actions: vec![FormEventAction::set_quirk("contacted", "true")],
        },
        vec![
            FormElement::new(
                ElementKind::Text(TextFields {
                    identifier: Some(Param::new("Full Name".into())),
                    required: Some(Param::new(true)),
                    ..Default::default()
                }),
                0,
            ),
            FormElement::new(
                ElementKind::Checkbox(BasicFields {
                    identifier: Some(Param::new("Subscribe".into())),
                    ..Default::default()
                }),
                1,
            ),
        ],
        services,
    )
}

#[tokio::test]
async fn form_submission_round_trips_through_api() {
    let repository = Arc::new(InMemorySubmissionRepository::new());
    let endpoint = spawn_api(repository.clone()).await;
    let quirks = Arc::new(InMemoryQuirks::new());
    let form = contact_form(endpoint, quirks.clone());

    form.input("full-name", FieldInput::Text("Ada Lovelace".into())).unwrap();
    form.input("subscribe", FieldInput::Checked(true)).unwrap();
    let response = form.submit().await.unwrap();

    assert_eq!(response.message.as_deref(), Some("Form submitted successfully."));
    assert_eq!(form.submission_state(), SubmissionState::Idle);
    assert_eq!(quirks.get("contacted").as_deref(), Some("true"));
    assert_eq!(form.store().snapshot().value("full-name"), "");

    let stored = repository.list("contact-us").await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].form_data["full-name"]["value"], "Ada Lovelace");
    assert_eq!(stored[0].form_data["subscribe"]["value"], "true");
    assert_eq!(stored[0].form_data["subscribe"]["index"], 1);
}
