//! Submission over HTTP against a mock persistence endpoint

use canvas_forms::definition::{ElementKind, Param, TextFields};
use canvas_forms::identifier::{SequentialIds, Separator};
use canvas_forms::{
    FormElement, FormError, FormStore, HttpTransport, IdentifierNormalizer, InMemoryQuirks,
    PostSubmitAction, SubmissionController, SubmissionState,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn email_store() -> Arc<FormStore> {
    let store = Arc::new(FormStore::new(
        IdentifierNormalizer::new(Separator::Dash, Arc::new(SequentialIds::new("field"))),
        "#000000",
    ));
    store.initialize_form(&[FormElement::new(
        ElementKind::Text(TextFields {
            identifier: Some(Param::new("Email".into())),
            ..Default::default()
        }),
        0,
    )]);
    store
}

fn controller(
    server_uri: &str,
    store: Arc<FormStore>,
    quirks: Arc<InMemoryQuirks>,
    timeout: Duration,
) -> SubmissionController {
    let transport =
        HttpTransport::new(format!("{}/api/form-submit", server_uri), timeout).unwrap();
    SubmissionController::new(
        "contact",
        vec![PostSubmitAction::SetQuirk {
            name: "tier".into(),
            value: "gold".into(),
        }],
        store,
        Arc::new(transport),
        quirks,
    )
}

#[tokio::test]
async fn posts_payload_and_applies_quirk_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/form-submit"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "formIdentifier": "contact",
            "email": { "index": 0, "value": "a@b.com" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Form submitted successfully.",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = email_store();
    store.set_value("email", "a@b.com");
    let quirks = Arc::new(InMemoryQuirks::new());
    let controller = controller(&server.uri(), store.clone(), quirks.clone(), Duration::from_secs(5));

    let response = controller.submit().await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Form submitted successfully."));
    assert_eq!(quirks.get("tier").as_deref(), Some("gold"));
    assert_eq!(store.snapshot(), store.defaults());
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn empty_success_body_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = email_store();
    let controller = controller(
        &server.uri(),
        store,
        Arc::new(InMemoryQuirks::new()),
        Duration::from_secs(5),
    );
    assert!(controller.submit().await.is_ok());
}

#[tokio::test]
async fn rejection_surfaces_server_message_and_keeps_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Form identifier is missing" })),
        )
        .mount(&server)
        .await;

    let store = email_store();
    store.set_value("email", "a@b.com");
    let before = store.snapshot();
    let quirks = Arc::new(InMemoryQuirks::new());
    let controller = controller(&server.uri(), store.clone(), quirks.clone(), Duration::from_secs(5));

    match controller.submit().await {
        Err(FormError::SubmissionRejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Form identifier is missing");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(store.snapshot(), before);
    assert!(quirks.all().is_empty());
}

#[tokio::test]
async fn rejection_without_json_uses_status_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let controller = controller(
        &server.uri(),
        email_store(),
        Arc::new(InMemoryQuirks::new()),
        Duration::from_secs(5),
    );
    match controller.submit().await {
        Err(FormError::SubmissionRejected { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn slow_endpoint_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let store = email_store();
    store.set_value("email", "a@b.com");
    let before = store.snapshot();
    let controller = controller(
        &server.uri(),
        store.clone(),
        Arc::new(InMemoryQuirks::new()),
        Duration::from_millis(100),
    );

    assert!(matches!(controller.submit().await, Err(FormError::Transport(_))));
    assert_eq!(store.snapshot(), before);
    assert!(matches!(controller.state(), SubmissionState::Failed { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let controller = controller(
        &uri,
        email_store(),
        Arc::new(InMemoryQuirks::new()),
        Duration::from_secs(2),
    );
    assert!(matches!(controller.submit().await, Err(FormError::Transport(_))));
}
