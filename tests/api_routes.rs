//! Router-level tests for the HTTP API.
//!
//! The completion provider and mail relay are replaced with in-memory fakes
//! that record every call, so no network access is needed.

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use recap::api::{ApiServer, AppState};
use recap::mailer::{MailRelay, Mailer, OutgoingEmail};
use recap::summarizer::{CompletionProvider, Summarizer};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const SENDER: &str = "notes@example.com";

enum Reply {
    Text(&'static str),
    Fail(&'static str),
    Panic,
}

struct FakeProvider {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Fail(message) => bail!("{}", message),
            Reply::Panic => panic!("provider blew up"),
        }
    }
}

#[derive(Default)]
struct FakeRelay {
    fail_with: Option<&'static str>,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl FakeRelay {
    fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRelay for FakeRelay {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        self.sent.lock().unwrap().push(email.clone());
        match self.fail_with {
            Some(message) => bail!("{}", message),
            None => Ok(()),
        }
    }
}

struct Harness {
    app: Router,
    provider: Arc<FakeProvider>,
    relay: Arc<FakeRelay>,
}

impl Harness {
    fn new(reply: Reply) -> Self {
        Self::build(reply, FakeRelay::default(), 10 * 1024 * 1024)
    }

    fn build(reply: Reply, relay: FakeRelay, max_upload_bytes: usize) -> Self {
        let provider = FakeProvider::new(reply);
        let relay = Arc::new(relay);

        let state = AppState {
            summarizer: Arc::new(Summarizer::new(provider.clone())),
            mailer: Arc::new(Mailer::new(relay.clone(), SENDER)),
            max_upload_bytes,
        };

        Self {
            app: ApiServer::router(state),
            provider,
            relay,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_upload(field: &str, filename: Option<&str>, content: &[u8]) -> Request<Body> {
    let boundary = "recap-test-boundary";
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    match filename {
        Some(filename) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload-transcript")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_is_fixed_payload() {
    let harness = Harness::new(Reply::Fail("provider down"));

    let response = harness
        .send(Request::get("/api/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "OK", "message": "Server is running" })
    );
    assert!(harness.provider.calls().is_empty());
}

#[tokio::test]
async fn test_root_returns_welcome_text() {
    let harness = Harness::new(Reply::Text("unused"));

    let response = harness
        .send(Request::get("/").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8(bytes.to_vec()).unwrap().starts_with("Welcome"));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let harness = Harness::new(Reply::Text("unused"));

    let response = harness
        .send(
            Request::get("/api/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

// ============================================================================
// Summarize
// ============================================================================

#[tokio::test]
async fn test_summarize_returns_provider_text() {
    let harness = Harness::new(Reply::Text("Alice approved shipping; Bob agreed."));

    let (status, body) = harness
        .post_json(
            "/api/summarize",
            json!({ "transcript": "Alice: ship it. Bob: ok." }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "Alice approved shipping; Bob agreed." }));

    let calls = harness.provider.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("Summarize the following meeting transcript"));
    assert!(calls[0].ends_with("Transcript:\nAlice: ship it. Bob: ok."));
}

#[tokio::test]
async fn test_summarize_uses_custom_prompt() {
    let harness = Harness::new(Reply::Text("- ship"));

    let (status, _) = harness
        .post_json(
            "/api/summarize",
            json!({ "transcript": "Alice: ship it.", "customPrompt": "Only action items" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(harness.provider.calls()[0].starts_with("Only action items\n\nTranscript:\n"));
}

#[tokio::test]
async fn test_summarize_without_transcript_is_rejected() {
    let harness = Harness::new(Reply::Text("unused"));

    for body in [json!({}), json!({ "transcript": "" }), json!({ "transcript": null })] {
        let (status, body) = harness.post_json("/api/summarize", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Transcript is required" }));
    }

    assert!(harness.provider.calls().is_empty());
}

#[tokio::test]
async fn test_summarize_provider_failure_is_500_with_details() {
    let harness = Harness::new(Reply::Fail("Groq API error (503): over capacity"));

    let (status, body) = harness
        .post_json("/api/summarize", json!({ "transcript": "text" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate summary");
    assert_eq!(body["details"], "Groq API error (503): over capacity");
}

#[tokio::test]
async fn test_summarize_empty_completion_is_500() {
    let harness = Harness::new(Reply::Text(""));

    let (status, body) = harness
        .post_json("/api/summarize", json!({ "transcript": "text" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate summary");
    assert_eq!(body["details"], "No summary generated");
}

#[tokio::test]
async fn test_malformed_json_is_rejected_before_handler() {
    let harness = Harness::new(Reply::Text("unused"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = harness.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
    assert!(harness.provider.calls().is_empty());
}

#[tokio::test]
async fn test_panicking_handler_returns_generic_500() {
    let harness = Harness::new(Reply::Panic);

    let (status, body) = harness
        .post_json("/api/summarize", json!({ "transcript": "text" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

// ============================================================================
// Send email
// ============================================================================

#[tokio::test]
async fn test_send_email_filters_blank_recipients() {
    let harness = Harness::new(Reply::Text("unused"));

    let (status, body) = harness
        .post_json(
            "/api/send-email",
            json!({ "recipients": ["", "a@b.com"], "summary": "done" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Email sent successfully" }));

    let sent = harness.relay.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["a@b.com".to_string()]);
    assert_eq!(sent[0].from, SENDER);
    assert_eq!(sent[0].subject, "Meeting Summary");
}

#[tokio::test]
async fn test_send_email_single_message_for_many_recipients() {
    let harness = Harness::new(Reply::Text("unused"));

    let (status, _) = harness
        .post_json(
            "/api/send-email",
            json!({
                "recipients": ["a@b.com", "  ", "c@d.com", "e@f.com"],
                "subject": "Sprint review",
                "summary": "- ship\n- fix <login>"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let sent = harness.relay.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["a@b.com", "c@d.com", "e@f.com"]);
    assert_eq!(sent[0].subject, "Sprint review");
    assert!(sent[0].html_body.contains("- ship\n- fix <login></pre>"));
}

#[tokio::test]
async fn test_send_email_blank_recipients_rejected() {
    let harness = Harness::new(Reply::Text("unused"));

    for recipients in [json!([]), json!(["", "   "]), json!(null)] {
        let (status, body) = harness
            .post_json(
                "/api/send-email",
                json!({ "recipients": recipients, "summary": "done" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Recipients are required" }));
    }

    assert!(harness.relay.sent().is_empty());
}

#[tokio::test]
async fn test_send_email_missing_summary_rejected() {
    let harness = Harness::new(Reply::Text("unused"));

    let (status, body) = harness
        .post_json("/api/send-email", json!({ "recipients": ["a@b.com"] }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Summary is required" }));
    assert!(harness.relay.sent().is_empty());
}

#[tokio::test]
async fn test_send_email_wrong_recipient_type_rejected() {
    let harness = Harness::new(Reply::Text("unused"));

    let (status, body) = harness
        .post_json(
            "/api/send-email",
            json!({ "recipients": "a@b.com", "summary": "done" }),
        )
        .await;

    assert!(status.is_client_error());
    assert_eq!(body["error"], "Invalid request body");
    assert!(harness.relay.sent().is_empty());
}

#[tokio::test]
async fn test_send_email_relay_failure_is_500() {
    let relay = FakeRelay {
        fail_with: Some("535 Username and Password not accepted"),
        ..Default::default()
    };
    let harness = Harness::build(Reply::Text("unused"), relay, 1024);

    let (status, body) = harness
        .post_json(
            "/api/send-email",
            json!({ "recipients": ["a@b.com"], "summary": "done" }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to send email");
    assert_eq!(body["details"], "535 Username and Password not accepted");
    assert_eq!(harness.relay.sent().len(), 1);
}

// ============================================================================
// Upload
// ============================================================================

#[tokio::test]
async fn test_upload_returns_decoded_text() {
    let harness = Harness::new(Reply::Text("unused"));
    let content = "John: standup time.\nSarah: done with auth.\n";

    let response = harness
        .send(multipart_upload("transcript", Some("notes.txt"), content.as_bytes()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "transcript": content }));
}

#[tokio::test]
async fn test_upload_invalid_utf8_is_replaced() {
    let harness = Harness::new(Reply::Text("unused"));

    let response = harness
        .send(multipart_upload("transcript", Some("notes.txt"), b"caf\xe9 ok"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["transcript"], "caf\u{FFFD} ok");
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let harness = Harness::new(Reply::Text("unused"));

    // Plain text field, not a file part.
    let response = harness
        .send(multipart_upload("transcript", None, b"pasted text"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "No file uploaded" }));

    // File under another field name.
    let response = harness
        .send(multipart_upload("attachment", Some("notes.txt"), b"text"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "No file uploaded" }));
}

#[tokio::test]
async fn test_upload_non_multipart_request_is_rejected() {
    let harness = Harness::new(Reply::Text("unused"));

    let (status, body) = harness
        .post_json("/api/upload-transcript", json!({ "transcript": "x" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn test_upload_size_ceiling() {
    let harness = Harness::build(Reply::Text("unused"), FakeRelay::default(), 32);

    let at_limit = vec![b'a'; 32];
    let response = harness
        .send(multipart_upload("transcript", Some("notes.txt"), &at_limit))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["transcript"].as_str().map(str::len),
        Some(32)
    );

    let over_limit = vec![b'a'; 33];
    let response = harness
        .send(multipart_upload("transcript", Some("notes.txt"), &over_limit))
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error"], "File too large");
}

#[tokio::test]
async fn test_upload_far_over_ceiling_is_refused() {
    let harness = Harness::build(Reply::Text("unused"), FakeRelay::default(), 32);

    let huge = vec![b'a'; 256 * 1024];
    let response = harness
        .send(multipart_upload("transcript", Some("notes.txt"), &huge))
        .await;

    assert!(!response.status().is_success());
    assert!(body_json(response).await["error"].is_string());
}
