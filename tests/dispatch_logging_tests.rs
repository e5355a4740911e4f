//! Integration tests for dispatch logging and failure handling.
//!
//! Log lines are captured with a `tracing-subscriber` layer installed for
//! the duration of each test.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use active_resource::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use active_resource::rest::{Dispatcher, ResourceType};
use active_resource::{ResourceConfig, SiteUrl};
use serde_json::{json, Map};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Log capture
// ============================================================================

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<String>>>);

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn failures(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.starts_with("\n Exception"))
            .collect()
    }
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for CapturedLogs {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().unwrap().push(visitor.0);
    }
}

fn capture() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(logs.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

/// Transport counting the requests it receives.
#[derive(Default)]
struct CountingTransport {
    calls: AtomicUsize,
}

impl Transport for CountingTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse::new(request.http_method, &request.url, 204, "", ""))
    }
}

fn song_config(site: &str) -> ResourceConfig {
    ResourceConfig::builder()
        .site(SiteUrl::new(site).unwrap())
        .element_name("song")
        .build()
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_unreachable_server_returns_none_with_one_failure_entry() {
    let (logs, _guard) = capture();

    let songs = ResourceType::new(song_config("http://127.0.0.1:1/")).unwrap();
    let result = songs.new_resource().find_all(None).await;

    assert!(result.is_none());
    assert_eq!(logs.failures().len(), 1);
    assert!(logs
        .lines()
        .contains(&"GET http://127.0.0.1:1/songs.json\n".to_string()));
}

#[tokio::test]
async fn test_error_status_failure_entry_includes_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/songs.json"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"errors":{"title":["blank"]}}"#),
        )
        .mount(&server)
        .await;

    let (logs, _guard) = capture();
    let songs = ResourceType::new(song_config(&server.uri())).unwrap();
    let result = songs.new_resource().create(&json!({"title": ""})).await;

    assert!(result.is_none());
    let failures = logs.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("HTTP 422 Unprocessable Entity"));
    assert!(failures[0].contains(r#"{"errors":{"title":["blank"]}}"#));
}

#[tokio::test]
async fn test_successful_exchange_logs_request_response_and_separator() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/songs.json"))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":1}"#))
        .mount(&server)
        .await;

    let (logs, _guard) = capture();
    let songs = ResourceType::new(song_config(&server.uri())).unwrap();
    songs
        .new_resource()
        .create(&json!({"artist": "Joe"}))
        .await
        .unwrap();

    let lines = logs.lines();
    let url = format!("{}/songs.json", server.uri());
    assert!(lines.contains(&format!("POST {url}\n{{\"artist\":\"Joe\"}}")));
    assert!(lines.contains(&"\n201 Created\n{\"id\":1}".to_string()));
    assert!(lines.contains(&"-".repeat(30)));
    assert!(logs.failures().is_empty());
}

#[test]
fn test_delete_invokes_transport_exactly_once() {
    let songs = ResourceType::with_transport(
        song_config("http://localhost:3000/"),
        CountingTransport::default(),
    );
    let mut data = Map::new();
    data.insert("id".to_string(), json!(7));
    let song = songs.with_data(data);

    let response = tokio_test::block_on(song.destroy());

    assert!(response.is_some());
    assert_eq!(
        songs.dispatcher().transport().calls.load(Ordering::SeqCst),
        1
    );
}

#[test]
fn test_dispatcher_delete_without_payload_still_sends() {
    let dispatcher = Dispatcher::new(CountingTransport::default());

    let value = tokio_test::block_on(dispatcher.dispatch(
        "http://localhost:3000/songs/7.json",
        HttpMethod::Delete,
        None,
        None,
    ));

    assert_eq!(value, Some(serde_json::Value::Null));
    assert_eq!(dispatcher.transport().calls.load(Ordering::SeqCst), 1);
}
