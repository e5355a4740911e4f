//! End-to-end tests for resource operations over HTTP.
//!
//! Each test starts a `wiremock` server, points a resource type at it and
//! checks the exact requests issued and the hydrated results.

use active_resource::rest::{QueryOptions, ResourceDefinition, ResourceResponse, ResourceType, Scope};
use active_resource::{AccessToken, ResourceConfig, ResourceError, ResourceId, SiteUrl};
use serde::Serialize;
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

struct Song;
impl ResourceDefinition for Song {}

struct Track;
impl ResourceDefinition for Track {}

fn site(server: &MockServer) -> SiteUrl {
    SiteUrl::new(&server.uri()).unwrap()
}

fn songs(server: &MockServer) -> std::sync::Arc<ResourceType> {
    let config = ResourceConfig::builder()
        .site(site(server))
        .definition::<Song>()
        .build()
        .unwrap();
    ResourceType::new(config).unwrap()
}

fn with_id(id: u64) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("id".to_string(), json!(id));
    data
}

#[derive(Serialize)]
struct NewSong<'a> {
    artist: &'a str,
    title: &'a str,
}

// ============================================================================
// CRUD
// ============================================================================

#[tokio::test]
async fn test_create_posts_json_to_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/songs.json"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"artist":"Joe","title":"A Little Help"}"#))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 1, "artist": "Joe", "title": "A Little Help"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = songs(&server)
        .new_resource()
        .create(&NewSong {
            artist: "Joe",
            title: "A Little Help",
        })
        .await
        .unwrap();

    assert_eq!(
        response.to_value(),
        json!({"id": 1, "artist": "Joe", "title": "A Little Help"})
    );
    let song = response.into_one().unwrap();
    assert_eq!(song.id(), Some(ResourceId::from(1_u64)));
    assert_eq!(song.get("artist").unwrap(), &json!("Joe"));
}

#[tokio::test]
async fn test_save_creates_then_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/songs.json"))
        .and(body_json(json!({"title": "Draft"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 31, "title": "Draft"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/songs/31.json"))
        .and(body_json(json!({"id": 31, "title": "Final"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 31, "title": "Final"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut song = songs(&server).new_resource();
    song.set_field("title", "Draft");

    assert!(song.save().await.is_some());
    assert_eq!(song.id(), Some(ResourceId::from(31_u64)));

    song.set("title", "Final");
    assert!(song.save().await.is_some());
    assert_eq!(song.get("title").unwrap(), &json!("Final"));
}

#[tokio::test]
async fn test_update_uses_given_id_for_new_instance() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/songs/4.json"))
        .and(body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "title": "Renamed"})))
        .expect(1)
        .mount(&server)
        .await;

    let updated = songs(&server)
        .new_resource()
        .update(4, &json!({"title": "Renamed"}))
        .await
        .and_then(ResourceResponse::into_one)
        .unwrap();

    assert_eq!(updated.get("title").unwrap(), &json!("Renamed"));
}

#[tokio::test]
async fn test_destroy_issues_exactly_one_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/songs/44.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let song = songs(&server).with_data(with_id(44));
    let response = song.destroy().await.unwrap();

    assert!(matches!(response, ResourceResponse::Other(Value::Null)));
}

#[tokio::test]
async fn test_destroy_without_id_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let song = songs(&server).new_resource();

    assert!(matches!(
        song.try_destroy().await,
        Err(ResourceError::MissingId { .. })
    ));
    assert!(song.destroy().await.is_none());
}

// ============================================================================
// Finding and scopes
// ============================================================================

#[tokio::test]
async fn test_find_in_scope_hydrates_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/2/tracks.json"))
        .and(query_param("genre", "soul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "One", "album": {"nil": "true"}},
            {"id": 2, "title": "Two"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/2/tracks/5.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "title": "Five"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ResourceConfig::builder()
        .site(site(&server))
        .definition::<Track>()
        .build()
        .unwrap();
    let tracks = ResourceType::new(config).unwrap();
    let scoped = tracks.scoped(Scope::new().segment("accounts", 2));

    let options = QueryOptions::new().param("genre", "soul");
    let listing = scoped
        .find_all(Some(&options))
        .await
        .and_then(ResourceResponse::into_many)
        .unwrap();

    assert_eq!(listing.len(), 2);
    assert!(!listing[0].data().contains_key("album"));
    assert!(listing[1].site().ends_with("/accounts/2/"));

    let five = listing[1].find_one(5).await.unwrap();
    assert_eq!(five.get("title").unwrap(), &json!("Five"));
}

#[tokio::test]
async fn test_custom_get_action_with_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/songs/9/lyrics.json"))
        .and(query_param("lang", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("la la la")))
        .expect(1)
        .mount(&server)
        .await;

    let options = QueryOptions::new().param("lang", "en");
    let response = songs(&server)
        .new_resource()
        .get_action(9, "lyrics", Some(&options))
        .await
        .unwrap();

    assert!(matches!(response, ResourceResponse::Other(Value::String(ref s)) if s == "la la la"));
}

#[tokio::test]
async fn test_custom_post_and_put_actions_use_instance_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/songs/3/play.json"))
        .and(body_json(json!({"volume": 11})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"playing": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/songs/3/rate.json"))
        .and(query_param("stars", "5"))
        .and(body_string("{}"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let song = songs(&server).with_data(with_id(3));

    let played = song.post_action("play", Some(&json!({"volume": 11}))).await.unwrap();
    assert_eq!(played.as_one().unwrap().get("playing").unwrap(), &json!(true));

    let options = QueryOptions::new().param("stars", 5);
    assert!(song.put_action("rate", Some(&options)).await.is_some());
}

// ============================================================================
// Auth and failures
// ============================================================================

#[tokio::test]
async fn test_access_token_is_sent_on_every_request() {
    let server = MockServer::start().await;
    Mock::given(header("AUTHORIZATION", "Token token=818a5f86"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let config = ResourceConfig::builder()
        .site(site(&server))
        .access_token(AccessToken::new("818a5f86").unwrap())
        .element_name("song")
        .build()
        .unwrap();
    let song = ResourceType::new(config).unwrap().with_data(with_id(1));

    assert!(song.find_one(1).await.is_some());
    assert!(song.update(1, &json!({"title": "x"})).await.is_some());
    assert!(song.destroy().await.is_some());
}

#[tokio::test]
async fn test_server_error_yields_none_and_try_variant_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/songs/404.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"Not Found"}"#))
        .mount(&server)
        .await;

    let song = songs(&server).new_resource();
    assert!(song.find(404, None).await.is_none());

    match song.try_find(404, None).await {
        Err(ResourceError::Dispatch(error)) => {
            assert_eq!(error.response_body(), Some(r#"{"error":"Not Found"}"#));
        }
        other => panic!("expected dispatch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_response_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    assert!(songs(&server).new_resource().find_all(None).await.is_none());
}
