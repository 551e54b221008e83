use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vouch_client::{oneshot, ApiClient, ClientConfig, Error, Request};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct Person {
    id: u64,
    name: String,
    email: String,
}

fn alice() -> Person {
    Person {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    }
}

#[tokio::test]
async fn get_maps_response_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/123"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"1-abc\"")
                .set_body_json(alice()),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.get("people/123").await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.reason, "OK");
    assert!(response.is_success());
    assert_eq!(response.etag.as_deref(), Some("1-abc"));
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    assert!(response.request_url.ends_with("/people/123"));
    assert!(response.content.unwrap().contains("alice@example.com"));
}

#[tokio::test]
async fn get_as_deserializes_the_entity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.get_as::<Person>("people/123").await.unwrap();

    assert_eq!(response.content, Some(alice()));
}

#[tokio::test]
async fn not_found_is_a_response_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.get("people/999").await.unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn empty_body_is_normalized_to_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/people/123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.delete("people/123").await.unwrap();

    assert!(response.content.is_none());
    assert!(!response.has_content());
}

#[tokio::test]
async fn content_type_parameters_are_stripped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{}", "application/json; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.get("people/123").await.unwrap();

    assert_eq!(response.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn accept_json_is_sent_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.get("people").await.unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn basic_auth_is_derived_from_url_user_info() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header(
            "Authorization",
            "Basic dGVzdFVzZXI6dGVzdFBhc3N3b3Jk",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let url = server.uri().replace("http://", "http://testUser:testPassword@");
    let client = ApiClient::new(&url).unwrap();
    let response = client.get("secure").await.unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn request_headers_override_client_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("Accept", "application/ld+json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client
        .send(&Request::get("feed").with_accept("application/ld+json"))
        .await
        .unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn post_json_sends_the_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/people"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(alice()))
        .respond_with(ResponseTemplate::new(201).set_body_json(alice()))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let content = serde_json::to_string(&alice()).unwrap();
    let response = client.post_json(&content, "people").await.unwrap();

    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn post_json_rejects_blank_content() {
    let client = ApiClient::new("http://localhost:5555").unwrap();
    let result = client.post_json("  ", "people").await;
    assert!(matches!(
        result,
        Err(Error::BlankArgument { name: "content" })
    ));
}

#[tokio::test]
async fn put_entity_round_trips() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/people/123"))
        .and(body_json(alice()))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client
        .put_entity_as::<Person, Person>(&alice(), "people/123")
        .await
        .unwrap();

    assert_eq!(response.content, Some(alice()));
}

#[tokio::test]
async fn bearer_header_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("Authorization", "Bearer token123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client
        .send(&Request::get("protected").with_bearer("token123"))
        .await
        .unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn head_request_has_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/people/123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.head("people/123").await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.content.is_none());
}

#[tokio::test]
async fn moved_permanently_is_followed_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.get("old").await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.request_url.ends_with("/new"));
    assert_eq!(response.content.as_deref(), Some("moved"));
}

#[tokio::test]
async fn other_redirect_codes_are_not_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/temporary"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/elsewhere"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri()).unwrap();
    let response = client.get("temporary").await.unwrap();

    assert_eq!(response.status, 302);
    assert_eq!(response.location.as_deref(), Some("/elsewhere"));
}

#[tokio::test]
async fn redirect_loop_stops_at_the_hop_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let config = ClientConfig::new(&server.uri()).unwrap().with_redirect_limit(3);
    let client = ApiClient::with_config(config).unwrap();
    let result = client.get("loop").await;

    assert!(matches!(
        result,
        Err(Error::RedirectLimitExceeded { limit: 3, .. })
    ));
}

#[tokio::test]
async fn send_after_close_fails() {
    let server = MockServer::start().await;

    let client = ApiClient::new(&server.uri()).unwrap();
    client.close();
    client.close();

    let result = client.get("people").await;
    assert!(matches!(result, Err(Error::Closed)));
}

#[tokio::test]
async fn oneshot_helpers_hit_absolute_urls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ping"))
        .and(body_json(serde_json::json!({"echo": true})))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let response = oneshot::get(&format!("{}/ping", server.uri())).await.unwrap();
    assert_eq!(response.content.as_deref(), Some("pong"));

    let response = oneshot::post_json(
        &format!("{}/ping", server.uri()),
        r#"{"echo": true}"#,
    )
    .await
    .unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn oneshot_configurer_adjusts_the_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conditional"))
        .and(header("If-None-Match", "1-abc"))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let response = oneshot::get_with(&format!("{}/conditional", server.uri()), |request| {
        request.with_if_none_match("1-abc")
    })
    .await
    .unwrap();

    assert_eq!(response.status, 304);
}
