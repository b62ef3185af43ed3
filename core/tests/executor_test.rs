//! Integration tests for request execution against a mock API.

#![allow(clippy::unwrap_used)]

use serde::Deserialize;
use serde_json::json;
use ticketing_sdk_core::{
    ApiContext, ApiError, ApiRequest, ApiRequestExecutor, AuthenticationService, ClientSettings,
    Environment, StatusCode,
};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Venue {
    id: String,
    title: String,
}

fn executor(context: ApiContext) -> ApiRequestExecutor {
    ApiRequestExecutor::new(
        context.into_shared(),
        "venue",
        "venue-service.tickets-api.io",
        &ClientSettings::default(),
    )
    .unwrap()
}

fn anonymous(server: &MockServer) -> ApiContext {
    ApiContext::new(Environment::Qa).with_base_url(server.uri())
}

#[tokio::test]
async fn test_raw_payload_with_context_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/venues/199"))
        .and(query_param("expand", "address"))
        .and(header("x-affiliate-id", "partner"))
        .and(header("x-market", "london"))
        .and(header("x-correlation-id", "corr-1"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "199", "title": "Apollo"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let exec = executor(
        anonymous(&server)
            .with_affiliate("partner")
            .with_market("london")
            .with_correlation_id("corr-1"),
    );
    let venue: Venue = exec
        .execute(ApiRequest::get("/api/venues/199").query("expand", "address"))
        .await
        .unwrap();

    assert_eq!(venue, Venue { id: "199".to_string(), title: "Apollo".to_string() });
}

#[tokio::test]
async fn test_generated_correlation_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header_exists("x-correlation-id"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    executor(anonymous(&server))
        .execute_empty(ApiRequest::get("ping"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_wrapped_payload_and_missing_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/venues/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request": {"urlParams": {"id": "1"}},
            "response": {"id": "1", "title": "Lyceum"},
            "context": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/venues/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": null,
            "context": {"errors": [{"message": "Venue is archived"}]}
        })))
        .mount(&server)
        .await;

    let exec = executor(anonymous(&server));
    let venue: Venue = exec.execute_api_response(ApiRequest::get("venues/1")).await.unwrap();
    assert_eq!(venue.title, "Lyceum");

    let error = exec
        .execute_api_response::<Venue>(ApiRequest::get("venues/2"))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ApiError::MissingPayload { ref message, .. } if message == "Venue is archived"
    ));
}

#[tokio::test]
async fn test_wrapped_empty_body_is_missing_payload() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/venues/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let exec = executor(anonymous(&server));
    let error = exec
        .execute_api_response::<serde_json::Value>(ApiRequest::patch("venues/1"))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ApiError::MissingPayload { ref message, .. } if message == "empty body"
    ));

    exec.execute_empty(ApiRequest::patch("venues/1")).await.unwrap();
}

#[tokio::test]
async fn test_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": ["London", "New York"]})),
        )
        .mount(&server)
        .await;

    let locations: Vec<String> = executor(anonymous(&server))
        .execute_data(ApiRequest::get("locations"))
        .await
        .unwrap();
    assert_eq!(locations, vec!["London", "New York"]);
}

#[tokio::test]
async fn test_failure_is_translated_with_parsed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/baskets/XYZ"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-correlation-id", "srv-42")
                .set_body_json(json!({"context": {"errors": [
                    {"code": "notFound", "message": "Basket XYZ not found"}
                ]}})),
        )
        .mount(&server)
        .await;

    let exec = executor(anonymous(&server));
    let error = exec
        .execute_with::<serde_json::Value, _>(ApiRequest::get("baskets/XYZ"), |failure| {
            ApiError::BasketNotFound {
                basket_reference: "XYZ".to_string(),
                source: Box::new(failure),
            }
        })
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ApiError::BasketNotFound { ref basket_reference, .. } if basket_reference == "XYZ"
    ));
    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(error.message(), "Basket XYZ not found");
    let failure = error.http_failure().unwrap();
    assert_eq!(failure.correlation_id.as_deref(), Some("srv-42"));
    assert!(failure.url.ends_with("/baskets/XYZ"));
    assert!(failure.error_body.has_code("notFound"));
}

#[tokio::test]
async fn test_invalid_json_is_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/venues"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = executor(anonymous(&server))
        .execute::<Vec<Venue>>(ApiRequest::get("venues"))
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Deserialization { .. }));
    assert_eq!(error.response_body(), Some("<html>oops</html>"));
}

#[tokio::test]
async fn test_logs_in_before_authenticated_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "admin", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/venues/1"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "1", "title": "Palladium"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let exec = executor(anonymous(&server).with_credentials("admin", "secret"));
    for _ in 0..2 {
        let request = ApiRequest::patch("venues/1")
            .json(&json!({"title": "Palladium"}))
            .unwrap()
            .authenticated();
        let venue: Venue = exec.execute(request).await.unwrap();
        assert_eq!(venue.title, "Palladium");
    }

    assert_eq!(exec.context().read().await.access_token.as_deref(), Some("jwt-1"));
}

#[tokio::test]
async fn test_expired_token_triggers_single_relogin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/9"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token has expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/9"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "9"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = anonymous(&server).with_credentials("admin", "secret");
    context.access_token = Some("stale".to_string());
    let exec = executor(context);

    let order: serde_json::Value = exec
        .execute(ApiRequest::get("orders/9").authenticated())
        .await
        .unwrap();
    assert_eq!(order["id"], "9");
}

#[tokio::test]
async fn test_relogin_retries_only_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/9"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token has expired"})),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut context = anonymous(&server).with_credentials("admin", "secret");
    context.access_token = Some("stale".to_string());
    let exec = executor(context);

    let error = exec
        .execute::<serde_json::Value>(ApiRequest::get("orders/9").authenticated())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::AccessTokenExpired { .. }));
    assert_eq!(exec.context().read().await.access_token.as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_predefined_token_expiry_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/9"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "jwt expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let error = executor(anonymous(&server).with_access_token("given"))
        .execute::<serde_json::Value>(ApiRequest::get("orders/9").authenticated())
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::AccessTokenExpired { .. }));
    assert_eq!(error.message(), "jwt expired");
}

#[tokio::test]
async fn test_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("x-api-key", "key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let products: Vec<serde_json::Value> = executor(anonymous(&server).with_api_key("key-123"))
        .execute(ApiRequest::get("products").authenticated())
        .await
        .unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_unauthorized_api_key_is_not_token_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let error = executor(anonymous(&server).with_api_key("revoked"))
        .execute::<serde_json::Value>(ApiRequest::get("products").authenticated())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Http(_)));
    assert_eq!(error.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_missing_credentials_fail_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let error = executor(anonymous(&server))
        .execute_empty(ApiRequest::delete("baskets/1").authenticated())
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::NotAuthenticated(_)));
}

#[tokio::test]
async fn test_authentication_service_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-7"})))
        .mount(&server)
        .await;

    let auth = AuthenticationService::new(executor(
        anonymous(&server).with_credentials("admin", "secret"),
    ));
    assert!(!auth.is_authenticated().await);

    assert_eq!(auth.authenticate().await.unwrap(), "jwt-7");
    assert!(auth.is_authenticated().await);

    auth.logout().await;
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_rejected_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let auth = AuthenticationService::new(executor(
        anonymous(&server).with_credentials("admin", "wrong"),
    ));
    let error = auth.authenticate().await.unwrap_err();
    assert!(matches!(
        error,
        ApiError::NotAuthenticated(ref m) if m.contains("Invalid credentials")
    ));

    let auth = AuthenticationService::new(executor(anonymous(&server).with_api_key("k")));
    assert!(matches!(auth.authenticate().await, Err(ApiError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_transport_error() {
    let exec = executor(ApiContext::new(Environment::Dev).with_base_url("http://127.0.0.1:1"));
    let error = exec
        .execute::<serde_json::Value>(ApiRequest::get("venues"))
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Transport { .. }));
    assert!(error.status().is_none());
}
