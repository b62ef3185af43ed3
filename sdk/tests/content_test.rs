//! Content service against a mock API.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use ticketing_sdk::{ApiError, ContentService, Pagination};
use ticketing_sdk_testing::{MockApi, fixtures};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_locations_are_cached() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::data_response(json!([
            {"id": "1", "name": "London", "countryCode": "GB", "subLocations": [
                {"id": "11", "name": "West End"}
            ]},
            {"id": "2", "name": "New York", "countryCode": "US"}
        ]))))
        .expect(1)
        .mount(api.server())
        .await;

    let content = ContentService::with_settings(api.shared_context(), &api.settings()).unwrap();
    let locations = content.get_locations().await.unwrap();
    let again = content.get_locations().await.unwrap();

    assert_eq!(locations.len(), 2);
    assert_eq!(locations, again);
    assert_eq!(
        locations[0].find("11").map(|l| l.name.as_str()),
        Some("West End")
    );
}

#[tokio::test]
async fn test_failed_lookup_is_not_cached() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(api.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/api/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::data_response(json!([
            {"id": "1", "name": "London"}
        ]))))
        .mount(api.server())
        .await;

    let content = ContentService::new(api.shared_context()).unwrap();
    assert!(content.get_locations().await.is_err());
    assert_eq!(content.get_locations().await.unwrap().len(), 1);
    assert_eq!(api.hits("/api/locations").await, 2);
}

#[tokio::test]
async fn test_products_page() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::data_response(json!({
            "items": [
                {"id": "1587", "name": "Wicked", "type": "show", "durationMinutes": 165,
                 "images": [{"url": "https://img.example/wicked.jpg", "width": 600, "height": 600, "type": "square"}]}
            ],
            "currentPage": 2,
            "lastPage": 3,
            "perPage": 10,
            "total": 25
        }))))
        .mount(api.server())
        .await;

    let content = ContentService::new(api.shared_context()).unwrap();
    let page = content.get_products(Pagination::new(2, 10)).await.unwrap();

    assert!(page.has_next_page());
    assert_eq!(page.total, 25);
    assert_eq!(page.items[0].duration_minutes, Some(165));
    assert_eq!(page.items[0].images[0].kind.as_deref(), Some("square"));
}

#[tokio::test]
async fn test_product_by_id_missing_payload() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/1587"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "context": {"errors": [{"message": "Product is not published"}]}
        })))
        .mount(api.server())
        .await;

    let content = ContentService::new(api.shared_context()).unwrap();
    let error = content.get_product_by_id("1587").await.unwrap_err();

    assert!(matches!(
        error,
        ApiError::MissingPayload { ref message, .. } if message == "Product is not published"
    ));
}
