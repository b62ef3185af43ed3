//! Venue service against a mock API.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use ticketing_sdk::venue::{AttributeIntention, SeatAttribute, StandardAttribute, Venue};
use ticketing_sdk::{ApiError, VenueService};
use ticketing_sdk_core::StatusCode;
use ticketing_sdk_testing::{MockApi, TEST_TOKEN, fixtures};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn venue_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "address": {
            "firstLine": "Shaftesbury Avenue",
            "city": "London",
            "postcode": "W1D 7EZ",
            "country": {"name": "United Kingdom", "isoCode": "GB"}
        },
        "venueConfig": {"isAreaSeated": false, "seatplanEnabled": true}
    })
}

#[tokio::test]
async fn test_get_venues_is_cached() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/venues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::api_response(json!([
            venue_json("138", "Apollo Victoria"),
            venue_json("199", "Lyceum"),
        ]))))
        .expect(1)
        .mount(api.server())
        .await;

    let venues = VenueService::with_settings(api.shared_context(), &api.settings()).unwrap();
    let first = venues.get_venues().await.unwrap();
    let second = venues.get_venues().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    let address = first[0].address.as_ref().unwrap();
    assert_eq!(address.city.as_deref(), Some("London"));
    assert_eq!(
        address.country.as_ref().and_then(|c| c.iso_code.as_deref()),
        Some("GB")
    );
}

#[tokio::test]
async fn test_get_venue_not_found() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/venues/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(fixtures::context_error(
            "notFound",
            "Venue not found",
        )))
        .mount(api.server())
        .await;

    let venues = VenueService::new(api.shared_context()).unwrap();
    let error = venues.get_venue_by_id("404").await.unwrap_err();

    assert!(matches!(error, ApiError::Http(_)));
    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(error.message(), "Venue not found");
}

#[tokio::test]
async fn test_update_venue_logs_in_first() {
    let api = MockApi::start().await;
    api.mock_login(1).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/venues/138"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::api_response(
            venue_json("138", "Apollo Victoria Theatre"),
        )))
        .expect(1)
        .mount(api.server())
        .await;

    let venues = VenueService::new(api.jwt_context().into_shared()).unwrap();
    let venue = Venue {
        id: "138".to_string(),
        title: Some("Apollo Victoria Theatre".to_string()),
        ..Venue::default()
    };
    let updated = venues.update_venue_by_id(&venue).await.unwrap();

    assert_eq!(updated.title.as_deref(), Some("Apollo Victoria Theatre"));
}

#[tokio::test]
async fn test_update_venue_without_credentials() {
    let api = MockApi::start().await;
    let venues = VenueService::new(api.shared_context()).unwrap();

    let error = venues
        .update_venue_by_id(&Venue {
            id: "138".to_string(),
            ..Venue::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::NotAuthenticated(_)));
    assert_eq!(api.hits("/api/v1/admin/venues/138").await, 0);
}

#[tokio::test]
async fn test_standard_attributes() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/attributes/standard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::api_response(json!([
            {"title": "Restricted view", "description": "Pillar in view", "intention": "negative"},
            {"title": "Aisle", "intention": "positive"},
            {"title": "Wheelchair space", "intention": "accessibility"}
        ]))))
        .mount(api.server())
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/admin/attributes"))
        .and(body_json(json!({"title": "Aisle", "description": null, "intention": "positive"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::api_response(
            json!({"title": "Aisle", "intention": "positive"}),
        )))
        .expect(1)
        .mount(api.server())
        .await;

    let venues = VenueService::new(api.token_context().into_shared()).unwrap();
    let attributes = venues.get_standard_attributes().await.unwrap();
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes[0].intention, Some(AttributeIntention::Negative));
    assert_eq!(attributes[2].intention, Some(AttributeIntention::Unknown));

    let aisle = StandardAttribute {
        title: "Aisle".to_string(),
        description: None,
        intention: Some(AttributeIntention::Positive),
    };
    let saved = venues.upsert_standard_attribute_by_title(&aisle).await.unwrap();
    assert_eq!(saved.title, "Aisle");
}

#[tokio::test]
async fn test_seat_attributes() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/venues/138/seats/attributes/detailed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::api_response(json!([
            {"seatIdentifier": "STALLS-A-1", "attributes": [{"title": "Aisle", "intention": "positive"}]}
        ]))))
        .mount(api.server())
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/admin/venues/138/seats/attributes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::api_response(json!({"success": true}))),
        )
        .expect(1)
        .mount(api.server())
        .await;

    let venues = VenueService::new(api.token_context().into_shared()).unwrap();
    let seats = venues.get_seat_attributes("138").await.unwrap();
    assert_eq!(seats[0].seat_identifier, "STALLS-A-1");
    assert_eq!(seats[0].attributes[0].title, "Aisle");

    assert!(venues.upsert_seat_attributes("138", &seats).await.unwrap());

    let empty: Vec<SeatAttribute> = Vec::new();
    assert!(matches!(
        venues.upsert_seat_attributes("138", &empty).await,
        Err(ApiError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_invalid_venue_id_sends_nothing() {
    let api = MockApi::start().await;
    let venues = VenueService::new(api.shared_context()).unwrap();

    assert!(matches!(
        venues.get_venue_by_id("").await,
        Err(ApiError::InvalidArgument(_))
    ));
    assert!(matches!(
        venues.get_seat_attributes("138/../admin").await,
        Err(ApiError::InvalidArgument(_))
    ));
    assert!(api.server().received_requests().await.unwrap().is_empty());
}
