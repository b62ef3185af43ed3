//! Inventory service against a mock API.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use serde_json::json;
use ticketing_sdk::{ApiError, InventoryService, Money};
use ticketing_sdk_testing::{MockApi, fixtures};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn test_search_products() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .and(query_param("query", "wicked"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {"products": [
                {"id": "1587", "name": "Wicked", "type": "show", "venueId": "138", "onSale": true,
                 "fromPrice": fixtures::money_json(2500, "GBP")}
            ]}
        })))
        .expect(1)
        .mount(api.server())
        .await;

    let inventory = InventoryService::new(api.shared_context()).unwrap();
    let products = inventory.search_products("  wicked ").await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].kind.as_deref(), Some("show"));
    assert!(products[0].on_sale);
    assert_eq!(products[0].from_price, Some(Money::new(2500, "GBP")));
}

#[tokio::test]
async fn test_search_without_results() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
        .mount(api.server())
        .await;

    let inventory = InventoryService::new(api.shared_context()).unwrap();
    assert!(inventory.search_products("nothing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_availability_range() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/products/1587/availability-range"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firstBookableDate": "2026-01-05",
            "lastBookableDate": "2026-06-30"
        })))
        .mount(api.server())
        .await;

    let inventory = InventoryService::new(api.shared_context()).unwrap();
    let range = inventory.get_availability_range("1587").await.unwrap();

    assert_eq!(range.first_bookable_date, date(2026, 1, 5));
    assert!(range.contains(date(2026, 3, 1)));
}

#[tokio::test]
async fn test_performances() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/products/1587/quantity/2/from/20260201/to/20260228"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"datetime": "2026-02-14T14:30:00", "numberOfTickets": 12, "fromPrice": fixtures::money_json(4550, "GBP")},
                {"datetime": "2026-02-14T19:30:00", "numberOfTickets": 40, "largestDiscountPercentage": 15.0}
            ]
        })))
        .expect(1)
        .mount(api.server())
        .await;

    let inventory = InventoryService::new(api.shared_context()).unwrap();
    let performances = inventory
        .get_performances("1587", 2, date(2026, 2, 1), date(2026, 2, 28))
        .await
        .unwrap();

    assert_eq!(performances.len(), 2);
    assert_eq!(performances[1].number_of_tickets, 40);
    assert_eq!(
        performances[0].datetime,
        date(2026, 2, 14).and_hms_opt(14, 30, 0).unwrap()
    );
}

#[tokio::test]
async fn test_performances_rejects_bad_input() {
    let api = MockApi::start().await;
    let inventory = InventoryService::new(api.shared_context()).unwrap();

    assert!(matches!(
        inventory
            .get_performances("1587", 2, date(2026, 3, 1), date(2026, 2, 1))
            .await,
        Err(ApiError::InvalidArgument(_))
    ));
    assert!(matches!(
        inventory
            .get_performances("1587", 0, date(2026, 2, 1), date(2026, 3, 1))
            .await,
        Err(ApiError::InvalidArgument(_))
    ));
    assert!(matches!(
        inventory.search_products("   ").await,
        Err(ApiError::InvalidArgument(_))
    ));
    assert!(api.server().received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_aggregate_seat_availability() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/products/1587/quantity/2/seats/available"))
        .and(query_param("date", "20260214"))
        .and(query_param("time", "1930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "areas": [{
                "name": "Stalls",
                "groupings": [{
                    "groupingId": "g1",
                    "pricing": fixtures::money_json(4550, "GBP"),
                    "seats": [
                        {"seatIdentifier": "STALLS-A-1", "row": "A", "number": "1"},
                        {"seatIdentifier": "STALLS-A-2", "row": "A", "number": "2", "attributes": ["Aisle"]}
                    ]
                }]
            }]
        })))
        .mount(api.server())
        .await;

    let inventory = InventoryService::new(api.shared_context()).unwrap();
    let performance = date(2026, 2, 14).and_hms_opt(19, 30, 0).unwrap();
    let seats = inventory
        .get_aggregate_seat_availability("1587", 2, performance)
        .await
        .unwrap();

    assert_eq!(seats.total_seats(), 2);
    assert_eq!(seats.areas[0].groupings[0].seats[1].attributes, vec!["Aisle"]);
}

#[tokio::test]
async fn test_server_error_keeps_response() {
    let api = MockApi::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/products/1587/availability-range"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(api.server())
        .await;

    let inventory = InventoryService::new(api.shared_context()).unwrap();
    let error = inventory.get_availability_range("1587").await.unwrap_err();

    assert_eq!(error.response_body(), Some("upstream unavailable"));
    assert_eq!(error.message(), "upstream unavailable");
}
