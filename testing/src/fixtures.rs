//! JSON bodies in the shapes the ticketing APIs return.

use serde_json::{Value, json};

/// `payload` wrapped as `{"request": …, "response": payload, "context": null}`.
#[must_use]
pub fn api_response(payload: Value) -> Value {
    json!({
        "request": {"urlParams": {}, "body": ""},
        "response": payload,
        "context": null,
    })
}

/// `payload` wrapped as `{"data": payload}`.
#[must_use]
pub fn data_response(payload: Value) -> Value {
    json!({ "data": payload })
}

/// Error body carrying one error in the response context.
#[must_use]
pub fn context_error(code: &str, message: &str) -> Value {
    json!({
        "request": {"urlParams": {}, "body": ""},
        "response": null,
        "context": {"errors": [{"code": code, "message": message}]},
    })
}

/// A price in minor units.
#[must_use]
pub fn money_json(value: i64, currency: &str) -> Value {
    json!({"value": value, "currency": currency, "decimalPlaces": 2})
}

/// A basket holding one reservation of two £45.50 seats.
#[must_use]
pub fn basket_json(reference: &str, status: &str) -> Value {
    json!({
        "reference": reference,
        "status": status,
        "checksum": "abc123",
        "channelId": "web",
        "shopperCurrency": "GBP",
        "expiredAt": "2026-01-01T00:15:00Z",
        "createdAt": "2026-01-01T00:00:00Z",
        "reservations": [{
            "id": "1",
            "productId": "1587",
            "productName": "Wicked",
            "venueId": "138",
            "date": "2026-02-14T19:30:00",
            "quantity": 2,
            "items": [
                {"seatIdentifier": "STALLS-A-1", "aggregateReference": "ref-1", "salePrice": money_json(4550, "GBP")},
                {"seatIdentifier": "STALLS-A-2", "aggregateReference": "ref-2", "salePrice": money_json(4550, "GBP")}
            ]
        }],
        "coupon": null,
        "delivery": {"method": "collection", "charge": money_json(0, "GBP")}
    })
}
