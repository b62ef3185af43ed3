//! Basket service payloads.

use crate::common::Shopper;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketing_sdk_core::Money;

/// Lifecycle state of a basket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BasketStatus {
    /// Open for changes
    #[default]
    Active,
    /// Checkout has started; seats are held
    Processing,
    /// Paid and booked
    Confirmed,
    /// Hold time ran out
    Expired,
    /// Status this client does not know
    #[serde(other)]
    Unknown,
}

impl BasketStatus {
    /// Whether reservations and promotions can still change.
    #[must_use]
    pub const fn is_modifiable(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A shopper's basket of reservations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    /// Basket reference
    pub reference: String,
    /// Lifecycle state
    #[serde(default)]
    pub status: BasketStatus,
    /// Checksum the checkout service compares against
    pub checksum: Option<String>,
    /// Sales channel
    pub channel_id: Option<String>,
    /// Currency prices are charged in
    pub shopper_currency: Option<String>,
    /// When the seat hold ends
    pub expired_at: Option<DateTime<Utc>>,
    /// When the basket was created
    pub created_at: Option<DateTime<Utc>>,
    /// Held seats, one entry per product and performance
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    /// Applied coupon
    pub coupon: Option<Coupon>,
    /// Chosen delivery
    pub delivery: Option<Delivery>,
    /// Buyer, once known
    pub shopper: Option<Shopper>,
}

impl Basket {
    /// Sum of the sale prices of every reserved item.
    ///
    /// `None` when the basket is empty or items are priced in different
    /// currencies.
    #[must_use]
    pub fn total_sale_price(&self) -> Option<Money> {
        let mut prices = self
            .reservations
            .iter()
            .flat_map(|reservation| &reservation.items)
            .map(|item| &item.sale_price);

        let first = prices.next()?.clone();
        prices.try_fold(first, |mut total, price| {
            if price.currency != total.currency || price.decimal_places != total.decimal_places {
                return None;
            }
            total.value += price.value;
            Some(total)
        })
    }

    /// Whether the seat hold has ended at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == BasketStatus::Expired
            || self.expired_at.is_some_and(|expires| expires <= now)
    }

    /// Reservation by id.
    #[must_use]
    pub fn reservation(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|reservation| reservation.id == id)
    }
}

/// Seats held for one product and performance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation id within the basket
    pub id: String,
    /// Product id
    pub product_id: String,
    /// Product name
    pub product_name: Option<String>,
    /// Venue id
    pub venue_id: Option<String>,
    /// Local date and time of the performance
    pub date: Option<NaiveDateTime>,
    /// Number of tickets
    #[serde(default)]
    pub quantity: u32,
    /// Individual held seats
    #[serde(default)]
    pub items: Vec<ReservationItem>,
}

/// One held seat.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationItem {
    /// Inventory reference of the seat
    pub aggregate_reference: Option<String>,
    /// Seat identifier, e.g. `STALLS-A-12`
    pub seat_identifier: Option<String>,
    /// Area name
    pub area_name: Option<String>,
    /// Row label
    pub row: Option<String>,
    /// Seat number
    pub number: Option<String>,
    /// Price the shopper pays
    pub sale_price: Money,
    /// Printed ticket price
    pub face_value: Option<Money>,
}

/// Delivery chosen for a basket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Delivery method, e.g. `collection` or `eticket`
    pub method: String,
    /// Delivery charge
    pub charge: Option<Money>,
}

/// A promo code applied to a basket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Code as the shopper typed it
    pub code: String,
}

impl Coupon {
    /// Create a coupon.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// A running promotion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Promotion id
    pub id: String,
    /// Display name
    pub name: String,
    /// Shopper-facing description
    pub description: Option<String>,
    /// Discount in percent, for percentage promotions
    pub discount_percentage: Option<f64>,
    /// Fixed discount, for amount promotions
    pub discount_amount: Option<Money>,
    /// Start of validity
    pub valid_from: Option<DateTime<Utc>>,
    /// End of validity
    pub valid_to: Option<DateTime<Utc>>,
    /// Products the promotion applies to; empty means every product
    #[serde(default)]
    pub product_ids: Vec<String>,
}

/// Create or replace a basket's contents.
///
/// Without a `reference` the service opens a new basket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBasketRequest {
    /// Basket to update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Sales channel
    pub channel_id: String,
    /// Currency to charge in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_currency: Option<String>,
    /// Seats to hold
    pub reservations: Vec<ReservationRequest>,
    /// Coupon to apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
}

/// Seats to hold for one product and performance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    /// Product id
    pub product_id: String,
    /// Venue id
    pub venue_id: String,
    /// Local date and time of the performance
    pub date: NaiveDateTime,
    /// Number of tickets
    pub quantity: u32,
    /// Specific seats; empty lets the service choose
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ReservationItemRequest>,
}

/// A specific seat to hold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationItemRequest {
    /// Inventory reference of the seat
    pub aggregate_reference: String,
}

/// Body of a promotion request.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct ApplyPromotion<'a> {
    pub(crate) coupon: &'a Coupon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(value: i64, currency: &str) -> ReservationItem {
        ReservationItem {
            sale_price: Money::new(value, currency),
            ..ReservationItem::default()
        }
    }

    fn basket(items: Vec<ReservationItem>) -> Basket {
        Basket {
            reference: "B1".to_string(),
            reservations: vec![Reservation {
                id: "1".to_string(),
                items,
                ..Reservation::default()
            }],
            ..Basket::default()
        }
    }

    #[test]
    fn test_total_sale_price() {
        let total = basket(vec![item(4550, "GBP"), item(3000, "GBP")]).total_sale_price();
        assert_eq!(total, Some(Money::new(7550, "GBP")));

        assert_eq!(basket(vec![]).total_sale_price(), None);
        assert_eq!(
            basket(vec![item(4550, "GBP"), item(3000, "EUR")]).total_sale_price(),
            None
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_is_expired() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let mut held = basket(vec![]);
        held.expired_at = Some(Utc.with_ymd_and_hms(2026, 10, 17, 12, 15, 0).unwrap());
        assert!(!held.is_expired(now));

        held.expired_at = Some(Utc.with_ymd_and_hms(2026, 10, 17, 11, 45, 0).unwrap());
        assert!(held.is_expired(now));

        let expired = Basket {
            status: BasketStatus::Expired,
            ..Basket::default()
        };
        assert!(expired.is_expired(now));
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_unknown_status_tolerated() {
        let basket: Basket =
            serde_json::from_str(r#"{"reference":"B1","status":"archived"}"#).unwrap();
        assert_eq!(basket.status, BasketStatus::Unknown);
        assert!(!basket.status.is_modifiable());
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_upsert_request_omits_absent_fields() {
        let request = UpsertBasketRequest {
            channel_id: "web".to_string(),
            ..UpsertBasketRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("reference").is_none());
        assert!(json.get("coupon").is_none());
        assert_eq!(json["channelId"], "web");
    }
}
