//! Inventory service payloads.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ticketing_sdk_core::Money;

/// A bookable show or attraction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    pub id: String,
    /// Display name
    pub name: String,
    /// Product type, e.g. `show` or `attraction`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Venue the product plays at
    pub venue_id: Option<String>,
    /// Whether the product can be booked now
    #[serde(default)]
    pub on_sale: bool,
    /// Lowest ticket price
    pub from_price: Option<Money>,
}

/// Search hits, as returned under `results`.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct SearchResults {
    #[serde(default)]
    pub(crate) results: SearchHits,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct SearchHits {
    #[serde(default)]
    pub(crate) products: Vec<Product>,
}

/// First and last dates a product can be booked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRange {
    /// First bookable date
    pub first_bookable_date: NaiveDate,
    /// Last bookable date
    pub last_bookable_date: NaiveDate,
}

impl AvailabilityRange {
    /// Whether `date` falls inside the range, both ends included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_bookable_date <= date && date <= self.last_bookable_date
    }
}

/// One performance and what can still be bought for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Local date and time of the performance
    pub datetime: NaiveDateTime,
    /// Number of tickets still available
    #[serde(default)]
    pub number_of_tickets: u32,
    /// Lowest price for the requested quantity
    pub from_price: Option<Money>,
    /// Largest discount on offer, in percent
    pub largest_discount_percentage: Option<f64>,
}

/// Performances, as returned under `results`.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct PerformanceResults {
    #[serde(default)]
    pub(crate) results: Vec<Availability>,
}

/// Seats available for one performance, grouped by area.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSeatAvailability {
    /// Seating areas with free seats
    #[serde(default)]
    pub areas: Vec<SeatArea>,
}

impl AggregateSeatAvailability {
    /// Total number of free seats across every area.
    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.areas
            .iter()
            .flat_map(|area| &area.groupings)
            .map(|grouping| grouping.seats.len())
            .sum()
    }
}

/// A seating area such as the stalls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatArea {
    /// Area name
    pub name: String,
    /// Area code, when the venue uses one
    pub area_code: Option<String>,
    /// Blocks of adjacent seats
    #[serde(default)]
    pub groupings: Vec<SeatGrouping>,
}

/// Adjacent seats sold together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatGrouping {
    /// Grouping id
    pub grouping_id: Option<String>,
    /// Price per seat
    pub pricing: Option<Money>,
    /// Seats in the grouping
    #[serde(default)]
    pub seats: Vec<Seat>,
}

/// A single seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Seat identifier, e.g. `STALLS-A-12`
    pub seat_identifier: String,
    /// Row label
    pub row: Option<String>,
    /// Number within the row
    pub number: Option<String>,
    /// Attribute titles attached to the seat
    #[serde(default)]
    pub attributes: Vec<String>,
}
