//! Venue service payloads.

use serde::{Deserialize, Serialize};

/// A theatre or other venue.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Venue id
    pub id: String,
    /// Display name
    pub title: Option<String>,
    /// Long description
    pub description: Option<String>,
    /// Location of the venue
    pub address: Option<VenueAddress>,
    /// Id in the legacy inventory system
    pub internal_id: Option<String>,
    /// Id composed of the supplier and the supplier's venue id
    pub composite_id: Option<String>,
    /// Seating configuration
    pub venue_config: Option<VenueConfig>,
}

/// Postal address of a venue.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueAddress {
    /// First address line
    pub first_line: Option<String>,
    /// Second address line
    pub second_line: Option<String>,
    /// Third address line
    pub third_line: Option<String>,
    /// City
    pub city: Option<String>,
    /// Postal code
    pub postcode: Option<String>,
    /// Region
    pub region: Option<NamedCode>,
    /// Country
    pub country: Option<NamedCode>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
}

/// A name with its ISO code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedCode {
    /// Display name
    pub name: Option<String>,
    /// ISO code
    pub iso_code: Option<String>,
}

/// Seating configuration of a venue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueConfig {
    /// Whether the venue seats by area rather than seat
    pub is_area_seated: Option<bool>,
    /// Whether the seating plan is shown to shoppers
    pub seatplan_enabled: Option<bool>,
}

/// A reusable seat attribute such as "restricted view".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardAttribute {
    /// Unique title
    pub title: String,
    /// Shopper-facing description
    pub description: Option<String>,
    /// Whether the attribute is a benefit or a drawback
    pub intention: Option<AttributeIntention>,
}

/// Whether an attribute makes a seat more or less attractive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeIntention {
    /// Makes the seat more attractive
    Positive,
    /// Makes the seat less attractive
    Negative,
    /// Informational only
    Neutral,
    /// Intention this client does not know
    #[serde(other)]
    Unknown,
}

/// Attributes attached to one seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAttribute {
    /// Seat identifier, e.g. `STALLS-A-12`
    pub seat_identifier: String,
    /// Attributes of the seat
    #[serde(default)]
    pub attributes: Vec<StandardAttribute>,
}

/// Body of a seat attribute upsert.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct SeatAttributesUpsert<'a> {
    pub(crate) seats: &'a [SeatAttribute],
}
