//! Booking service payloads.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketing_sdk_core::Money;

/// A booking made by an agent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentBooking {
    /// Booking reference
    pub booking_reference: String,
    /// Reference in the agent's own system
    pub agent_reference: Option<String>,
    /// Booking status, e.g. `confirmed` or `cancelled`
    pub status: Option<String>,
    /// When the booking was made
    pub created_at: Option<DateTime<Utc>>,
    /// Ticket holder
    pub customer: Option<Customer>,
    /// Booked products
    #[serde(default)]
    pub items: Vec<BookingItem>,
    /// Amount charged
    pub total: Option<Money>,
}

impl AgentBooking {
    /// Number of tickets across every item.
    #[must_use]
    pub fn ticket_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Ticket holder of a booking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// E-mail address
    pub email: Option<String>,
    /// Telephone number
    pub telephone_number: Option<String>,
}

/// Tickets for one product and performance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    /// Product id
    pub product_id: String,
    /// Product name
    pub product_name: Option<String>,
    /// Venue name
    pub venue_name: Option<String>,
    /// Local date and time of the performance
    pub performance: Option<NaiveDateTime>,
    /// Number of tickets
    #[serde(default)]
    pub quantity: u32,
    /// Seat identifiers
    #[serde(default)]
    pub seats: Vec<String>,
    /// Price of the item
    pub price: Option<Money>,
}
