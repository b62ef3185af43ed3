//! Checkout service payloads.

use crate::common::{Address, Shopper};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketing_sdk_core::Money;

/// How the shopper pays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentType {
    /// Card payment through the payment provider
    #[default]
    Card,
    /// Charged to the agent's account
    OnAccount,
    /// Nothing to pay, e.g. a fully discounted basket
    None,
}

/// Start checkout of a basket.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Basket to check out
    pub basket_reference: String,
    /// Sales channel
    pub channel_id: String,
    /// Buyer
    pub shopper: Shopper,
    /// Billing address
    pub billing_address: Address,
    /// Payment type
    pub payment_type: PaymentType,
    /// Where the payment provider sends the shopper afterwards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Delivery method, e.g. `collection`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<String>,
}

/// What the shopper has to pay and how.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    /// Payment id at the provider
    pub payment_id: String,
    /// Amount due
    pub amount: Money,
    /// Provider name
    pub provider: Option<String>,
    /// Secret the front end hands to the provider's widget
    pub client_secret: Option<String>,
    /// Provider page to send the shopper to
    pub redirect_url: Option<String>,
    /// Order created for this checkout
    pub order_id: Option<String>,
}

/// Confirm a paid or on-account booking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingRequest {
    /// Sales channel
    pub channel_id: String,
    /// Payment id returned by checkout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Reference in the agent's own system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_reference: Option<String>,
}

/// A confirmed booking.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    /// Booking reference
    pub booking_reference: String,
    /// Basket the booking came from
    pub basket_reference: Option<String>,
    /// Booking status, e.g. `confirmed`
    pub status: Option<String>,
    /// When the booking was confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
}
