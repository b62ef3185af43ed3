//! Payment service payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketing_sdk_core::Money;

/// Lifecycle state of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    /// Waiting for payment
    #[default]
    Pending,
    /// Fully paid
    Paid,
    /// Partly or fully refunded
    Refunded,
    /// Cancelled before payment
    Cancelled,
    /// Payment failed
    Failed,
    /// Status this client does not know
    #[serde(other)]
    Unknown,
}

/// A payment order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: String,
    /// Basket the order pays for
    pub basket_reference: Option<String>,
    /// Lifecycle state
    #[serde(default)]
    pub status: OrderStatus,
    /// Total amount
    pub amount: Money,
    /// Order lines
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Payment attempts
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Refunds issued
    #[serde(default)]
    pub refunds: Vec<Refund>,
    /// When the order was created
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Sum of the refunds issued so far, in the order's currency.
    #[must_use]
    pub fn refunded_amount(&self) -> Money {
        let value = self
            .refunds
            .iter()
            .filter(|refund| refund.amount.currency == self.amount.currency)
            .map(|refund| refund.amount.value)
            .sum();
        Money {
            value,
            ..self.amount.clone()
        }
    }
}

/// One order line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product id
    pub product_id: Option<String>,
    /// Line description
    pub description: String,
    /// Number of units
    pub quantity: u32,
    /// Price per unit
    pub unit_price: Money,
}

/// A payment attempt against an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment id
    pub id: String,
    /// Provider status, e.g. `succeeded`
    pub status: String,
    /// Amount charged
    pub amount: Money,
    /// Provider name
    pub provider: Option<String>,
    /// When the attempt was made
    pub created_at: Option<DateTime<Utc>>,
}

/// Money returned to the shopper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    /// Refund id
    pub id: String,
    /// Amount returned
    pub amount: Money,
    /// Why the refund was issued
    pub reason: Option<String>,
    /// Provider status
    pub status: Option<String>,
    /// When the refund was issued
    pub created_at: Option<DateTime<Utc>>,
}

/// Create an order for a basket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Basket to pay for
    pub basket_reference: String,
    /// Total amount
    pub amount: Money,
    /// Order lines
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Shopper e-mail for the receipt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Change an order's status or lines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    /// Replacement lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
}

/// Refund part or all of an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    /// Amount to return; the remaining balance when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    /// Why the refund is issued
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refunded_amount_ignores_other_currencies() {
        let order = Order {
            id: "O1".to_string(),
            amount: Money::new(10_000, "GBP"),
            refunds: vec![
                Refund {
                    amount: Money::new(2_500, "GBP"),
                    ..Refund::default()
                },
                Refund {
                    amount: Money::new(1_000, "GBP"),
                    ..Refund::default()
                },
                Refund {
                    amount: Money::new(9_999, "EUR"),
                    ..Refund::default()
                },
            ],
            ..Order::default()
        };

        assert_eq!(order.refunded_amount(), Money::new(3_500, "GBP"));
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_update_request_sends_only_changes() {
        let update = UpdateOrderRequest {
            status: Some(OrderStatus::Cancelled),
            items: None,
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"status":"cancelled"}"#
        );
    }
}
