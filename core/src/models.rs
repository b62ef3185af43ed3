//! Models shared by several services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in minor units of a currency.
///
/// The APIs send prices as an integer `value` plus the number of decimal
/// places, so `{"value": 4550, "currency": "GBP", "decimalPlaces": 2}` is
/// £45.50.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in minor units
    pub value: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Number of minor-unit digits
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

const fn default_decimal_places() -> u32 {
    2
}

impl Money {
    /// Create an amount from minor units with two decimal places.
    #[must_use]
    pub fn new(value: i64, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
            decimal_places: default_decimal_places(),
        }
    }

    /// Amount in major units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Display and comparison only
    pub fn as_decimal(&self) -> f64 {
        self.value as f64 / 10f64.powi(i32::try_from(self.decimal_places).unwrap_or(i32::MAX))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.decimal_places as usize;
        write!(f, "{:.places$} {}", self.as_decimal(), self.currency)
    }
}

/// Page request for list endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl Pagination {
    /// Create a page request.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Query parameters for this page.
    #[must_use]
    pub fn to_query(self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

/// One page of a list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Current page number
    #[serde(default)]
    pub current_page: u32,
    /// Total number of pages
    #[serde(default)]
    pub last_page: u32,
    /// Items per page
    #[serde(default)]
    pub per_page: u32,
    /// Total number of items across pages
    #[serde(default)]
    pub total: u64,
}

impl<T> PagedList<T> {
    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.last_page
    }
}
