//! Inventory service: product search, performances and seat availability.
//!
//! The inventory API returns raw payloads; list endpoints nest their items
//! under `results`.

mod models;

pub use models::{
    AggregateSeatAvailability, Availability, AvailabilityRange, Product, Seat, SeatArea,
    SeatGrouping,
};

use crate::error::{require_quantity, require_segment, require_text};
use chrono::{NaiveDate, NaiveDateTime};
use models::{PerformanceResults, SearchResults};
use ticketing_sdk_core::{
    ApiError, ApiRequest, ApiRequestExecutor, ClientSettings, Result, SharedContext,
};

/// Inventory service host in production.
pub const HOST: &str = "inventory-service.tickets-api.io";

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H%M";

/// Client for the inventory service.
#[derive(Clone, Debug)]
pub struct InventoryService {
    executor: ApiRequestExecutor,
}

impl InventoryService {
    /// Create a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be built.
    pub fn new(context: SharedContext) -> Result<Self> {
        Self::with_settings(context, &ClientSettings::default())
    }

    /// Create a client with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be built.
    pub fn with_settings(context: SharedContext, settings: &ClientSettings) -> Result<Self> {
        ApiRequestExecutor::new(context, "inventory", HOST, settings).map(Self::from_executor)
    }

    /// Create a client over an existing executor.
    #[must_use]
    pub const fn from_executor(executor: ApiRequestExecutor) -> Self {
        Self { executor }
    }

    /// Products matching free text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for blank text, or an
    /// [`ApiError`] if the request fails.
    pub async fn search_products(&self, text: &str) -> Result<Vec<Product>> {
        require_text("search text", text)?;
        let request = ApiRequest::get("api/v2/search").query("query", text.trim());
        let found: SearchResults = self.executor.execute(request).await?;
        Ok(found.results.products)
    }

    /// First and last dates `product_id` can be booked for.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a blank id, or an
    /// [`ApiError`] if the request fails.
    pub async fn get_availability_range(&self, product_id: &str) -> Result<AvailabilityRange> {
        require_segment("product id", product_id)?;
        self.executor
            .execute(ApiRequest::get(format!(
                "api/v4/products/{product_id}/availability-range"
            )))
            .await
    }

    /// Performances between `from` and `to` (inclusive) with at least
    /// `quantity` tickets left.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a blank id, a zero quantity
    /// or `from` after `to`, or an [`ApiError`] if the request fails.
    pub async fn get_performances(
        &self,
        product_id: &str,
        quantity: u32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Availability>> {
        require_segment("product id", product_id)?;
        require_quantity(quantity)?;
        if from > to {
            return Err(ApiError::InvalidArgument(format!(
                "date range starts after it ends: {from} > {to}"
            )));
        }

        let path = format!(
            "api/v4/products/{product_id}/quantity/{quantity}/from/{}/to/{}",
            from.format(DATE_FORMAT),
            to.format(DATE_FORMAT),
        );
        let performances: PerformanceResults = self.executor.execute(ApiRequest::get(path)).await?;
        tracing::debug!(
            product_id,
            count = performances.results.len(),
            "Fetched performances"
        );
        Ok(performances.results)
    }

    /// Seats free for `quantity` tickets at one performance.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a blank id or a zero
    /// quantity, or an [`ApiError`] if the request fails.
    pub async fn get_aggregate_seat_availability(
        &self,
        product_id: &str,
        quantity: u32,
        performance: NaiveDateTime,
    ) -> Result<AggregateSeatAvailability> {
        require_segment("product id", product_id)?;
        require_quantity(quantity)?;
        let request = ApiRequest::get(format!(
            "api/v4/products/{product_id}/quantity/{quantity}/seats/available"
        ))
        .query("date", performance.format(DATE_FORMAT))
        .query("time", performance.format(TIME_FORMAT));
        self.executor.execute(request).await
    }
}
