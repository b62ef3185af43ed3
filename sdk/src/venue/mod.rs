//! Venue service: venues, their seating and seat attributes.

mod models;

pub use models::{
    AttributeIntention, NamedCode, SeatAttribute, StandardAttribute, Venue, VenueAddress,
    VenueConfig,
};

use crate::common::SuccessResponse;
use crate::error::{require_segment, require_text};
use models::SeatAttributesUpsert;
use std::sync::Arc;
use ticketing_sdk_core::{
    ApiRequest, ApiRequestExecutor, ClientSettings, MemoryCache, Result, SharedContext,
};

/// Venue service host in production.
pub const HOST: &str = "venue-service.tickets-api.io";

const VENUES_CACHE_KEY: &str = "venues";

/// Client for the venue service.
///
/// Responses are wrapped in [`ApiResponse`](ticketing_sdk_core::ApiResponse).
/// The venue list is cached for the configured TTL; writes require
/// authentication.
#[derive(Clone, Debug)]
pub struct VenueService {
    executor: ApiRequestExecutor,
    venues: MemoryCache<&'static str, Arc<Vec<Venue>>>,
}

impl VenueService {
    /// Create a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`](ticketing_sdk_core::ApiError::Configuration)
    /// if the HTTP client cannot be built.
    pub fn new(context: SharedContext) -> Result<Self> {
        Self::with_settings(context, &ClientSettings::default())
    }

    /// Create a client with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`](ticketing_sdk_core::ApiError::Configuration)
    /// if the HTTP client cannot be built.
    pub fn with_settings(context: SharedContext, settings: &ClientSettings) -> Result<Self> {
        let executor = ApiRequestExecutor::new(context, "venue", HOST, settings)?;
        Ok(Self::from_executor(executor, settings))
    }

    /// Create a client over an existing executor.
    #[must_use]
    pub fn from_executor(executor: ApiRequestExecutor, settings: &ClientSettings) -> Self {
        Self {
            executor,
            venues: MemoryCache::new(settings.cache_ttl, 1),
        }
    }

    /// The executor behind this client.
    #[must_use]
    pub const fn executor(&self) -> &ApiRequestExecutor {
        &self.executor
    }

    /// All venues. Served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn get_venues(&self) -> Result<Arc<Vec<Venue>>> {
        self.venues
            .get_or_try_insert_with(VENUES_CACHE_KEY, || async {
                let venues: Vec<Venue> = self
                    .executor
                    .execute_api_response(ApiRequest::get("api/v1/venues"))
                    .await?;
                tracing::debug!(count = venues.len(), "Fetched venues");
                Ok(Arc::new(venues))
            })
            .await
    }

    /// One venue by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`](ticketing_sdk_core::ApiError::InvalidArgument)
    /// for a blank id, or an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn get_venue_by_id(&self, venue_id: &str) -> Result<Venue> {
        require_segment("venue id", venue_id)?;
        self.executor
            .execute_api_response(ApiRequest::get(format!("api/v1/venues/{venue_id}")))
            .await
    }

    /// Replace a venue's details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`](ticketing_sdk_core::ApiError::InvalidArgument)
    /// for a blank id, or an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn update_venue_by_id(&self, venue: &Venue) -> Result<Venue> {
        require_segment("venue id", &venue.id)?;
        let request = ApiRequest::post(format!("api/v1/admin/venues/{}", venue.id))
            .json(venue)?
            .authenticated();
        let updated = self.executor.execute_api_response(request).await?;
        self.venues.invalidate(&VENUES_CACHE_KEY).await;
        Ok(updated)
    }

    /// All standard attributes.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn get_standard_attributes(&self) -> Result<Vec<StandardAttribute>> {
        self.executor
            .execute_api_response(ApiRequest::get("api/v1/attributes/standard"))
            .await
    }

    /// Create or update a standard attribute, keyed by its title.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`](ticketing_sdk_core::ApiError::InvalidArgument)
    /// for a blank title, or an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn upsert_standard_attribute_by_title(
        &self,
        attribute: &StandardAttribute,
    ) -> Result<StandardAttribute> {
        require_text("attribute title", &attribute.title)?;
        let request = ApiRequest::patch("api/v1/admin/attributes")
            .json(attribute)?
            .authenticated();
        self.executor.execute_api_response(request).await
    }

    /// Seat attributes of a venue.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`](ticketing_sdk_core::ApiError::InvalidArgument)
    /// for a blank id, or an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn get_seat_attributes(&self, venue_id: &str) -> Result<Vec<SeatAttribute>> {
        require_segment("venue id", venue_id)?;
        self.executor
            .execute_api_response(ApiRequest::get(format!(
                "api/v1/venues/{venue_id}/seats/attributes/detailed"
            )))
            .await
    }

    /// Create or update seat attributes of a venue.
    ///
    /// Returns whether the service applied the change.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`](ticketing_sdk_core::ApiError::InvalidArgument)
    /// for a blank id or an empty seat list, or an
    /// [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn upsert_seat_attributes(
        &self,
        venue_id: &str,
        seats: &[SeatAttribute],
    ) -> Result<bool> {
        require_segment("venue id", venue_id)?;
        if seats.is_empty() {
            return Err(ticketing_sdk_core::ApiError::InvalidArgument(
                "at least one seat attribute is required".to_string(),
            ));
        }
        let request = ApiRequest::patch(format!("api/v1/admin/venues/{venue_id}/seats/attributes"))
            .json(&SeatAttributesUpsert { seats })?
            .authenticated();
        let response: SuccessResponse = self.executor.execute_api_response(request).await?;
        Ok(response.success)
    }
}
