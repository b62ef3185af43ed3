//! Content service: locations and editorial product content.
//!
//! Payloads are wrapped in [`DataResponse`](ticketing_sdk_core::DataResponse).

mod models;

pub use models::{ContentProduct, Image, Location};

use crate::error::require_segment;
use std::sync::Arc;
use ticketing_sdk_core::{
    ApiRequest, ApiRequestExecutor, ClientSettings, MemoryCache, PagedList, Pagination, Result,
    SharedContext,
};

/// Content service host in production.
pub const HOST: &str = "content-service.tickets-api.io";

const LOCATIONS_CACHE_KEY: &str = "locations";

/// Client for the content service.
#[derive(Clone, Debug)]
pub struct ContentService {
    executor: ApiRequestExecutor,
    locations: MemoryCache<&'static str, Arc<Vec<Location>>>,
}

impl ContentService {
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
        let executor = ApiRequestExecutor::new(context, "content", HOST, settings)?;
        Ok(Self::from_executor(executor, settings))
    }

    /// Create a client over an existing executor.
    #[must_use]
    pub fn from_executor(executor: ApiRequestExecutor, settings: &ClientSettings) -> Self {
        Self {
            executor,
            locations: MemoryCache::new(settings.cache_ttl, 1),
        }
    }

    /// Location tree. Served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn get_locations(&self) -> Result<Arc<Vec<Location>>> {
        self.locations
            .get_or_try_insert_with(LOCATIONS_CACHE_KEY, || async {
                let locations: Vec<Location> =
                    self.executor.execute_data(ApiRequest::get("api/locations")).await?;
                Ok(Arc::new(locations))
            })
            .await
    }

    /// One page of products.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn get_products(&self, page: Pagination) -> Result<PagedList<ContentProduct>> {
        let request = ApiRequest::get("api/products").query_pairs(page.to_query());
        self.executor.execute_data(request).await
    }

    /// Content of one product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`](ticketing_sdk_core::ApiError::InvalidArgument)
    /// for a blank id, or an [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn get_product_by_id(&self, product_id: &str) -> Result<ContentProduct> {
        require_segment("product id", product_id)?;
        self.executor
            .execute_data(ApiRequest::get(format!("api/products/{product_id}")))
            .await
    }
}
