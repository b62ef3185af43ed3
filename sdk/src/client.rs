//! One entry point over every service client.

use crate::basket::{self, BasketService};
use crate::booking::{self, BookingService};
use crate::checkout::{self, CheckoutService};
use crate::content::{self, ContentService};
use crate::inventory::{self, InventoryService};
use crate::payment::{self, PaymentService};
use crate::venue::{self, VenueService};
use ticketing_sdk_core::executor::build_http_client;
use ticketing_sdk_core::{
    ApiContext, ApiRequestExecutor, AuthenticationService, ClientSettings, Result, SdkConfig,
    SharedContext,
};

/// Every service client over one shared context and HTTP connection pool.
///
/// A token obtained by any service (or by [`TicketingClient::auth`]) is
/// seen by all of them.
#[derive(Clone, Debug)]
pub struct TicketingClient {
    context: SharedContext,
    venue: VenueService,
    inventory: InventoryService,
    content: ContentService,
    basket: BasketService,
    checkout: CheckoutService,
    payment: PaymentService,
    booking: BookingService,
}

impl TicketingClient {
    /// Create a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`](ticketing_sdk_core::ApiError::Configuration)
    /// if the HTTP client cannot be built.
    pub fn new(context: ApiContext) -> Result<Self> {
        Self::with_settings(context.into_shared(), &ClientSettings::default())
    }

    /// Create a client from `TICKETING_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`](ticketing_sdk_core::ApiError::Configuration)
    /// if a variable is invalid or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        let (context, settings) = SdkConfig::from_env()?.into_parts();
        Self::with_settings(context.into_shared(), &settings)
    }

    /// Create a client over an existing shared context.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`](ticketing_sdk_core::ApiError::Configuration)
    /// if the HTTP client cannot be built.
    pub fn with_settings(context: SharedContext, settings: &ClientSettings) -> Result<Self> {
        let http = build_http_client(settings)?;
        let executor = |service: &'static str, host: &str| {
            ApiRequestExecutor::with_client(http.clone(), context.clone(), service, host)
        };

        Ok(Self {
            venue: VenueService::from_executor(executor("venue", venue::HOST), settings),
            inventory: InventoryService::from_executor(executor("inventory", inventory::HOST)),
            content: ContentService::from_executor(executor("content", content::HOST), settings),
            basket: BasketService::from_executor(executor("basket", basket::HOST)),
            checkout: CheckoutService::from_executor(executor("checkout", checkout::HOST)),
            payment: PaymentService::from_executor(executor("payment", payment::HOST)),
            booking: BookingService::from_executor(executor("booking", booking::HOST)),
            context,
        })
    }

    /// Context shared by every service.
    #[must_use]
    pub const fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Venue service.
    #[must_use]
    pub const fn venue(&self) -> &VenueService {
        &self.venue
    }

    /// Inventory service.
    #[must_use]
    pub const fn inventory(&self) -> &InventoryService {
        &self.inventory
    }

    /// Content service.
    #[must_use]
    pub const fn content(&self) -> &ContentService {
        &self.content
    }

    /// Basket service.
    #[must_use]
    pub const fn basket(&self) -> &BasketService {
        &self.basket
    }

    /// Checkout service.
    #[must_use]
    pub const fn checkout(&self) -> &CheckoutService {
        &self.checkout
    }

    /// Payment service.
    #[must_use]
    pub const fn payment(&self) -> &PaymentService {
        &self.payment
    }

    /// Booking service.
    #[must_use]
    pub const fn booking(&self) -> &BookingService {
        &self.booking
    }

    /// Load the cached reference data (venues and locations) concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`](ticketing_sdk_core::ApiError) either
    /// request fails with.
    pub async fn warm_up(&self) -> Result<()> {
        let (venues, locations) =
            futures::future::try_join(self.venue.get_venues(), self.content.get_locations()).await?;
        tracing::info!(
            venues = venues.len(),
            locations = locations.len(),
            "Reference data cached"
        );
        Ok(())
    }

    /// Authentication against the venue service's login endpoint.
    #[must_use]
    pub fn auth(&self) -> AuthenticationService {
        AuthenticationService::new(self.venue.executor().clone())
    }
}
