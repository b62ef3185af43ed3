//! Checkout service: turning baskets into paid bookings.

mod models;

pub use models::{
    BookingConfirmation, CheckoutRequest, ConfirmBookingRequest, PaymentInfo, PaymentType,
};

use crate::common::AgentCredentials;
use crate::error::{basket_failure, require_segment, require_text};
use ticketing_sdk_core::{
    ApiRequest, ApiRequestExecutor, ApiResponse, ClientSettings, Result, SharedContext,
};

/// Checkout service host in production.
pub const HOST: &str = "checkout-service.tickets-api.io";

/// Client for the checkout service.
#[derive(Clone, Debug)]
pub struct CheckoutService {
    executor: ApiRequestExecutor,
}

impl CheckoutService {
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
        ApiRequestExecutor::new(context, "checkout", HOST, settings).map(Self::from_executor)
    }

    /// Create a client over an existing executor.
    #[must_use]
    pub const fn from_executor(executor: ApiRequestExecutor) -> Self {
        Self { executor }
    }

    /// Start checkout and get the payment to collect.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BasketNotFound`](ticketing_sdk_core::ApiError::BasketNotFound)
    /// if the basket does not exist, or another
    /// [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<PaymentInfo> {
        require_segment("basket reference", &request.basket_reference)?;
        require_text("shopper email", &request.shopper.email)?;

        let payment: PaymentInfo = self
            .executor
            .execute_wrapped_with::<_, ApiResponse<PaymentInfo>, _>(
                ApiRequest::post("api/checkout").json(request)?,
                basket_failure(&request.basket_reference),
            )
            .await?;
        tracing::info!(
            basket_reference = %request.basket_reference,
            payment_id = %payment.payment_id,
            amount = %payment.amount,
            "Checkout started"
        );
        Ok(payment)
    }

    /// Confirm the booking for a checked-out basket on behalf of an agent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`](ticketing_sdk_core::ApiError::InvalidArgument)
    /// for blank agent credentials,
    /// [`ApiError::BasketNotFound`](ticketing_sdk_core::ApiError::BasketNotFound)
    /// if the basket does not exist, or another
    /// [`ApiError`](ticketing_sdk_core::ApiError) if the request fails.
    pub async fn confirm_booking(
        &self,
        agent: &AgentCredentials,
        basket_reference: &str,
        request: &ConfirmBookingRequest,
    ) -> Result<BookingConfirmation> {
        require_segment("basket reference", basket_reference)?;
        let http = agent.apply(
            ApiRequest::post(format!("api/bookings/{basket_reference}/confirm")).json(request)?,
        )?;

        let confirmation: BookingConfirmation = self
            .executor
            .execute_wrapped_with::<_, ApiResponse<BookingConfirmation>, _>(
                http,
                basket_failure(basket_reference),
            )
            .await?;
        tracing::info!(
            basket_reference,
            booking_reference = %confirmation.booking_reference,
            "Booking confirmed"
        );
        Ok(confirmation)
    }
}
