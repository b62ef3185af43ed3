//! Booking service: bookings made by B2B agents.
//!
//! Every call carries the agent's credentials in the `x-agent-id` and
//! `x-agent-password` headers.

mod models;

pub use models::{AgentBooking, BookingItem, Customer};

use crate::common::AgentCredentials;
use crate::error::{booking_failure, require_segment};
use chrono::NaiveDate;
use ticketing_sdk_core::{
    ApiError, ApiRequest, ApiRequestExecutor, ApiResponse, ClientSettings, Result, SharedContext,
};

/// Booking service host in production.
pub const HOST: &str = "booking-service.tickets-api.io";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client for the booking service.
#[derive(Clone, Debug)]
pub struct BookingService {
    executor: ApiRequestExecutor,
}

impl BookingService {
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
        ApiRequestExecutor::new(context, "booking", HOST, settings).map(Self::from_executor)
    }

    /// Create a client over an existing executor.
    #[must_use]
    pub const fn from_executor(executor: ApiRequestExecutor) -> Self {
        Self { executor }
    }

    /// Bookings the agent made between `from` and `to` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for blank credentials or `from`
    /// after `to`, or an [`ApiError`] if the request fails.
    pub async fn get_agent_bookings(
        &self,
        agent: &AgentCredentials,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AgentBooking>> {
        require_segment("agent id", &agent.agent_id)?;
        if from > to {
            return Err(ApiError::InvalidArgument(format!(
                "date range starts after it ends: {from} > {to}"
            )));
        }

        let request = agent.apply(
            ApiRequest::get(format!("api/agents/{}/bookings", agent.agent_id))
                .query("from", from.format(DATE_FORMAT))
                .query("to", to.format(DATE_FORMAT)),
        )?;
        let bookings: Vec<AgentBooking> = self.executor.execute_api_response(request).await?;
        tracing::debug!(count = bookings.len(), %from, %to, "Fetched agent bookings");
        Ok(bookings)
    }

    /// One booking the agent made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for blank credentials or
    /// reference, [`ApiError::BookingNotFound`] if no such booking exists,
    /// or another [`ApiError`] if the request fails.
    pub async fn get_agent_booking(
        &self,
        agent: &AgentCredentials,
        booking_reference: &str,
    ) -> Result<AgentBooking> {
        require_segment("agent id", &agent.agent_id)?;
        require_segment("booking reference", booking_reference)?;

        let request = agent.apply(ApiRequest::get(format!(
            "api/agents/{}/bookings/{booking_reference}",
            agent.agent_id
        )))?;
        self.executor
            .execute_wrapped_with::<_, ApiResponse<AgentBooking>, _>(
                request,
                booking_failure(booking_reference),
            )
            .await
    }
}
