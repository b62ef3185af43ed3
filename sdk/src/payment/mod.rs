//! Payment service: orders and refunds.
//!
//! The payment API returns raw payloads; a missing order is
//! [`ApiError::OrderNotFound`].

mod models;

pub use models::{
    CreateOrderRequest, Order, OrderItem, OrderStatus, Payment, Refund, RefundRequest,
    UpdateOrderRequest,
};

use crate::error::{order_failure, require_segment, require_text};
use ticketing_sdk_core::{
    ApiError, ApiRequest, ApiRequestExecutor, ClientSettings, Result, SharedContext,
};

/// Payment service host in production.
pub const HOST: &str = "payment-service.tickets-api.io";

/// Client for the payment service.
#[derive(Clone, Debug)]
pub struct PaymentService {
    executor: ApiRequestExecutor,
}

impl PaymentService {
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
        ApiRequestExecutor::new(context, "payment", HOST, settings).map(Self::from_executor)
    }

    /// Create a client over an existing executor.
    #[must_use]
    pub const fn from_executor(executor: ApiRequestExecutor) -> Self {
        Self { executor }
    }

    /// Create an order for a basket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a blank basket reference or
    /// a non-positive amount, or an [`ApiError`] if the request fails.
    pub async fn create_new_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        require_text("basket reference", &request.basket_reference)?;
        if request.amount.value <= 0 {
            return Err(ApiError::InvalidArgument(format!(
                "order amount must be positive, got {}",
                request.amount
            )));
        }

        let order: Order = self
            .executor
            .execute(
                ApiRequest::post("api/v1/orders")
                    .json(request)?
                    .authenticated(),
            )
            .await?;
        tracing::info!(order_id = %order.id, amount = %order.amount, "Order created");
        Ok(order)
    }

    /// One order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::OrderNotFound`] if no such order exists, or
    /// another [`ApiError`] if the request fails.
    pub async fn get_order(&self, order_id: &str) -> Result<Order> {
        require_segment("order id", order_id)?;
        self.executor
            .execute_with(
                ApiRequest::get(format!("api/v1/orders/{order_id}")).authenticated(),
                order_failure(order_id),
            )
            .await
    }

    /// Change an order's status or lines.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::OrderNotFound`] if no such order exists, or
    /// another [`ApiError`] if the request fails.
    pub async fn update_order(
        &self,
        order_id: &str,
        request: &UpdateOrderRequest,
    ) -> Result<Order> {
        require_segment("order id", order_id)?;
        self.executor
            .execute_with(
                ApiRequest::patch(format!("api/v1/orders/{order_id}"))
                    .json(request)?
                    .authenticated(),
                order_failure(order_id),
            )
            .await
    }

    /// Refund part or all of an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a blank reason or a
    /// non-positive amount, [`ApiError::OrderNotFound`] if no such order
    /// exists, or another [`ApiError`] if the request fails.
    pub async fn refund_order(&self, order_id: &str, request: &RefundRequest) -> Result<Refund> {
        require_segment("order id", order_id)?;
        require_text("refund reason", &request.reason)?;
        if request.amount.as_ref().is_some_and(|amount| amount.value <= 0) {
            return Err(ApiError::InvalidArgument(
                "refund amount must be positive".to_string(),
            ));
        }

        let refund: Refund = self
            .executor
            .execute_with(
                ApiRequest::post(format!("api/v1/orders/{order_id}/refunds"))
                    .json(request)?
                    .authenticated(),
                order_failure(order_id),
            )
            .await?;
        tracing::info!(order_id, refund_id = %refund.id, amount = %refund.amount, "Order refunded");
        Ok(refund)
    }
}
