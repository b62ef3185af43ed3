//! Basket service: reservations, promotions and basket lifecycle.
//!
//! Failures name the basket involved: a missing basket is
//! [`ApiError::BasketNotFound`], a confirmed or expired one
//! [`ApiError::BasketCannotBeModified`], a rejected coupon
//! [`ApiError::InvalidPromoCode`].

mod models;

pub use models::{
    Basket, BasketStatus, Coupon, Delivery, Promotion, Reservation, ReservationItem,
    ReservationItemRequest, ReservationRequest, UpsertBasketRequest,
};

use crate::error::{
    basket_failure, promotion_failure, require_segment, require_text, reservation_failure,
};
use models::ApplyPromotion;
use ticketing_sdk_core::{
    ApiError, ApiRequest, ApiRequestExecutor, ApiResponse, ClientSettings, HttpFailure, PagedList,
    Pagination, Result, SharedContext,
};

/// Basket service host in production.
pub const HOST: &str = "basket-service.tickets-api.io";

/// Client for the basket service.
#[derive(Clone, Debug)]
pub struct BasketService {
    executor: ApiRequestExecutor,
}

impl BasketService {
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
        ApiRequestExecutor::new(context, "basket", HOST, settings).map(Self::from_executor)
    }

    /// Create a client over an existing executor.
    #[must_use]
    pub const fn from_executor(executor: ApiRequestExecutor) -> Self {
        Self { executor }
    }

    async fn basket_call<F>(&self, request: ApiRequest, translate: F) -> Result<Basket>
    where
        F: Fn(HttpFailure) -> ApiError + Send + Sync,
    {
        self.executor
            .execute_wrapped_with::<Basket, ApiResponse<Basket>, _>(request, translate)
            .await
    }

    /// Current state of a basket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BasketNotFound`] if no such basket exists, or
    /// another [`ApiError`] if the request fails.
    pub async fn get_basket_details(&self, basket_reference: &str) -> Result<Basket> {
        require_segment("basket reference", basket_reference)?;
        self.basket_call(
            ApiRequest::get(format!("api/v1/baskets/{basket_reference}")),
            basket_failure(basket_reference),
        )
        .await
    }

    /// Open a basket, or replace the reservations of an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for an empty reservation list,
    /// [`ApiError::BasketNotFound`] or [`ApiError::BasketCannotBeModified`]
    /// when updating, or another [`ApiError`] if the request fails.
    pub async fn upsert_basket(&self, request: &UpsertBasketRequest) -> Result<Basket> {
        if request.reservations.is_empty() {
            return Err(ApiError::InvalidArgument(
                "a basket needs at least one reservation".to_string(),
            ));
        }
        if request.reservations.iter().any(|reservation| reservation.quantity == 0) {
            return Err(ApiError::InvalidArgument(
                "reservation quantity must be at least 1".to_string(),
            ));
        }
        let http_request = ApiRequest::patch("api/v1/baskets").json(request)?;

        // A new basket has no reference to blame a 404 on
        let basket = match request.reference.as_deref() {
            Some(reference) => self.basket_call(http_request, basket_failure(reference)).await?,
            None => self.basket_call(http_request, ApiError::from_failure).await?,
        };
        tracing::debug!(
            basket_reference = %basket.reference,
            reservations = basket.reservations.len(),
            "Upserted basket"
        );
        Ok(basket)
    }

    /// Apply a coupon to a basket.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPromoCode`] if the coupon is rejected,
    /// [`ApiError::BasketNotFound`] or [`ApiError::BasketCannotBeModified`]
    /// for the basket, or another [`ApiError`] if the request fails.
    pub async fn upsert_promotion(&self, basket_reference: &str, coupon: &str) -> Result<Basket> {
        require_segment("basket reference", basket_reference)?;
        require_text("coupon", coupon)?;
        let coupon = Coupon::new(coupon.trim());

        let request = ApiRequest::patch(format!("api/v1/baskets/{basket_reference}/applyPromotion"))
            .json(&ApplyPromotion { coupon: &coupon })?;
        self.basket_call(request, promotion_failure(basket_reference, &coupon.code))
            .await
    }

    /// Release one reservation.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ReservationNotFound`] if the basket has no such
    /// reservation, [`ApiError::BasketNotFound`] or
    /// [`ApiError::BasketCannotBeModified`] for the basket, or another
    /// [`ApiError`] if the request fails.
    pub async fn remove_reservation(
        &self,
        basket_reference: &str,
        reservation_id: &str,
    ) -> Result<Basket> {
        require_segment("basket reference", basket_reference)?;
        require_segment("reservation id", reservation_id)?;
        self.basket_call(
            ApiRequest::delete(format!(
                "api/v1/baskets/{basket_reference}/reservations/{reservation_id}"
            )),
            reservation_failure(basket_reference, reservation_id),
        )
        .await
    }

    /// Release every reservation and drop the coupon.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BasketNotFound`] or
    /// [`ApiError::BasketCannotBeModified`] for the basket, or another
    /// [`ApiError`] if the request fails.
    pub async fn clear_basket(&self, basket_reference: &str) -> Result<Basket> {
        require_segment("basket reference", basket_reference)?;
        self.basket_call(
            ApiRequest::patch(format!("api/v1/baskets/{basket_reference}/clear")),
            basket_failure(basket_reference),
        )
        .await
    }

    /// One page of running promotions.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    pub async fn get_promotions(&self, page: Pagination) -> Result<PagedList<Promotion>> {
        let request = ApiRequest::get("api/v1/promotions").query_pairs(page.to_query());
        self.executor.execute_api_response(request).await
    }

    /// Details of one promotion.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a blank id, or an
    /// [`ApiError`] if the request fails.
    pub async fn get_promotion_details(&self, promotion_id: &str) -> Result<Promotion> {
        require_segment("promotion id", promotion_id)?;
        self.executor
            .execute_api_response(ApiRequest::get(format!("api/v1/promotions/{promotion_id}")))
            .await
    }
}
