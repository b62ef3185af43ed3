//! Failure translation and argument checks shared by the services.
//!
//! Each translator takes the identifiers of the call and returns the
//! closure the executor applies to a non-success response, so that the
//! resulting [`ApiError`] names the basket, order or booking involved.

use ticketing_sdk_core::{ApiError, HttpFailure, Result, StatusCode};

/// Reject identifiers that would break out of their path segment.
pub(crate) fn require_segment(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!("{name} must not be empty")));
    }
    if value.contains(['/', '?', '#']) {
        return Err(ApiError::InvalidArgument(format!(
            "{name} contains a reserved character: {value}"
        )));
    }
    Ok(())
}

/// Reject empty free-text arguments.
pub(crate) fn require_text(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Reject zero ticket quantities.
pub(crate) fn require_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(ApiError::InvalidArgument(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn is_locked_basket(failure: &HttpFailure) -> bool {
    matches!(failure.status, StatusCode::BAD_REQUEST | StatusCode::CONFLICT)
        && (failure.error_body.has_code("basketCannotBeModified")
            || ["cannot be modified", "confirmed", "expired"]
                .iter()
                .any(|needle| failure.error_body.mentions(needle)))
}

fn is_promo_rejection(failure: &HttpFailure) -> bool {
    matches!(
        failure.status,
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY
    ) && (failure.error_body.has_code("notValidPromotionCode")
        || ["coupon", "promo"]
            .iter()
            .any(|needle| failure.error_body.mentions(needle)))
}

/// Failures of calls that address a basket.
pub(crate) fn basket_failure(
    basket_reference: &str,
) -> impl Fn(HttpFailure) -> ApiError + Send + Sync + use<> {
    let basket_reference = basket_reference.to_string();
    move |failure| {
        if failure.status == StatusCode::NOT_FOUND {
            ApiError::BasketNotFound {
                basket_reference: basket_reference.clone(),
                source: Box::new(failure),
            }
        } else if is_locked_basket(&failure) {
            ApiError::BasketCannotBeModified {
                basket_reference: basket_reference.clone(),
                source: Box::new(failure),
            }
        } else {
            ApiError::from_failure(failure)
        }
    }
}

/// Failures of applying a coupon to a basket.
pub(crate) fn promotion_failure(
    basket_reference: &str,
    coupon: &str,
) -> impl Fn(HttpFailure) -> ApiError + Send + Sync + use<> {
    let coupon = coupon.to_string();
    let basket = basket_failure(basket_reference);
    move |failure| {
        if is_promo_rejection(&failure) {
            ApiError::InvalidPromoCode {
                coupon: coupon.clone(),
                source: Box::new(failure),
            }
        } else {
            basket(failure)
        }
    }
}

/// Failures of removing a reservation from a basket.
pub(crate) fn reservation_failure(
    basket_reference: &str,
    reservation_id: &str,
) -> impl Fn(HttpFailure) -> ApiError + Send + Sync + use<> {
    let reservation_id = reservation_id.to_string();
    let basket_reference_owned = basket_reference.to_string();
    let basket = basket_failure(basket_reference);
    move |failure| {
        if failure.status == StatusCode::NOT_FOUND && failure.error_body.mentions("reservation") {
            ApiError::ReservationNotFound {
                basket_reference: basket_reference_owned.clone(),
                reservation_id: reservation_id.clone(),
                source: Box::new(failure),
            }
        } else {
            basket(failure)
        }
    }
}

/// Failures of calls that address a payment order.
pub(crate) fn order_failure(
    order_id: &str,
) -> impl Fn(HttpFailure) -> ApiError + Send + Sync + use<> {
    let order_id = order_id.to_string();
    move |failure| {
        if failure.status == StatusCode::NOT_FOUND {
            ApiError::OrderNotFound {
                order_id: order_id.clone(),
                source: Box::new(failure),
            }
        } else {
            ApiError::from_failure(failure)
        }
    }
}

/// Failures of calls that address an agent booking.
pub(crate) fn booking_failure(
    booking_reference: &str,
) -> impl Fn(HttpFailure) -> ApiError + Send + Sync + use<> {
    let booking_reference = booking_reference.to_string();
    move |failure| {
        if failure.status == StatusCode::NOT_FOUND {
            ApiError::BookingNotFound {
                booking_reference: booking_reference.clone(),
                source: Box::new(failure),
            }
        } else {
            ApiError::from_failure(failure)
        }
    }
}
