//! Booking flow walk-through
//!
//! Searches for a product, picks the first performance with enough seats,
//! holds them in a basket, optionally applies a coupon and starts checkout.

use chrono::{Days, NaiveDate};
use ticketing_sdk::basket::{Basket, ReservationRequest, UpsertBasketRequest};
use ticketing_sdk::checkout::{CheckoutRequest, PaymentInfo, PaymentType};
use ticketing_sdk::inventory::Availability;
use ticketing_sdk::{Address, ApiError, Result, Shopper, TicketingClient};

/// Sales channel used by the walk-through.
pub const CHANNEL_ID: &str = "web";

/// Days searched for a performance after the first bookable date.
pub const SEARCH_WINDOW_DAYS: u64 = 30;

/// What to book.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// Free text to search products by
    pub search: String,
    /// Number of tickets
    pub quantity: u32,
    /// Earliest date to consider
    pub today: NaiveDate,
    /// Coupon to apply, if any
    pub coupon: Option<String>,
    /// Buyer; checkout is skipped without one
    pub shopper: Option<Shopper>,
}

/// What the walk-through did.
#[derive(Debug, Clone)]
pub struct FlowSummary {
    /// Product that was booked
    pub product_id: String,
    /// Performance that was booked
    pub performance: Availability,
    /// Basket after reservation and coupon
    pub basket: Basket,
    /// Whether the coupon was accepted
    pub coupon_applied: bool,
    /// Payment to collect, when checkout ran
    pub payment: Option<PaymentInfo>,
}

/// Run search → basket → checkout.
///
/// A rejected coupon is logged and the flow continues without it.
///
/// # Errors
///
/// Returns [`ApiError::InvalidArgument`] when nothing matches the search or
/// no performance has enough seats, or any [`ApiError`] from the services.
pub async fn run(client: &TicketingClient, options: &FlowOptions) -> Result<FlowSummary> {
    let products = client.inventory().search_products(&options.search).await?;
    let product = products
        .into_iter()
        .find(|product| product.on_sale)
        .ok_or_else(|| {
            ApiError::InvalidArgument(format!("no product on sale matches {:?}", options.search))
        })?;
    tracing::info!(product_id = %product.id, name = %product.name, "Found product");

    let range = client.inventory().get_availability_range(&product.id).await?;
    let from = range.first_bookable_date.max(options.today);
    let to = from
        .checked_add_days(Days::new(SEARCH_WINDOW_DAYS))
        .unwrap_or(range.last_bookable_date)
        .min(range.last_bookable_date);
    if from > to {
        return Err(ApiError::InvalidArgument(format!(
            "{} is no longer bookable",
            product.name
        )));
    }

    let performance = client
        .inventory()
        .get_performances(&product.id, options.quantity, from, to)
        .await?
        .into_iter()
        .find(|performance| performance.number_of_tickets >= options.quantity)
        .ok_or_else(|| {
            ApiError::InvalidArgument(format!(
                "no performance of {} between {from} and {to} has {} seats",
                product.name, options.quantity
            ))
        })?;
    tracing::info!(datetime = %performance.datetime, "Picked performance");

    let venue_id = product.venue_id.clone().unwrap_or_default();
    let mut basket = client
        .basket()
        .upsert_basket(&UpsertBasketRequest {
            channel_id: CHANNEL_ID.to_string(),
            reservations: vec![ReservationRequest {
                product_id: product.id.clone(),
                venue_id,
                date: performance.datetime,
                quantity: options.quantity,
                items: Vec::new(),
            }],
            ..UpsertBasketRequest::default()
        })
        .await?;
    tracing::info!(basket_reference = %basket.reference, "Seats held");

    let mut coupon_applied = false;
    if let Some(coupon) = &options.coupon {
        match client.basket().upsert_promotion(&basket.reference, coupon).await {
            Ok(updated) => {
                basket = updated;
                coupon_applied = true;
            }
            Err(ApiError::InvalidPromoCode { coupon, source }) => {
                tracing::warn!(%coupon, reason = %source.message(), "Coupon rejected");
            }
            Err(error) => return Err(error),
        }
    }

    let payment = match &options.shopper {
        Some(shopper) => Some(
            client
                .checkout()
                .checkout(&CheckoutRequest {
                    basket_reference: basket.reference.clone(),
                    channel_id: CHANNEL_ID.to_string(),
                    shopper: shopper.clone(),
                    billing_address: Address::default(),
                    payment_type: PaymentType::Card,
                    redirect_url: None,
                    delivery_method: None,
                })
                .await?,
        ),
        None => None,
    };

    Ok(FlowSummary {
        product_id: product.id,
        performance,
        basket,
        coupon_applied,
        payment,
    })
}
