//! # Ticketing SDK
//!
//! Clients for the ticketing APIs: venues, inventory, content, baskets,
//! checkout, payments and agent bookings.
//!
//! ## Example
//!
//! ```no_run
//! use ticketing_sdk::{ApiContext, Environment, Pagination, TicketingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TicketingClient::new(
//!         ApiContext::new(Environment::Qa).with_credentials("user", "password"),
//!     )?;
//!
//!     let products = client.inventory().search_products("hamilton").await?;
//!     println!("{} products", products.len());
//!
//!     let promotions = client.basket().get_promotions(Pagination::default()).await?;
//!     println!("{} promotions", promotions.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`ApiError`]. Calls that address a basket, order or
//! booking report a missing one as [`ApiError::BasketNotFound`],
//! [`ApiError::OrderNotFound`] or [`ApiError::BookingNotFound`]; the
//! failed response stays available through [`ApiError::http_failure`].

pub mod basket;
pub mod booking;
pub mod checkout;
pub mod client;
pub mod common;
pub mod content;
mod error;
pub mod inventory;
pub mod payment;
pub mod venue;

// Re-export main types for convenience
pub use basket::BasketService;
pub use booking::BookingService;
pub use checkout::CheckoutService;
pub use client::TicketingClient;
pub use common::{Address, AgentCredentials, Shopper};
pub use content::ContentService;
pub use inventory::InventoryService;
pub use payment::PaymentService;
pub use venue::VenueService;

pub use ticketing_sdk_core::{
    ApiContext, ApiError, AuthenticationMethod, AuthenticationService, ClientSettings, Environment,
    Money, PagedList, Pagination, Result, SdkConfig, SharedContext,
};
