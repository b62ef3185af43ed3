//! # Ticketing SDK Core
//!
//! Request execution, response envelopes and error types shared by the
//! ticketing API clients.
//!
//! Every service client (basket, checkout, payment, inventory, venue,
//! content, booking) is a thin wrapper over an [`ApiRequestExecutor`]:
//!
//! - [`ApiContext`] holds the environment, credentials and access token,
//!   shared between clients as a [`SharedContext`]
//! - [`ApiRequestExecutor`] builds the HTTP call, attaches context headers,
//!   logs in on demand and unwraps the payload
//! - [`Envelope`] abstracts over wrapped responses ([`ApiResponse`],
//!   [`DataResponse`])
//! - [`ApiError`] carries the failed response and parsed error body, with
//!   domain variants such as [`ApiError::BasketNotFound`]
//! - [`MemoryCache`] keeps slow-changing reference data for a fixed time
//!
//! ## Example
//!
//! ```no_run
//! use ticketing_sdk_core::{
//!     ApiContext, ApiRequest, ApiRequestExecutor, ClientSettings, Environment,
//! };
//!
//! # async fn run() -> ticketing_sdk_core::Result<()> {
//! let context = ApiContext::new(Environment::Qa)
//!     .with_credentials("user", "password")
//!     .into_shared();
//!
//! let executor = ApiRequestExecutor::new(
//!     context,
//!     "venue",
//!     "venue-service.tickets-api.io",
//!     &ClientSettings::default(),
//! )?;
//!
//! let venues: Vec<serde_json::Value> = executor
//!     .execute_api_response(ApiRequest::get("api/v1/venues"))
//!     .await?;
//! println!("{} venues", venues.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cache;
pub mod config;
pub mod context;
pub mod envelope;
pub mod environment;
pub mod error;
pub mod executor;
pub mod models;

// Re-export main types for convenience
pub use auth::AuthenticationService;
pub use cache::MemoryCache;
pub use config::{ClientSettings, ConfigError, SdkConfig};
pub use context::{ApiContext, AuthenticationMethod, SharedContext};
pub use envelope::{ApiResponse, DataResponse, Envelope, InfoMessage, ResponseContext};
pub use environment::Environment;
pub use error::{ApiError, ErrorBody, ErrorDetail, HttpFailure, Result};
pub use executor::{ApiRequest, ApiRequestExecutor};
pub use models::{Money, PagedList, Pagination};

// Re-exported so service crates and callers agree on versions
pub use reqwest::{Method, StatusCode};
