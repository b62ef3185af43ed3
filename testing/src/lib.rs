//! # Ticketing SDK Testing
//!
//! Testing utilities for the ticketing API clients.
//!
//! This crate provides:
//! - [`MockApi`]: a `wiremock` server every service can be pointed at
//! - [`fixtures`]: JSON bodies in the shapes the APIs return
//! - [`properties`]: proptest strategies for SDK types
//!
//! ## Example
//!
//! ```ignore
//! use ticketing_sdk_testing::{MockApi, fixtures};
//! use wiremock::{Mock, ResponseTemplate, matchers::{method, path}};
//!
//! #[tokio::test]
//! async fn test_get_venue() {
//!     let api = MockApi::start().await;
//!     Mock::given(method("GET"))
//!         .and(path("/api/v1/venues/1"))
//!         .respond_with(ResponseTemplate::new(200).set_body_json(
//!             fixtures::api_response(serde_json::json!({"id": "1"})),
//!         ))
//!         .mount(api.server())
//!         .await;
//!
//!     let venues = VenueService::new(api.shared_context()).unwrap();
//!     assert_eq!(venues.get_venue_by_id("1").await.unwrap().id, "1");
//! }
//! ```

mod mock_api;

pub mod fixtures;

pub use mock_api::{MockApi, TEST_PASSWORD, TEST_TOKEN, TEST_USER};

/// Deterministic time.
pub mod mocks {
    use chrono::{DateTime, TimeZone, Utc};

    /// Fixed instant for tests (2026-01-01 00:00:00 UTC).
    #[must_use]
    pub fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use ticketing_sdk_core::{Environment, Money};

    /// Any environment.
    pub fn environment() -> impl Strategy<Value = Environment> {
        proptest::sample::select(Environment::ALL.to_vec())
    }

    /// Positive amounts in one currency.
    pub fn money(currency: &'static str) -> impl Strategy<Value = Money> {
        (1_i64..10_000_000).prop_map(move |value| Money::new(value, currency))
    }

    /// Identifiers that are safe as a URL path segment.
    pub fn path_segment() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9_-]{0,15}"
    }
}

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketing_sdk=debug,ticketing_sdk_core=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub use mocks::test_now;
