//! Configuration management for the ticketing API clients.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::cache::DEFAULT_CACHE_TTL;
use crate::context::{ApiContext, AuthenticationMethod};
use crate::environment::Environment;
use crate::error::ApiError;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name
        name: String,
        /// Offending value
        value: String,
    },

    /// The chosen authentication method needs a variable that is not set
    #[error("Missing {name} (required for {method:?} authentication)")]
    MissingCredential {
        /// Variable name
        name: String,
        /// Authentication method that requires it
        method: AuthenticationMethod,
    },
}

impl From<ConfigError> for ApiError {
    fn from(error: ConfigError) -> Self {
        Self::Configuration(error.to_string())
    }
}

/// HTTP client settings shared by all services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Per-request timeout
    pub timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Lifetime of cached reference data
    pub cache_ttl: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("ticketing-sdk-rust/{}", env!("CARGO_PKG_VERSION")),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl ClientSettings {
    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the cache lifetime.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

/// SDK configuration loaded from `TICKETING_*` environment variables.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Context every service starts from
    pub context: ApiContext,
    /// HTTP client settings
    pub settings: ClientSettings,
}

impl SdkConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TICKETING_ENVIRONMENT` | `production` |
    /// | `TICKETING_AUTH_METHOD` | inferred from the credentials present |
    /// | `TICKETING_USERNAME`, `TICKETING_PASSWORD` | unset |
    /// | `TICKETING_ACCESS_TOKEN` | unset |
    /// | `TICKETING_API_KEY` | unset |
    /// | `TICKETING_AFFILIATE_ID`, `TICKETING_MARKET`, `TICKETING_DISPLAY_CURRENCY` | unset |
    /// | `TICKETING_AGENT_ID`, `TICKETING_AGENT_PASSWORD` | unset |
    /// | `TICKETING_BASE_URL` | unset (hosts derive from the environment) |
    /// | `TICKETING_TIMEOUT_SECS` | `30` |
    /// | `TICKETING_CACHE_TTL_SECS` | `300` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed or the chosen
    /// authentication method lacks its credentials.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`SdkConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let environment = match var("TICKETING_ENVIRONMENT") {
            Some(value) => value.parse::<Environment>().map_err(|_| ConfigError::InvalidValue {
                name: "TICKETING_ENVIRONMENT".to_string(),
                value,
            })?,
            None => Environment::default(),
        };

        let user_name = var("TICKETING_USERNAME");
        let password = var("TICKETING_PASSWORD");
        let access_token = var("TICKETING_ACCESS_TOKEN");
        let api_key = var("TICKETING_API_KEY");

        let authentication_method = match var("TICKETING_AUTH_METHOD") {
            Some(value) => value
                .parse::<AuthenticationMethod>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "TICKETING_AUTH_METHOD".to_string(),
                    value,
                })?,
            None if api_key.is_some() && user_name.is_none() => AuthenticationMethod::ApiKey,
            None if access_token.is_some() && user_name.is_none() => {
                AuthenticationMethod::PredefinedJwt
            }
            None => AuthenticationMethod::Jwt,
        };

        let required = |name: &str, value: &Option<String>| {
            if value.is_none() {
                return Err(ConfigError::MissingCredential {
                    name: name.to_string(),
                    method: authentication_method,
                });
            }
            Ok(())
        };
        match authentication_method {
            AuthenticationMethod::PredefinedJwt => {
                required("TICKETING_ACCESS_TOKEN", &access_token)?;
            }
            AuthenticationMethod::ApiKey => required("TICKETING_API_KEY", &api_key)?,
            // Anonymous JWT contexts are allowed for public endpoints
            AuthenticationMethod::Jwt => {}
        }

        let seconds = |name: &str, default: Duration| match var(name) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    name: name.to_string(),
                    value,
                }),
            None => Ok(default),
        };

        let context = ApiContext {
            environment,
            authentication_method,
            user_name,
            password,
            access_token,
            api_key,
            affiliate_id: var("TICKETING_AFFILIATE_ID"),
            market: var("TICKETING_MARKET"),
            display_currency: var("TICKETING_DISPLAY_CURRENCY"),
            correlation_id: None,
            agent_id: var("TICKETING_AGENT_ID"),
            agent_password: var("TICKETING_AGENT_PASSWORD"),
            base_url_override: var("TICKETING_BASE_URL"),
        };

        let settings = ClientSettings {
            timeout: seconds("TICKETING_TIMEOUT_SECS", DEFAULT_TIMEOUT)?,
            cache_ttl: seconds("TICKETING_CACHE_TTL_SECS", DEFAULT_CACHE_TTL)?,
            ..ClientSettings::default()
        };

        Ok(Self { context, settings })
    }

    /// Split into the context and the client settings.
    #[must_use]
    pub fn into_parts(self) -> (ApiContext, ClientSettings) {
        (self.context, self.settings)
    }
}
