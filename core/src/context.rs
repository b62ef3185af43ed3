//! API context shared by every service client.
//!
//! The context holds the credentials, target environment and access token
//! used to build requests. It is shared behind [`SharedContext`] so that the
//! authentication service can store a fresh token while request executors
//! read it.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Context shared between service clients and the authentication service.
pub type SharedContext = Arc<RwLock<ApiContext>>;

/// How requests are authenticated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationMethod {
    /// Log in with user name and password to obtain a JWT
    #[default]
    Jwt,
    /// Use a JWT supplied by the caller
    PredefinedJwt,
    /// Send a static API key header
    ApiKey,
}

impl AuthenticationMethod {
    /// Whether requests carry a bearer token.
    #[must_use]
    pub const fn uses_bearer_token(self) -> bool {
        matches!(self, Self::Jwt | Self::PredefinedJwt)
    }
}

/// Error returned when an authentication method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown authentication method: {0}")]
pub struct UnknownAuthenticationMethod(pub String);

impl FromStr for AuthenticationMethod {
    type Err = UnknownAuthenticationMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "jwt" => Ok(Self::Jwt),
            "predefined_jwt" | "token" => Ok(Self::PredefinedJwt),
            "api_key" | "apikey" => Ok(Self::ApiKey),
            _ => Err(UnknownAuthenticationMethod(s.to_string())),
        }
    }
}

/// Credentials, environment and request metadata used by every service call.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiContext {
    /// Target environment
    pub environment: Environment,
    /// How requests are authenticated
    pub authentication_method: AuthenticationMethod,
    /// User name for JWT login
    pub user_name: Option<String>,
    /// Password for JWT login
    pub password: Option<String>,
    /// Bearer token, obtained by login or supplied up front
    pub access_token: Option<String>,
    /// API key for [`AuthenticationMethod::ApiKey`]
    pub api_key: Option<String>,
    /// Affiliate the traffic is attributed to
    pub affiliate_id: Option<String>,
    /// Market code (e.g. `broadway`, `london`)
    pub market: Option<String>,
    /// ISO 4217 currency prices are displayed in
    pub display_currency: Option<String>,
    /// Correlation id forwarded with every request; generated per request when unset
    pub correlation_id: Option<String>,
    /// Agent id for agent-authorised endpoints
    pub agent_id: Option<String>,
    /// Agent password for agent-authorised endpoints
    pub agent_password: Option<String>,
    /// Base URL used for every service instead of the environment host
    pub base_url_override: Option<String>,
}

impl ApiContext {
    /// Create a context for the given environment with no credentials.
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Use user name and password login.
    #[must_use]
    pub fn with_credentials(
        mut self,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.authentication_method = AuthenticationMethod::Jwt;
        self.user_name = Some(user_name.into());
        self.password = Some(password.into());
        self
    }

    /// Use a caller-supplied JWT.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.authentication_method = AuthenticationMethod::PredefinedJwt;
        self.access_token = Some(token.into());
        self
    }

    /// Use a static API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.authentication_method = AuthenticationMethod::ApiKey;
        self.api_key = Some(api_key.into());
        self
    }

    /// Attribute requests to an affiliate.
    #[must_use]
    pub fn with_affiliate(mut self, affiliate_id: impl Into<String>) -> Self {
        self.affiliate_id = Some(affiliate_id.into());
        self
    }

    /// Set the market.
    #[must_use]
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Set the display currency.
    #[must_use]
    pub fn with_display_currency(mut self, currency: impl Into<String>) -> Self {
        self.display_currency = Some(currency.into());
        self
    }

    /// Set a fixed correlation id.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Set agent credentials.
    #[must_use]
    pub fn with_agent(
        mut self,
        agent_id: impl Into<String>,
        agent_password: impl Into<String>,
    ) -> Self {
        self.agent_id = Some(agent_id.into());
        self.agent_password = Some(agent_password.into());
        self
    }

    /// Route every service to `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Wrap the context for sharing between clients.
    #[must_use]
    pub fn into_shared(self) -> SharedContext {
        Arc::new(RwLock::new(self))
    }

    /// Base URL for `host`, honouring the override. Always ends with `/`.
    #[must_use]
    pub fn base_url_for(&self, host: &str) -> String {
        match &self.base_url_override {
            Some(url) if url.ends_with('/') => url.clone(),
            Some(url) => format!("{url}/"),
            None => self.environment.base_url(host),
        }
    }

    /// Whether user name and password are both present.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.user_name.is_some() && self.password.is_some()
    }

    /// Whether the context can log in by itself when it has no token.
    #[must_use]
    pub const fn can_authenticate(&self) -> bool {
        matches!(self.authentication_method, AuthenticationMethod::Jwt) && self.has_credentials()
    }
}

// Secrets stay out of logs.
impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("environment", &self.environment)
            .field("authentication_method", &self.authentication_method)
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("affiliate_id", &self.affiliate_id)
            .field("market", &self.market)
            .field("display_currency", &self.display_currency)
            .field("correlation_id", &self.correlation_id)
            .field("agent_id", &self.agent_id)
            .field("agent_password", &self.agent_password.as_ref().map(|_| "***"))
            .field("base_url_override", &self.base_url_override)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_select_authentication_method() {
        let ctx = ApiContext::new(Environment::Qa).with_credentials("user", "pass");
        assert_eq!(ctx.authentication_method, AuthenticationMethod::Jwt);
        assert!(ctx.can_authenticate());

        let ctx = ApiContext::new(Environment::Qa).with_access_token("token");
        assert_eq!(ctx.authentication_method, AuthenticationMethod::PredefinedJwt);
        assert!(!ctx.can_authenticate());

        let ctx = ApiContext::new(Environment::Qa).with_api_key("key");
        assert_eq!(ctx.authentication_method, AuthenticationMethod::ApiKey);
        assert!(!ctx.authentication_method.uses_bearer_token());
    }

    #[test]
    fn test_base_url_override_wins() {
        let ctx = ApiContext::new(Environment::Staging).with_base_url("http://127.0.0.1:9000");
        assert_eq!(ctx.base_url_for("basket-service.tickets-api.io"), "http://127.0.0.1:9000/");

        let ctx = ApiContext::new(Environment::Staging);
        assert_eq!(
            ctx.base_url_for("basket-service.tickets-api.io"),
            "https://staging-basket-service.tickets-api.io/"
        );
    }

    #[test]
    fn test_debug_masks_secrets() {
        let ctx = ApiContext::new(Environment::Production)
            .with_credentials("alice", "hunter2")
            .with_agent("agent", "s3cret");
        let rendered = format!("{ctx:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_parse_authentication_method() {
        assert_eq!("JWT".parse::<AuthenticationMethod>().unwrap(), AuthenticationMethod::Jwt);
        assert_eq!(
            "predefined-jwt".parse::<AuthenticationMethod>().unwrap(),
            AuthenticationMethod::PredefinedJwt
        );
        assert_eq!("apikey".parse::<AuthenticationMethod>().unwrap(), AuthenticationMethod::ApiKey);
        assert!("basic".parse::<AuthenticationMethod>().is_err());
    }
}
