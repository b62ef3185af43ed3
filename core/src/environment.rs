//! Deployment environments and service host resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment environment an [`ApiContext`](crate::context::ApiContext) targets.
///
/// Each environment maps a service host (e.g. `basket-service.tickets-api.io`)
/// to a base URL. Production uses the bare host; every other environment
/// prefixes the host with its own name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live traffic
    #[default]
    Production,
    /// Pre-production mirror of production
    Staging,
    /// Quality assurance
    Qa,
    /// Development
    Dev,
    /// Partner sandbox with test data
    Sandbox,
}

impl Environment {
    /// All environments, in promotion order.
    pub const ALL: [Self; 5] = [
        Self::Dev,
        Self::Qa,
        Self::Sandbox,
        Self::Staging,
        Self::Production,
    ];

    /// Lowercase name of the environment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Qa => "qa",
            Self::Dev => "dev",
            Self::Sandbox => "sandbox",
        }
    }

    /// Host prefix for this environment (`""` for production).
    #[must_use]
    pub const fn host_prefix(self) -> &'static str {
        match self {
            Self::Production => "",
            Self::Staging => "staging-",
            Self::Qa => "qa-",
            Self::Dev => "dev-",
            Self::Sandbox => "sandbox-",
        }
    }

    /// Base URL of `host` in this environment, always ending with `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticketing_sdk_core::Environment;
    ///
    /// assert_eq!(
    ///     Environment::Qa.base_url("basket-service.tickets-api.io"),
    ///     "https://qa-basket-service.tickets-api.io/"
    /// );
    /// ```
    #[must_use]
    pub fn base_url(self, host: &str) -> String {
        let host = host.trim_matches('/');
        format!("https://{}{host}/", self.host_prefix())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an environment name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown environment: {0}")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "live" => Ok(Self::Production),
            "staging" | "stage" => Ok(Self::Staging),
            "qa" => Ok(Self::Qa),
            "dev" | "development" => Ok(Self::Dev),
            "sandbox" => Ok(Self::Sandbox),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_production_has_no_prefix() {
        assert_eq!(
            Environment::Production.base_url("venue-service.tickets-api.io"),
            "https://venue-service.tickets-api.io/"
        );
    }

    #[test]
    fn test_non_production_prefixes_host() {
        assert_eq!(
            Environment::Staging.base_url("venue-service.tickets-api.io/"),
            "https://staging-venue-service.tickets-api.io/"
        );
        assert_eq!(
            Environment::Dev.base_url("/content-service.tickets-api.io"),
            "https://dev-content-service.tickets-api.io/"
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)] // Test code
    fn test_parse_aliases() {
        assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(" qa ".parse::<Environment>().unwrap(), Environment::Qa);
        assert_eq!("development".parse::<Environment>().unwrap(), Environment::Dev);
        assert!("moon".parse::<Environment>().is_err());
    }

    proptest! {
        #[test]
        #[allow(clippy::unwrap_used)] // Test code
        fn prop_name_round_trips(index in 0usize..Environment::ALL.len()) {
            let env = Environment::ALL[index];
            prop_assert_eq!(env.to_string().parse::<Environment>().unwrap(), env);
        }

        #[test]
        fn prop_base_url_is_https_and_slash_terminated(
            host in "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,5}){1,2}"
        ) {
            for env in Environment::ALL {
                let url = env.base_url(&host);
                prop_assert!(url.starts_with("https://"));
                prop_assert!(url.ends_with('/'));
                prop_assert!(url.contains(&host));
            }
        }
    }
}
