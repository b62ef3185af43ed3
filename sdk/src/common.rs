//! Models used by more than one service.

use serde::{Deserialize, Serialize};
use std::fmt;
use ticketing_sdk_core::{ApiContext, ApiError, ApiRequest, Result};

/// Header carrying the agent id.
pub const AGENT_ID_HEADER: &str = "x-agent-id";
/// Header carrying the agent password.
pub const AGENT_PASSWORD_HEADER: &str = "x-agent-password";

/// Postal address of a shopper.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// First address line
    pub line1: Option<String>,
    /// Second address line
    pub line2: Option<String>,
    /// Postal or ZIP code
    pub postal_code: Option<String>,
    /// City
    pub city: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: Option<String>,
    /// State, province or county
    pub state_or_province: Option<String>,
}

/// The person buying tickets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shopper {
    /// E-mail address
    pub email: String,
    /// Title (Mr, Ms, …)
    pub title: Option<String>,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Telephone number
    pub telephone_number: Option<String>,
    /// Identifier of the shopper in the caller's system
    pub external_id: Option<String>,
}

/// Credentials of a B2B agent.
#[derive(Clone, PartialEq, Eq)]
pub struct AgentCredentials {
    /// Agent id
    pub agent_id: String,
    /// Agent password
    pub agent_password: String,
}

impl AgentCredentials {
    /// Create agent credentials.
    #[must_use]
    pub fn new(agent_id: impl Into<String>, agent_password: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            agent_password: agent_password.into(),
        }
    }

    /// Agent credentials stored in the context, if both are set.
    #[must_use]
    pub fn from_context(context: &ApiContext) -> Option<Self> {
        match (&context.agent_id, &context.agent_password) {
            (Some(id), Some(password)) => Some(Self::new(id.clone(), password.clone())),
            _ => None,
        }
    }

    /// Attach the agent headers to `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if either value is blank.
    pub fn apply(&self, request: ApiRequest) -> Result<ApiRequest> {
        if self.agent_id.trim().is_empty() || self.agent_password.trim().is_empty() {
            return Err(ApiError::InvalidArgument(
                "agent id and agent password are required".to_string(),
            ));
        }
        Ok(request
            .header(AGENT_ID_HEADER, self.agent_id.clone())
            .header(AGENT_PASSWORD_HEADER, self.agent_password.clone()))
    }
}

impl fmt::Debug for AgentCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentCredentials")
            .field("agent_id", &self.agent_id)
            .field("agent_password", &"***")
            .finish()
    }
}

/// `{"success": true}` acknowledgement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Whether the API applied the change
    #[serde(default)]
    pub success: bool,
}
