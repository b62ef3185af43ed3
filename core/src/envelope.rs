//! Response envelopes.
//!
//! Some APIs return their payload as the whole body; others nest it under an
//! envelope field next to request echo and context messages. [`Envelope`]
//! abstracts over the nesting so the executor can unwrap either shape.

use crate::error::ErrorDetail;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Informational message returned alongside a payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoMessage {
    /// Machine-readable code
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Name of the entity the message refers to
    pub name: Option<String>,
    /// Message category (e.g. `warning`)
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Messages returned next to a wrapped payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContext {
    /// Informational messages
    #[serde(default)]
    pub info: Vec<InfoMessage>,
    /// Errors reported without failing the request
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

impl ResponseContext {
    /// Join error messages, falling back to info messages.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let errors: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        if !errors.is_empty() {
            return Some(errors.join("; "));
        }
        let info: Vec<&str> = self.info.iter().map(|i| i.message.as_str()).collect();
        (!info.is_empty()).then(|| info.join("; "))
    }
}

/// A response body that nests its payload.
pub trait Envelope<T>: DeserializeOwned {
    /// Context messages carried by the envelope.
    fn context(&self) -> Option<&ResponseContext>;

    /// Take the payload out of the envelope.
    fn into_data(self) -> Option<T>;
}

/// Envelope with the payload under `response`, echoing the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Echo of the request as the API understood it
    #[serde(default)]
    pub request: Option<serde_json::Value>,
    /// The payload
    #[serde(default = "Option::default")]
    pub response: Option<T>,
    /// Context messages
    #[serde(default)]
    pub context: Option<ResponseContext>,
}

impl<T> ApiResponse<T> {
    /// Borrow the payload.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.response.as_ref()
    }
}

impl<T: DeserializeOwned> Envelope<T> for ApiResponse<T> {
    fn context(&self) -> Option<&ResponseContext> {
        self.context.as_ref()
    }

    fn into_data(self) -> Option<T> {
        self.response
    }
}

/// Envelope with the payload under `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// The payload
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    /// Context messages
    #[serde(default)]
    pub context: Option<ResponseContext>,
}

impl<T> DataResponse<T> {
    /// Borrow the payload.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

impl<T: DeserializeOwned> Envelope<T> for DataResponse<T> {
    fn context(&self) -> Option<&ResponseContext> {
        self.context.as_ref()
    }

    fn into_data(self) -> Option<T> {
        self.data
    }
}
