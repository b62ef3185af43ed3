//! Error types for the ticketing API clients.
//!
//! Every failed call surfaces as an [`ApiError`]. Failures that reached the
//! server and came back with a non-success status carry an [`HttpFailure`]:
//! the request method and URL, the status, the raw body and the error
//! details parsed out of it. Domain variants such as
//! [`ApiError::BasketNotFound`] add their own fields and delegate
//! everything else to the wrapped failure.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Longest plain-text body kept as an error message.
const MAX_TEXT_MESSAGE_LEN: usize = 512;

/// A single error reported by an API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ErrorDetail {
    /// Machine-readable error code, when the API supplies one
    pub code: Option<String>,
    /// Human-readable message
    pub message: String,
    /// Request field the error refers to
    pub field: Option<String>,
}

impl ErrorDetail {
    /// Create a detail with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(message) if !message.trim().is_empty() => {
                Some(Self::message(message.trim()))
            }
            Value::Object(map) => {
                let message = ["message", "msg", "detail", "description", "error"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str))
                    .unwrap_or_default()
                    .to_string();
                let code = map.get("code").and_then(scalar_to_string);
                let field = ["field", "name", "property"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str))
                    .map(str::to_string);

                if message.is_empty() && code.is_none() {
                    return None;
                }
                Some(Self { code, message, field })
            }
            _ => None,
        }
    }
}

impl From<Value> for ErrorDetail {
    fn from(value: Value) -> Self {
        Self::from_value(&value).unwrap_or_default()
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.field) {
            (Some(code), Some(field)) => write!(f, "[{code}] {field}: {}", self.message),
            (Some(code), None) => write!(f, "[{code}] {}", self.message),
            (None, Some(field)) => write!(f, "{field}: {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Error details parsed from a failed response body.
///
/// The APIs report errors in several shapes; all of them collapse into a
/// list of [`ErrorDetail`]:
///
/// - `{"context": {"errors": [...]}}`
/// - `{"errors": [...]}` or a bare `[...]`
/// - `{"error": "..."}` or `{"error": {"message": "...", "code": "..."}}`
/// - `{"message": "...", "code": "..."}`
/// - plain text
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Parsed errors, in the order the API listed them
    pub errors: Vec<ErrorDetail>,
}

impl ErrorBody {
    /// Parse a response body. Never fails; unrecognised bodies yield no errors.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
            let mut message: String = trimmed.chars().take(MAX_TEXT_MESSAGE_LEN).collect();
            if message.len() < trimmed.len() {
                message.push('…');
            }
            return Self {
                errors: vec![ErrorDetail::message(message)],
            };
        };

        Self {
            errors: Self::details_from_value(&value),
        }
    }

    fn details_from_value(value: &Value) -> Vec<ErrorDetail> {
        match value {
            Value::Array(items) => items.iter().filter_map(ErrorDetail::from_value).collect(),
            Value::Object(map) => {
                if let Some(errors) = map
                    .get("context")
                    .and_then(|context| context.get("errors"))
                    .and_then(Value::as_array)
                    .filter(|errors| !errors.is_empty())
                {
                    return errors.iter().filter_map(ErrorDetail::from_value).collect();
                }
                if let Some(errors) = map.get("errors").and_then(Value::as_array) {
                    return errors.iter().filter_map(ErrorDetail::from_value).collect();
                }
                if let Some(error) = map.get("error") {
                    let mut detail = ErrorDetail::from_value(error);
                    if let Some(detail) = detail.as_mut() {
                        if detail.code.is_none() {
                            detail.code = map.get("code").and_then(scalar_to_string);
                        }
                    }
                    return detail.into_iter().collect();
                }
                ErrorDetail::from_value(value).into_iter().collect()
            }
            other => ErrorDetail::from_value(other).into_iter().collect(),
        }
    }

    /// First error message, if any.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .find(|m| !m.is_empty())
    }

    /// Whether any error carries `code` (case-insensitive).
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.errors
            .iter()
            .filter_map(|e| e.code.as_deref())
            .any(|c| c.eq_ignore_ascii_case(code))
    }

    /// Whether any error code or message contains `needle` (case-insensitive).
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        self.errors.iter().any(|e| {
            e.message.to_ascii_lowercase().contains(&needle)
                || e
                    .code
                    .as_deref()
                    .is_some_and(|c| c.to_ascii_lowercase().contains(&needle))
        })
    }
}

/// A request that reached the API and came back with a non-success status.
#[derive(Debug, Clone)]
pub struct HttpFailure {
    /// HTTP method of the request
    pub method: Method,
    /// Full request URL
    pub url: String,
    /// Response status
    pub status: StatusCode,
    /// Raw response body
    pub body: String,
    /// Correlation id echoed by the API
    pub correlation_id: Option<String>,
    /// Errors parsed from the body
    pub error_body: ErrorBody,
}

impl HttpFailure {
    /// Build a failure, parsing the error body.
    #[must_use]
    pub fn new(
        method: Method,
        url: impl Into<String>,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        let body = body.into();
        let error_body = ErrorBody::parse(&body);
        Self {
            method,
            url: url.into(),
            status,
            body,
            correlation_id: None,
            error_body,
        }
    }

    /// Attach the correlation id echoed by the API.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: Option<String>) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// First parsed error message, falling back to the status reason phrase.
    #[must_use]
    pub fn message(&self) -> String {
        self.error_body.first_message().map_or_else(
            || {
                self.status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string()
            },
            str::to_string,
        )
    }

    /// Parsed error details.
    #[must_use]
    pub fn errors(&self) -> &[ErrorDetail] {
        &self.error_body.errors
    }

    /// Whether the failure is a 401 caused by an expired or rejected token.
    #[must_use]
    pub fn is_token_rejection(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
            && (self.error_body.errors.is_empty()
                || ["token", "expired", "jwt"]
                    .iter()
                    .any(|needle| self.error_body.mentions(needle)))
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed with status {}: {}",
            self.method,
            self.url,
            self.status,
            self.message()
        )
    }
}

impl std::error::Error for HttpFailure {}

/// Errors that can occur when calling a ticketing API.
///
/// Cloning is cheap; underlying client and parse errors are shared.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status
    #[error(transparent)]
    Http(Box<HttpFailure>),

    /// The access token was rejected as expired or invalid
    #[error("Access token expired or rejected: {}", .source.message())]
    AccessTokenExpired {
        /// The 401 response
        source: Box<HttpFailure>,
    },

    /// The basket does not exist
    #[error("Basket {basket_reference} not found: {}", .source.message())]
    BasketNotFound {
        /// Reference of the missing basket
        basket_reference: String,
        /// The failed response
        source: Box<HttpFailure>,
    },

    /// The basket is confirmed or expired and can no longer change
    #[error("Basket {basket_reference} cannot be modified: {}", .source.message())]
    BasketCannotBeModified {
        /// Reference of the locked basket
        basket_reference: String,
        /// The failed response
        source: Box<HttpFailure>,
    },

    /// The coupon was rejected
    #[error("Invalid promo code {coupon}: {}", .source.message())]
    InvalidPromoCode {
        /// The rejected coupon code
        coupon: String,
        /// The failed response
        source: Box<HttpFailure>,
    },

    /// The reservation is not part of the basket
    #[error(
        "Reservation {reservation_id} not found in basket {basket_reference}: {}",
        .source.message()
    )]
    ReservationNotFound {
        /// Reference of the basket
        basket_reference: String,
        /// Id of the missing reservation
        reservation_id: String,
        /// The failed response
        source: Box<HttpFailure>,
    },

    /// The payment order does not exist
    #[error("Order {order_id} not found: {}", .source.message())]
    OrderNotFound {
        /// Id of the missing order
        order_id: String,
        /// The failed response
        source: Box<HttpFailure>,
    },

    /// The booking does not exist or is not visible to the agent
    #[error("Booking {booking_reference} not found: {}", .source.message())]
    BookingNotFound {
        /// Reference of the missing booking
        booking_reference: String,
        /// The failed response
        source: Box<HttpFailure>,
    },

    /// The request never produced a response
    #[error("Request {method} {url} failed: {source}")]
    Transport {
        /// HTTP method of the request
        method: Method,
        /// Full request URL
        url: String,
        /// Underlying client error
        source: Arc<reqwest::Error>,
    },

    /// A success response could not be deserialized
    #[error("Response from {url} could not be parsed: {source}")]
    Deserialization {
        /// Full request URL
        url: String,
        /// Raw response body
        body: String,
        /// Underlying parse error
        source: Arc<serde_json::Error>,
    },

    /// A wrapped success response had no payload
    #[error("Response from {url} carried no payload: {message}")]
    MissingPayload {
        /// Full request URL
        url: String,
        /// Errors or info reported in the envelope, if any
        message: String,
    },

    /// The endpoint requires credentials the context does not have
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Caller input was rejected before any request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The client could not be configured
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Wrap a failed response as [`ApiError::Http`].
    ///
    /// Token rejections are classified by the executor, which knows whether
    /// the request carried a token.
    #[must_use]
    pub fn from_failure(failure: HttpFailure) -> Self {
        Self::Http(Box::new(failure))
    }

    /// The failed response behind this error, if the API answered.
    #[must_use]
    pub fn http_failure(&self) -> Option<&HttpFailure> {
        match self {
            Self::Http(source)
            | Self::AccessTokenExpired { source }
            | Self::BasketNotFound { source, .. }
            | Self::BasketCannotBeModified { source, .. }
            | Self::InvalidPromoCode { source, .. }
            | Self::ReservationNotFound { source, .. }
            | Self::OrderNotFound { source, .. }
            | Self::BookingNotFound { source, .. } => Some(&**source),
            Self::Transport { .. }
            | Self::Deserialization { .. }
            | Self::MissingPayload { .. }
            | Self::NotAuthenticated(_)
            | Self::InvalidArgument(_)
            | Self::Configuration(_) => None,
        }
    }

    /// Response status, if the API answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.http_failure().map(|f| f.status)
    }

    /// Message from the API when it answered, otherwise the error text.
    #[must_use]
    pub fn message(&self) -> String {
        self.http_failure()
            .map_or_else(|| self.to_string(), HttpFailure::message)
    }

    /// Parsed error details, empty when the API did not answer.
    #[must_use]
    pub fn errors(&self) -> &[ErrorDetail] {
        match self.http_failure() {
            Some(failure) => failure.errors(),
            None => &[],
        }
    }

    /// Raw response body, if any was received.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Deserialization { body, .. } => Some(body),
            other => other.http_failure().map(|f| f.body.as_str()),
        }
    }

    /// Whether the error means the requested resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BasketNotFound { .. }
                | Self::ReservationNotFound { .. }
                | Self::OrderNotFound { .. }
                | Self::BookingNotFound { .. }
        ) || self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<HttpFailure> for ApiError {
    fn from(failure: HttpFailure) -> Self {
        Self::from_failure(failure)
    }
}
