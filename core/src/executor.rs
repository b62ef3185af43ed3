//! Request execution shared by every service client.
//!
//! [`ApiRequestExecutor`] turns an [`ApiRequest`] into an HTTP call against
//! one service host and maps the outcome:
//!
//! 1. the request never completes → [`ApiError::Transport`]
//! 2. 2xx with a raw payload → `T`
//! 3. 2xx with a wrapped payload → `T` taken out of the [`Envelope`], or
//!    [`ApiError::MissingPayload`]
//! 4. 401 on a request that carried a token → [`ApiError::AccessTokenExpired`],
//!    after one re-login and retry when the context can log in by itself
//! 5. any other non-2xx → the caller's translation of the [`HttpFailure`]

use crate::config::ClientSettings;
use crate::context::{AuthenticationMethod, SharedContext};
use crate::envelope::{ApiResponse, DataResponse, Envelope, ResponseContext};
use crate::error::{ApiError, HttpFailure, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;

/// Header carrying the correlation id, in both directions.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the affiliate id.
pub const AFFILIATE_HEADER: &str = "x-affiliate-id";
/// Header carrying the market.
pub const MARKET_HEADER: &str = "x-market";
/// Header carrying the display currency.
pub const DISPLAY_CURRENCY_HEADER: &str = "x-display-currency";

/// A request relative to a service's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    requires_auth: bool,
}

impl ApiRequest {
    /// Create a request. `path` is relative to the service base URL.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            requires_auth: false,
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH` request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter when `value` is present.
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add several query parameters.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            ApiError::InvalidArgument(format!("Request body cannot be serialized: {e}"))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Mark the request as needing credentials.
    #[must_use]
    pub const fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Whether the request needs credentials.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}

/// Outcome of a single round trip.
enum Outcome {
    Success {
        url: String,
        body: String,
    },
    Failure {
        failure: HttpFailure,
        sent_token: bool,
    },
}

/// Executes requests against one service host.
///
/// Cloning is cheap: the HTTP client and the context are shared.
#[derive(Clone, Debug)]
pub struct ApiRequestExecutor {
    client: Client,
    context: SharedContext,
    host: String,
    service: &'static str,
}

impl ApiRequestExecutor {
    /// Create an executor with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the HTTP client cannot be built.
    pub fn new(
        context: SharedContext,
        service: &'static str,
        host: impl Into<String>,
        settings: &ClientSettings,
    ) -> Result<Self> {
        let client = build_http_client(settings)?;
        Ok(Self::with_client(client, context, service, host))
    }

    /// Create an executor sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(
        client: Client,
        context: SharedContext,
        service: &'static str,
        host: impl Into<String>,
    ) -> Self {
        Self {
            client,
            context,
            host: host.into(),
            service,
        }
    }

    /// Shared context read by every request.
    #[must_use]
    pub const fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Service label used in logs and metrics.
    #[must_use]
    pub const fn service(&self) -> &'static str {
        self.service
    }

    /// Base URL the next request will use.
    pub async fn base_url(&self) -> String {
        self.context.read().await.base_url_for(&self.host)
    }

    /// Execute a request whose body is the payload.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] matching the failure mode; see the module docs.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.execute_with(request, ApiError::from_failure).await
    }

    /// Execute a request whose body is the payload, translating failures.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] matching the failure mode; non-2xx responses
    /// pass through `translate`.
    pub async fn execute_with<T, F>(&self, request: ApiRequest, translate: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(HttpFailure) -> ApiError + Send + Sync,
    {
        let (url, body) = self.send(&request, &translate).await?;
        decode(&url, body)
    }

    /// Execute a request whose payload is nested in envelope `E`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingPayload`] when the envelope is empty, or
    /// the [`ApiError`] matching any other failure mode.
    pub async fn execute_wrapped<T, E>(&self, request: ApiRequest) -> Result<T>
    where
        E: Envelope<T>,
    {
        self.execute_wrapped_with::<T, E, _>(request, ApiError::from_failure)
            .await
    }

    /// Execute a request whose payload is nested in envelope `E`, translating failures.
    ///
    /// # Errors
    ///
    /// See [`ApiRequestExecutor::execute_wrapped`]; non-2xx responses pass
    /// through `translate`.
    pub async fn execute_wrapped_with<T, E, F>(
        &self,
        request: ApiRequest,
        translate: F,
    ) -> Result<T>
    where
        E: Envelope<T>,
        F: Fn(HttpFailure) -> ApiError + Send + Sync,
    {
        let (url, body) = self.send(&request, &translate).await?;
        if body.trim().is_empty() {
            return Err(ApiError::MissingPayload {
                url,
                message: "empty body".to_string(),
            });
        }
        let envelope: E = decode(&url, body)?;
        let summary = envelope.context().and_then(ResponseContext::summary);
        envelope.into_data().ok_or_else(|| ApiError::MissingPayload {
            url,
            message: summary.unwrap_or_else(|| "empty envelope".to_string()),
        })
    }

    /// Execute a request whose payload sits under `response`.
    ///
    /// # Errors
    ///
    /// See [`ApiRequestExecutor::execute_wrapped`].
    pub async fn execute_api_response<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T> {
        self.execute_wrapped::<T, ApiResponse<T>>(request).await
    }

    /// Execute a request whose payload sits under `data`.
    ///
    /// # Errors
    ///
    /// See [`ApiRequestExecutor::execute_wrapped`].
    pub async fn execute_data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.execute_wrapped::<T, DataResponse<T>>(request).await
    }

    /// Execute a request whose response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] matching the failure mode.
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<()> {
        self.execute_empty_with(request, ApiError::from_failure).await
    }

    /// Execute a request whose response body is ignored, translating failures.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] matching the failure mode; non-2xx responses
    /// pass through `translate`.
    pub async fn execute_empty_with<F>(&self, request: ApiRequest, translate: F) -> Result<()>
    where
        F: Fn(HttpFailure) -> ApiError + Send + Sync,
    {
        self.send(&request, &translate).await.map(|_| ())
    }

    /// Log in with the context credentials and store the token.
    ///
    /// # Errors
    ///
    /// See [`crate::auth::AuthenticationService::authenticate`].
    pub async fn authenticate(&self) -> Result<String> {
        crate::auth::login(self).await
    }

    /// Execute a request without credentials, auto-login or retry.
    pub(crate) async fn execute_anonymous_with<T, F>(
        &self,
        request: ApiRequest,
        translate: F,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(HttpFailure) -> ApiError + Send + Sync,
    {
        match self.send_once(&request, false).await? {
            Outcome::Success { url, body } => decode(&url, body),
            Outcome::Failure { failure, .. } => Err(translate(failure)),
        }
    }

    async fn send(
        &self,
        request: &ApiRequest,
        translate: &(dyn Fn(HttpFailure) -> ApiError + Send + Sync),
    ) -> Result<(String, String)> {
        if request.requires_auth {
            self.ensure_authenticated().await?;
        }

        let mut outcome = self.send_once(request, true).await?;

        let token_rejected = matches!(
            &outcome,
            Outcome::Failure { failure, sent_token: true } if failure.is_token_rejection()
        );
        if token_rejected && self.context.read().await.can_authenticate() {
            tracing::warn!(
                service = self.service,
                path = %request.path,
                "Access token rejected, logging in again"
            );
            self.authenticate().await?;
            outcome = self.send_once(request, true).await?;
        }

        match outcome {
            Outcome::Success { url, body } => Ok((url, body)),
            Outcome::Failure { failure, sent_token: true } if failure.is_token_rejection() => {
                Err(ApiError::AccessTokenExpired {
                    source: Box::new(failure),
                })
            }
            Outcome::Failure { failure, .. } => Err(translate(failure)),
        }
    }

    async fn ensure_authenticated(&self) -> Result<()> {
        let (method, has_token, has_key, can_authenticate) = {
            let ctx = self.context.read().await;
            (
                ctx.authentication_method,
                ctx.access_token.is_some(),
                ctx.api_key.is_some(),
                ctx.can_authenticate(),
            )
        };

        match method {
            AuthenticationMethod::ApiKey if has_key => Ok(()),
            AuthenticationMethod::ApiKey => Err(ApiError::NotAuthenticated(
                "API key authentication selected but no API key is set".to_string(),
            )),
            _ if has_token => Ok(()),
            AuthenticationMethod::Jwt if can_authenticate => {
                tracing::debug!(service = self.service, "No access token, logging in");
                self.authenticate().await.map(|_| ())
            }
            AuthenticationMethod::Jwt => Err(ApiError::NotAuthenticated(
                "no access token and no credentials to log in with".to_string(),
            )),
            AuthenticationMethod::PredefinedJwt => Err(ApiError::NotAuthenticated(
                "predefined JWT authentication selected but no access token is set".to_string(),
            )),
        }
    }

    async fn send_once(&self, request: &ApiRequest, with_credentials: bool) -> Result<Outcome> {
        let (base_url, headers, sent_token) = self.request_headers(with_credentials).await;
        let url = format!("{base_url}{}", request.path.trim_start_matches('/'));

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json")
            .query(&request.query);
        for (name, value) in headers.iter().chain(request.headers.iter()) {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let http_request = builder.build().map_err(|source| ApiError::Transport {
            method: request.method.clone(),
            url: url.clone(),
            source: Arc::new(source),
        })?;
        let url = http_request.url().to_string();

        tracing::debug!(
            service = self.service,
            method = %request.method,
            url = %url,
            "Sending request"
        );
        let started = Instant::now();

        let response = match self.client.execute(http_request).await {
            Ok(response) => response,
            Err(source) => {
                tracing::warn!(
                    service = self.service,
                    method = %request.method,
                    url = %url,
                    error = %source,
                    "Request failed before a response was received"
                );
                metrics::counter!(
                    "ticketing_sdk.requests",
                    "service" => self.service,
                    "status" => "transport_error"
                )
                .increment(1);
                return Err(ApiError::Transport {
                    method: request.method.clone(),
                    url,
                    source: Arc::new(source),
                });
            }
        };

        let status = response.status();
        let correlation_id = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|source| ApiError::Transport {
            method: request.method.clone(),
            url: url.clone(),
            source: Arc::new(source),
        })?;
        let elapsed = started.elapsed();

        metrics::counter!(
            "ticketing_sdk.requests",
            "service" => self.service,
            "status" => status.as_u16().to_string()
        )
        .increment(1);
        metrics::histogram!("ticketing_sdk.request_duration_seconds", "service" => self.service)
            .record(elapsed.as_secs_f64());

        if status.is_success() {
            tracing::debug!(
                service = self.service,
                status = status.as_u16(),
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                correlation_id = correlation_id.as_deref().unwrap_or_default(),
                "Received response"
            );
            return Ok(Outcome::Success { url, body });
        }

        let failure = HttpFailure::new(request.method.clone(), url, status, body)
            .with_correlation_id(correlation_id);
        tracing::warn!(
            service = self.service,
            method = %failure.method,
            url = %failure.url,
            status = status.as_u16(),
            correlation_id = failure.correlation_id.as_deref().unwrap_or_default(),
            message = %failure.message(),
            "API returned an error"
        );
        Ok(Outcome::Failure { failure, sent_token })
    }

    /// Base URL, context headers, and whether a bearer token is attached.
    async fn request_headers(
        &self,
        with_credentials: bool,
    ) -> (String, Vec<(String, String)>, bool) {
        let ctx = self.context.read().await;
        let mut headers = Vec::new();
        let mut sent_token = false;

        match ctx.authentication_method {
            _ if !with_credentials => {}
            AuthenticationMethod::ApiKey => {
                if let Some(key) = &ctx.api_key {
                    headers.push((API_KEY_HEADER.to_string(), key.clone()));
                }
            }
            AuthenticationMethod::Jwt | AuthenticationMethod::PredefinedJwt => {
                if let Some(token) = &ctx.access_token {
                    headers.push((AUTHORIZATION.as_str().to_string(), format!("Bearer {token}")));
                    sent_token = true;
                }
            }
        }

        let optional = [
            (AFFILIATE_HEADER, &ctx.affiliate_id),
            (MARKET_HEADER, &ctx.market),
            (DISPLAY_CURRENCY_HEADER, &ctx.display_currency),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                headers.push((name.to_string(), value.clone()));
            }
        }

        let correlation_id = ctx
            .correlation_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        headers.push((CORRELATION_ID_HEADER.to_string(), correlation_id));

        (ctx.base_url_for(&self.host), headers, sent_token)
    }
}

/// Build the HTTP client used by executors.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] if the TLS backend cannot be initialised.
pub fn build_http_client(settings: &ClientSettings) -> Result<Client> {
    Client::builder()
        .timeout(settings.timeout)
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|e| ApiError::Configuration(format!("HTTP client cannot be built: {e}")))
}

/// Deserialize a success body. Empty bodies read as JSON `null`.
fn decode<T: DeserializeOwned>(url: &str, body: String) -> Result<T> {
    let text = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(text).map_err(|source| ApiError::Deserialization {
        url: url.to_string(),
        body,
        source: Arc::new(source),
    })
}
