//! JWT authentication against a service's login endpoint.

use crate::context::{AuthenticationMethod, SharedContext};
use crate::error::{ApiError, Result};
use crate::executor::{ApiRequest, ApiRequestExecutor};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Login path relative to the service base URL.
pub const LOGIN_PATH: &str = "login";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Log in with the context credentials and store the token in the context.
pub(crate) async fn login(executor: &ApiRequestExecutor) -> Result<String> {
    let request = {
        let ctx = executor.context().read().await;
        if ctx.authentication_method == AuthenticationMethod::ApiKey {
            return Err(ApiError::InvalidArgument(
                "API key contexts do not log in".to_string(),
            ));
        }
        let (Some(username), Some(password)) =
            (ctx.user_name.as_deref(), ctx.password.as_deref())
        else {
            return Err(ApiError::NotAuthenticated(
                "user name and password are required to log in".to_string(),
            ));
        };
        ApiRequest::post(LOGIN_PATH).json(&LoginRequest { username, password })?
    };

    let response: LoginResponse = executor
        .execute_anonymous_with(request, |failure| match failure.status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::NotAuthenticated(format!("login rejected: {}", failure.message()))
            }
            _ => ApiError::from_failure(failure),
        })
        .await?;

    executor.context().write().await.access_token = Some(response.token.clone());
    tracing::info!(service = executor.service(), "Authenticated");

    Ok(response.token)
}

/// Obtains and manages the access token stored in the shared context.
///
/// Services log in on demand, so calling [`authenticate`](Self::authenticate)
/// up front is only needed to fail fast on bad credentials.
#[derive(Clone, Debug)]
pub struct AuthenticationService {
    executor: ApiRequestExecutor,
}

impl AuthenticationService {
    /// Create a service that logs in through `executor`'s host.
    #[must_use]
    pub const fn new(executor: ApiRequestExecutor) -> Self {
        Self { executor }
    }

    /// Log in with the context's user name and password.
    ///
    /// On success the token is stored in the shared context and returned.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] for API key contexts
    /// - [`ApiError::NotAuthenticated`] when credentials are missing or rejected
    /// - any transport or parse failure
    pub async fn authenticate(&self) -> Result<String> {
        self.executor.authenticate().await
    }

    /// Whether the context holds credentials usable for requests right now.
    pub async fn is_authenticated(&self) -> bool {
        let ctx = self.executor.context().read().await;
        match ctx.authentication_method {
            AuthenticationMethod::ApiKey => ctx.api_key.is_some(),
            AuthenticationMethod::Jwt | AuthenticationMethod::PredefinedJwt => {
                ctx.access_token.is_some()
            }
        }
    }

    /// Forget the access token.
    pub async fn logout(&self) {
        self.executor.context().write().await.access_token = None;
    }

    /// The shared context this service mutates.
    #[must_use]
    pub const fn context(&self) -> &SharedContext {
        self.executor.context()
    }
}
