//! `CatalogClient` - movie catalog REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::decode;
use super::error::{CatalogError, Result};
use super::form::MultipartForm;
use super::types::{
    AdminCredentials, MessageResponse, ProfileUpdate, Registration, TokenResponse, User,
    UserCredentials, UserEnvelope,
};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("cinecat/", env!("CARGO_PKG_VERSION"));

/// Movie catalog API client.
///
/// Immutable: a login returns a new, authenticated client that shares the
/// same connection pool, and a logout returns an anonymous one. Concurrent
/// calls never race on the bearer token.
#[derive(Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client (reqwest, connection pool shared between copies).
    pub(super) http_client: Client,
    /// Base URL; always ends with `/`.
    pub(super) base_url: Url,
    /// Bearer token of the current session.
    pub(super) token: Option<Arc<str>>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    token: Option<String>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
            token: None,
        }
    }

    /// Sets the server base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (default: `cinecat/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Starts the client with an existing bearer token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `base_url` is not set or cannot be a base.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let mut base_url = self
            .base_url
            .ok_or_else(|| CatalogError::Config(String::from("base_url is required")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "base_url cannot be a base: {base_url}"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .map_err(|source| CatalogError::Transport {
                context: String::from("failed to build HTTP client"),
                source,
            })?;

        Ok(CatalogClient {
            http_client,
            base_url,
            token: self
                .token
                .filter(|t| !t.is_empty())
                .map(|t| Arc::from(t.as_str())),
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Returns `true` when a bearer token is attached.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Bearer token of the current session.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Server base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Authenticated copy using `token`. An empty token yields an
    /// anonymous copy, as in `CatalogClientBuilder::token`.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token)
                .filter(|t| !t.is_empty())
                .map(|t| Arc::from(t.as_str())),
        }
    }

    /// Anonymous copy without a token.
    #[must_use]
    pub fn anonymous(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            token: None,
        }
    }
}

// --- Request helpers ---

impl CatalogClient {
    /// Joins an endpoint path onto the base URL.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| CatalogError::Url {
                path: String::from(path),
                source,
            })
    }

    /// Returns the bearer token or fails before any I/O.
    pub(super) fn bearer(&self, operation: &'static str) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            tracing::warn!(%operation, "Rejected: no bearer token, log in first");
            CatalogError::AuthenticationRequired { operation }
        })
    }

    /// Starts an authorized request.
    pub(super) fn authorized(
        &self,
        operation: &'static str,
        method: reqwest::Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        let token = self.bearer(operation)?;
        let url = self.endpoint(path)?;
        Ok(self.http_client.request(method, url).bearer_auth(token))
    }

    /// Sends a request and logs it.
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let request = request.build().map_err(|source| CatalogError::Transport {
            context: format!("failed to build request: {path}"),
            source,
        })?;

        tracing::debug!(method = %request.method(), url = %request.url(), "Catalog API request");

        let result = self.http_client.execute(request).await;
        let response = result.map_err(|source| CatalogError::Transport {
            context: format!("request failed: {path}"),
            source,
        })?;

        tracing::debug!(%path, status = response.status().as_u16(), "Catalog API response");
        Ok(response)
    }

    /// Reads the status and the full body text.
    async fn read(response: Response, path: &str) -> Result<(StatusCode, String)> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| CatalogError::Transport {
                context: format!("failed to read response body: {path}"),
                source,
            })?;
        Ok((status, body))
    }

    /// Logs a non-2xx answer that is reported as a soft failure.
    fn log_soft_failure(path: &str, status: StatusCode, body: &str) {
        tracing::warn!(
            %path,
            status = status.as_u16(),
            %body,
            "Catalog API returned an error status"
        );
    }

    /// Sends a request; non-2xx becomes `Ok(None)`.
    pub(super) async fn fetch_soft<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<Option<T>> {
        let response = self.send(request, path).await?;
        let (status, body) = Self::read(response, path).await?;
        if !status.is_success() {
            Self::log_soft_failure(path, status, &body);
            return Ok(None);
        }
        decode::from_str(&body, path).map(Some)
    }

    /// Sends a request; non-2xx becomes `CatalogError::Remote`.
    pub(super) async fn fetch_strict<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T> {
        let response = self.send(request, path).await?;
        let (status, body) = Self::read(response, path).await?;
        if !status.is_success() {
            return Err(CatalogError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        decode::from_str(&body, path)
    }

    /// Sends a request; returns whether the status was 2xx.
    pub(super) async fn fetch_status(&self, request: RequestBuilder, path: &str) -> Result<bool> {
        let response = self.send(request, path).await?;
        let (status, body) = Self::read(response, path).await?;
        if !status.is_success() {
            Self::log_soft_failure(path, status, &body);
        }
        Ok(status.is_success())
    }

    /// Authorized GET; non-2xx becomes `Ok(None)`.
    pub(super) async fn get_authorized<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<Option<T>> {
        let request = self.authorized(operation, reqwest::Method::GET, path)?;
        self.fetch_soft(request, path).await
    }

    /// Authorized JSON POST; non-2xx becomes `CatalogError::Remote`.
    pub(super) async fn post_json_authorized<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        payload: &B,
    ) -> Result<T> {
        let request = self
            .authorized(operation, reqwest::Method::POST, path)?
            .json(payload);
        self.fetch_strict(request, path).await
    }

    /// Authorized multipart POST; non-2xx becomes `CatalogError::Remote`.
    pub(super) async fn post_form_authorized<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        form: MultipartForm<'_>,
    ) -> Result<T> {
        let request = self.authorized(operation, reqwest::Method::POST, path)?;
        tracing::debug!(%path, fields = ?form.fields(), "Multipart form");
        self.fetch_strict(request.multipart(form.into_form()), path)
            .await
    }

    /// Authorized request without a body; returns whether it succeeded.
    pub(super) async fn send_authorized(
        &self,
        operation: &'static str,
        method: reqwest::Method,
        path: &str,
    ) -> Result<bool> {
        let request = self.authorized(operation, method, path)?;
        self.fetch_status(request, path).await
    }

    /// Starts a multipart form bound to this client's connection pool.
    pub(super) fn form(&self) -> MultipartForm<'_> {
        MultipartForm::new(&self.http_client)
    }
}

// --- Accounts and sessions ---

impl CatalogClient {
    /// Logs in an administrator via `POST /api/login`.
    ///
    /// Returns an authenticated client, or `None` when the server rejects
    /// the credentials (soft failure).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or a success body is
    /// not valid JSON.
    #[instrument(skip_all)]
    pub async fn admin_login(&self, credentials: &AdminCredentials) -> Result<Option<Self>> {
        let path = "api/login";
        let request = self
            .http_client
            .post(self.endpoint(path)?)
            .json(credentials);
        let response: Option<TokenResponse> = self.fetch_soft(request, path).await?;
        Ok(self.session_from(response, path))
    }

    /// Logs in a user via `POST /login`.
    ///
    /// Returns an authenticated client, or `None` when the server rejects
    /// the credentials (soft failure).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or a success body is
    /// not valid JSON.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: &UserCredentials) -> Result<Option<Self>> {
        let path = "login";
        let request = self
            .http_client
            .post(self.endpoint(path)?)
            .json(credentials);
        let response: Option<TokenResponse> = self.fetch_soft(request, path).await?;
        Ok(self.session_from(response, path))
    }

    /// Turns a login answer into an authenticated client.
    fn session_from(&self, response: Option<TokenResponse>, path: &str) -> Option<Self> {
        match response.and_then(|r| r.token).filter(|t| !t.is_empty()) {
            Some(token) => {
                tracing::debug!(%path, "Login succeeded");
                Some(self.with_token(token))
            }
            None => {
                tracing::warn!(%path, "Login failed: no token in response");
                None
            }
        }
    }

    /// Registers an account with an optional avatar via multipart
    /// `POST /api/register`.
    ///
    /// Returns `false` when the server rejects the registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    #[instrument(skip_all)]
    pub async fn register(&self, registration: &Registration) -> Result<bool> {
        let path = "api/register";
        let form = self
            .form()
            .text("username", registration.username.as_str())
            .text("email", registration.email.as_str())
            .opt_text("password", Some(&registration.password))
            .opt_text(
                "password_confirmation",
                Some(&registration.password_confirmation),
            )
            .opt_text("gender", registration.gender.as_ref())
            .photo("avatar", registration.avatar.as_ref())
            .await;

        tracing::debug!(%path, fields = ?form.fields(), "Multipart form");
        let request = self
            .http_client
            .post(self.endpoint(path)?)
            .multipart(form.into_form());
        self.fetch_status(request, path).await
    }

    /// Registers via JSON `POST /register`, then logs in with the same
    /// credentials.
    ///
    /// Returns `None` when either step is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if a request cannot be sent or a success body is
    /// not valid JSON.
    #[instrument(skip_all)]
    pub async fn register_and_login(&self, registration: &Registration) -> Result<Option<Self>> {
        let path = "register";
        let request = self
            .http_client
            .post(self.endpoint(path)?)
            .json(registration);
        let response = self.send(request, path).await?;
        let (status, body) = Self::read(response, path).await?;
        if !status.is_success() {
            Self::log_soft_failure(path, status, &body);
            return Ok(None);
        }

        tracing::debug!("Registration succeeded, logging in");
        self.login(&registration.credentials()).await
    }

    /// Ends the session via `POST /api/logout`.
    ///
    /// Returns an anonymous client once the server confirms the logout, or
    /// `None` when it refuses (the current session stays valid).
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` if no token is set.
    /// - The request cannot be sent or a success body is not valid JSON.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<Option<Self>> {
        let path = "api/logout";
        let request = self.authorized("logout", reqwest::Method::POST, path)?;
        let response = self.send(request, path).await?;
        let (status, body) = Self::read(response, path).await?;
        if !status.is_success() {
            Self::log_soft_failure(path, status, &body);
            return Ok(None);
        }
        let message: MessageResponse = decode::from_str_or_default(&body, path)?;
        tracing::debug!(message = message.message.as_deref().unwrap_or("-"), "Logged out");
        Ok(Some(self.anonymous()))
    }

    /// Fetches the logged-in user via `GET /api/user`.
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` if no token is set.
    /// - The request cannot be sent or a success body is not valid JSON.
    #[instrument(skip_all)]
    pub async fn current_user(&self) -> Result<Option<User>> {
        let envelope: Option<UserEnvelope> =
            self.get_authorized("current_user", "api/user").await?;
        Ok(envelope.map(UserEnvelope::into_user))
    }

    /// Updates the logged-in user's profile via multipart
    /// `POST /api/user/profile`.
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` if no token is set.
    /// - `Remote` if the server rejects the update.
    /// - The request cannot be sent or the body is not valid JSON.
    #[instrument(skip_all)]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let operation = "update_profile";
        self.bearer(operation)?;
        let form = self
            .form()
            .text("username", update.username.as_str())
            .text("email", update.email.as_str())
            .opt_text("password", update.password.as_ref())
            .opt_text("password_confirmation", update.password_confirmation.as_ref())
            .opt_text("gender", update.gender.as_ref())
            .photo("avatar", update.avatar.as_ref())
            .await;
        let envelope: UserEnvelope = self
            .post_form_authorized(operation, "api/user/profile", form)
            .await?;
        Ok(envelope.into_user())
    }
}
