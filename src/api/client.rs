//! Authenticated HTTP client for the portal backend.
//!
//! Every backend exchange goes through [`ApiClient::call`], which attaches the
//! bearer and anti-forgery headers and turns the response into either a JSON
//! payload or an [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::api::error_payload::{normalize_error, NormalizedError};
use crate::api::request::RequestDescriptor;
use crate::config::ApiConfig;
use crate::error::{ApiError, PortalError, PortalResult};
use crate::navigation::Navigator;
use crate::notify::{NotificationKind, Notifier};
use crate::session::{keys, SessionStore};

/// Header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Client bound to one backend and one session store.
///
/// Cheap to clone; clones share the connection pool, cookie jar and
/// collaborators, so concurrent loaders can each hold one.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    jar: Arc<Jar>,
    base_url: Url,
    csrf_cookie: String,
    login_path: String,
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Create a client for the backend described by `config`.
    pub fn new(
        config: &ApiConfig,
        login_path: impl Into<String>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> PortalResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PortalError::Config(format!("Invalid API base URL: {}", e)))?;

        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder().cookie_provider(jar.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| PortalError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            jar,
            base_url,
            csrf_cookie: config.csrf_cookie.clone(),
            login_path: login_path.into(),
            store,
            navigator,
            notifier,
        })
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Add a cookie for the backend origin, e.g. `csrftoken=...; Path=/`.
    pub fn set_cookie(&self, cookie: &str) {
        self.jar.add_cookie_str(cookie, &self.base_url);
    }

    /// Perform one exchange with the backend.
    ///
    /// `Ok(None)` is a successful response without content.
    pub async fn call(&self, request: RequestDescriptor) -> Result<Option<Value>, ApiError> {
        let token = self.store.get(keys::AUTH_TOKEN);

        if request.requires_auth && token.is_none() {
            tracing::info!(
                method = %request.method,
                path = %request.path,
                "No stored credential for authenticated request"
            );
            self.navigator.redirect(&self.login_path);
            return Err(ApiError::AuthRequired);
        }

        let result = self.exchange(&request, token.as_deref()).await;

        match &result {
            Err(ApiError::Transport(error)) => {
                tracing::error!(
                    method = %request.method,
                    path = %request.path,
                    error = %error,
                    "API request failed"
                );
                self.surface_transport_failure(error);
            }
            Err(ApiError::Failed { status, error }) => {
                tracing::debug!(
                    method = %request.method,
                    path = %request.path,
                    status = %status,
                    error = %error,
                    "Backend rejected request"
                );
            }
            _ => {}
        }

        result
    }

    pub async fn get(&self, path: &str, requires_auth: bool) -> Result<Option<Value>, ApiError> {
        self.call(RequestDescriptor::get(path).auth(requires_auth))
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Value,
        requires_auth: bool,
    ) -> Result<Option<Value>, ApiError> {
        self.call(RequestDescriptor::post(path, body).auth(requires_auth))
            .await
    }

    pub async fn patch(
        &self,
        path: &str,
        body: Value,
        requires_auth: bool,
    ) -> Result<Option<Value>, ApiError> {
        self.call(RequestDescriptor::patch(path, body).auth(requires_auth))
            .await
    }

    pub async fn delete(&self, path: &str, requires_auth: bool) -> Result<Option<Value>, ApiError> {
        self.call(RequestDescriptor::delete(path).auth(requires_auth))
            .await
    }

    async fn exchange(
        &self,
        request: &RequestDescriptor,
        token: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.endpoint(&request.path)?;

        let mut builder = self
            .http
            .request(request.method.into(), url.clone())
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(csrf) = self.csrf_token(&url) {
            builder = builder.header(CSRF_HEADER, csrf);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && request.requires_auth {
            self.reject_session();
            return Err(ApiError::SessionRejected);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let payload: Value = response.json().await.map_err(transport)?;

        if !status.is_success() {
            return Err(ApiError::Failed {
                status,
                error: normalize_error(&payload),
            });
        }

        Ok(Some(payload))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| ApiError::Transport(NormalizedError::new(e.to_string())))
    }

    fn csrf_token(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        cookie_value(header.to_str().ok()?, &self.csrf_cookie)
    }

    /// The backend no longer accepts the credential: forget it and go to login.
    fn reject_session(&self) {
        tracing::warn!("Credential rejected by backend, clearing session");
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear session store");
        }
        self.navigator.redirect(&self.login_path);
    }

    /// Notify the user about a transport failure. The bare generic message
    /// is skipped since callers surface it themselves.
    fn surface_transport_failure(&self, error: &NormalizedError) {
        if !error.is_generic() {
            self.notifier.notify(NotificationKind::Error, &error.message);
        }
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(NormalizedError::new(e.to_string()))
}

/// Value of cookie `name` in a `Cookie` header, percent-decoded.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let value = pair.trim().strip_prefix(name)?.strip_prefix('=')?;
        Some(
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string()),
        )
    })
}
