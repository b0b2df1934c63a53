//! HTTP client base
//!
//! [`ApiClient`] wraps a [`Transport`] with an ordered [`InterceptorChain`]
//! and exposes the `get`/`post`/`put`/`delete`/`submit` primitives the
//! resource clients are built on. Every failure is logged once, classified
//! as a setup, request or response error, and returned unchanged.
//!
//! Resource clients:
//! - [`AccountApi`]: login, logout, registration, profile and addresses
//! - [`CartApi`]: shopping cart
//! - [`CatalogueApi`]: catalogue search, item lookup and creation
//! - [`ConfigurationApi`]: server configuration
//! - [`RatingApi`]: asset and provider ratings

pub mod account;
pub mod cart;
pub mod catalogue;
pub mod configuration;
pub mod interceptor;
pub mod rating;

#[cfg(feature = "api-backend")]
pub mod transport;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::session::SessionStore;

pub use account::AccountApi;
pub use cart::CartApi;
pub use catalogue::CatalogueApi;
pub use configuration::ConfigurationApi;
pub use interceptor::{AuthInterceptor, CsrfInterceptor, InterceptorChain, RequestInterceptor};
pub use rating::RatingApi;

#[cfg(feature = "api-backend")]
pub use transport::ReqwestTransport;

/// HTTP verbs used by the marketplace API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// True for the verbs that change server state
    pub fn is_mutating(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields, in order
    Form(Vec<(String, String)>),
}

/// An outbound request as seen by the interceptors and the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value under the same name
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name, value)),
        }
    }
}

/// Raw response returned by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decoded response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
}

/// Failure class used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request could not be built
    Setup,
    /// The request was sent but no response was received
    Request,
    /// The server responded, with a non-2xx status or an unreadable body
    Response,
}

/// Transport-level failure. Business failures arrive as `success: false`
/// envelopes and never produce an `ApiError`.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiError {
    #[error("Request setup failed: {0}")]
    Setup(String),
    #[error("No response for {method} {url}: {message}")]
    Request {
        method: HttpMethod,
        url: String,
        message: String,
    },
    #[error("{method} {url} failed with status {status}")]
    Response {
        method: HttpMethod,
        url: String,
        status: u16,
        body: String,
    },
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Setup(_) => ApiErrorKind::Setup,
            ApiError::Request { .. } => ApiErrorKind::Request,
            ApiError::Response { .. } | ApiError::Decode { .. } => ApiErrorKind::Response,
        }
    }

    /// HTTP status, if the server responded with an error status
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Executes requests that already went through the interceptor chain
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: RequestDescriptor) -> Result<TransportResponse, ApiError>;
}

fn log_failure(err: &ApiError) {
    match err.kind() {
        ApiErrorKind::Response => error!("Server responded with an error: {}", err),
        ApiErrorKind::Request => error!("No response received: {}", err),
        ApiErrorKind::Setup => error!("Error setting up request: {}", err),
    }
}

/// Base HTTP client shared by the resource clients
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    interceptors: InterceptorChain,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client with the CSRF and auth interceptors, in that order,
    /// both reading the given session store
    pub fn new(config: &ClientConfig, store: SessionStore, transport: Arc<dyn Transport>) -> Self {
        let interceptors = InterceptorChain::new()
            .with(CsrfInterceptor::new(store.clone(), config.csrf_header.clone()))
            .with(AuthInterceptor::new(store));
        Self::with_interceptors(config.base_url.clone(), transport, interceptors)
    }

    pub fn with_interceptors(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        interceptors: InterceptorChain,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            interceptors,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn json_body<B: Serialize + ?Sized>(data: &B) -> Result<RequestBody, ApiError> {
        serde_json::to_value(data)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Setup(format!("Failed to serialize request body: {}", e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        self.send(RequestDescriptor::new(HttpMethod::Get, self.url(path)))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.send(RequestDescriptor::new(HttpMethod::Delete, self.url(path)))
            .await
    }

    /// POST with an optional JSON body
    pub async fn post<B, T>(&self, path: &str, data: Option<&B>) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = RequestDescriptor::new(HttpMethod::Post, self.url(path));
        if let Some(data) = data {
            request.body = Self::json_body(data).inspect_err(log_failure)?;
        }
        self.send(request).await
    }

    pub async fn put<B, T>(&self, path: &str, data: &B) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = Self::json_body(data).inspect_err(log_failure)?;
        self.send(RequestDescriptor::new(HttpMethod::Put, self.url(path)).with_body(body))
            .await
    }

    /// Form-encoded POST, used for login and logout
    pub async fn submit<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<ApiResponse<T>, ApiError> {
        let fields = form
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let request = RequestDescriptor::new(HttpMethod::Post, self.url(path))
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(RequestBody::Form(fields));
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<ApiResponse<T>, ApiError> {
        let request = self.interceptors.apply(request);
        let method = request.method;
        let url = request.url.clone();
        debug!("{} {}", method, url);

        let response = self
            .transport
            .execute(request)
            .await
            .inspect_err(log_failure)?;

        if !response.is_success() {
            let err = ApiError::Response {
                method,
                url,
                status: response.status,
                body: response.body,
            };
            log_failure(&err);
            return Err(err);
        }

        let data = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Decode {
                url,
                message: e.to_string(),
            })
            .inspect_err(log_failure)?;

        Ok(ApiResponse {
            status: response.status,
            data,
        })
    }
}
