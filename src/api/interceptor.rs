//! Request interceptors
//!
//! An interceptor takes a [`RequestDescriptor`] and returns it, possibly with
//! extra headers. [`InterceptorChain::apply`] runs them left to right.

use std::fmt;
use std::sync::Arc;

use super::RequestDescriptor;
use crate::session::SessionStore;

/// Header name used when the session holds a CSRF token without a header name
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRF-TOKEN";

pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: RequestDescriptor) -> RequestDescriptor;
}

impl<F> RequestInterceptor for F
where
    F: Fn(RequestDescriptor) -> RequestDescriptor + Send + Sync,
{
    fn intercept(&self, request: RequestDescriptor) -> RequestDescriptor {
        self(request)
    }
}

/// Ordered list of interceptors
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor to the end of the chain
    pub fn with(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn apply(&self, request: RequestDescriptor) -> RequestDescriptor {
        self.interceptors
            .iter()
            .fold(request, |request, interceptor| interceptor.intercept(request))
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Attaches the session's CSRF token to POST, PUT and DELETE requests
#[derive(Debug, Clone)]
pub struct CsrfInterceptor {
    store: SessionStore,
    default_header: String,
}

impl CsrfInterceptor {
    pub fn new(store: SessionStore, default_header: impl Into<String>) -> Self {
        Self {
            store,
            default_header: default_header.into(),
        }
    }
}

impl RequestInterceptor for CsrfInterceptor {
    fn intercept(&self, mut request: RequestDescriptor) -> RequestDescriptor {
        if !request.method.is_mutating() {
            return request;
        }
        let Some(token) = non_empty(self.store.csrf_token()) else {
            return request;
        };
        let header = non_empty(self.store.csrf_header())
            .unwrap_or_else(|| self.default_header.clone());
        request.set_header(header, token);
        request
    }
}

/// Attaches `Authorization: Bearer <token>` when the session holds a token
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    store: SessionStore,
}

impl AuthInterceptor {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for AuthInterceptor {
    fn intercept(&self, mut request: RequestDescriptor) -> RequestDescriptor {
        if let Some(token) = non_empty(self.store.auth_token()) {
            request.set_header("Authorization", format!("Bearer {}", token));
        }
        request
    }
}
