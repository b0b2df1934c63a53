//! Geodata Marketplace Client - Typed SDK for the geospatial data marketplace API
//!
//! Provides:
//! - Data models mirroring the server's JSON envelopes and records
//! - An HTTP client base with CSRF and bearer token interceptors
//! - Resource clients for accounts, carts, the catalogue, configuration and ratings
//! - An in-memory session store
//! - A route table with a role-based navigation guard

pub mod api;
pub mod client;
pub mod config;
pub mod models;
pub mod router;
pub mod session;

// Re-export commonly used types
pub use api::{
    AccountApi, ApiClient, ApiError, ApiErrorKind, ApiResponse, CartApi, CatalogueApi,
    ConfigurationApi, HttpMethod, RatingApi, RequestBody, RequestDescriptor, Transport,
    TransportResponse,
};
#[cfg(feature = "api-backend")]
pub use api::ReqwestTransport;
pub use client::{ClientError, MarketplaceClient};
pub use config::{ClientConfig, ConfigError};
pub use router::{Location, NavigationDecision, NavigationGuard, Router, RouterError, RouteTable};
pub use session::{SessionState, SessionStore};

// Re-export models
pub use models::{
    Account, Cart, CartAddItemCommand, CatalogueItem, CatalogueQuery, EnumRole, ModelError,
    PricingModel, ServerResponse,
};
