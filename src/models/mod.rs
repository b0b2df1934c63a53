//! Data models mirroring the marketplace API's JSON shapes
//!
//! Passive, server-owned records. Field names follow the server's camelCase
//! JSON; optional fields are `Option`s.

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalogue;
pub mod configuration;
pub mod pricing;
pub mod rating;
pub mod request;
pub mod response;
pub mod role;

use uuid::Uuid;

pub use account::{
    Account, AccountCommand, ActivationTokenCommand, Address, AddressCommand, Profile,
    ProfileCommand, ProfileFields,
};
pub use auth::{CsrfTokenResult, LoginResult, LogoutResult};
pub use cart::{Cart, CartAddItemCommand, CartItem};
pub use catalogue::{
    CatalogueAddItemCommand, CatalogueItem, CatalogueItemMetadata, CatalogueItemStatistics,
    CatalogueQuery, CatalogueQueryResponse, CatalogueSearchEnvelope, Publisher,
};
pub use configuration::{AssetConfiguration, AssetFileType, Configuration, EnumAuthProvider};
pub use pricing::{
    EnumPricingModel, FixedPricingModel, FreePricingModel, PricingModel, PricingModelCommand,
    PricingTotals, SubscriptionPricingModel,
};
pub use rating::{Rating, RatingCommand};
pub use request::{PageRequest, QueryResultPage};
pub use response::{EnumLevel, ServerMessage, ServerResponse};
pub use role::EnumRole;

/// Errors raised when building commands from model values
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ModelError {
    #[error("Catalogue item {item} does not offer pricing model {pricing_model}")]
    UnknownPricingModel { item: Uuid, pricing_model: Uuid },
    #[error("Rating value {0} is outside the range [0, 5]")]
    RatingOutOfRange(f64),
}
