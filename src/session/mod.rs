//! Session store
//!
//! In-memory session state split in three slices: `user` (authentication
//! and CSRF), `shop` (cart) and `config` (server configuration). The store
//! performs no I/O; callers run the API call and commit the result through
//! one of the mutation methods.
//!
//! [`SessionStore`] is a cheaply clonable handle. Each mutation takes the
//! write lock exactly once, so a single mutation is atomic. Sequences of
//! mutations spanning an awaited request are not.

mod config;
mod shop;
mod user;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::models::{Account, Cart, Configuration, EnumRole, Profile};

pub use config::ConfigState;
pub use shop::ShopState;
pub use user::UserState;

/// Complete session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: UserState,
    pub shop: ShopState,
    pub config: ConfigState,
}

/// Shared handle to the session state
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the whole state
    pub fn snapshot(&self) -> SessionState {
        self.inner.read().clone()
    }

    /// Restore empty defaults
    pub fn reset(&self) {
        *self.inner.write() = SessionState::default();
    }

    // User getters

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().user.is_authenticated()
    }

    pub fn has_role(&self, role: &EnumRole) -> bool {
        self.inner.read().user.has_role(role)
    }

    pub fn auth_token(&self) -> Option<String> {
        self.inner.read().user.auth_token.clone()
    }

    pub fn csrf_header(&self) -> Option<String> {
        self.inner.read().user.csrf_header.clone()
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.inner.read().user.csrf_token.clone()
    }

    pub fn username(&self) -> Option<String> {
        self.inner.read().user.username.clone()
    }

    pub fn roles(&self) -> Vec<EnumRole> {
        self.inner.read().user.roles.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.inner.read().user.profile.clone()
    }

    // User mutations

    pub fn set_csrf_token(&self, header: Option<String>, token: Option<String>) {
        self.inner.write().user.set_csrf_token(header, token);
    }

    pub fn set_auth_token(&self, token: Option<String>) {
        self.inner.write().user.auth_token = token;
    }

    /// Replace username, roles and profile together
    pub fn set_user_data(&self, account: &Account) {
        self.inner.write().user.set_user_data(account);
        debug!("Session user set with {} role(s)", account.roles.len());
    }

    pub fn logout(&self) {
        self.inner.write().user.logout();
        info!("Session user cleared");
    }

    // Shop

    pub fn cart(&self) -> Option<Cart> {
        self.inner.read().shop.cart.clone()
    }

    pub fn set_cart(&self, cart: Option<Cart>) {
        self.inner.write().shop.cart = cart;
    }

    // Config

    pub fn configuration(&self) -> Option<Configuration> {
        self.inner.read().config.configuration.clone()
    }

    pub fn set_configuration(&self, configuration: Option<Configuration>) {
        self.inner.write().config.configuration = configuration;
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().config.loading
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.write().config.loading = loading;
    }
}
