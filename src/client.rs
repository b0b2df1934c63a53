//! Marketplace client facade
//!
//! Wires one [`SessionStore`] into the HTTP client base, the resource
//! clients and the router, and provides the flows that commit API results
//! into the store.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{
    AccountApi, ApiClient, ApiError, CartApi, CatalogueApi, ConfigurationApi, RatingApi, Transport,
};
use crate::config::{ClientConfig, ConfigError};
use crate::models::{
    Account, Cart, CartAddItemCommand, CatalogueItem, Configuration, LogoutResult, ModelError,
    ServerResponse,
};
use crate::router::{ResolvedRoute, Router, RouterError};
use crate::session::SessionStore;

/// Error type for client construction and flows
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Router(#[from] RouterError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    config: ClientConfig,
    store: SessionStore,
    account: AccountApi,
    cart: CartApi,
    catalogue: CatalogueApi,
    configuration: ConfigurationApi,
    rating: RatingApi,
    router: Router,
}

impl MarketplaceClient {
    /// Create a client over HTTP
    #[cfg(feature = "api-backend")]
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = crate::api::ReqwestTransport::new(config.with_credentials)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over the given transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClientError> {
        config.validate()?;

        let store = SessionStore::new();
        let api = ApiClient::new(&config, store.clone(), transport);
        let router = Router::marketplace(store.clone())?;

        Ok(Self {
            account: AccountApi::new(api.clone()),
            cart: CartApi::new(api.clone()),
            catalogue: CatalogueApi::new(api.clone()),
            configuration: ConfigurationApi::new(api.clone()),
            rating: RatingApi::new(api),
            router,
            store,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn account(&self) -> &AccountApi {
        &self.account
    }

    pub fn cart(&self) -> &CartApi {
        &self.cart
    }

    pub fn catalogue(&self) -> &CatalogueApi {
        &self.catalogue
    }

    pub fn configuration(&self) -> &ConfigurationApi {
        &self.configuration
    }

    pub fn rating(&self) -> &RatingApi {
        &self.rating
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn navigate(&self, path: &str) -> Result<ResolvedRoute, RouterError> {
        self.router.navigate(path)
    }

    /// Log in, store the new CSRF token, then load and store the user data.
    ///
    /// A failed login envelope is returned with its messages and no
    /// account; the session is left untouched.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ServerResponse<Account>, ApiError> {
        let login = self.account.login(username, password).await?;
        if !login.success {
            warn!("Login for {} was rejected", username);
            return Ok(ServerResponse::failure(login.messages));
        }
        if let Some(token) = login.result {
            self.store.set_csrf_token(token.csrf_header, token.csrf_token);
        }

        let user = self.account.get_user_data().await?;
        match (&user.result, user.success) {
            (Some(account), true) => {
                self.store.set_user_data(account);
                debug!("Signed in as {}", account.username);
            }
            _ => warn!("User data request failed after login"),
        }
        Ok(user)
    }

    /// Log out, clear the user and store the CSRF token of the new session
    pub async fn sign_out(&self) -> Result<ServerResponse<LogoutResult>, ApiError> {
        let response = self.account.logout().await?;
        self.store.logout();
        if let Some(token) = &response.result {
            self.store
                .set_csrf_token(token.csrf_header.clone(), token.csrf_token.clone());
        }
        info!("Signed out");
        Ok(response)
    }

    /// Load the server configuration for a locale, defaulting to the
    /// configured one
    pub async fn load_configuration(
        &self,
        locale: Option<&str>,
    ) -> Result<ServerResponse<Configuration>, ApiError> {
        let locale = locale.unwrap_or(&self.config.locale);

        self.store.set_loading(true);
        let response = self.configuration.get_configuration(locale).await;
        self.store.set_loading(false);

        let response = response?;
        if response.success {
            self.store.set_configuration(response.result.clone());
        }
        Ok(response)
    }

    fn commit_cart(&self, response: &ServerResponse<Cart>) {
        if response.success {
            self.store.set_cart(response.result.clone());
        }
    }

    pub async fn refresh_cart(&self) -> Result<ServerResponse<Cart>, ApiError> {
        let response = self.cart.get_cart().await?;
        self.commit_cart(&response);
        Ok(response)
    }

    pub async fn add_to_cart(
        &self,
        command: &CartAddItemCommand,
    ) -> Result<ServerResponse<Cart>, ApiError> {
        let response = self.cart.add_item(command).await?;
        self.commit_cart(&response);
        Ok(response)
    }

    /// Add a catalogue item with one of its own pricing models
    pub async fn add_item_to_cart(
        &self,
        item: &CatalogueItem,
        pricing_model_id: Uuid,
    ) -> Result<ServerResponse<Cart>, ClientError> {
        let command = CartAddItemCommand::for_item(item, pricing_model_id)?;
        Ok(self.add_to_cart(&command).await?)
    }

    pub async fn remove_from_cart(&self, id: Uuid) -> Result<ServerResponse<Cart>, ApiError> {
        let response = self.cart.remove_item(id).await?;
        self.commit_cart(&response);
        Ok(response)
    }

    pub async fn clear_cart(&self) -> Result<ServerResponse<Cart>, ApiError> {
        let response = self.cart.clear().await?;
        self.commit_cart(&response);
        Ok(response)
    }
}
