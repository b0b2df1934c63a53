//! Cart API
//!
//! Every call returns the new authoritative cart.

use uuid::Uuid;

use crate::models::{Cart, CartAddItemCommand, ServerResponse};

use super::{ApiClient, ApiError};

const CART_PATH: &str = "/action/cart";

#[derive(Debug, Clone)]
pub struct CartApi {
    api: ApiClient,
}

impl CartApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_cart(&self) -> Result<ServerResponse<Cart>, ApiError> {
        Ok(self.api.get(CART_PATH).await?.data)
    }

    pub async fn add_item(
        &self,
        command: &CartAddItemCommand,
    ) -> Result<ServerResponse<Cart>, ApiError> {
        Ok(self.api.post(CART_PATH, Some(command)).await?.data)
    }

    /// Remove a cart item by its cart item id
    pub async fn remove_item(&self, id: Uuid) -> Result<ServerResponse<Cart>, ApiError> {
        Ok(self.api.delete(&format!("{}/{}", CART_PATH, id)).await?.data)
    }

    pub async fn clear(&self) -> Result<ServerResponse<Cart>, ApiError> {
        Ok(self.api.delete(CART_PATH).await?.data)
    }
}
