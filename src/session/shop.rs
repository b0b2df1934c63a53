//! Shop slice

use crate::models::Cart;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopState {
    /// Last cart reported by the server
    pub cart: Option<Cart>,
}
