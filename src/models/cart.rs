//! Shopping cart

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ModelError;
use super::catalogue::CatalogueItem;
use super::pricing::PricingModel;

/// A selected catalogue item with its chosen pricing model snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart item unique identifier
    pub id: Uuid,
    pub product: CatalogueItem,
    #[serde(default)]
    pub added_at: Option<DateTime<FixedOffset>>,
    /// Selected pricing model
    pub pricing_model: PricingModel,
}

/// Shopping cart. The server computes every total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Applied discount coupons (for future use)
    #[serde(default)]
    pub applied_coupons: Vec<String>,
    /// Total price including tax
    pub total_price: f64,
    pub total_price_excluding_tax: f64,
    pub tax_total: f64,
    pub currency: String,
    pub total_items: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub modified_at: Option<DateTime<FixedOffset>>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_product(&self, product_id: Uuid) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }
}

/// Command for adding an item to the cart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartAddItemCommand {
    /// Catalogue asset unique id
    pub product_id: Uuid,
    /// Must be one of the pricing models the catalogue lists for the product
    pub pricing_model_id: Uuid,
}

impl CartAddItemCommand {
    pub fn new(product_id: Uuid, pricing_model_id: Uuid) -> Self {
        Self {
            product_id,
            pricing_model_id,
        }
    }

    /// Build a command for a catalogue item, checking that the item offers
    /// the selected pricing model
    pub fn for_item(item: &CatalogueItem, pricing_model_id: Uuid) -> Result<Self, ModelError> {
        if item.pricing_model(pricing_model_id).is_none() {
            return Err(ModelError::UnknownPricingModel {
                item: item.id,
                pricing_model: pricing_model_id,
            });
        }
        Ok(Self::new(item.id, pricing_model_id))
    }
}
