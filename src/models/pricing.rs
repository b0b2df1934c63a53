//! Pricing models
//!
//! Pricing models are a closed sum type discriminated by the `type` field.
//! Unknown tags (including the server's `UNDEFINED`) fail deserialization
//! instead of being skipped.
//!
//! Monetary values are plain `f64` amounts in the model currency, rounded
//! to two decimals the way the server rounds them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency of every monetary value the marketplace reports
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Pricing model discriminator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnumPricingModel {
    Free,
    Fixed,
    Subscription,
}

impl fmt::Display for EnumPricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnumPricingModel::Free => "FREE",
            EnumPricingModel::Fixed => "FIXED",
            EnumPricingModel::Subscription => "SUBSCRIPTION",
        };
        f.write_str(name)
    }
}

/// Totals shared by every pricing model variant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingTotals {
    /// Model unique identifier
    pub id: Uuid,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub tax: f64,
    /// Tax percent in range [0, 100]
    pub tax_percent: u32,
    /// Price total including tax
    pub total_price: f64,
    pub total_price_excluding_tax: f64,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl PricingTotals {
    /// Compute totals from the price excluding tax
    fn compute(id: Uuid, total_price_excluding_tax: f64, tax_percent: u32) -> Self {
        let tax = round_half_up(total_price_excluding_tax * f64::from(tax_percent) / 100.0);
        Self {
            id,
            currency: default_currency(),
            tax,
            tax_percent,
            total_price: round_half_up(total_price_excluding_tax + tax),
            total_price_excluding_tax,
        }
    }
}

/// Round a positive amount to two decimals, halves away from zero
pub fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreePricingModel {
    #[serde(flatten)]
    pub totals: PricingTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FixedPricingModel {
    #[serde(flatten)]
    pub totals: PricingTotals,
    /// True if pricing model includes updates
    #[serde(default)]
    pub includes_updates: bool,
    /// Number of years for included updates
    #[serde(default)]
    pub years_of_updates: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPricingModel {
    #[serde(flatten)]
    pub totals: PricingTotals,
    /// Subscription duration in months
    pub duration: u32,
    /// Monthly subscription price excluding tax
    pub monthly_price: f64,
}

/// Pricing model attached to a catalogue item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    Free(FreePricingModel),
    Fixed(FixedPricingModel),
    Subscription(SubscriptionPricingModel),
}

impl PricingModel {
    pub fn kind(&self) -> EnumPricingModel {
        match self {
            PricingModel::Free(_) => EnumPricingModel::Free,
            PricingModel::Fixed(_) => EnumPricingModel::Fixed,
            PricingModel::Subscription(_) => EnumPricingModel::Subscription,
        }
    }

    pub fn totals(&self) -> &PricingTotals {
        match self {
            PricingModel::Free(m) => &m.totals,
            PricingModel::Fixed(m) => &m.totals,
            PricingModel::Subscription(m) => &m.totals,
        }
    }

    pub fn id(&self) -> Uuid {
        self.totals().id
    }

    pub fn total_price(&self) -> f64 {
        self.totals().total_price
    }
}

/// Pricing model as submitted when creating a catalogue item.
///
/// The server assigns ids and computes totals; see [`PricingModelCommand::quote`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModelCommand {
    Free,
    #[serde(rename_all = "camelCase")]
    Fixed {
        includes_updates: bool,
        years_of_updates: u32,
        total_price_excluding_tax: f64,
    },
    #[serde(rename_all = "camelCase")]
    Subscription { duration: u32, monthly_price: f64 },
}

impl PricingModelCommand {
    pub fn kind(&self) -> EnumPricingModel {
        match self {
            PricingModelCommand::Free => EnumPricingModel::Free,
            PricingModelCommand::Fixed { .. } => EnumPricingModel::Fixed,
            PricingModelCommand::Subscription { .. } => EnumPricingModel::Subscription,
        }
    }

    /// Price excluding tax implied by the command
    pub fn price_excluding_tax(&self) -> f64 {
        match self {
            PricingModelCommand::Free => 0.0,
            PricingModelCommand::Fixed {
                total_price_excluding_tax,
                ..
            } => *total_price_excluding_tax,
            PricingModelCommand::Subscription {
                duration,
                monthly_price,
            } => monthly_price * f64::from(*duration),
        }
    }

    /// Expand the command into the effective pricing model the server
    /// reports for it, given the id it assigned and the applicable tax.
    ///
    /// Free models carry zero totals; fixed models tax the given price;
    /// subscriptions tax `monthly_price × duration`.
    pub fn quote(&self, id: Uuid, tax_percent: u32) -> PricingModel {
        match self {
            PricingModelCommand::Free => PricingModel::Free(FreePricingModel {
                totals: PricingTotals {
                    id,
                    currency: default_currency(),
                    tax: 0.0,
                    tax_percent,
                    total_price: 0.0,
                    total_price_excluding_tax: 0.0,
                },
            }),
            PricingModelCommand::Fixed {
                includes_updates,
                years_of_updates,
                total_price_excluding_tax,
            } => PricingModel::Fixed(FixedPricingModel {
                totals: PricingTotals::compute(id, *total_price_excluding_tax, tax_percent),
                includes_updates: *includes_updates,
                years_of_updates: *years_of_updates,
            }),
            PricingModelCommand::Subscription {
                duration,
                monthly_price,
            } => PricingModel::Subscription(SubscriptionPricingModel {
                totals: PricingTotals::compute(id, self.price_excluding_tax(), tax_percent),
                duration: *duration,
                monthly_price: *monthly_price,
            }),
        }
    }
}
