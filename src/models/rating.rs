//! Asset and provider ratings

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ModelError;

pub const MAX_RATING: f64 = 5.0;

/// A rating left by a consumer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default)]
    pub account: Option<Uuid>,
    pub value: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<FixedOffset>>,
}

/// Rating command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingCommand {
    /// Rating value in `[0, 5]`
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RatingCommand {
    pub fn new(value: f64, comment: Option<String>) -> Result<Self, ModelError> {
        if !(0.0..=MAX_RATING).contains(&value) {
            return Err(ModelError::RatingOutOfRange(value));
        }
        Ok(Self { value, comment })
    }
}

/// Average of a list of ratings, `None` for an empty list
pub fn average(ratings: &[Rating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: f64 = ratings.iter().map(|r| r.value).sum();
    Some(sum / ratings.len() as f64)
}
