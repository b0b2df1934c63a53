//! Catalogue items, publishers and catalogue commands

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pricing::{PricingModel, PricingModelCommand};
use super::request::{PageRequest, QueryResultPage};
use super::response::ServerResponse;

/// Full text catalogue query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogueQuery {
    /// Query string used for full text search operation
    pub query: String,
    pub page: u32,
    pub size: u32,
}

impl CatalogueQuery {
    pub fn new(query: impl Into<String>, page: u32, size: u32) -> Self {
        Self {
            query: query.into(),
            page,
            size,
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

impl From<&str> for CatalogueQuery {
    fn from(query: &str) -> Self {
        let page = PageRequest::default();
        CatalogueQuery::new(query, page.page, page.size)
    }
}

/// Descriptive metadata shared by catalogue items and the create command
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItemMetadata {
    /// An abstract of the resource
    #[serde(default)]
    pub abstract_text: Option<String>,
    /// Auxiliary files or additional resources to the dataset
    #[serde(default)]
    pub additional_resources: Option<String>,
    /// Degree of conformity with the implementing rules/standard of the metadata followed
    #[serde(default)]
    pub conformity: Option<String>,
    /// Datasets that the service operates on
    #[serde(default)]
    pub coupled_resource: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    /// Temporal extent of the resource (end date)
    #[serde(default)]
    pub date_end: Option<String>,
    /// Temporal extent of the resource (start date)
    #[serde(default)]
    pub date_start: Option<String>,
    /// File format, physical medium, or dimensions of the resource
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    /// The data producer's knowledge about the lineage of a dataset
    #[serde(default)]
    pub lineage: Option<String>,
    #[serde(default)]
    pub metadata_date: Option<String>,
    #[serde(default)]
    pub metadata_language: Option<String>,
    #[serde(default)]
    pub metadata_point_of_contact_email: Option<String>,
    #[serde(default)]
    pub metadata_point_of_contact_name: Option<String>,
    /// Id of a parent dataset
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub public_access_limitations: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub publisher_email: Option<String>,
    #[serde(default)]
    pub publisher_name: Option<String>,
    #[serde(default)]
    pub reference_system: Option<String>,
    /// URL where the data can be downloaded or additional information found
    #[serde(default)]
    pub resource_locator: Option<String>,
    #[serde(default)]
    pub revision_date: Option<String>,
    /// Denominator of the scale of the data set
    #[serde(default)]
    pub scale: Option<String>,
    #[serde(default)]
    pub spatial_data_service_type: Option<String>,
    #[serde(default)]
    pub spatial_resolution: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topic_category: Option<String>,
    /// The nature or genre of the resource
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Geometry as a GeoJSON polygon
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
}

/// Provider summary attached to catalogue items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: Uuid,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub joined_at: Option<DateTime<FixedOffset>>,
    /// Base64 encoded company logo image
    #[serde(default)]
    pub logo_image: Option<String>,
    #[serde(default)]
    pub logo_image_mime_type: Option<String>,
    pub name: String,
    /// Average rating. `None` if no user ratings exist
    #[serde(default)]
    pub rating: Option<f64>,
    /// Contact email, present only if verified
    #[serde(default)]
    pub email: Option<String>,
}

/// Asset statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItemStatistics {
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub sales: u64,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Catalogue item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueItem {
    pub id: Uuid,
    #[serde(flatten)]
    pub metadata: CatalogueItemMetadata,
    /// Pricing models available for the asset
    #[serde(default)]
    pub pricing_models: Vec<PricingModel>,
    /// Publisher details, joined client-side after a search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,
    pub publisher_id: Uuid,
    #[serde(default)]
    pub statistics: CatalogueItemStatistics,
}

impl CatalogueItem {
    pub fn pricing_model(&self, id: Uuid) -> Option<&PricingModel> {
        self.pricing_models.iter().find(|m| m.id() == id)
    }

    /// Cheapest available pricing model, by total price including tax
    pub fn cheapest_pricing_model(&self) -> Option<&PricingModel> {
        self.pricing_models
            .iter()
            .min_by(|a, b| a.total_price().total_cmp(&b.total_price()))
    }
}

/// Command for creating a catalogue item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueAddItemCommand {
    #[serde(flatten)]
    pub metadata: CatalogueItemMetadata,
    pub pricing_models: Vec<PricingModelCommand>,
}

/// Search response envelope as sent by the server: the result page plus a
/// map with every publisher referenced by the page's items.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueSearchEnvelope {
    #[serde(flatten)]
    pub response: ServerResponse<QueryResultPage<CatalogueItem>>,
    #[serde(default)]
    pub publishers: HashMap<Uuid, Publisher>,
}

pub type CatalogueQueryResponse = ServerResponse<QueryResultPage<CatalogueItem>>;

impl CatalogueSearchEnvelope {
    /// Attach each item's publisher from the side map, keyed by
    /// `publisherId`. Items whose publisher is missing from the map are
    /// left without one; that is not an error. Failed envelopes pass
    /// through untouched.
    pub fn join_publishers(self) -> CatalogueQueryResponse {
        let CatalogueSearchEnvelope {
            mut response,
            publishers,
        } = self;

        if response.success {
            if let Some(page) = response.result.as_mut() {
                for item in page.items.iter_mut() {
                    item.publisher = publishers.get(&item.publisher_id).cloned();
                }
            }
        }

        response
    }
}
