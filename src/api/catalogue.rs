//! Catalogue API

use tracing::debug;
use uuid::Uuid;

use crate::models::{
    CatalogueAddItemCommand, CatalogueItem, CatalogueQuery, CatalogueQueryResponse,
    CatalogueSearchEnvelope, ServerResponse,
};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct CatalogueApi {
    api: ApiClient,
}

impl CatalogueApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Full text search. Each item of a successful page gets its publisher
    /// attached from the response's publisher map.
    ///
    /// ```rust,no_run
    /// # use geodata_marketplace_client::api::CatalogueApi;
    /// # async fn example(catalogue: CatalogueApi) -> Result<(), Box<dyn std::error::Error>> {
    /// let response = catalogue.find("land cover").await?;
    /// if let Some(page) = response.result {
    ///     println!("{} matching items", page.count);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find(
        &self,
        query: impl Into<CatalogueQuery>,
    ) -> Result<CatalogueQueryResponse, ApiError> {
        let query = query.into();
        let envelope: CatalogueSearchEnvelope = self
            .api
            .post("/action/catalogue", Some(&query))
            .await?
            .data;
        debug!(
            "Catalogue search returned {} publisher(s)",
            envelope.publishers.len()
        );
        Ok(envelope.join_publishers())
    }

    pub async fn find_one(&self, id: Uuid) -> Result<ServerResponse<CatalogueItem>, ApiError> {
        Ok(self
            .api
            .get(&format!("/action/catalogue/items/{}", id))
            .await?
            .data)
    }

    /// Create a draft catalogue item. The server does not return the new id.
    pub async fn create(
        &self,
        command: &CatalogueAddItemCommand,
    ) -> Result<ServerResponse<()>, ApiError> {
        Ok(self
            .api
            .post("/action/catalogue/items", Some(command))
            .await?
            .data)
    }
}
