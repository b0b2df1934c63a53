//! Rating API

use uuid::Uuid;

use crate::models::{Rating, RatingCommand, ServerResponse};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct RatingApi {
    api: ApiClient,
}

impl RatingApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_asset_ratings(&self, id: Uuid) -> Result<ServerResponse<Vec<Rating>>, ApiError> {
        Ok(self.api.get(&asset_path(id)).await?.data)
    }

    pub async fn add_asset_rating(
        &self,
        id: Uuid,
        command: &RatingCommand,
    ) -> Result<ServerResponse<()>, ApiError> {
        Ok(self.api.post(&asset_path(id), Some(command)).await?.data)
    }

    pub async fn get_provider_ratings(
        &self,
        id: Uuid,
    ) -> Result<ServerResponse<Vec<Rating>>, ApiError> {
        Ok(self.api.get(&provider_path(id)).await?.data)
    }

    pub async fn add_provider_rating(
        &self,
        id: Uuid,
        command: &RatingCommand,
    ) -> Result<ServerResponse<()>, ApiError> {
        Ok(self.api.post(&provider_path(id), Some(command)).await?.data)
    }
}

fn asset_path(id: Uuid) -> String {
    format!("/action/rating/asset/{}", id)
}

fn provider_path(id: Uuid) -> String {
    format!("/action/rating/provider/{}", id)
}
