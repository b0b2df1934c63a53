//! Configuration API

use crate::models::{Configuration, ServerResponse};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct ConfigurationApi {
    api: ApiClient,
}

impl ConfigurationApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_configuration(
        &self,
        locale: &str,
    ) -> Result<ServerResponse<Configuration>, ApiError> {
        let path = format!("/action/configuration/{}", urlencoding::encode(locale));
        Ok(self.api.get(&path).await?.data)
    }
}
