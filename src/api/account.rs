//! Account API

use uuid::Uuid;

use crate::models::{
    Account, AccountCommand, ActivationTokenCommand, AddressCommand, LoginResult, LogoutResult,
    Profile, ProfileCommand, ServerResponse,
};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone)]
pub struct AccountApi {
    api: ApiClient,
}

impl AccountApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Form login. The result carries the CSRF token for the new session.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ServerResponse<LoginResult>, ApiError> {
        let form = [("username", username), ("password", password)];
        Ok(self.api.submit("/login", &form).await?.data)
    }

    pub async fn logout(&self) -> Result<ServerResponse<LogoutResult>, ApiError> {
        Ok(self.api.submit("/logout", &[]).await?.data)
    }

    pub async fn get_user_data(&self) -> Result<ServerResponse<Account>, ApiError> {
        Ok(self.api.get("/action/account/user-data").await?.data)
    }

    pub async fn get_profile(&self) -> Result<ServerResponse<Profile>, ApiError> {
        Ok(self.api.get("/action/profile").await?.data)
    }

    /// Update the profile, returning the updated account
    pub async fn set_profile(
        &self,
        command: &ProfileCommand,
    ) -> Result<ServerResponse<Account>, ApiError> {
        Ok(self.api.post("/action/profile", Some(command)).await?.data)
    }

    pub async fn create_address(
        &self,
        command: &AddressCommand,
    ) -> Result<ServerResponse<Profile>, ApiError> {
        Ok(self
            .api
            .post("/action/profile/address", Some(command))
            .await?
            .data)
    }

    pub async fn update_address(
        &self,
        key: Uuid,
        command: &AddressCommand,
    ) -> Result<ServerResponse<Profile>, ApiError> {
        let path = format!("/action/profile/address/{}", key);
        Ok(self.api.put(&path, command).await?.data)
    }

    pub async fn delete_address(
        &self,
        key: Uuid,
    ) -> Result<ServerResponse<Profile>, ApiError> {
        let path = format!("/action/profile/address/{}", key);
        Ok(self.api.delete(&path).await?.data)
    }

    /// Create a new account and send an email for verifying the address
    pub async fn register(
        &self,
        command: &AccountCommand,
    ) -> Result<ServerResponse<Account>, ApiError> {
        Ok(self
            .api
            .post("/action/account/register", Some(command))
            .await?
            .data)
    }

    /// Request a new email verification token, sent to the address in the
    /// command. Posts to the server's token endpoint, not to
    /// `/action/account/register` as the browser client does.
    pub async fn request_token(
        &self,
        command: &ActivationTokenCommand,
    ) -> Result<ServerResponse<()>, ApiError> {
        Ok(self
            .api
            .post("/action/account/token/request", Some(command))
            .await?
            .data)
    }

    pub async fn verify_token(&self, token: &str) -> Result<ServerResponse<()>, ApiError> {
        let path = format!("/action/account/token/verify/{}", urlencoding::encode(token));
        Ok(self.api.post::<(), _>(&path, None).await?.data)
    }
}
