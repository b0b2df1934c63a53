//! User slice: authentication and CSRF state

use crate::models::{Account, EnumRole, Profile};

/// Authentication state of the current session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    /// Bearer token for token-based sessions
    pub auth_token: Option<String>,
    /// Header name the server expects the CSRF token in
    pub csrf_header: Option<String>,
    pub csrf_token: Option<String>,
    pub username: Option<String>,
    pub roles: Vec<EnumRole>,
    pub profile: Option<Profile>,
}

impl UserState {
    /// True if a non-empty bearer token or a user profile is present
    pub fn is_authenticated(&self) -> bool {
        self.auth_token.as_deref().is_some_and(|t| !t.is_empty()) || self.profile.is_some()
    }

    pub fn has_role(&self, role: &EnumRole) -> bool {
        self.roles.contains(role)
    }

    pub(crate) fn set_csrf_token(&mut self, header: Option<String>, token: Option<String>) {
        self.csrf_header = header;
        self.csrf_token = token;
    }

    pub(crate) fn set_user_data(&mut self, account: &Account) {
        self.username = Some(account.username.clone());
        self.roles = account.roles.clone();
        self.profile = Some(account.profile.clone());
    }

    /// Clear identity. CSRF state is kept: the server issues the next token
    /// in the logout response.
    pub(crate) fn logout(&mut self) {
        self.auth_token = None;
        self.username = None;
        self.roles.clear();
        self.profile = None;
    }
}
