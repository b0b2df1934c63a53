//! Login and logout results
//!
//! Both the login and the logout endpoints answer with a fresh CSRF token,
//! which the caller commits into the session store.

use serde::{Deserialize, Serialize};

/// CSRF token pair issued by the server after a session transition
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CsrfTokenResult {
    /// Name of the header the server expects the token in
    #[serde(default)]
    pub csrf_header: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

pub type LoginResult = CsrfTokenResult;

pub type LogoutResult = CsrfTokenResult;
