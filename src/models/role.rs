//! Account roles

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role tag granted to an account
///
/// Every authenticated user has at least [`EnumRole::User`]. Role tags the
/// client does not know about are kept verbatim in [`EnumRole::Other`] so a
/// newer server never breaks deserialization of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnumRole {
    User,
    Admin,
    Provider,
    Consumer,
    Helpdesk,
    Other(String),
}

impl EnumRole {
    pub fn as_str(&self) -> &str {
        match self {
            EnumRole::User => "ROLE_USER",
            EnumRole::Admin => "ROLE_ADMIN",
            EnumRole::Provider => "ROLE_PROVIDER",
            EnumRole::Consumer => "ROLE_CONSUMER",
            EnumRole::Helpdesk => "ROLE_HELPDESK",
            EnumRole::Other(value) => value,
        }
    }
}

impl From<String> for EnumRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ROLE_USER" => EnumRole::User,
            "ROLE_ADMIN" => EnumRole::Admin,
            "ROLE_PROVIDER" => EnumRole::Provider,
            "ROLE_CONSUMER" => EnumRole::Consumer,
            "ROLE_HELPDESK" => EnumRole::Helpdesk,
            _ => EnumRole::Other(value),
        }
    }
}

impl From<&str> for EnumRole {
    fn from(value: &str) -> Self {
        EnumRole::from(value.to_string())
    }
}

impl From<EnumRole> for String {
    fn from(role: EnumRole) -> Self {
        match role {
            EnumRole::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EnumRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
