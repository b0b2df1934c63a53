//! Client configuration served by `/action/configuration/{locale}`

use serde::{Deserialize, Serialize};

/// Supported authentication providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EnumAuthProvider {
    Forms,
    Google,
    GitHub,
    OpertusMundi,
}

/// A file type accepted for asset uploads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetFileType {
    pub category: String,
    pub format: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// Asset related configuration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetConfiguration {
    #[serde(default)]
    pub file_types: Vec<AssetFileType>,
}

/// Application configuration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Supported authentication methods
    #[serde(default)]
    pub auth_providers: Vec<EnumAuthProvider>,
    #[serde(default)]
    pub asset: AssetConfiguration,
}

impl Configuration {
    pub fn supports(&self, provider: EnumAuthProvider) -> bool {
        self.auth_providers.contains(&provider)
    }

    /// Find the enabled file type that accepts the given extension
    pub fn file_type_for_extension(&self, extension: &str) -> Option<&AssetFileType> {
        let extension = extension.trim_start_matches('.');
        self.asset.file_types.iter().filter(|t| t.enabled).find(|t| {
            t.extensions
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
        })
    }
}
