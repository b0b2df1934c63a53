//! Configuration slice

use crate::models::Configuration;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigState {
    pub configuration: Option<Configuration>,
    /// True until the first configuration load completes
    pub loading: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            configuration: None,
            loading: true,
        }
    }
}
