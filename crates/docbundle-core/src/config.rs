//! Client configuration
//!
//! Every field has a default matching the classification service's
//! contract, so an empty `{}` (or no configuration at all) is valid.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Relative path the bundle is POSTed to
    pub endpoint: String,
    /// Multipart part name carrying the file
    pub field_name: String,
    /// The only MIME type the upload control accepts
    pub accepted_mime: String,
    /// Shown when a failed response carries no `error` message
    pub generic_error: String,
    /// Console log level: trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "/process_document".to_string(),
            field_name: "file".to_string(),
            accepted_mime: PDF_MIME.to_string(),
            generic_error: "Failed to process document".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON configuration blob
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".to_string()));
        }
        if self.field_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "field_name must not be empty".to_string(),
            ));
        }
        if self.accepted_mime.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "accepted_mime must not be empty".to_string(),
            ));
        }
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "unknown log_level: {}",
                other
            ))),
        }
    }
}
