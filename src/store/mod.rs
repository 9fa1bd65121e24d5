//! # Configuration Storage
//!
//! Where label configurations live.
//!
//! | Backend | Shape | On error |
//! |---------|-------|----------|
//! | [`LocalStore`] | one slot in the data directory | load yields `None` |
//! | [`ConfigRepository`] | named records, one default | error returned |
//! | [`RemoteStore`] | same records over HTTP | server message passed through |
//! | [`file`] | export / import of a single document | validation error |
//!
//! [`ConfigRepository`] and [`RemoteStore`] both implement [`ConfigService`],
//! so callers do not care whether the records are in-process or remote.

pub mod file;
pub mod local;
pub mod remote;
pub mod repository;

pub use file::{export_to_file, import_from_file};
pub use local::{LocalStore, Preferences};
pub use remote::RemoteStore;
pub use repository::ConfigRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::error::GafeteError;
use crate::label::Configuration;

/// A configuration as held by the configuration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfiguration {
    pub id: Uuid,
    pub configuration: Configuration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredConfiguration {
    pub fn name(&self) -> &str {
        &self.configuration.name
    }

    pub fn is_default(&self) -> bool {
        self.configuration.is_default
    }
}

/// Body of a create or update request.
///
/// `name`, `description` and `is_default` are authoritative and overwrite
/// the same fields inside `configuration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub configuration: Option<Configuration>,
    #[serde(default)]
    pub is_default: bool,
}

impl ConfigRequest {
    pub fn from_configuration(id: Option<Uuid>, config: &Configuration) -> Self {
        Self {
            id,
            name: config.name.clone(),
            description: config.description.clone(),
            configuration: Some(config.clone()),
            is_default: config.is_default,
        }
    }

    /// Validate and fold the top-level fields into the configuration.
    pub fn into_configuration(self) -> Result<Configuration, GafeteError> {
        let name = self.name.trim().to_string();
        let Some(mut config) = self.configuration.filter(|_| !name.is_empty()) else {
            return Err(GafeteError::Validation(
                "Name and configuration are required".to_string(),
            ));
        };
        config.name = name;
        config.description = self.description.filter(|d| !d.trim().is_empty());
        config.is_default = self.is_default;
        Ok(config)
    }
}

/// Named label configurations with at most one default.
#[async_trait]
pub trait ConfigService: Send + Sync {
    /// Store a new configuration. A default demotes every other record.
    async fn create(&self, config: Configuration) -> Result<StoredConfiguration, GafeteError>;

    /// Replace an existing configuration. A default demotes every other record.
    async fn update(
        &self,
        id: Uuid,
        config: Configuration,
    ) -> Result<StoredConfiguration, GafeteError>;

    async fn get(&self, id: Uuid) -> Result<StoredConfiguration, GafeteError>;

    async fn get_default(&self) -> Result<Option<StoredConfiguration>, GafeteError>;

    /// All configurations, most recently updated first.
    async fn list(&self) -> Result<Vec<StoredConfiguration>, GafeteError>;

    async fn delete(&self, id: Uuid) -> Result<(), GafeteError>;
}

/// Write `bytes` to `path` through a sibling temp file and a rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), GafeteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
