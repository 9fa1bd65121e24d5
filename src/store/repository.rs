//! In-process configuration service backed by a JSON file.
//!
//! Every mutation builds the next record set, persists it, then swaps it in
//! under a single write lock. A failed write leaves memory untouched, and the
//! single-default rule is never observable half-applied.

use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ConfigService, StoredConfiguration, write_atomic};
use crate::error::GafeteError;
use crate::label::Configuration;

pub struct ConfigRepository {
    path: Option<PathBuf>,
    records: RwLock<Vec<StoredConfiguration>>,
}

impl ConfigRepository {
    /// A repository that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Open (or start) the repository file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GafeteError> {
        let path = path.into();
        let records = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let repo = Self {
            path: Some(path),
            records: RwLock::new(records),
        };
        Ok(repo)
    }

    async fn persist(&self, records: &[StoredConfiguration]) -> Result<(), GafeteError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(records)?;
        tokio::task::spawn_blocking(move || write_atomic(&path, &json))
            .await
            .map_err(|e| GafeteError::Transport(format!("Task error: {e}")))?
    }

    fn stamp(config: &mut Configuration) {
        if config.timestamp <= 0 {
            config.timestamp = Utc::now().timestamp_millis();
        }
    }

    fn demote_others(records: &mut [StoredConfiguration], keep: Uuid) {
        for record in records.iter_mut().filter(|r| r.id != keep) {
            record.configuration.is_default = false;
        }
    }
}

#[async_trait]
impl ConfigService for ConfigRepository {
    async fn create(&self, mut config: Configuration) -> Result<StoredConfiguration, GafeteError> {
        Self::stamp(&mut config);
        let now = Utc::now();
        let stored = StoredConfiguration {
            id: Uuid::new_v4(),
            configuration: config,
            created_at: now,
            updated_at: now,
        };

        let mut guard = self.records.write().await;
        let mut next = guard.clone();
        if stored.is_default() {
            Self::demote_others(&mut next, stored.id);
        }
        next.push(stored.clone());
        self.persist(&next).await?;
        *guard = next;

        tracing::info!(id = %stored.id, name = stored.name(), default = stored.is_default(), "created label configuration");
        Ok(stored)
    }

    async fn update(
        &self,
        id: Uuid,
        mut config: Configuration,
    ) -> Result<StoredConfiguration, GafeteError> {
        Self::stamp(&mut config);

        let mut guard = self.records.write().await;
        let mut next = guard.clone();
        let Some(record) = next.iter_mut().find(|r| r.id == id) else {
            return Err(GafeteError::NotFound(format!("Configuration {id} not found")));
        };
        record.configuration = config;
        record.updated_at = Utc::now();
        let stored = record.clone();
        if stored.is_default() {
            Self::demote_others(&mut next, id);
        }
        self.persist(&next).await?;
        *guard = next;

        tracing::info!(%id, name = stored.name(), default = stored.is_default(), "updated label configuration");
        Ok(stored)
    }

    async fn get(&self, id: Uuid) -> Result<StoredConfiguration, GafeteError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| GafeteError::NotFound(format!("Configuration {id} not found")))
    }

    async fn get_default(&self) -> Result<Option<StoredConfiguration>, GafeteError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.is_default())
            .cloned())
    }

    async fn list(&self) -> Result<Vec<StoredConfiguration>, GafeteError> {
        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    async fn delete(&self, id: Uuid) -> Result<(), GafeteError> {
        let mut guard = self.records.write().await;
        if !guard.iter().any(|r| r.id == id) {
            tracing::debug!(%id, "delete of unknown label configuration");
            return Ok(());
        }
        let next: Vec<_> = guard.iter().filter(|r| r.id != id).cloned().collect();
        self.persist(&next).await?;
        *guard = next;
        tracing::info!(%id, "deleted label configuration");
        Ok(())
    }
}
