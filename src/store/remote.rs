//! HTTP client for a remote configuration service.
//!
//! Speaks the `/api/label-config` routes served by [`crate::server`]. When the
//! service answers with an error body, its `error` message is surfaced as-is.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{ConfigRequest, ConfigService, StoredConfiguration};
use crate::error::GafeteError;
use crate::label::Configuration;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct RemoteStore {
    base_url: String,
    client: Client,
}

impl RemoteStore {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/label-config", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        request: RequestBuilder,
        action: &str,
    ) -> Result<T, GafeteError> {
        let response = request.send().await?;
        let response = Self::check(response, action).await?;
        Ok(response.json().await?)
    }

    async fn check(response: Response, action: &str) -> Result<Response, GafeteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Failed to {action} (HTTP {})", status.as_u16()),
        };
        if status == reqwest::StatusCode::NOT_FOUND {
            Err(GafeteError::NotFound(message))
        } else {
            Err(GafeteError::Transport(message))
        }
    }
}

#[async_trait]
impl ConfigService for RemoteStore {
    async fn create(&self, config: Configuration) -> Result<StoredConfiguration, GafeteError> {
        let body = ConfigRequest::from_configuration(None, &config);
        Self::send(
            self.client.post(self.endpoint()).json(&body),
            "save configuration",
        )
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        config: Configuration,
    ) -> Result<StoredConfiguration, GafeteError> {
        let body = ConfigRequest::from_configuration(Some(id), &config);
        Self::send(
            self.client.put(self.endpoint()).json(&body),
            "update configuration",
        )
        .await
    }

    async fn get(&self, id: Uuid) -> Result<StoredConfiguration, GafeteError> {
        Self::send(
            self.client
                .get(self.endpoint())
                .query(&[("id", id.to_string())]),
            "load configuration",
        )
        .await
    }

    async fn get_default(&self) -> Result<Option<StoredConfiguration>, GafeteError> {
        Self::send(
            self.client
                .get(self.endpoint())
                .query(&[("default", "true")]),
            "load default configuration",
        )
        .await
    }

    async fn list(&self) -> Result<Vec<StoredConfiguration>, GafeteError> {
        Self::send(self.client.get(self.endpoint()), "list configurations").await
    }

    async fn delete(&self, id: Uuid) -> Result<(), GafeteError> {
        let response = self
            .client
            .delete(self.endpoint())
            .query(&[("id", id.to_string())])
            .send()
            .await?;
        Self::check(response, "delete configuration").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::PrintSubmitter;
    use crate::checkin::MemoryDirectory;
    use crate::label::{ElementId, LayoutElement};
    use crate::server::{AppState, ServerConfig, create_router};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn spawn_service() -> (RemoteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            data_dir: dir.path().to_path_buf(),
            bridge_url: None,
            cert_path: None,
            checkin_cooldown: Duration::from_secs(3),
        };
        let state = AppState::with_parts(
            config,
            Arc::new(MemoryDirectory::new()),
            PrintSubmitter::disabled(),
        )
        .unwrap();
        let app = create_router(Arc::new(state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (RemoteStore::new(format!("http://{addr}")), dir)
    }

    fn layout(name: &str, is_default: bool) -> Configuration {
        let mut config = Configuration::new(name);
        config.is_default = is_default;
        config.description = Some("Front desk".into());
        let mut element = LayoutElement::text(ElementId::Name, "Nombre", &config.styles.name);
        element.x = 40.0;
        element.width = 120.0;
        config.elements.push(element);
        config
    }

    async fn default_count(store: &RemoteStore) -> usize {
        store
            .list()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.is_default())
            .count()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let store = RemoteStore::new("http://127.0.0.1:8080/");
        assert_eq!(store.endpoint(), "http://127.0.0.1:8080/api/label-config");
    }

    #[tokio::test]
    async fn test_round_trip_through_service() {
        let (store, _dir) = spawn_service().await;

        let created = store.create(layout("Evento", false)).await.unwrap();
        assert_eq!(created.name(), "Evento");
        assert_eq!(created.configuration.description.as_deref(), Some("Front desk"));

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.configuration.elements[0].x, 40.0);
        assert_eq!(store.get_default().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_single_default_through_service() {
        let (store, _dir) = spawn_service().await;

        let first = store.create(layout("Primero", true)).await.unwrap();
        let second = store.create(layout("Segundo", true)).await.unwrap();
        assert_eq!(default_count(&store).await, 1);
        assert_eq!(store.get_default().await.unwrap().unwrap().id, second.id);
        assert!(!store.get(first.id).await.unwrap().is_default());

        let updated = store.update(first.id, layout("Primero v2", true)).await.unwrap();
        assert_eq!(updated.name(), "Primero v2");
        assert_eq!(default_count(&store).await, 1);
        assert_eq!(store.get_default().await.unwrap().unwrap().id, first.id);

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
    }

    #[tokio::test]
    async fn test_delete_through_service() {
        let (store, _dir) = spawn_service().await;
        let created = store.create(layout("Borrar", false)).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        store.delete(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_service_error_messages_pass_through() {
        let (store, _dir) = spawn_service().await;

        let id = Uuid::new_v4();
        match store.get(id).await {
            Err(GafeteError::NotFound(message)) => {
                assert_eq!(message, format!("Configuration {id} not found"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(matches!(
            store.update(id, layout("Nadie", false)).await,
            Err(GafeteError::NotFound(_))
        ));

        match store.create(layout("  ", false)).await {
            Err(GafeteError::Transport(message)) => {
                assert_eq!(message, "Name and configuration are required");
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }
}
