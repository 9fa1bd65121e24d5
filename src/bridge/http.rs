//! # HTTP Print Relay
//!
//! JSON client for a print relay running on the workstation.
//!
//! | Method | Path | Body / reply |
//! |--------|------|--------------|
//! | GET | `/status` | any 2xx completes the handshake |
//! | GET | `/printers` | `["Xprinter", ...]` |
//! | GET | `/printers/default` | `"Xprinter"` |
//! | POST | `/print` | [`PrintJob`] as camelCase JSON |
//!
//! A transport failure while printing marks the bridge disconnected so the
//! next submit handshakes again.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{PrintBridge, PrintJob};
use crate::error::BridgeError;

/// Default relay address.
pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8182";

#[derive(Debug)]
pub struct HttpBridge {
    base_url: String,
    client: Client,
    connected: AtomicBool,
}

impl HttpBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            connected: AtomicBool::new(false),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn lost(&self, e: reqwest::Error) -> BridgeError {
        self.connected.store(false, Ordering::SeqCst);
        BridgeError::ConnectionFailed(e.to_string())
    }

    async fn reply(response: Response) -> Result<Response, BridgeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = match text.trim() {
            "" => format!("HTTP {}", status.as_u16()),
            body => body.to_string(),
        };
        Err(BridgeError::Rejected(message))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BridgeError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.lost(e))?;
        Self::reply(response)
            .await?
            .json()
            .await
            .map_err(|e| BridgeError::Rejected(format!("unreadable reply: {e}")))
    }
}

#[async_trait]
impl PrintBridge for HttpBridge {
    async fn connect(&self) -> Result<(), BridgeError> {
        let response = self
            .client
            .get(self.url("/status"))
            .send()
            .await
            .map_err(|e| BridgeError::ConnectionFailed(e.to_string()))?;
        Self::reply(response)
            .await
            .map_err(|e| BridgeError::ConnectionFailed(e.to_string()))?;
        self.connected.store(true, Ordering::SeqCst);
        tracing::debug!(url = %self.base_url, "print relay handshake complete");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn list_printers(&self) -> Result<Vec<String>, BridgeError> {
        self.get_json("/printers").await
    }

    async fn default_printer(&self) -> Result<String, BridgeError> {
        self.get_json("/printers/default").await
    }

    async fn print(&self, job: PrintJob) -> Result<(), BridgeError> {
        let response = self
            .client
            .post(self.url("/print"))
            .json(&job)
            .send()
            .await
            .map_err(|e| self.lost(e))?;
        Self::reply(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::PrintSubmitter;
    use axum::{
        Json, Router,
        extract::State,
        http::StatusCode,
        routing::{get, post},
    };
    use std::sync::{Arc, Mutex};

    type Jobs = Arc<Mutex<Vec<PrintJob>>>;

    async fn accept(State(jobs): State<Jobs>, Json(job): Json<PrintJob>) -> StatusCode {
        if job.printer == "Offline" {
            return StatusCode::SERVICE_UNAVAILABLE;
        }
        jobs.lock().unwrap().push(job);
        StatusCode::NO_CONTENT
    }

    async fn spawn_relay() -> (String, Jobs) {
        let jobs: Jobs = Arc::default();
        let app = Router::new()
            .route("/status", get(|| async { "ok" }))
            .route("/printers", get(|| async { Json(vec!["Xprinter", "Zebra"]) }))
            .route("/printers/default", get(|| async { Json("Xprinter") }))
            .route("/print", post(accept))
            .with_state(jobs.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), jobs)
    }

    #[tokio::test]
    async fn test_submit_through_relay() {
        let (url, jobs) = spawn_relay().await;
        let bridge = Arc::new(HttpBridge::new(url));
        let submitter = PrintSubmitter::new(bridge.clone());

        submitter.submit("", "<html></html>", 55.0, 44.0).await.unwrap();

        assert!(bridge.is_connected());
        let jobs = jobs.lock().unwrap().clone();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].printer, "Xprinter");
        assert!(!jobs[0].scale_content);
    }

    #[tokio::test]
    async fn test_lists_printers() {
        let (url, _) = spawn_relay().await;
        let submitter = PrintSubmitter::new(Arc::new(HttpBridge::new(url)));
        assert_eq!(submitter.printers().await.unwrap(), vec!["Xprinter", "Zebra"]);
    }

    #[tokio::test]
    async fn test_relay_refusal_is_rejected() {
        let (url, _) = spawn_relay().await;
        let submitter = PrintSubmitter::new(Arc::new(HttpBridge::new(url)));
        let err = submitter.submit("Offline", "x", 55.0, 44.0).await.unwrap_err();
        assert_eq!(err, BridgeError::Rejected("HTTP 503".into()));
    }

    #[tokio::test]
    async fn test_unreachable_relay_fails_handshake() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let submitter = PrintSubmitter::new(Arc::new(HttpBridge::new(format!("http://{addr}"))));
        let err = submitter.submit("Xprinter", "x", 55.0, 44.0).await.unwrap_err();
        assert!(matches!(err, BridgeError::ConnectionFailed(_)));
    }
}
