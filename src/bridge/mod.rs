//! # Print Bridge
//!
//! Badge markup is handed to a locally running print relay that owns the
//! operating system's printers. This module defines the seam to that relay
//! and the submitter the check-in desk uses.
//!
//! ## Available Bridges
//!
//! - [`http`]: JSON over HTTP to a relay on the workstation
//!
//! ## Connection
//!
//! [`PrintSubmitter`] connects on first use and reuses the connection. A
//! bridge that drops its connection is re-handshaken on the next submit.

pub mod http;

pub use http::HttpBridge;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::BridgeError;

/// One document for the relay to print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    /// Printer name as the operating system knows it.
    pub printer: String,
    /// Complete HTML document.
    pub markup: String,
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub scale_content: bool,
}

impl PrintJob {
    /// A label job: exact page size, no margins, no scaling.
    pub fn label(
        printer: impl Into<String>,
        markup: impl Into<String>,
        width_mm: f32,
        height_mm: f32,
    ) -> Self {
        Self {
            printer: printer.into(),
            markup: markup.into(),
            width_mm,
            height_mm,
            margin_mm: 0.0,
            scale_content: false,
        }
    }
}

/// A print relay.
#[async_trait]
pub trait PrintBridge: Send + Sync {
    /// Handshake with the relay.
    async fn connect(&self) -> Result<(), BridgeError>;

    fn is_connected(&self) -> bool;

    async fn list_printers(&self) -> Result<Vec<String>, BridgeError>;

    /// The relay's default printer name.
    async fn default_printer(&self) -> Result<String, BridgeError>;

    async fn print(&self, job: PrintJob) -> Result<(), BridgeError>;
}

/// Submits label markup through an optional bridge.
pub struct PrintSubmitter {
    bridge: Option<Arc<dyn PrintBridge>>,
    connecting: Mutex<()>,
}

impl PrintSubmitter {
    pub fn new(bridge: Arc<dyn PrintBridge>) -> Self {
        Self {
            bridge: Some(bridge),
            connecting: Mutex::new(()),
        }
    }

    /// A submitter with no relay configured. Every submit fails with
    /// [`BridgeError::Unavailable`].
    pub fn disabled() -> Self {
        Self {
            bridge: None,
            connecting: Mutex::new(()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.bridge.is_some()
    }

    async fn connected(&self) -> Result<&Arc<dyn PrintBridge>, BridgeError> {
        let bridge = self.bridge.as_ref().ok_or(BridgeError::Unavailable)?;
        if bridge.is_connected() {
            return Ok(bridge);
        }

        let _connecting = self.connecting.lock().await;
        if !bridge.is_connected() {
            tracing::debug!("connecting to print bridge");
            bridge.connect().await.map_err(|e| match e {
                BridgeError::ConnectionFailed(_) => e,
                other => BridgeError::ConnectionFailed(other.to_string()),
            })?;
            tracing::info!("print bridge connected");
        }
        Ok(bridge)
    }

    /// Print `markup` on `printer` with an exact `width_mm` × `height_mm`
    /// page. An empty printer name means the relay's default printer.
    pub async fn submit(
        &self,
        printer: &str,
        markup: &str,
        width_mm: f32,
        height_mm: f32,
    ) -> Result<(), BridgeError> {
        let bridge = self.connected().await?;
        let printer = match printer.trim() {
            "" => bridge.default_printer().await?,
            name => name.to_string(),
        };
        tracing::info!(%printer, width_mm, height_mm, "submitting label");
        bridge
            .print(PrintJob::label(printer, markup, width_mm, height_mm))
            .await
    }

    /// Printers the relay can reach.
    pub async fn printers(&self) -> Result<Vec<String>, BridgeError> {
        self.connected().await?.list_printers().await
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Records jobs instead of printing them.
    #[derive(Default)]
    pub struct MockBridge {
        pub connected: AtomicBool,
        pub connects: AtomicUsize,
        pub refuse_connect: AtomicBool,
        pub reject_print: AtomicBool,
        pub jobs: StdMutex<Vec<PrintJob>>,
    }

    impl MockBridge {
        pub fn jobs(&self) -> Vec<PrintJob> {
            self.jobs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PrintBridge for MockBridge {
        async fn connect(&self) -> Result<(), BridgeError> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            if self.refuse_connect.load(Ordering::SeqCst) {
                return Err(BridgeError::Rejected("handshake refused".into()));
            }
            self.connected.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }

        async fn list_printers(&self) -> Result<Vec<String>, BridgeError> {
            Ok(vec!["Xprinter".into(), "Zebra".into()])
        }

        async fn default_printer(&self) -> Result<String, BridgeError> {
            Ok("Zebra".into())
        }

        async fn print(&self, job: PrintJob) -> Result<(), BridgeError> {
            if self.reject_print.load(Ordering::SeqCst) {
                return Err(BridgeError::Rejected("out of labels".into()));
            }
            self.jobs.lock().unwrap().push(job);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockBridge;
    use super::*;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_disabled_is_unavailable() {
        let submitter = PrintSubmitter::disabled();
        let err = submitter.submit("Xprinter", "<html/>", 55.0, 44.0).await;
        assert_eq!(err, Err(BridgeError::Unavailable));
        assert_eq!(submitter.printers().await, Err(BridgeError::Unavailable));
    }

    #[tokio::test]
    async fn test_connects_once_and_reuses() {
        let bridge = Arc::new(MockBridge::default());
        let submitter = PrintSubmitter::new(bridge.clone());

        submitter.submit("Xprinter", "a", 55.0, 44.0).await.unwrap();
        submitter.submit("Xprinter", "b", 55.0, 44.0).await.unwrap();

        assert_eq!(bridge.connects.load(Ordering::SeqCst), 1);
        assert_eq!(bridge.jobs().len(), 2);
    }

    #[tokio::test]
    async fn test_job_shape() {
        let bridge = Arc::new(MockBridge::default());
        let submitter = PrintSubmitter::new(bridge.clone());
        submitter.submit("Xprinter", "<p>x</p>", 62.0, 29.0).await.unwrap();

        assert_eq!(
            bridge.jobs(),
            vec![PrintJob {
                printer: "Xprinter".into(),
                markup: "<p>x</p>".into(),
                width_mm: 62.0,
                height_mm: 29.0,
                margin_mm: 0.0,
                scale_content: false,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_printer_uses_default() {
        let bridge = Arc::new(MockBridge::default());
        let submitter = PrintSubmitter::new(bridge.clone());
        submitter.submit("  ", "x", 55.0, 44.0).await.unwrap();
        assert_eq!(bridge.jobs()[0].printer, "Zebra");
    }

    #[tokio::test]
    async fn test_failed_handshake_is_connection_failed() {
        let bridge = Arc::new(MockBridge::default());
        bridge.refuse_connect.store(true, Ordering::SeqCst);
        let submitter = PrintSubmitter::new(bridge.clone());

        let err = submitter.submit("Xprinter", "x", 55.0, 44.0).await.unwrap_err();
        assert!(matches!(err, BridgeError::ConnectionFailed(_)));
        assert!(bridge.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_print_rejection_passes_through() {
        let bridge = Arc::new(MockBridge::default());
        bridge.reject_print.store(true, Ordering::SeqCst);
        let submitter = PrintSubmitter::new(bridge);
        let err = submitter.submit("Xprinter", "x", 55.0, 44.0).await.unwrap_err();
        assert_eq!(err, BridgeError::Rejected("out of labels".into()));
    }
}
