//! Server state and configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::bridge::{HttpBridge, PrintBridge, PrintSubmitter};
use crate::checkin::{AttendeeDirectory, CheckinDesk, CheckinGuard, MemoryDirectory};
use crate::error::GafeteError;
use crate::store::{ConfigRepository, ConfigService, LocalStore, Preferences};

/// File holding the configuration service records, inside the data directory.
pub const CONFIGURATIONS_FILE: &str = "configurations.json";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory for configurations, the local slot and preferences
    pub data_dir: PathBuf,
    /// Print relay root URL; printing is disabled when `None`
    pub bridge_url: Option<String>,
    /// PEM certificate handed to browsers talking to the relay
    pub cert_path: Option<PathBuf>,
    /// How long a check-in request blocks a repeat for the same attendee
    pub checkin_cooldown: Duration,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub configs: Arc<dyn ConfigService>,
    pub desk: CheckinDesk,
    pub local: LocalStore,
    pub preferences: RwLock<Preferences>,
    pub bridge_cert: Option<String>,
}

impl AppState {
    /// State with an in-memory attendee directory and, when `bridge_url` is
    /// set, an HTTP print relay.
    pub fn new(config: ServerConfig) -> Result<Self, GafeteError> {
        let submitter = match &config.bridge_url {
            Some(url) => {
                let bridge: Arc<dyn PrintBridge> = Arc::new(HttpBridge::new(url.as_str()));
                PrintSubmitter::new(bridge)
            }
            None => PrintSubmitter::disabled(),
        };
        Self::with_parts(config, Arc::new(MemoryDirectory::new()), submitter)
    }

    pub fn with_parts(
        config: ServerConfig,
        directory: Arc<dyn AttendeeDirectory>,
        submitter: PrintSubmitter,
    ) -> Result<Self, GafeteError> {
        let local = LocalStore::new(&config.data_dir);
        let configs: Arc<dyn ConfigService> = Arc::new(ConfigRepository::open(
            config.data_dir.join(CONFIGURATIONS_FILE),
        )?);
        let bridge_cert = match &config.cert_path {
            Some(path) => Some(std::fs::read_to_string(path)?),
            None => None,
        };
        let desk = CheckinDesk::new(directory, Arc::new(submitter))
            .with_config_service(Arc::clone(&configs))
            .with_local_store(local.clone())
            .with_guard(CheckinGuard::new(config.checkin_cooldown));
        let preferences = RwLock::new(local.load_preferences());

        Ok(Self {
            config,
            configs,
            desk,
            local,
            preferences,
            bridge_cert,
        })
    }
}
