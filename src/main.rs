//! # Gafete CLI
//!
//! Command-line interface for event check-in and badge printing.
//!
//! ## Usage
//!
//! ```bash
//! # Run the check-in server
//! gafete serve --listen 0.0.0.0:8080 --bridge-url http://127.0.0.1:8182
//!
//! # Render a badge to HTML with the saved layout
//! gafete render --name "Ana Gómez" --ticket 42 --output badge.html
//!
//! # Export the default layout from a running server
//! gafete export --server http://localhost:8080 --out-dir .
//!
//! # Import a layout file and make it the default
//! gafete import label-config-evento-2024-03-09.json --server http://localhost:8080 --default
//!
//! # List printers the relay can see
//! gafete printers --bridge-url http://127.0.0.1:8182
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use gafete::{
    GafeteError,
    bridge::{HttpBridge, PrintSubmitter, http::DEFAULT_RELAY_URL},
    label::{Configuration, LabelFields, render_label},
    server::{self, ServerConfig},
    store::{ConfigService, LocalStore, RemoteStore, export_to_file, import_from_file},
};

/// Gafete - event check-in and badge printing
#[derive(Parser, Debug)]
#[command(name = "gafete")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP check-in server
    Serve {
        /// Address to listen on
        #[arg(long, env = "GAFETE_LISTEN", default_value = "0.0.0.0:8080")]
        listen: String,

        /// Data directory (defaults to the platform data dir)
        #[arg(long, env = "GAFETE_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Print relay URL; printing is disabled without one
        #[arg(long, env = "GAFETE_BRIDGE_URL")]
        bridge_url: Option<String>,

        /// PEM certificate served to browsers for the relay
        #[arg(long, env = "GAFETE_BRIDGE_CERT")]
        cert: Option<PathBuf>,

        /// Seconds a check-in blocks a repeat for the same attendee
        #[arg(long, env = "GAFETE_CHECKIN_COOLDOWN", default_value = "3")]
        cooldown: u64,
    },

    /// Render one badge to HTML
    Render {
        /// Attendee name
        #[arg(long)]
        name: String,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        location: Option<String>,

        /// Ticket number
        #[arg(long, default_value = "0")]
        ticket: u32,

        /// Layout file (defaults to the local slot, then the built-in layout)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Data directory holding the local slot
        #[arg(long, env = "GAFETE_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Write HTML here instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export a layout to a JSON file
    Export {
        /// Configuration server; the local slot is used without one
        #[arg(long, env = "GAFETE_SERVER")]
        server: Option<String>,

        /// Configuration id on the server (defaults to the server default)
        #[arg(long)]
        id: Option<Uuid>,

        #[arg(long, env = "GAFETE_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Directory to write into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Import a layout JSON file
    Import {
        /// File written by `export` or the editor
        file: PathBuf,

        /// Configuration server; the local slot is used without one
        #[arg(long, env = "GAFETE_SERVER")]
        server: Option<String>,

        /// Make the imported layout the server default
        #[arg(long)]
        default: bool,

        #[arg(long, env = "GAFETE_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// List printers reachable through the print relay
    Printers {
        #[arg(long, env = "GAFETE_BRIDGE_URL", default_value = DEFAULT_RELAY_URL)]
        bridge_url: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf, GafeteError> {
    data_dir
        .or_else(LocalStore::default_dir)
        .ok_or_else(|| GafeteError::Validation("No data directory; pass --data-dir".to_string()))
}

fn runtime() -> Result<tokio::runtime::Runtime, GafeteError> {
    Ok(tokio::runtime::Runtime::new()?)
}

fn run() -> Result<(), GafeteError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve {
            listen,
            data_dir,
            bridge_url,
            cert,
            cooldown,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                data_dir: resolve_data_dir(data_dir)?,
                bridge_url,
                cert_path: cert,
                checkin_cooldown: Duration::from_secs(cooldown),
            };
            runtime()?.block_on(server::serve(config))
        }

        Commands::Render {
            name,
            company,
            location,
            ticket,
            config,
            data_dir,
            output,
        } => {
            let layout = match config {
                Some(path) => Some(import_from_file(&path)?),
                None => resolve_data_dir(data_dir)
                    .ok()
                    .and_then(|dir| LocalStore::new(dir).load()),
            };
            let fields = LabelFields {
                name,
                company,
                location,
                ticket_no: ticket,
            };
            let label = render_label(layout.as_ref(), &fields);
            match output {
                Some(path) => {
                    std::fs::write(&path, &label.html)?;
                    println!(
                        "Wrote {} ({} x {} mm)",
                        path.display(),
                        label.width_mm,
                        label.height_mm
                    );
                }
                None => print!("{}", label.html),
            }
            Ok(())
        }

        Commands::Export {
            server,
            id,
            data_dir,
            out_dir,
        } => {
            let config = match server {
                Some(url) => runtime()?.block_on(fetch_remote(&url, id))?,
                None => LocalStore::new(resolve_data_dir(data_dir)?)
                    .load()
                    .ok_or_else(|| GafeteError::NotFound("No saved layout".to_string()))?,
            };
            let path = export_to_file(&config, &out_dir)?;
            println!("Exported {} to {}", config.name, path.display());
            Ok(())
        }

        Commands::Import {
            file,
            server,
            default,
            data_dir,
        } => {
            let mut config = import_from_file(&file)?;
            if config.name.trim().is_empty() {
                config.name = file_stem(&file);
            }
            config.is_default = default;
            match server {
                Some(url) => {
                    let stored = runtime()?.block_on(RemoteStore::new(url).create(config))?;
                    println!("Imported {} as {}", stored.name(), stored.id);
                }
                None => {
                    LocalStore::new(resolve_data_dir(data_dir)?).save(&config)?;
                    println!("Imported {} into the local slot", config.name);
                }
            }
            Ok(())
        }

        Commands::Printers { bridge_url } => {
            let submitter = PrintSubmitter::new(Arc::new(HttpBridge::new(bridge_url)));
            let printers = runtime()?.block_on(submitter.printers())?;
            if printers.is_empty() {
                println!("No printers found");
            }
            for name in printers {
                println!("  {}", name);
            }
            Ok(())
        }
    }
}

async fn fetch_remote(url: &str, id: Option<Uuid>) -> Result<Configuration, GafeteError> {
    let remote = RemoteStore::new(url);
    let stored = match id {
        Some(id) => remote.get(id).await?,
        None => remote
            .get_default()
            .await?
            .ok_or_else(|| GafeteError::NotFound("Server has no default layout".to_string()))?,
    };
    Ok(stored.configuration)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Imported".to_string())
}
