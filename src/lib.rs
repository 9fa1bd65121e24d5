//! # Gafete - Event Check-in and Badge Printing
//!
//! Gafete checks attendees in at an event and prints their badge labels
//! through a print relay on the workstation. It provides:
//!
//! - **Label model**: positioned text and logo elements in a 4 px per mm space
//! - **Layout editor session**: drag with snapping to the canvas and siblings
//! - **Rendering**: print-ready HTML sized to the physical label
//! - **Storage**: local slot, configuration service, file export and import
//! - **Check-in**: debounced check-in that prints the badge
//!
//! ## Quick Start
//!
//! ```
//! use gafete::label::{LabelFields, render_label};
//!
//! // No saved layout: the built-in 55 × 44 mm badge
//! let fields = LabelFields::new("Ana Gómez", 42).company("Acme");
//! let label = render_label(None, &fields);
//!
//! assert!(label.html.contains("Ana Gómez"));
//! assert_eq!((label.width_mm, label.height_mm), (55.0, 44.0));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`label`] | Layout model, editor session, HTML renderer |
//! | [`store`] | Configuration persistence |
//! | [`bridge`] | Print relay seam |
//! | [`checkin`] | Attendees and the check-in desk |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod bridge;
pub mod checkin;
pub mod error;
pub mod label;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use error::{BridgeError, GafeteError};
pub use label::{Configuration, EditorSession, render_label};
