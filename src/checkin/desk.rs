//! Check-in desk: mark an attendee checked in, then print their badge.
//!
//! Label resolution order:
//!
//! 1. the configuration service default
//! 2. the local configuration slot
//! 3. the built-in layout
//!
//! A failure at one step falls through to the next, so a dead configuration
//! service never blocks printing.

use std::sync::Arc;
use uuid::Uuid;

use super::attendee::Attendee;
use super::directory::{AttendeeDirectory, CheckInOutcome};
use super::guard::CheckinGuard;
use crate::bridge::PrintSubmitter;
use crate::error::GafeteError;
use crate::label::{Configuration, LabelFields, RenderedLabel, render_label};
use crate::store::{ConfigService, LocalStore, Preferences};

/// A printed badge.
#[derive(Debug, Clone)]
pub struct Badge {
    pub attendee: Attendee,
    pub ticket_no: u32,
    pub label: RenderedLabel,
}

#[derive(Debug, Clone)]
pub enum DeskOutcome {
    Printed(Badge),
    /// An earlier request for the same attendee is still running.
    Suppressed,
}

pub struct CheckinDesk {
    directory: Arc<dyn AttendeeDirectory>,
    submitter: Arc<PrintSubmitter>,
    configs: Option<Arc<dyn ConfigService>>,
    local: Option<LocalStore>,
    guard: CheckinGuard,
}

impl CheckinDesk {
    pub fn new(directory: Arc<dyn AttendeeDirectory>, submitter: Arc<PrintSubmitter>) -> Self {
        Self {
            directory,
            submitter,
            configs: None,
            local: None,
            guard: CheckinGuard::default(),
        }
    }

    pub fn with_config_service(mut self, configs: Arc<dyn ConfigService>) -> Self {
        self.configs = Some(configs);
        self
    }

    pub fn with_local_store(mut self, local: LocalStore) -> Self {
        self.local = Some(local);
        self
    }

    pub fn with_guard(mut self, guard: CheckinGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn directory(&self) -> &Arc<dyn AttendeeDirectory> {
        &self.directory
    }

    pub fn submitter(&self) -> &Arc<PrintSubmitter> {
        &self.submitter
    }

    /// The configuration badges are printed with right now.
    pub async fn active_configuration(&self) -> Option<Configuration> {
        if let Some(configs) = &self.configs {
            match configs.get_default().await {
                Ok(Some(stored)) => return Some(stored.configuration),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "default configuration unavailable"),
            }
        }
        let local = self.local.clone()?;
        match tokio::task::spawn_blocking(move || local.load()).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "local configuration read failed");
                None
            }
        }
    }

    /// Render `fields` with configuration `id`, or with the active
    /// configuration when `id` is `None`.
    pub async fn preview(
        &self,
        fields: &LabelFields,
        id: Option<Uuid>,
    ) -> Result<RenderedLabel, GafeteError> {
        let config = match (id, &self.configs) {
            (Some(id), Some(configs)) => Some(configs.get(id).await?.configuration),
            (Some(id), None) => {
                return Err(GafeteError::NotFound(format!("Configuration {id} not found")));
            }
            (None, _) => self.active_configuration().await,
        };
        Ok(render_label(config.as_ref(), fields))
    }

    async fn render_for(&self, attendee: &Attendee, ticket_no: u32) -> RenderedLabel {
        let config = self.active_configuration().await;
        render_label(config.as_ref(), &attendee.label_fields(ticket_no))
    }

    /// Check the attendee in and print their badge.
    ///
    /// When the check-in is recorded but printing fails, the error is
    /// [`GafeteError::PrintFailed`] carrying the assigned ticket so the
    /// operator can reprint.
    pub async fn check_in(
        &self,
        id: Uuid,
        preferences: &Preferences,
    ) -> Result<DeskOutcome, GafeteError> {
        let Some(_permit) = self.guard.try_acquire(id) else {
            return Ok(DeskOutcome::Suppressed);
        };

        let attendee = match self.directory.check_in(id, &preferences.station).await? {
            CheckInOutcome::CheckedIn(attendee) => attendee,
            CheckInOutcome::AlreadyCheckedIn(attendee) => {
                return Err(GafeteError::AlreadyCheckedIn {
                    ticket_no: attendee.ticket_no.unwrap_or_default(),
                });
            }
        };
        let ticket_no = attendee.ticket_no.ok_or_else(|| {
            GafeteError::Transport("check-in returned no ticket number".to_string())
        })?;

        let label = self.render_for(&attendee, ticket_no).await;
        self.submitter
            .submit(&preferences.printer, &label.html, label.width_mm, label.height_mm)
            .await
            .map_err(|source| {
                tracing::error!(%id, ticket_no, error = %source, "badge did not print");
                GafeteError::PrintFailed { ticket_no, source }
            })?;

        Ok(DeskOutcome::Printed(Badge {
            attendee,
            ticket_no,
            label,
        }))
    }

    /// Print the badge of an attendee who is already checked in.
    pub async fn reprint(&self, id: Uuid, preferences: &Preferences) -> Result<Badge, GafeteError> {
        let attendee = self.directory.get(id).await?;
        let Some(ticket_no) = attendee.ticket_no.filter(|_| attendee.is_checked_in()) else {
            return Err(GafeteError::Validation(format!(
                "{} is not checked in",
                attendee.full_name
            )));
        };

        let label = self.render_for(&attendee, ticket_no).await;
        self.submitter
            .submit(&preferences.printer, &label.html, label.width_mm, label.height_mm)
            .await?;
        tracing::info!(%id, ticket_no, "badge reprinted");

        Ok(Badge {
            attendee,
            ticket_no,
            label,
        })
    }
}
