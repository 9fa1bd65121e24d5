//! The attendee datastore seam.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::attendee::{Attendee, AttendeePatch, NewAttendee};
use crate::error::GafeteError;

/// Result of a check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Newly checked in with a freshly assigned ticket.
    CheckedIn(Attendee),
    /// Checked in earlier; the record is returned unchanged.
    AlreadyCheckedIn(Attendee),
}

impl CheckInOutcome {
    pub fn attendee(&self) -> &Attendee {
        match self {
            Self::CheckedIn(a) | Self::AlreadyCheckedIn(a) => a,
        }
    }
}

/// Attendee records and the check-in ticket sequence.
#[async_trait]
pub trait AttendeeDirectory: Send + Sync {
    /// Attendees matching `query`, ordered by name, at most `limit`.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Attendee>, GafeteError>;

    async fn get(&self, id: Uuid) -> Result<Attendee, GafeteError>;

    async fn insert(&self, attendee: NewAttendee) -> Result<Attendee, GafeteError>;

    async fn update(&self, id: Uuid, patch: AttendeePatch) -> Result<Attendee, GafeteError>;

    async fn delete(&self, id: Uuid) -> Result<(), GafeteError>;

    /// Insert or refresh attendees keyed by `external_id`. Returns how many
    /// records were written. Check-in state of refreshed records is kept.
    async fn upsert_many(&self, attendees: Vec<NewAttendee>) -> Result<usize, GafeteError>;

    /// Mark the attendee checked in, assigning the next ticket number. A
    /// ticket is assigned at most once per attendee.
    async fn check_in(&self, id: Uuid, station: &str) -> Result<CheckInOutcome, GafeteError>;

    /// Remove every attendee and restart the ticket sequence at 1.
    async fn reset(&self) -> Result<(), GafeteError>;
}

#[derive(Debug)]
struct Inner {
    attendees: Vec<Attendee>,
    next_ticket: u32,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            attendees: Vec::new(),
            next_ticket: 1,
        }
    }
}

impl Inner {
    fn find_mut(&mut self, id: Uuid) -> Result<&mut Attendee, GafeteError> {
        self.attendees
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> GafeteError {
    GafeteError::NotFound(format!("Attendee {id} not found"))
}

/// In-process directory.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    inner: RwLock<Inner>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendeeDirectory for MemoryDirectory {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Attendee>, GafeteError> {
        let inner = self.inner.read().await;
        let mut found: Vec<Attendee> = inner
            .attendees
            .iter()
            .filter(|a| a.matches(query))
            .cloned()
            .collect();
        found.sort_by_key(|a| a.full_name.to_lowercase());
        found.truncate(limit);
        Ok(found)
    }

    async fn get(&self, id: Uuid) -> Result<Attendee, GafeteError> {
        self.inner
            .read()
            .await
            .attendees
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn insert(&self, attendee: NewAttendee) -> Result<Attendee, GafeteError> {
        attendee.validate()?;
        let attendee = Attendee::from_new(Uuid::new_v4(), attendee);
        self.inner.write().await.attendees.push(attendee.clone());
        tracing::debug!(id = %attendee.id, name = %attendee.full_name, "attendee added");
        Ok(attendee)
    }

    async fn update(&self, id: Uuid, patch: AttendeePatch) -> Result<Attendee, GafeteError> {
        let mut inner = self.inner.write().await;
        let attendee = inner.find_mut(id)?;
        let mut edited = attendee.clone();
        patch.apply(&mut edited)?;
        *attendee = edited.clone();
        Ok(edited)
    }

    async fn delete(&self, id: Uuid) -> Result<(), GafeteError> {
        let mut inner = self.inner.write().await;
        let before = inner.attendees.len();
        inner.attendees.retain(|a| a.id != id);
        if inner.attendees.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn upsert_many(&self, attendees: Vec<NewAttendee>) -> Result<usize, GafeteError> {
        for attendee in &attendees {
            attendee.validate()?;
        }

        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let count = attendees.len();
        for new in attendees {
            let existing = new.external_id.as_ref().and_then(|ext| {
                inner
                    .attendees
                    .iter_mut()
                    .find(|a| a.external_id.as_ref() == Some(ext))
            });
            match existing {
                Some(current) => {
                    current.full_name = new.full_name.trim().to_string();
                    current.company = new.company;
                    current.location = new.location;
                    current.email = new.email;
                    current.phone = new.phone;
                }
                None => {
                    let attendee = Attendee::from_new(Uuid::new_v4(), new);
                    inner.attendees.push(attendee);
                }
            }
        }
        tracing::info!(count, "attendees upserted");
        Ok(count)
    }

    async fn check_in(&self, id: Uuid, station: &str) -> Result<CheckInOutcome, GafeteError> {
        let mut inner = self.inner.write().await;
        let ticket_no = inner.next_ticket;
        let attendee = inner.find_mut(id)?;
        if attendee.is_checked_in() {
            return Ok(CheckInOutcome::AlreadyCheckedIn(attendee.clone()));
        }

        attendee.checked_in_at = Some(Utc::now());
        attendee.ticket_no = Some(ticket_no);
        attendee.station = Some(station.to_string());
        let attendee = attendee.clone();
        inner.next_ticket += 1;

        tracing::info!(%id, ticket_no, station, "attendee checked in");
        Ok(CheckInOutcome::CheckedIn(attendee))
    }

    async fn reset(&self) -> Result<(), GafeteError> {
        *self.inner.write().await = Inner::default();
        tracing::warn!("attendee directory reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn seeded() -> (MemoryDirectory, Attendee, Attendee) {
        let dir = MemoryDirectory::new();
        let b = dir.insert(NewAttendee::new("Bruno Díaz")).await.unwrap();
        let a = dir.insert(NewAttendee::new("ana Gómez")).await.unwrap();
        (dir, a, b)
    }

    #[tokio::test]
    async fn test_search_orders_by_name_and_limits() {
        let (dir, a, b) = seeded().await;
        let all = dir.search("", 50).await.unwrap();
        assert_eq!(all.iter().map(|x| x.id).collect::<Vec<_>>(), vec![a.id, b.id]);
        assert_eq!(dir.search("", 1).await.unwrap().len(), 1);
        assert_eq!(dir.search("bruno", 50).await.unwrap()[0].id, b.id);
    }

    #[tokio::test]
    async fn test_tickets_are_sequential_and_assigned_once() {
        let (dir, a, b) = seeded().await;

        let first = dir.check_in(a.id, "N1").await.unwrap();
        let second = dir.check_in(b.id, "N2").await.unwrap();
        let again = dir.check_in(a.id, "N3").await.unwrap();

        assert!(matches!(first, CheckInOutcome::CheckedIn(_)));
        assert_eq!(first.attendee().ticket_no, Some(1));
        assert_eq!(second.attendee().ticket_no, Some(2));
        match again {
            CheckInOutcome::AlreadyCheckedIn(x) => {
                assert_eq!(x.ticket_no, Some(1));
                assert_eq!(x.station.as_deref(), Some("N1"));
            }
            other => panic!("expected AlreadyCheckedIn, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_in_unknown_is_not_found() {
        let dir = MemoryDirectory::new();
        let err = dir.check_in(Uuid::new_v4(), "N1").await.unwrap_err();
        assert!(matches!(err, GafeteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reset_restarts_sequence() {
        let (dir, a, _) = seeded().await;
        dir.check_in(a.id, "N1").await.unwrap();
        dir.reset().await.unwrap();
        assert!(dir.search("", 50).await.unwrap().is_empty());

        let c = dir.insert(NewAttendee::new("Carla")).await.unwrap();
        let out = dir.check_in(c.id, "N1").await.unwrap();
        assert_eq!(out.attendee().ticket_no, Some(1));
    }

    #[tokio::test]
    async fn test_upsert_by_external_id_keeps_check_in() {
        let dir = MemoryDirectory::new();
        let mut row = NewAttendee::new("Ana");
        row.external_id = Some("R-7".into());
        dir.upsert_many(vec![row.clone()]).await.unwrap();
        let id = dir.search("ana", 10).await.unwrap()[0].id;
        dir.check_in(id, "N1").await.unwrap();

        row.full_name = "Ana María".into();
        row.company = Some("Acme".into());
        dir.upsert_many(vec![row, NewAttendee::new("Otro")]).await.unwrap();

        let all = dir.search("", 50).await.unwrap();
        assert_eq!(all.len(), 2);
        let ana = dir.get(id).await.unwrap();
        assert_eq!(ana.full_name, "Ana María");
        assert_eq!(ana.company.as_deref(), Some("Acme"));
        assert_eq!(ana.ticket_no, Some(1));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (dir, a, _) = seeded().await;
        let patch = AttendeePatch {
            company: Some("Acme".into()),
            ..Default::default()
        };
        assert_eq!(dir.update(a.id, patch).await.unwrap().company.as_deref(), Some("Acme"));

        dir.delete(a.id).await.unwrap();
        assert!(matches!(dir.get(a.id).await, Err(GafeteError::NotFound(_))));
        assert!(dir.delete(a.id).await.is_err());
    }
}
