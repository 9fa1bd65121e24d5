//! Per-attendee debounce for check-in requests.
//!
//! A second request for the same attendee is refused while the first is still
//! running, unless the first has been running longer than the cool-down (a
//! stuck request must not lock the attendee out forever).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
struct Slots {
    next_token: u64,
    started: HashMap<Uuid, (u64, Instant)>,
}

type InFlight = Arc<Mutex<Slots>>;

#[derive(Debug, Clone)]
pub struct CheckinGuard {
    cooldown: Duration,
    in_flight: InFlight,
}

impl Default for CheckinGuard {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl CheckinGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            in_flight: Arc::default(),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Claim `id`. `None` means an earlier request for the same attendee is
    /// still unsettled.
    pub fn try_acquire(&self, id: Uuid) -> Option<GuardPermit> {
        let mut slots = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        if let Some((_, started)) = slots.started.get(&id)
            && now.duration_since(*started) < self.cooldown
        {
            tracing::debug!(%id, "suppressed duplicate check-in");
            return None;
        }
        slots.next_token += 1;
        let token = slots.next_token;
        slots.started.insert(id, (token, now));
        Some(GuardPermit {
            id,
            token,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_pending(&self, id: Uuid) -> bool {
        self.in_flight
            .lock()
            .map(|slots| slots.started.contains_key(&id))
            .unwrap_or(false)
    }
}

/// Settles its attendee when dropped.
#[derive(Debug)]
pub struct GuardPermit {
    id: Uuid,
    token: u64,
    in_flight: InFlight,
}

impl Drop for GuardPermit {
    fn drop(&mut self) {
        let mut slots = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        // a newer permit may have replaced a stale one
        if slots.started.get(&self.id).map(|(token, _)| *token) == Some(self.token) {
            slots.started.remove(&self.id);
        }
    }
}
