//! # Check-in
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Attendee`] | a record in the attendee datastore |
//! | [`AttendeeDirectory`] | the datastore seam, with [`MemoryDirectory`] in-process |
//! | [`CheckinGuard`] | refuses duplicate requests for one attendee |
//! | [`CheckinDesk`] | check in, resolve the label, print |

pub mod attendee;
pub mod desk;
pub mod directory;
pub mod guard;

pub use attendee::{Attendee, AttendeePatch, NewAttendee};
pub use desk::{Badge, CheckinDesk, DeskOutcome};
pub use directory::{AttendeeDirectory, CheckInOutcome, MemoryDirectory};
pub use guard::{CheckinGuard, GuardPermit};
