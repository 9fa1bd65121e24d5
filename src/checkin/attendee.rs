//! Attendee records as the datastore keeps them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GafeteError;
use crate::label::LabelFields;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: Uuid,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ticket_no: Option<u32>,
    #[serde(default)]
    pub station: Option<String>,
}

impl Attendee {
    pub fn from_new(id: Uuid, new: NewAttendee) -> Self {
        Self {
            id,
            full_name: new.full_name.trim().to_string(),
            external_id: new.external_id,
            company: new.company,
            location: new.location,
            email: new.email,
            phone: new.phone,
            checked_in_at: None,
            ticket_no: None,
            station: None,
        }
    }

    pub fn is_checked_in(&self) -> bool {
        self.checked_in_at.is_some()
    }

    /// Case-insensitive substring match on the full name. A blank query
    /// matches everyone.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty() || self.full_name.to_lowercase().contains(&needle)
    }

    /// Values printed on this attendee's badge.
    pub fn label_fields(&self, ticket_no: u32) -> LabelFields {
        LabelFields {
            name: self.full_name.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            ticket_no,
        }
    }
}

/// Fields supplied when adding or importing an attendee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttendee {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewAttendee {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), GafeteError> {
        if self.full_name.trim().is_empty() {
            return Err(GafeteError::Validation("full_name is required".to_string()));
        }
        Ok(())
    }
}

/// A partial edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeePatch {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl AttendeePatch {
    pub fn apply(self, attendee: &mut Attendee) -> Result<(), GafeteError> {
        if let Some(name) = self.full_name {
            let name = name.trim();
            if name.is_empty() {
                return Err(GafeteError::Validation("full_name is required".to_string()));
            }
            attendee.full_name = name.to_string();
        }
        if self.company.is_some() {
            attendee.company = self.company;
        }
        if self.location.is_some() {
            attendee.location = self.location;
        }
        if self.email.is_some() {
            attendee.email = self.email;
        }
        if self.phone.is_some() {
            attendee.phone = self.phone;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Attendee {
        Attendee::from_new(
            Uuid::new_v4(),
            NewAttendee {
                full_name: " Ana Gómez ".into(),
                company: Some("Acme".into()),
                email: Some("ana@example.com".into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_from_new_trims_name() {
        let a = ana();
        assert_eq!(a.full_name, "Ana Gómez");
        assert!(!a.is_checked_in());
    }

    #[test]
    fn test_matches() {
        let a = ana();
        assert!(a.matches("gómez"));
        assert!(a.matches("ANA G"));
        assert!(!a.matches("acme"));
        assert!(!a.matches("example.com"));
        assert!(a.matches("  "));
        assert!(!a.matches("zeta"));
    }

    #[test]
    fn test_label_fields() {
        let fields = ana().label_fields(42);
        assert_eq!(fields.name, "Ana Gómez");
        assert_eq!(fields.company.as_deref(), Some("Acme"));
        assert_eq!(fields.location, None);
        assert_eq!(fields.ticket_no, 42);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(NewAttendee::new("  ").validate().is_err());
        let mut a = ana();
        let patch = AttendeePatch {
            full_name: Some("".into()),
            ..Default::default()
        };
        assert!(patch.apply(&mut a).is_err());
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let mut a = ana();
        AttendeePatch {
            location: Some("Sala 2".into()),
            ..Default::default()
        }
        .apply(&mut a)
        .unwrap();
        assert_eq!(a.location.as_deref(), Some("Sala 2"));
        assert_eq!(a.company.as_deref(), Some("Acme"));
    }
}
