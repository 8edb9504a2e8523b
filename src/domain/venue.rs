//! Venue records and their schedule of booked events.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, require};
use crate::error::ValidationError;
use crate::fields::Fields;
use crate::id::Id;

/// A venue that can host events.
///
/// `events` lists the identifiers of events booked here. It is kept up to
/// date by [`Registry`](crate::Registry) but is not a checked reference:
/// entries may outlive the events they name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub contact: String,
    #[serde(default)]
    pub min_guests: u32,
    #[serde(default)]
    pub max_guests: u32,
    #[serde(default)]
    pub events: Vec<Id>,
}

impl Venue {
    /// Record that `event_id` is booked here. No-op if already listed.
    pub fn add_event(&mut self, event_id: Id) {
        if !self.events.contains(&event_id) {
            self.events.push(event_id);
        }
    }

    /// Drop `event_id` from the schedule. Returns `true` if it was listed.
    pub fn remove_event(&mut self, event_id: Id) -> bool {
        let before = self.events.len();
        self.events.retain(|id| *id != event_id);
        self.events.len() != before
    }
}

impl Entity for Venue {
    const KIND: &'static str = "venue";
    const COLLECTION: &'static str = "venues";
    const FIELDS: &'static [&'static str] =
        &["name", "address", "contact", "min_guests", "max_guests"];

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.text("name")?,
            address: fields.text("address")?,
            contact: fields.text("contact")?,
            min_guests: fields.number_or_default("min_guests")?,
            max_guests: fields.number_or_default("max_guests")?,
            events: Vec::new(),
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("address", &self.address)
            .with("contact", &self.contact)
            .with("min_guests", self.min_guests.to_string())
            .with("max_guests", self.max_guests.to_string())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("address", &self.address)?;
        require("contact", &self.contact)
    }

    // The schedule is not a form field; carry it across edits.
    fn patched(&self, patch: &Fields) -> Result<Self, ValidationError> {
        patch.ensure_known(Self::FIELDS)?;
        let mut next = Self::from_fields(&self.to_fields().merge(patch.clone()))?;
        next.validate()?;
        next.events = self.events.clone();
        Ok(next)
    }
}
