//! Event records -- bookings of a given type on a date.
//!
//! Client and venue are stored as the names the user typed. They are
//! display strings, not references, so deleting a client or venue leaves
//! existing events untouched.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, require};
use crate::error::ValidationError;
use crate::fields::Fields;

/// A scheduled event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event-type tag, e.g. `"Wedding"`.
    pub event_type: String,
    /// Date as entered (conventionally `YYYY-MM-DD`, not checked).
    pub date: String,
    /// Client name.
    pub client: String,
    /// Venue name.
    pub venue: String,
}

impl Event {
    pub fn new(
        event_type: impl Into<String>,
        date: impl Into<String>,
        client: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            date: date.into(),
            client: client.into(),
            venue: venue.into(),
        }
    }
}

impl Entity for Event {
    const KIND: &'static str = "event";
    const COLLECTION: &'static str = "events";
    const FIELDS: &'static [&'static str] = &["event_type", "date", "client", "venue"];

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            event_type: fields.text("event_type")?,
            date: fields.text("date")?,
            client: fields.text("client")?,
            venue: fields.text("venue")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("event_type", &self.event_type)
            .with("date", &self.date)
            .with("client", &self.client)
            .with("venue", &self.venue)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("event_type", &self.event_type)?;
        require("date", &self.date)?;
        require("client", &self.client)?;
        require("venue", &self.venue)
    }
}
