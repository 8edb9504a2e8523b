//! Client records -- customers who book events.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, require};
use crate::error::ValidationError;
use crate::fields::Fields;

/// A customer of the company.
///
/// `event_types` holds the event-type tags the client is interested in;
/// they are plain labels, not links to [`Event`](super::Event) records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub address: String,
    pub contact: String,
    /// Budget in whole currency units.
    pub budget: f64,
    #[serde(default)]
    pub event_types: Vec<String>,
}

impl Client {
    /// Add an event-type tag unless it is already present.
    pub fn add_event_type(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.event_types.contains(&tag) {
            self.event_types.push(tag);
        }
    }

    /// Remove an event-type tag. Returns `true` if it was present.
    pub fn remove_event_type(&mut self, tag: &str) -> bool {
        let before = self.event_types.len();
        self.event_types.retain(|t| t != tag);
        self.event_types.len() != before
    }
}

impl Entity for Client {
    const KIND: &'static str = "client";
    const COLLECTION: &'static str = "clients";
    const FIELDS: &'static [&'static str] =
        &["name", "address", "contact", "budget", "event_types"];

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.text("name")?,
            address: fields.text("address")?,
            contact: fields.text("contact")?,
            budget: fields.number("budget")?,
            event_types: fields.list("event_types"),
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("address", &self.address)
            .with("contact", &self.contact)
            .with("budget", self.budget.to_string())
            .with("event_types", self.event_types.join(", "))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("address", &self.address)?;
        require("contact", &self.contact)?;
        if !self.budget.is_finite() {
            return Err(ValidationError::NotNumeric {
                field: "budget",
                value: self.budget.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Fields {
        Fields::new()
            .with("name", "Acme Weddings")
            .with("address", "1 High St")
            .with("contact", "555-0100")
            .with("budget", "12500.50")
            .with("event_types", "Wedding, Birthday")
    }

    #[test]
    fn parse_from_form() {
        let client = Client::from_fields(&form()).expect("valid form");
        assert_eq!(client.budget, 12500.50);
        assert_eq!(client.event_types, vec!["Wedding", "Birthday"]);
    }

    #[test]
    fn reject_non_numeric_budget() {
        let err = Client::from_fields(&form().with("budget", "plenty")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotNumeric { field: "budget", .. }
        ));
    }

    #[test]
    fn event_types_are_optional() {
        let fields = form().with("event_types", "");
        let client = Client::from_fields(&fields).expect("valid form");
        assert!(client.event_types.is_empty());
    }

    #[test]
    fn tags_are_deduplicated() {
        let mut client = Client::from_fields(&form()).expect("valid form");
        client.add_event_type("Wedding");
        client.add_event_type("Graduation");
        assert_eq!(client.event_types, vec!["Wedding", "Birthday", "Graduation"]);
        assert!(client.remove_event_type("Birthday"));
        assert!(!client.remove_event_type("Birthday"));
    }

    #[test]
    fn patch_keeps_tags() {
        let client = Client::from_fields(&form()).expect("valid form");
        let next = client
            .patched(&Fields::new().with("budget", "900"))
            .expect("patch");
        assert_eq!(next.budget, 900.0);
        assert_eq!(next.event_types, client.event_types);
    }
}
