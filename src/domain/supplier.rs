//! Supplier records -- third parties that service events.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, require};
use crate::error::ValidationError;
use crate::fields::Fields;

/// A supplier and the party sizes it can serve.
///
/// Guest bounds default to `0` when absent. No ordering between
/// `min_guests` and `max_guests` is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub address: String,
    pub contact: String,
    /// Event-type tags this supplier serves; at least one.
    pub event_types: Vec<String>,
    #[serde(default)]
    pub min_guests: u32,
    #[serde(default)]
    pub max_guests: u32,
}

impl Entity for Supplier {
    const KIND: &'static str = "supplier";
    const COLLECTION: &'static str = "suppliers";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "address",
        "contact",
        "event_types",
        "min_guests",
        "max_guests",
    ];

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.text("name")?,
            address: fields.text("address")?,
            contact: fields.text("contact")?,
            event_types: fields.list("event_types"),
            min_guests: fields.number_or_default("min_guests")?,
            max_guests: fields.number_or_default("max_guests")?,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("address", &self.address)
            .with("contact", &self.contact)
            .with("event_types", self.event_types.join(", "))
            .with("min_guests", self.min_guests.to_string())
            .with("max_guests", self.max_guests.to_string())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("address", &self.address)?;
        require("contact", &self.contact)?;
        if self.event_types.iter().all(|t| t.trim().is_empty()) {
            return Err(ValidationError::Blank {
                field: "event_types",
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
            .with("name", "Party Tents Ltd")
            .with("address", "Unit 4")
            .with("contact", "tents@example.com")
            .with("event_types", "Wedding")
    }

    #[test]
    fn guest_bounds_default_to_zero() {
        let supplier = Supplier::from_fields(&form()).expect("valid form");
        assert_eq!((supplier.min_guests, supplier.max_guests), (0, 0));
    }

    #[test]
    fn guest_bounds_must_be_numeric() {
        let err = Supplier::from_fields(&form().with("max_guests", "lots")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotNumeric {
                field: "max_guests",
                ..
            }
        ));
    }

    #[test]
    fn requires_an_event_type() {
        let supplier = Supplier::from_fields(&form().with("event_types", " , "))
            .expect("parsing does not check the tag list");
        assert!(supplier.event_types.is_empty());

        let err = supplier.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::Blank {
                field: "event_types"
            }
        );
    }

    #[test]
    fn missing_bounds_deserialize_as_zero() {
        let supplier: Supplier = serde_json::from_str(
            r#"{"name":"A","address":"B","contact":"C","event_types":["Birthday"]}"#,
        )
        .expect("deserialize");
        assert_eq!(supplier.min_guests, 0);
        assert_eq!(supplier.max_guests, 0);
    }
}
