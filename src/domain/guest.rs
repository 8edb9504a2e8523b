//! Guest records.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, require};
use crate::error::ValidationError;
use crate::fields::Fields;

fn default_total_cost() -> String {
    "0".to_owned()
}

/// A guest and the quoted total for their booking.
///
/// `total_cost` is display text (e.g. `"$1200.00"`), written either by the
/// user or by [`Registry::quote_guest`](crate::Registry::quote_guest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_total_cost")]
    pub total_cost: String,
}

impl Default for Guest {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            total_cost: default_total_cost(),
        }
    }
}

impl Entity for Guest {
    const KIND: &'static str = "guest";
    const COLLECTION: &'static str = "guests";
    const FIELDS: &'static [&'static str] = &["name", "email", "phone", "total_cost"];

    fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
        let total_cost = match fields.get("total_cost") {
            Some(cost) if !cost.trim().is_empty() => cost.to_owned(),
            _ => default_total_cost(),
        };
        Ok(Self {
            name: fields.text("name")?,
            email: fields.text("email")?,
            phone: fields.text("phone")?,
            total_cost,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("phone", &self.phone)
            .with("total_cost", &self.total_cost)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)
    }
}
