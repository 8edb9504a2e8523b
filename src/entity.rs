//! Entity trait shared by every record kind.

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::ValidationError;
use crate::fields::Fields;

/// One kind of record kept in its own [`Repository`](crate::Repository).
///
/// The implementing type is the record itself, without its identifier.
/// Identifiers live in the repository's map keys.
///
/// # Contract
///
/// - [`validate`](Entity::validate) only checks the record's own fields;
///   it never looks at other entity kinds.
/// - [`from_fields`](Entity::from_fields) must accept whatever
///   [`to_fields`](Entity::to_fields) produces for a valid record, so that
///   a field-level patch can be applied by overlaying fields.
pub trait Entity: Clone + PartialEq + Debug + Serialize + DeserializeOwned + 'static {
    /// Singular display name (e.g. `"employee"`), used in messages and logs.
    const KIND: &'static str;

    /// Plural collection name (e.g. `"employees"`), used as the file stem.
    const COLLECTION: &'static str;

    /// Field names accepted by [`from_fields`](Entity::from_fields).
    const FIELDS: &'static [&'static str];

    /// Parse a record from raw form fields.
    ///
    /// Only parsing errors are reported here. Whole-record rules live in
    /// [`validate`](Entity::validate), which the repository runs before
    /// storing anything.
    fn from_fields(fields: &Fields) -> Result<Self, ValidationError>;

    /// Render the record back into raw form fields.
    fn to_fields(&self) -> Fields;

    /// Check required fields on an already-typed record.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Produce a copy with the addressed fields replaced.
    ///
    /// Fields not named in `patch` keep their current value. The result is
    /// validated with the same rules as a fresh record.
    fn patched(&self, patch: &Fields) -> Result<Self, ValidationError> {
        patch.ensure_known(Self::FIELDS)?;
        let merged = self.to_fields().merge(patch.clone());
        let next = Self::from_fields(&merged)?;
        next.validate()?;
        Ok(next)
    }
}

/// Fail with [`ValidationError::Blank`] when `value` is empty or whitespace.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use serde::{Deserialize, Serialize};

    use super::{Entity, require};
    use crate::error::ValidationError;
    use crate::fields::Fields;

    /// A minimal record used to exercise the generic repository code.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct Badge {
        pub label: String,
        pub count: u32,
    }

    impl Badge {
        pub fn new(label: &str, count: u32) -> Self {
            Self {
                label: label.into(),
                count,
            }
        }
    }

    impl Entity for Badge {
        const KIND: &'static str = "badge";
        const COLLECTION: &'static str = "badges";
        const FIELDS: &'static [&'static str] = &["label", "count"];

        fn from_fields(fields: &Fields) -> Result<Self, ValidationError> {
            Ok(Self {
                label: fields.text("label")?,
                count: fields.number("count")?,
            })
        }

        fn to_fields(&self) -> Fields {
            Fields::new()
                .with("label", &self.label)
                .with("count", self.count.to_string())
        }

        fn validate(&self) -> Result<(), ValidationError> {
            require("label", &self.label)
        }
    }
}
