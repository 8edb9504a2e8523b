//! Raw form fields handed over by the UI layer.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Field values exactly as a form collected them, keyed by field name.
///
/// The UI layer never builds records itself; it fills a `Fields` bag and
/// lets [`Entity::from_fields`](crate::Entity::from_fields) do the parsing
/// and validation. Values are stored verbatim.
///
/// # Examples
///
/// ```
/// use event_desk::Fields;
///
/// let fields = Fields::new()
///     .with("name", "Ada")
///     .with("budget", "2500");
///
/// assert_eq!(fields.get("name"), Some("Ada"));
/// assert_eq!(fields.number::<f64>("budget").unwrap(), 2500.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    values: BTreeMap<String, String>,
}

impl Fields {
    /// Create an empty field bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the raw value of a field, if supplied.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; fields present in `other` win.
    pub fn merge(mut self, other: Fields) -> Self {
        self.values.extend(other.values);
        self
    }

    /// Reject any field name not in `known`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownField`] naming the first offender.
    pub fn ensure_known(&self, known: &[&str]) -> Result<(), ValidationError> {
        match self.values.keys().find(|k| !known.contains(&k.as_str())) {
            Some(field) => Err(ValidationError::UnknownField {
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }

    /// A required text field: must be present and not blank.
    pub fn text(&self, field: &'static str) -> Result<String, ValidationError> {
        let value = self.get(field).ok_or(ValidationError::Missing { field })?;
        if value.trim().is_empty() {
            return Err(ValidationError::Blank { field });
        }
        Ok(value.to_owned())
    }

    /// A required numeric field.
    pub fn number<T: FromStr>(&self, field: &'static str) -> Result<T, ValidationError> {
        let raw = self.text(field)?;
        parse_number(field, &raw)
    }

    /// A numeric field where absent or blank means `T::default()`.
    pub fn number_or_default<T: FromStr + Default>(
        &self,
        field: &'static str,
    ) -> Result<T, ValidationError> {
        match self.get(field) {
            Some(raw) if !raw.trim().is_empty() => parse_number(field, raw),
            _ => Ok(T::default()),
        }
    }

    /// A comma-separated list field. Empty items are dropped.
    pub fn list(&self, field: &str) -> Vec<String> {
        self.get(field)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::NotNumeric {
            field,
            value: raw.to_owned(),
        })
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
