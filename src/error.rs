//! Crate-level error types for repository operations.

use crate::id::Id;

/// A record was rejected before any mutation took place.
///
/// Raised by [`Entity::validate`](crate::Entity::validate) and by the
/// field parsers in [`Fields`](crate::Fields). Validation never touches
/// persisted state, so the caller can simply re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty or whitespace only.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    /// A numeric field could not be parsed.
    #[error("{field} must be a number, got {value:?}")]
    NotNumeric { field: &'static str, value: String },

    /// A required field was not supplied at all.
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// A field name the entity kind does not declare.
    #[error("unknown field {field:?}")]
    UnknownField { field: String },
}

/// Error returned by [`Repository`](crate::Repository) operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Record failed validation; nothing was mutated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The addressed identifier is not present in the collection.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Id },

    /// Every identifier up to `Id::MAX` has been handed out.
    #[error("no {kind} identifiers left to allocate")]
    IdsExhausted { kind: &'static str },

    /// The allocator produced an identifier that is already stored.
    #[error("{kind} {id} already exists")]
    IdInUse { kind: &'static str, id: Id },

    /// Disk I/O failure while loading or persisting a collection.
    ///
    /// When this comes out of a mutating operation the in-memory
    /// collection may be ahead of the file on disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepositoryError {
    /// Returns `true` for [`RepositoryError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` for [`RepositoryError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Shorthand for results of repository operations.
pub type Result<T, E = RepositoryError> = std::result::Result<T, E>;
