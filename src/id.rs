//! Identifier allocation for entity collections.

/// Identifier shared by every entity kind.
pub type Id = u64;

/// Derive the next identifier from the keys of a persisted collection.
///
/// Keys that do not parse as an unsigned integer (after trimming) are
/// ignored. Returns one plus the largest numeric key, or `1` when there is
/// none.
///
/// # Returns
///
/// `None` only when the largest key is already `Id::MAX`, so no fresh
/// identifier exists above it.
///
/// # Examples
///
/// ```
/// use event_desk::next_id;
///
/// assert_eq!(next_id(Vec::<&str>::new()), Some(1));
/// assert_eq!(next_id(["1", "7", "legacy", " 3 "]), Some(8));
/// ```
pub fn next_id<I, K>(keys: I) -> Option<Id>
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    successor(keys.into_iter().filter_map(|k| parse_id(k.as_ref())).max())
}

/// Parse a textual key as an [`Id`], returning `None` for non-numeric noise.
pub fn parse_id(key: &str) -> Option<Id> {
    key.trim().parse().ok()
}

fn successor(max: Option<Id>) -> Option<Id> {
    match max {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Hands out identifiers for one collection.
///
/// Initialized once from the loaded keys, then incremented locally after
/// every successful insert. Never re-scans the collection. Once `Id::MAX`
/// has been handed out (or is already taken) the allocator is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAllocator {
    next: Option<Id>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl IdAllocator {
    /// Initialize from already-typed identifiers.
    pub fn from_ids(ids: impl IntoIterator<Item = Id>) -> Self {
        Self {
            next: successor(ids.into_iter().max()),
        }
    }

    /// Initialize from textual keys; see [`next_id`].
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        Self {
            next: next_id(keys),
        }
    }

    /// The identifier the next call to [`allocate`](Self::allocate) returns.
    pub fn peek(&self) -> Option<Id> {
        self.next
    }

    /// Consume and return the next identifier, or `None` when exhausted.
    pub fn allocate(&mut self) -> Option<Id> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}
