//! Per-kind record repository with immediate whole-collection persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::entity::Entity;
use crate::error::{RepositoryError, Result};
use crate::fields::Fields;
use crate::id::{Id, IdAllocator};
use crate::storage::{DataLayout, load_collection, save_collection};

/// The single source of truth for one entity kind.
///
/// Owns the full `Id -> E` map and the file it is persisted to. Every
/// mutating operation validates first, then mutates the in-memory map, then
/// rewrites the whole file before returning. There is no dirty state kept
/// between calls.
///
/// Records are kept in a `BTreeMap`, so iteration is in identifier order.
///
/// # Examples
///
/// ```no_run
/// use event_desk::{DataLayout, Employee, Repository};
///
/// let layout = DataLayout::new("data");
/// let mut employees = Repository::<Employee>::open(&layout)?;
/// let id = employees.insert(Employee::new("Grace", "Catering", "Chef", "42000"))?;
/// assert_eq!(employees.find(id)?.name, "Grace");
/// # Ok::<(), event_desk::RepositoryError>(())
/// ```
#[derive(Debug)]
pub struct Repository<E: Entity> {
    path: PathBuf,
    records: BTreeMap<Id, E>,
    ids: IdAllocator,
}

impl<E: Entity> Repository<E> {
    /// Open the repository for `E` inside `layout`, loading any saved state.
    ///
    /// A missing collection file yields an empty repository.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Io`] if the file exists but cannot be read or
    /// parsed.
    pub fn open(layout: &DataLayout) -> Result<Self> {
        Self::open_at(layout.path_for::<E>())
    }

    /// Open the repository backed by an explicit file path.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = load_collection::<E>(&path)?;
        let ids = IdAllocator::from_ids(records.keys().copied());
        Ok(Self { path, records, ids })
    }

    /// The file this repository persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the persisted collection without touching in-memory state.
    pub fn load(&self) -> Result<BTreeMap<Id, E>> {
        Ok(load_collection(&self.path)?)
    }

    /// Overwrite the persisted collection with the in-memory one.
    pub fn save(&self) -> Result<()> {
        Ok(save_collection(&self.path, &self.records)?)
    }

    /// The identifier the next successful insert will receive, or `None`
    /// once the identifier space is exhausted.
    pub fn next_id(&self) -> Option<Id> {
        self.ids.peek()
    }

    /// Validate, store and persist a new record.
    ///
    /// # Returns
    ///
    /// The identifier assigned to the record.
    ///
    /// # Errors
    ///
    /// - [`RepositoryError::Validation`] if a required field is blank. No
    ///   identifier is consumed and nothing is stored.
    /// - [`RepositoryError::IdsExhausted`] if no identifier is left, or
    ///   [`RepositoryError::IdInUse`] if the next one is already stored.
    ///   Nothing is stored in either case.
    /// - [`RepositoryError::Io`] if persisting fails. The record stays in
    ///   memory.
    pub fn insert(&mut self, record: E) -> Result<Id> {
        record.validate()?;
        let id = self
            .ids
            .peek()
            .ok_or(RepositoryError::IdsExhausted { kind: E::KIND })?;
        if self.records.contains_key(&id) {
            return Err(RepositoryError::IdInUse { kind: E::KIND, id });
        }
        self.ids.allocate();
        self.records.insert(id, record);
        tracing::info!(kind = E::KIND, id, "record inserted");
        self.save()?;
        Ok(id)
    }

    /// Parse raw form fields into a record and [`insert`](Self::insert) it.
    pub fn insert_fields(&mut self, fields: &Fields) -> Result<Id> {
        fields.ensure_known(E::FIELDS)?;
        let record = E::from_fields(fields)?;
        self.insert(record)
    }

    /// Replace the addressed fields of an existing record.
    ///
    /// Fields not named in `fields` keep their current values.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`] if `id` is absent, or
    /// [`RepositoryError::Validation`] if the patched record is invalid.
    /// Neither mutates the collection.
    pub fn update(&mut self, id: Id, fields: &Fields) -> Result<()> {
        let next = self.find(id)?.patched(fields)?;
        self.store_existing(id, next)
    }

    /// Replace an existing record wholesale.
    pub fn replace(&mut self, id: Id, record: E) -> Result<()> {
        self.find(id)?;
        record.validate()?;
        self.store_existing(id, record)
    }

    /// Apply an in-place edit to an existing record and persist it.
    ///
    /// The edited record is validated before it is stored.
    pub fn modify(&mut self, id: Id, edit: impl FnOnce(&mut E)) -> Result<()> {
        let mut next = self.find(id)?.clone();
        edit(&mut next);
        next.validate()?;
        self.store_existing(id, next)
    }

    fn store_existing(&mut self, id: Id, record: E) -> Result<()> {
        self.records.insert(id, record);
        tracing::info!(kind = E::KIND, id, "record updated");
        self.save()
    }

    /// Remove a record and persist.
    ///
    /// # Returns
    ///
    /// The removed record.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::NotFound`] if `id` is absent, including when it
    /// was already deleted.
    pub fn delete(&mut self, id: Id) -> Result<E> {
        let removed = self.records.remove(&id).ok_or_else(|| not_found::<E>(id))?;
        tracing::info!(kind = E::KIND, id, "record deleted");
        self.save()?;
        Ok(removed)
    }

    /// Exact lookup by identifier.
    pub fn find(&self, id: Id) -> Result<&E> {
        self.records.get(&id).ok_or_else(|| not_found::<E>(id))
    }

    pub fn get(&self, id: Id) -> Option<&E> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.records.contains_key(&id)
    }

    /// Iterate over `(id, record)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &E)> {
        self.records.iter().map(|(id, r)| (*id, r))
    }

    /// All records matching `predicate`, in identifier order.
    pub fn search<P>(&self, mut predicate: P) -> Vec<(Id, &E)>
    where
        P: FnMut(&E) -> bool,
    {
        self.iter().filter(|(_, r)| predicate(r)).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn not_found<E: Entity>(id: Id) -> RepositoryError {
    RepositoryError::NotFound { kind: E::KIND, id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_fixtures::Badge;
    use crate::error::ValidationError;
    use tempfile::TempDir;

    fn open(tmp: &TempDir) -> Repository<Badge> {
        Repository::open(&DataLayout::new(tmp.path())).expect("open should succeed")
    }

    #[test]
    fn open_missing_file_is_empty() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let repo = open(&tmp);
        assert!(repo.is_empty());
        assert_eq!(repo.next_id(), Some(1));
    }

    #[test]
    fn insert_then_find_roundtrips() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);

        let id = repo.insert(Badge::new("gold", 3)).expect("insert");
        assert_eq!(id, 1);
        assert_eq!(repo.find(id).expect("find"), &Badge::new("gold", 3));
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);

        let ids: Vec<Id> = ["a", "b", "c"]
            .into_iter()
            .map(|l| repo.insert(Badge::new(l, 0)).expect("insert"))
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn insert_persists_immediately() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        let id = repo.insert(Badge::new("gold", 3)).expect("insert");

        let on_disk = repo.load().expect("load");
        assert_eq!(on_disk.get(&id), Some(&Badge::new("gold", 3)));
    }

    #[test]
    fn invalid_insert_does_not_mutate_or_consume_id() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);

        let err = repo.insert(Badge::new(" ", 1)).unwrap_err();
        assert!(err.is_validation());
        assert!(repo.is_empty());
        assert_eq!(repo.next_id(), Some(1));
        assert!(!repo.path().exists(), "nothing should have been persisted");
    }

    #[test]
    fn insert_fields_reports_parse_errors() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);

        let fields = Fields::new().with("label", "gold").with("count", "three");
        let err = repo.insert_fields(&fields).unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Validation(ValidationError::NotNumeric { field: "count", .. })
        ));
        assert!(repo.is_empty());
    }

    #[test]
    fn update_replaces_addressed_fields() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        let id = repo.insert(Badge::new("gold", 3)).expect("insert");

        repo.update(id, &Fields::new().with("count", "7"))
            .expect("update");
        assert_eq!(repo.find(id).expect("find"), &Badge::new("gold", 7));
        assert_eq!(repo.load().expect("load")[&id], Badge::new("gold", 7));
    }

    #[test]
    fn update_missing_id_is_not_found_and_does_not_mutate() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        repo.insert(Badge::new("gold", 3)).expect("insert");

        let err = repo
            .update(42, &Fields::new().with("count", "1"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.len(), 1);
        assert!(repo.get(42).is_none());
    }

    #[test]
    fn invalid_update_keeps_previous_record() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        let id = repo.insert(Badge::new("gold", 3)).expect("insert");

        let err = repo
            .update(id, &Fields::new().with("label", ""))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.find(id).expect("find"), &Badge::new("gold", 3));
    }

    #[test]
    fn replace_and_modify() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        let id = repo.insert(Badge::new("gold", 3)).expect("insert");

        repo.replace(id, Badge::new("silver", 1)).expect("replace");
        repo.modify(id, |b| b.count += 1).expect("modify");
        assert_eq!(repo.find(id).expect("find"), &Badge::new("silver", 2));

        assert!(repo.replace(99, Badge::new("x", 0)).unwrap_err().is_not_found());
        assert!(repo.modify(id, |b| b.label.clear()).unwrap_err().is_validation());
    }

    #[test]
    fn delete_twice_is_not_found() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        let id = repo.insert(Badge::new("gold", 3)).expect("insert");

        let removed = repo.delete(id).expect("first delete");
        assert_eq!(removed, Badge::new("gold", 3));
        assert!(repo.find(id).unwrap_err().is_not_found());
        assert!(repo.delete(id).unwrap_err().is_not_found());
        assert!(repo.load().expect("load").is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        repo.insert(Badge::new("a", 0)).expect("insert");
        let second = repo.insert(Badge::new("b", 0)).expect("insert");
        repo.delete(second).expect("delete");

        assert_eq!(repo.insert(Badge::new("c", 0)).expect("insert"), 3);
    }

    #[test]
    fn reopen_continues_above_max_id() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        {
            let mut repo = open(&tmp);
            repo.insert(Badge::new("a", 1)).expect("insert");
            repo.insert(Badge::new("b", 2)).expect("insert");
        }

        let mut repo = open(&tmp);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find(2).expect("find"), &Badge::new("b", 2));
        assert_eq!(repo.insert(Badge::new("c", 3)).expect("insert"), 3);
    }

    #[test]
    fn exhausted_id_space_rejects_insert_without_overwriting() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let path = tmp.path().join("badges.json");
        let json = format!(r#"{{"{}": {{"label": "last", "count": 1}}}}"#, Id::MAX);
        std::fs::write(&path, json).expect("seed collection");

        let mut repo = Repository::<Badge>::open_at(path.clone()).expect("open");
        assert_eq!(repo.next_id(), None);

        let err = repo.insert(Badge::new("overflow", 2)).unwrap_err();
        assert!(matches!(err, RepositoryError::IdsExhausted { kind: "badge" }));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find(Id::MAX).expect("find"), &Badge::new("last", 1));
        assert_eq!(repo.load().expect("load")[&Id::MAX], Badge::new("last", 1));
    }

    #[test]
    fn failed_persist_is_io_and_leaves_memory_ahead_of_disk() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let parent = tmp.path().join("sub");
        let mut repo = Repository::<Badge>::open_at(parent.join("badges.json")).expect("open");

        // A regular file where the collection directory should be.
        std::fs::write(&parent, "not a directory").expect("block parent");

        let err = repo.insert(Badge::new("gold", 3)).unwrap_err();
        assert!(matches!(err, RepositoryError::Io(_)), "got {err:?}");
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(1), Some(&Badge::new("gold", 3)));
        assert_eq!(repo.next_id(), Some(2));
        assert!(!repo.path().exists());
    }

    #[test]
    fn search_filters_in_id_order() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let mut repo = open(&tmp);
        for (label, count) in [("a", 5), ("b", 1), ("c", 9)] {
            repo.insert(Badge::new(label, count)).expect("insert");
        }

        let hits: Vec<Id> = repo
            .search(|b| b.count > 2)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(hits, vec![1, 3]);
    }
}
