//! On-disk layout and whole-collection persistence.
//!
//! Each entity kind lives in a single JSON file holding the full
//! identifier → record mapping. Saves always rewrite the entire file via a
//! temp-rename so readers never see a partially written collection.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::entity::Entity;
use crate::id::{Id, parse_id};

/// Manages the directory that holds every collection file.
///
/// The layout follows this structure:
/// ```text
/// <base_dir>/
///     employees.json
///     clients.json
///     suppliers.json
///     guests.json
///     events.json
///     venues.json
/// ```
///
/// `DataLayout` is cheap to clone (it wraps a single `PathBuf`).
#[derive(Debug, Clone)]
pub struct DataLayout {
    base_dir: PathBuf,
}

impl DataLayout {
    /// Create a layout rooted at `base_dir`.
    ///
    /// The directory does not need to exist yet; it is created on the
    /// first save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the root directory of this layout.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns `<base_dir>/<collection>.json`.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_dir.join(format!("{collection}.json"))
    }

    /// Returns the collection file for entity kind `E`.
    pub fn path_for<E: Entity>(&self) -> PathBuf {
        self.collection_path(E::COLLECTION)
    }
}

/// Save a full collection atomically to `path`.
///
/// Writes `<path>.tmp` in the same directory and renames it over `path`.
/// Creates the parent directory if needed.
///
/// # Errors
///
/// Returns `io::Error` if directory creation, serialization, writing, or
/// renaming fails.
pub fn save_collection<E: Entity>(path: &Path, records: &BTreeMap<Id, E>) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_vec_pretty(records).map_err(io::Error::other)?;
    fs::write(&tmp_path, &json)?;
    fs::rename(&tmp_path, path)?;

    tracing::debug!(
        kind = E::KIND,
        path = %path.display(),
        count = records.len(),
        "collection saved"
    );
    Ok(())
}

/// Load a full collection from `path`.
///
/// # Returns
///
/// - An empty map if the file does not exist.
/// - Otherwise every record whose key parses as an [`Id`]. Entries with
///   non-numeric keys are skipped with a warning.
///
/// # Errors
///
/// Returns `io::Error` for I/O failures other than file-not-found, and
/// `io::ErrorKind::InvalidData` if the file is not a valid collection or
/// two keys name the same identifier (`"3"` and `"03"`).
pub fn load_collection<E: Entity>(path: &Path) -> io::Result<BTreeMap<Id, E>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(kind = E::KIND, path = %path.display(), "no collection file yet");
            return Ok(BTreeMap::new());
        }
        Err(e) => return Err(e),
    };

    let raw: BTreeMap<String, E> = serde_json::from_slice(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut records = BTreeMap::new();
    for (key, record) in raw {
        let Some(id) = parse_id(&key) else {
            tracing::warn!(
                kind = E::KIND,
                key = %key,
                "skipping record with non-numeric identifier"
            );
            continue;
        };
        match records.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} key {key:?} repeats identifier {id}", E::KIND),
                ));
            }
        }
    }

    tracing::debug!(
        kind = E::KIND,
        path = %path.display(),
        count = records.len(),
        "collection loaded"
    );
    Ok(records)
}
