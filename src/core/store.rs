//! Name store: the in-memory collection of name records and its RON
//! persistence.
//!
//! Queries are pure projections over the loaded records. File access lives
//! in the `load`/`save`/`resolve` helpers so the rest of the engine only
//! ever sees an already-loaded collection.

use ron::ser::PrettyConfig;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::schema::filter::NameFilter;
use crate::schema::name::{LimitError, NameRecord};

/// File name looked up inside a store directory and the working directory.
pub const STORE_FILE_NAME: &str = "names.ron";

const BUNDLED_STORE: &str = include_str!("../../data/names.ron");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("name store not found: {0}")]
    NotFound(PathBuf),
    #[error("refusing to overwrite existing file: {0}")]
    AlreadyExists(PathBuf),
    #[error("the bundled name store is read-only; pass a store file")]
    BundledReadOnly,
    #[error("duplicate record id {0}")]
    DuplicateId(u64),
    #[error("invalid record {id}: {source}")]
    Limit { id: u64, source: LimitError },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonWrite(#[from] ron::Error),
}

/// A validated, read-only collection of name records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameStore {
    records: Vec<NameRecord>,
}

impl NameStore {
    /// Build a store, rejecting records over the field limits and
    /// duplicate ids.
    pub fn new(records: Vec<NameRecord>) -> Result<NameStore, StoreError> {
        match Self::problems(&records).into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(NameStore { records }),
        }
    }

    /// Every validation problem in `records`, in record order.
    pub fn problems(records: &[NameRecord]) -> Vec<StoreError> {
        let mut seen = FxHashSet::default();
        let mut problems = Vec::new();
        for record in records {
            if !seen.insert(record.id) {
                problems.push(StoreError::DuplicateId(record.id));
            }
            if let Err(source) = record.check_limits() {
                problems.push(StoreError::Limit { id: record.id, source });
            }
        }
        problems
    }

    /// Parse records without validating them.
    pub fn parse_records(input: &str) -> Result<Vec<NameRecord>, StoreError> {
        Ok(ron::from_str(input)?)
    }

    /// Parse and validate a store from a RON string.
    pub fn parse_ron(input: &str) -> Result<NameStore, StoreError> {
        Self::new(Self::parse_records(input)?)
    }

    /// Load and validate a store file.
    pub fn load_from_ron(path: &Path) -> Result<NameStore, StoreError> {
        if !path.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let store = Self::parse_ron(&contents)?;
        debug!(path = %path.display(), records = store.len(), "loaded name store");
        Ok(store)
    }

    /// Write the store as pretty-printed RON.
    pub fn save_to_ron(&self, path: &Path) -> Result<(), StoreError> {
        let contents = ron::ser::to_string_pretty(&self.records, PrettyConfig::new())?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The store compiled into the library.
    pub fn bundled() -> Result<NameStore, StoreError> {
        Self::parse_ron(BUNDLED_STORE)
    }

    /// Write the bundled store to `path` so it can be customized. An
    /// existing file is never overwritten.
    pub fn copy_bundled_to(path: &Path) -> Result<(), StoreError> {
        if path.exists() {
            return Err(StoreError::AlreadyExists(path.to_path_buf()));
        }
        std::fs::write(path, BUNDLED_STORE)?;
        debug!(path = %path.display(), "copied bundled name store");
        Ok(())
    }

    /// Write the store to a new file. Unlike `save_to_ron`, an existing
    /// file is never overwritten.
    pub fn export_to(&self, path: &Path) -> Result<(), StoreError> {
        if path.exists() {
            return Err(StoreError::AlreadyExists(path.to_path_buf()));
        }
        self.save_to_ron(path)?;
        debug!(path = %path.display(), records = self.len(), "exported name store");
        Ok(())
    }

    /// Append `incoming` to the store and return how many records were
    /// added.
    ///
    /// A non-empty store renumbers the new records from one past its
    /// highest id. An empty store keeps their ids. On error the store is
    /// left unchanged.
    pub fn import(&mut self, incoming: Vec<NameRecord>) -> Result<usize, StoreError> {
        let incoming = match self.max_id() {
            Some(max) => reindex(incoming, max + 1),
            None => incoming,
        };
        let added = incoming.len();
        let mut records = self.records.clone();
        records.extend(incoming);
        *self = Self::new(records)?;
        Ok(added)
    }

    /// Import the records in the store file `src` into the store file
    /// `target`, creating the target when it does not exist yet.
    pub fn import_file(src: &Path, target: &StoreSource) -> Result<usize, StoreError> {
        let StoreSource::File(dst) = target else {
            return Err(StoreError::BundledReadOnly);
        };
        if !src.is_file() {
            return Err(StoreError::NotFound(src.to_path_buf()));
        }
        let incoming = Self::parse_records(&std::fs::read_to_string(src)?)?;

        let mut store = if dst.exists() {
            Self::load_from_ron(dst)?
        } else {
            NameStore::default()
        };
        let added = store.import(incoming)?;
        store.save_to_ron(dst)?;
        debug!(src = %src.display(), dst = %dst.display(), added, "imported names");
        Ok(added)
    }

    /// Load the store `resolve_store_path` points at.
    pub fn open(
        explicit: Option<&Path>,
        configured: Option<&Path>,
        cwd: &Path,
    ) -> Result<NameStore, StoreError> {
        match resolve_store_path(explicit, configured, cwd) {
            StoreSource::File(path) => Self::load_from_ron(&path),
            StoreSource::Bundled => {
                debug!("using bundled name store");
                Self::bundled()
            }
        }
    }

    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every name, in store order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Records whose kind equals `kind`, in store order.
    pub fn names_by_kind(&self, kind: &str) -> Vec<&NameRecord> {
        self.records.iter().filter(|r| r.kind == kind).collect()
    }

    /// The highest record id, or `None` for an empty store.
    pub fn max_id(&self) -> Option<u64> {
        self.records.iter().map(|r| r.id).max()
    }

    /// Records matching `filter`, in store order. No fallback is applied.
    pub fn filter(&self, filter: &NameFilter) -> Vec<&NameRecord> {
        filter.apply(&self.records)
    }

    pub fn cultures(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.culture)
    }

    pub fn genders(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.gender)
    }

    pub fn kinds(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.kind)
    }

    pub fn sources(&self) -> BTreeSet<String> {
        self.distinct(|r| &r.source)
    }

    fn distinct(&self, field: impl Fn(&NameRecord) -> &String) -> BTreeSet<String> {
        self.records.iter().map(|r| field(r).clone()).collect()
    }
}

/// Renumber `records` consecutively starting at `offset`, keeping their
/// order.
pub fn reindex(records: Vec<NameRecord>, offset: u64) -> Vec<NameRecord> {
    (offset..)
        .zip(records)
        .map(|(id, record)| NameRecord { id, ..record })
        .collect()
}

/// Where a store comes from once resolution is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreSource {
    File(PathBuf),
    Bundled,
}

/// Pick the store to use: an explicit path (a directory means the
/// `names.ron` inside it), then the configured path, then `names.ron` in
/// `cwd`, and finally the bundled store.
///
/// Explicit and configured paths are returned even when missing so the
/// caller reports them instead of silently using another store.
pub fn resolve_store_path(explicit: Option<&Path>, configured: Option<&Path>, cwd: &Path) -> StoreSource {
    if let Some(path) = explicit.or(configured) {
        let path = if path.is_dir() {
            path.join(STORE_FILE_NAME)
        } else {
            path.to_path_buf()
        };
        return StoreSource::File(path);
    }

    let local = cwd.join(STORE_FILE_NAME);
    if local.is_file() {
        StoreSource::File(local)
    } else {
        StoreSource::Bundled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::name::{KIND_GIVEN, KIND_SURNAME};

    fn breakfast() -> NameStore {
        NameStore::new(vec![
            NameRecord::new(1, "spam", "eggs", "bacon", 1970, "sausage", "given"),
            NameRecord::new(2, "ham", "eggs", "bacon", 1970, "baked beans", "given"),
            NameRecord::new(3, "tomato", "mushrooms", "pancakes", 2000, "sausage", "surname"),
            NameRecord::new(4, "waffles", "porridge", "porridge", 2000, "baked beans", "given"),
        ])
        .unwrap()
    }

    #[test]
    fn names_by_kind_keeps_order() {
        let store = breakfast();
        let given: Vec<&str> = store
            .names_by_kind(KIND_GIVEN)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(given, vec!["spam", "ham", "waffles"]);

        let surnames = store.names_by_kind(KIND_SURNAME);
        assert_eq!(surnames.len(), 1);
        assert_eq!(surnames[0].name, "tomato");
        assert_eq!(surnames[0].culture, "pancakes");
        assert!(store.names_by_kind("nickname").is_empty());
    }

    #[test]
    fn distinct_values() {
        let store = breakfast();
        let cultures: Vec<_> = store.cultures().into_iter().collect();
        assert_eq!(cultures, vec!["bacon", "pancakes", "porridge"]);
        assert_eq!(store.genders().len(), 2);
        assert_eq!(store.kinds().len(), 2);
        assert_eq!(store.sources().len(), 3);
    }

    #[test]
    fn empty_store_yields_empty_results() {
        let store = NameStore::default();
        assert!(store.is_empty());
        assert!(store.names().is_empty());
        assert!(store.cultures().is_empty());
        assert!(store.names_by_kind(KIND_GIVEN).is_empty());
        assert_eq!(store.max_id(), None);
    }

    #[test]
    fn filter_has_no_fallback() {
        let store = breakfast();
        assert!(store.filter(&NameFilter::any().culture("toast")).is_empty());
        assert_eq!(store.filter(&NameFilter::any().culture("bacon")).len(), 2);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = NameStore::new(vec![
            NameRecord::new(7, "spam", "", "", 0, "", "given"),
            NameRecord::new(7, "ham", "", "", 0, "", "given"),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateId(7))));
    }

    #[test]
    fn overlong_fields_rejected() {
        let kind = "k".repeat(17);
        let result = NameStore::new(vec![NameRecord::new(3, "spam", "", "", 0, "", kind)]);
        match result {
            Err(StoreError::Limit { id, source }) => {
                assert_eq!(id, 3);
                assert_eq!(
                    source,
                    LimitError::TooLong { field: "kind", len: 17, max: 16 }
                );
            }
            other => panic!("expected invalid record, got {other:?}"),
        }
    }

    #[test]
    fn problems_reports_everything() {
        let records = vec![
            NameRecord::new(1, "a".repeat(65), "", "", 0, "", "given"),
            NameRecord::new(1, "spam", "", "", 0, "", "given"),
        ];
        assert_eq!(NameStore::problems(&records).len(), 2);
    }

    #[test]
    fn empty_name_is_accepted() {
        let store = NameStore::new(vec![NameRecord::new(1, "", "", "", 0, "", "given")]).unwrap();
        assert_eq!(store.names(), vec![""]);
    }

    #[test]
    fn bundled_store_loads() {
        let store = NameStore::bundled().unwrap();
        assert!(!store.is_empty());
        assert!(store.kinds().contains(KIND_GIVEN));
        assert!(store.kinds().contains(KIND_SURNAME));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.ron");
        let store = breakfast();
        store.save_to_ron(&path).unwrap();
        assert_eq!(NameStore::load_from_ron(&path).unwrap(), store);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ron");
        assert!(matches!(NameStore::load_from_ron(&path), Err(StoreError::NotFound(p)) if p == path));
    }

    #[test]
    fn copy_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILE_NAME);
        NameStore::copy_bundled_to(&path).unwrap();
        assert_eq!(NameStore::load_from_ron(&path).unwrap(), NameStore::bundled().unwrap());
        assert!(matches!(
            NameStore::copy_bundled_to(&path),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn export_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.ron");
        let store = breakfast();
        store.export_to(&path).unwrap();
        assert_eq!(NameStore::load_from_ron(&path).unwrap(), store);

        assert!(matches!(
            NameStore::default().export_to(&path),
            Err(StoreError::AlreadyExists(p)) if p == path
        ));
        assert_eq!(NameStore::load_from_ron(&path).unwrap(), store);
    }

    #[test]
    fn reindex_counts_from_offset() {
        let records = vec![
            NameRecord::new(40, "spam", "", "", 0, "", "given"),
            NameRecord::new(2, "ham", "", "", 0, "", "given"),
        ];
        let renumbered = reindex(records, 5);
        assert_eq!(renumbered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5, 6]);
        assert_eq!(renumbered[1].name, "ham");
    }

    #[test]
    fn import_continues_after_max_id() {
        let mut store = breakfast();
        let added = store
            .import(vec![
                NameRecord::new(1, "baked beans", "", "", 0, "", "surname"),
                NameRecord::new(1, "lobster", "", "", 0, "", "given"),
            ])
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(store.len(), 6);
        assert_eq!(store.max_id(), Some(6));
        assert_eq!(store.records()[5].name, "lobster");
    }

    #[test]
    fn import_into_empty_store_keeps_ids() {
        let mut store = NameStore::default();
        store
            .import(vec![NameRecord::new(12, "spam", "", "", 0, "", "given")])
            .unwrap();
        assert_eq!(store.max_id(), Some(12));
    }

    #[test]
    fn failed_import_leaves_store_unchanged() {
        let mut store = breakfast();
        let result = store.import(vec![NameRecord::new(1, "a".repeat(65), "", "", 0, "", "given")]);
        assert!(matches!(result, Err(StoreError::Limit { id: 5, .. })));
        assert_eq!(store, breakfast());
    }

    #[test]
    fn import_file_refuses_bundled_store() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.ron");
        breakfast().save_to_ron(&src).unwrap();
        assert!(matches!(
            NameStore::import_file(&src, &StoreSource::Bundled),
            Err(StoreError::BundledReadOnly)
        ));
    }

    #[test]
    fn resolution_order() {
        let cwd = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let configured = other.path().join("configured.ron");

        assert_eq!(resolve_store_path(None, None, cwd.path()), StoreSource::Bundled);

        let local = cwd.path().join(STORE_FILE_NAME);
        std::fs::write(&local, "[]").unwrap();
        assert_eq!(resolve_store_path(None, None, cwd.path()), StoreSource::File(local));

        assert_eq!(
            resolve_store_path(None, Some(&configured), cwd.path()),
            StoreSource::File(configured.clone())
        );

        assert_eq!(
            resolve_store_path(Some(other.path()), Some(&configured), cwd.path()),
            StoreSource::File(other.path().join(STORE_FILE_NAME))
        );
    }
}
