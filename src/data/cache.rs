use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::DataError;
use super::loader::load_file;
use super::model::{ColumnNames, WaterQualityDataset};

/// Identity of a source file as seen on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SourceKey {
    modified: Option<SystemTime>,
    len: u64,
}

impl SourceKey {
    fn probe(path: &Path) -> Result<Self, DataError> {
        let meta = std::fs::metadata(path).map_err(|e| DataError::io(path, e))?;
        Ok(Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

#[derive(Debug)]
struct CachedDataset {
    key: SourceKey,
    dataset: Arc<WaterQualityDataset>,
}

/// Memoised dataset loads.
///
/// A file is parsed again only when its modification time or size differs
/// from the cached entry. Owned by the caller and passed to whoever loads.
#[derive(Debug)]
pub struct DatasetCache {
    columns: ColumnNames,
    entries: HashMap<PathBuf, CachedDataset>,
    loads: usize,
}

impl DatasetCache {
    pub fn new(columns: ColumnNames) -> Self {
        Self {
            columns,
            entries: HashMap::new(),
            loads: 0,
        }
    }

    /// Return the dataset for `path`, parsing it only if the source changed.
    pub fn load(&mut self, path: &Path) -> Result<Arc<WaterQualityDataset>, DataError> {
        let key = SourceKey::probe(path)?;

        if let Some(entry) = self.entries.get(path) {
            if entry.key == key {
                log::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
            log::info!("{} changed on disk, reloading", path.display());
        }

        let dataset = Arc::new(load_file(path, &self.columns)?);
        self.loads += 1;
        self.entries.insert(
            path.to_path_buf(),
            CachedDataset {
                key,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Forget the entry for `path` so the next load parses it again.
    pub fn invalidate(&mut self, path: &Path) {
        if self.entries.remove(path).is_some() {
            log::debug!("Invalidated cache entry for {}", path.display());
        }
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        log::debug!("Clearing {} cached datasets", self.entries.len());
        self.entries.clear();
    }

    /// Number of cached sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of times a file was actually parsed.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::HEADER;

    fn write_rows(path: &Path, rows: &[&str]) {
        let mut text = format!("{HEADER}\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn unchanged_file_is_parsed_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wq.csv");
        write_rows(&path, &["S1,A,1,2,3,4,5,6,7,8"]);

        let mut cache = DatasetCache::new(ColumnNames::default());
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn changed_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wq.csv");
        write_rows(&path, &["S1,A,1,2,3,4,5,6,7,8"]);

        let mut cache = DatasetCache::new(ColumnNames::default());
        let first = cache.load(&path).unwrap();

        write_rows(&path, &["S1,A,1,2,3,4,5,6,7,8", "S2,B,1,2,3,4,5,6,7,8"]);
        let second = cache.load(&path).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn invalidate_forces_a_reparse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wq.csv");
        write_rows(&path, &["S1,A,1,2,3,4,5,6,7,8"]);

        let mut cache = DatasetCache::new(ColumnNames::default());
        cache.load(&path).unwrap();
        cache.invalidate(&path);
        cache.load(&path).unwrap();
        assert_eq!(cache.load_count(), 2);
    }

    #[test]
    fn clear_forgets_every_source() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        write_rows(&a, &["S1,A,1,2,3,4,5,6,7,8"]);
        write_rows(&b, &["S2,B,1,2,3,4,5,6,7,8"]);

        let mut cache = DatasetCache::new(ColumnNames::default());
        let before = cache.load(&a).unwrap();
        cache.load(&b).unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert_eq!(cache.len(), 0);

        let after = cache.load(&a).unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(cache.load_count(), 3);
    }

    #[test]
    fn missing_source_is_an_error_and_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::new(ColumnNames::default());
        let err = cache.load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert_eq!(cache.load_count(), 0);
    }

    #[test]
    fn structural_errors_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wq.csv");
        std::fs::write(&path, "Sample_Code,EC\nS1,1\n").unwrap();

        let mut cache = DatasetCache::new(ColumnNames::default());
        assert!(matches!(cache.load(&path), Err(DataError::MissingColumn(_))));

        write_rows(&path, &["S1,A,1,2,3,4,5,6,7,8"]);
        assert_eq!(cache.load(&path).unwrap().len(), 1);
    }
}
