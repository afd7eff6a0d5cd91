use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ParameterColors;
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::error::DataError;
use crate::data::export::write_csv_file;
use crate::data::filter::{filter_by_scheme, Selection};
use crate::data::model::WaterQualityDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Message shown in the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Memoised loads; every open/reload goes through it.
    pub cache: DatasetCache,

    /// File the current dataset came from.
    pub source: PathBuf,

    /// Loaded dataset. Always present: startup aborts if the first load fails.
    pub dataset: Arc<WaterQualityDataset>,

    /// Scheme and parameter choices.
    pub selection: Selection,

    pub colors: ParameterColors,

    pub status: Option<Status>,
}

impl AppState {
    /// Load the configured data file, failing if it is missing or malformed.
    pub fn load(config: DashboardConfig) -> Result<Self, DataError> {
        let mut cache = DatasetCache::new(config.columns.clone());
        let source = config.data_path.clone();
        let dataset = cache.load(&source)?;
        let selection = default_selection(&config, &dataset);

        Ok(Self {
            config,
            cache,
            source,
            dataset,
            selection,
            colors: ParameterColors::default(),
            status: None,
        })
    }

    /// Switch to another file. On failure the current dataset stays.
    ///
    /// Only the shown source stays cached, so a replaced dataset is freed.
    pub fn open(&mut self, path: &Path) {
        match self.cache.load(path) {
            Ok(dataset) => {
                if self.source.as_path() != path {
                    self.cache.invalidate(&self.source);
                }
                self.selection = default_selection(&self.config, &dataset);
                self.dataset = dataset;
                self.source = path.to_path_buf();
                self.status = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }

    /// Re-read the current source if it changed on disk, keeping the
    /// selection for schemes that still exist.
    pub fn reload(&mut self) {
        let source = self.source.clone();
        match self.cache.load(&source) {
            Ok(dataset) if Arc::ptr_eq(&dataset, &self.dataset) => {
                self.status = Some(Status::Info("Data unchanged".to_string()));
            }
            Ok(dataset) => {
                log::debug!(
                    "Source parsed {} times this session, {} cached",
                    self.cache.load_count(),
                    self.cache.len()
                );
                self.selection.retain_known(&dataset);
                self.status = Some(Status::Info(format!("Reloaded {} samples", dataset.len())));
                self.dataset = dataset;
            }
            Err(e) => {
                log::error!("Failed to reload {}: {e}", source.display());
                self.status = Some(Status::Error(format!("Error: {e}")));
            }
        }
    }

    /// Drop everything cached and parse the current source again.
    pub fn force_reload(&mut self) {
        self.cache.clear();
        self.reload();
    }

    /// Write the rows matching the current scheme selection to `path`.
    pub fn export_filtered(&mut self, path: &Path) {
        let view = filter_by_scheme(self.dataset.records(), &self.selection.schemes);
        match write_csv_file(path, self.dataset.columns(), &view) {
            Ok(()) => {
                self.status = Some(Status::Info(format!(
                    "Saved {} rows to {}",
                    view.len(),
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status = Some(Status::Error(format!("Export failed: {e}")));
            }
        }
    }

    pub fn reset_selection(&mut self) {
        self.selection = default_selection(&self.config, &self.dataset);
    }
}

fn default_selection(config: &DashboardConfig, dataset: &WaterQualityDataset) -> Selection {
    Selection::defaults(
        dataset,
        config.default_scheme_count,
        &config.default_parameters,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::HEADER;
    use crate::data::model::Parameter;

    const ROWS: &str = "S1,A,10,7,,,,,,\nS2,B,20,8,,,,,,\nS3,C,30,,,,,,,\nS4,D,40,9,,,,,,\n";

    fn state_in(dir: &Path) -> AppState {
        let path = dir.join("wq.csv");
        std::fs::write(&path, format!("{HEADER}\n{ROWS}")).unwrap();
        let config = DashboardConfig {
            data_path: path,
            ..DashboardConfig::default()
        };
        AppState::load(config).unwrap()
    }

    #[test]
    fn startup_applies_default_selection() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        assert_eq!(state.selection.schemes, ["A", "B", "C"]);
        assert_eq!(state.selection.parameters, Parameter::DEFAULTS);
        assert!(state.status.is_none());
    }

    #[test]
    fn startup_fails_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            data_path: dir.path().join("missing.csv"),
            ..DashboardConfig::default()
        };
        assert!(AppState::load(config).is_err());
    }

    #[test]
    fn opening_a_bad_file_keeps_the_current_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "Sample_Code,EC\nS1,1\n").unwrap();

        state.open(&bad);

        assert_eq!(state.dataset.len(), 4);
        assert_eq!(state.source, dir.path().join("wq.csv"));
        assert!(matches!(&state.status, Some(Status::Error(msg)) if msg.contains("'Water_Supply_Scheme'")));
    }

    #[test]
    fn opening_a_new_file_resets_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.selection.clear_schemes();

        let other = dir.path().join("other.csv");
        std::fs::write(&other, format!("{HEADER}\nX1,Z,1,,,,,,,\n")).unwrap();
        state.open(&other);

        assert_eq!(state.selection.schemes, ["Z"]);
        assert_eq!(state.source, other);
    }

    #[test]
    fn switching_files_releases_the_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        let first = Arc::downgrade(&state.dataset);

        let other = dir.path().join("other.csv");
        std::fs::write(&other, format!("{HEADER}\nX1,Z,1,,,,,,,\n")).unwrap();
        state.open(&other);

        assert_eq!(state.cache.len(), 1);
        assert!(first.upgrade().is_none());

        // Reopening the current file is still a cache hit.
        state.open(&other);
        assert_eq!(state.cache.load_count(), 2);
    }

    #[test]
    fn failed_open_keeps_the_current_source_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.open(&dir.path().join("missing.csv"));

        state.reload();
        assert_eq!(state.cache.len(), 1);
        assert_eq!(state.cache.load_count(), 1);
    }

    #[test]
    fn reload_without_changes_reuses_the_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.reload();
        assert_eq!(state.cache.load_count(), 1);
        assert_eq!(state.status, Some(Status::Info("Data unchanged".into())));
    }

    #[test]
    fn reload_keeps_surviving_schemes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        std::fs::write(
            dir.path().join("wq.csv"),
            format!("{HEADER}\nS1,A,10,7,,,,,,\nS3,C,30,,,,,,,\nS9,E,1,1,,,,,,\n"),
        )
        .unwrap();

        state.reload();

        assert_eq!(state.dataset.len(), 3);
        assert_eq!(state.selection.schemes, ["A", "C"]);
    }

    #[test]
    fn force_reload_reparses_an_unchanged_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.force_reload();
        assert_eq!(state.cache.load_count(), 2);
        assert_eq!(state.dataset.len(), 4);
        assert!(matches!(state.status, Some(Status::Info(ref msg)) if msg == "Reloaded 4 samples"));
    }

    #[test]
    fn export_writes_the_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.selection.schemes = vec!["B".into(), "D".into()];
        let out = dir.path().join("filtered.csv");

        state.export_filtered(&out);

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, format!("{HEADER}\nS2,B,20,8,,,,,,\nS4,D,40,9,,,,,,\n"));
        assert!(matches!(state.status, Some(Status::Info(_))));
    }
}
