use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::{ColumnNames, Parameter};

/// Names a JSON file with [`DashboardConfig`] overrides.
pub const CONFIG_ENV: &str = "WATER_QUALITY_CONFIG";
/// Overrides [`DashboardConfig::data_path`].
pub const DATA_ENV: &str = "WATER_QUALITY_DATA";

/// Startup configuration. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    pub default_scheme_count: usize,
    pub default_parameters: Vec<Parameter>,
    /// Cap on summary-metric columns; `None` gives one column per scheme.
    pub max_metric_columns: Option<usize>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/cleaned_water_quality_data.csv"),
            columns: ColumnNames::default(),
            default_scheme_count: 3,
            default_parameters: Parameter::DEFAULTS.to_vec(),
            max_metric_columns: None,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the file named by `WATER_QUALITY_CONFIG`, then
    /// `WATER_QUALITY_DATA`.
    pub fn from_env() -> Result<Self> {
        let config_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let data_path = std::env::var_os(DATA_ENV).map(PathBuf::from);
        Self::resolve(config_file.as_deref(), data_path)
    }

    pub fn resolve(config_file: Option<&Path>, data_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(path) = data_path {
            config.data_path = path;
        }
        config.validate()?;
        log::debug!("Resolved configuration: {config:?}");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.max_metric_columns == Some(0) {
            bail!("max_metric_columns must be at least 1");
        }
        if self.columns.scheme == self.columns.sample {
            bail!(
                "scheme and sample columns must differ (both are '{}')",
                self.columns.scheme
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("dashboard.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn defaults_match_the_stock_dataset() {
        let config = DashboardConfig::resolve(None, None).unwrap();
        assert_eq!(
            config.data_path,
            PathBuf::from("data/cleaned_water_quality_data.csv")
        );
        assert_eq!(config.columns.scheme, "Water_Supply_Scheme");
        assert_eq!(config.columns.sample, "Sample_Code");
        assert_eq!(config.default_scheme_count, 3);
        assert_eq!(config.default_parameters, Parameter::DEFAULTS);
        assert_eq!(config.max_metric_columns, None);
    }

    #[test]
    fn file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{ "default_parameters": ["TDS", "pH"], "columns": { "scheme": "Location" } }"#,
        );
        let config = DashboardConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(config.default_parameters, [Parameter::Tds, Parameter::Ph]);
        assert_eq!(config.columns.scheme, "Location");
        assert_eq!(config.columns.sample, "Sample_Code");
        assert_eq!(config.max_metric_columns, None);
    }

    #[test]
    fn metric_column_cap_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{ "max_metric_columns": 4 }"#);
        let config = DashboardConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(config.max_metric_columns, Some(4));

        let path = write_config(dir.path(), r#"{ "max_metric_columns": null }"#);
        let config = DashboardConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(config.max_metric_columns, None);
    }

    #[test]
    fn data_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{ "data_path": "from_file.csv" }"#);
        let config =
            DashboardConfig::resolve(Some(&path), Some(PathBuf::from("override.csv"))).unwrap();
        assert_eq!(config.data_path, PathBuf::from("override.csv"));
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{ "default_parameters": ["Chloride"] }"#);
        let err = DashboardConfig::resolve(Some(&path), None).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config file"));
    }

    #[test]
    fn zero_metric_columns_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{ "max_metric_columns": 0 }"#);
        assert!(DashboardConfig::resolve(Some(&path), None).is_err());
    }

    #[test]
    fn identical_key_columns_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"{ "columns": { "scheme": "Id", "sample": "Id" } }"#,
        );
        let err = DashboardConfig::resolve(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::resolve(Some(&dir.path().join("absent.json")), None);
        assert!(err.is_err());
    }
}
