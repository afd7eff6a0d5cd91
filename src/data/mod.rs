/// Data layer: core types, loading, caching, filtering, aggregation, export.
///
/// Architecture:
/// ```text
///  .csv / .tsv
///        │
///        ▼
///   ┌──────────┐      ┌─────────┐
///   │  loader   │◀─────│  cache  │  reparse only when the source changes
///   └──────────┘      └─────────┘
///        │
///        ▼
///   ┌─────────────────────┐
///   │ WaterQualityDataset │  Vec<Record>, header, distinct schemes
///   └─────────────────────┘
///        │   Selection (schemes, parameters)
///        ▼
///   ┌──────────┐
///   │  filter   │  scheme membership → FilteredView
///   └──────────┘
///        │
///        ├──────────────▶ export     (filtered CSV download)
///        ▼
///   ┌───────────┐
///   │ aggregate │  series per parameter, mean per (scheme, parameter)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
