//! Data layer: core types, loading, validation, filtering and summaries.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  schema  │  required columns present?
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  geo == region, sorted by year → RegionSlice
//!   └──────────┘
//!        │
//!        ├──► series   metric columns → line chart points
//!        └──► climate  pct_* columns → tidy records → stacked bands
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod series;
pub mod summary;

/// Region identifier column.
pub const GEO_COLUMN: &str = "geo";
/// Time index column.
pub const YEAR_COLUMN: &str = "year";
