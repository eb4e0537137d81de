/// Data layer: row model, loading, and filtering.
///
/// Architecture:
/// ```text
///   metrics .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  header check → Vec<MeasurementRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  exact match on n / umbral / powDiff / primosMax
///   └──────────┘
///        │
///        ▼
///    FilteredSet  → stats::compute_means
/// ```

pub mod filter;
pub mod loader;
pub mod model;
