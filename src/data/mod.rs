/// Data layer: core types, encoding-tolerant loading, and profiling.
///
/// Architecture:
/// ```text
///  .csv (encoding unknown)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  trial-decode + parse → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  headers, ragged rows, accepted encoding
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ profile   │  per-occurrence distinct values → TargetProfile
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod profile;
