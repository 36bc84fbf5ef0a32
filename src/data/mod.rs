/// Data layer: variant tables, loading, and windowed scoring.
///
/// Architecture:
/// ```text
///  .tsv / .csv / whitespace-aligned text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  sniff delimiter, resolve columns → VariantTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  chromosome / range / allele-frequency predicate
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  scorer   │  sliding window → ScoreSeries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  CSV / JSON
///   └──────────┘
/// ```

pub mod columns;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod scorer;
