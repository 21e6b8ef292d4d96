/// Data layer: core types, loading, filtering, and export.
///
/// Architecture:
/// ```text
///  remote ms_stumpage.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → Dataset (memoized per session)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, observed year span
///   └──────────┘
///        │            Selection (price kind, types, quarters, years)
///        ▼                 │
///   ┌──────────┐           │
///   │  filter   │ ◄────────┘  project → FilteredView | Insufficient
///   └──────────┘
///        │
///        ├──► plot (one series per product type)
///        └──► export (CSV bytes for download)
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
