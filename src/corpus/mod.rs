/// Corpus layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Corpus
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Corpus   │  Vec<SpeechRecord>, unique speakers/parties, year span
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply FilterCriteria → ordered record indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
