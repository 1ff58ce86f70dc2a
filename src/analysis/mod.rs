/// Analysis layer: the stateless text-analytics pipeline.
///
/// ```text
///   Corpus + filtered indices
///        │
///        ▼
///   ┌──────────┐
///   │ tokenize  │  lowercase word tokens tagged with (year, speaker, party)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ remove_stopwords│  drop tokens in the stopword set
///   └────────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ aggregators │  word counts · TF-IDF · sentiment join · net sentiment
///   └────────────┘
/// ```
///
/// Every stage is a pure function of its inputs; the hosting UI re-invokes
/// the pipeline when a parameter changes and owns any memoization.

pub mod aggregate;
pub mod lexicon;
pub mod token;
