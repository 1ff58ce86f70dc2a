use std::collections::BTreeSet;

use thiserror::Error;

use super::model::Corpus;

// ---------------------------------------------------------------------------
// FilterCriteria: which records are selected
// ---------------------------------------------------------------------------

/// Value object fully determining the filter stage.
///
/// A record passes when its year falls inside `year_range` (inclusive) and
/// its speaker and party are members of the respective sets. A speaker or
/// party name that does not occur in the corpus is allowed; it just matches
/// nothing. An empty set selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive (min, max) year bounds.
    pub year_range: (i32, i32),
    /// Selected speaker names.
    pub speakers: BTreeSet<String>,
    /// Selected party names.
    pub parties: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria selecting the entire corpus.
    pub fn all_of(corpus: &Corpus) -> Self {
        FilterCriteria {
            year_range: (corpus.year_min, corpus.year_max),
            speakers: corpus.speakers.clone(),
            parties: corpus.parties.clone(),
        }
    }
}

/// The only fatal filter input: inverted year bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid year range: minimum {min} is greater than maximum {max}")]
    InvalidYearRange { min: i32, max: i32 },
}

/// Return indices of records that pass the criteria, in corpus order.
///
/// Selecting zero records is a valid outcome, not an error; downstream
/// stages must accept an empty index slice.
pub fn filtered_indices(
    corpus: &Corpus,
    criteria: &FilterCriteria,
) -> Result<Vec<usize>, FilterError> {
    let (min, max) = criteria.year_range;
    if min > max {
        return Err(FilterError::InvalidYearRange { min, max });
    }

    Ok(corpus
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            min <= rec.year
                && rec.year <= max
                && criteria.speakers.contains(&rec.speaker)
                && criteria.parties.contains(&rec.party)
        })
        .map(|(i, _)| i)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::model::SpeechRecord;

    fn rec(year: i32, speaker: &str, party: &str) -> SpeechRecord {
        SpeechRecord {
            year,
            speaker: speaker.to_string(),
            party: party.to_string(),
            text: format!("speech of {year}"),
        }
    }

    fn sample_corpus() -> Corpus {
        Corpus::from_records(vec![
            rec(1947, "Nehru", "INC"),
            rec(1948, "Nehru", "INC"),
            rec(1977, "Desai", "Janata Party"),
            rec(1998, "Vajpayee", "BJP"),
        ])
    }

    #[test]
    fn all_of_selects_everything() {
        let corpus = sample_corpus();
        let indices = filtered_indices(&corpus, &FilterCriteria::all_of(&corpus)).unwrap();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn year_range_is_inclusive() {
        let corpus = sample_corpus();
        let mut criteria = FilterCriteria::all_of(&corpus);
        criteria.year_range = (1948, 1977);
        let indices = filtered_indices(&corpus, &criteria).unwrap();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn speaker_and_party_sets_intersect() {
        let corpus = sample_corpus();
        let mut criteria = FilterCriteria::all_of(&corpus);
        criteria.parties = ["BJP".to_string()].into();
        let indices = filtered_indices(&corpus, &criteria).unwrap();
        assert_eq!(indices, vec![3]);
    }

    #[test]
    fn unknown_party_matches_nothing() {
        let corpus = sample_corpus();
        let mut criteria = FilterCriteria::all_of(&corpus);
        criteria.parties = ["No Such Party".to_string()].into();
        let indices = filtered_indices(&corpus, &criteria).unwrap();
        assert!(indices.is_empty());
    }

    #[test]
    fn empty_speaker_set_matches_nothing() {
        let corpus = sample_corpus();
        let mut criteria = FilterCriteria::all_of(&corpus);
        criteria.speakers.clear();
        let indices = filtered_indices(&corpus, &criteria).unwrap();
        assert!(indices.is_empty());
    }

    #[test]
    fn inverted_year_range_fails_fast() {
        let corpus = sample_corpus();
        let mut criteria = FilterCriteria::all_of(&corpus);
        criteria.year_range = (1998, 1947);
        let err = filtered_indices(&corpus, &criteria).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidYearRange {
                min: 1998,
                max: 1947
            }
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let corpus = sample_corpus();
        let mut criteria = FilterCriteria::all_of(&corpus);
        criteria.year_range = (1947, 1977);

        let first = filtered_indices(&corpus, &criteria).unwrap();
        let narrowed = Corpus::from_records(
            first
                .iter()
                .map(|&i| corpus.records[i].clone())
                .collect(),
        );
        let second = filtered_indices(&narrowed, &criteria).unwrap();
        assert_eq!(second.len(), first.len());
    }
}
