use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// SpeechRecord – one row of the corpus
// ---------------------------------------------------------------------------

/// A single speech (one row of the source table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRecord {
    /// Publication year. Unique per record, but the sequence has gaps:
    /// some years are simply absent from the dataset.
    pub year: i32,
    /// Name of the speech-giver.
    pub speaker: String,
    /// Party affiliation of the speaker.
    pub party: String,
    /// Full raw speech text. May be empty and may contain newlines.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Corpus – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed corpus with pre-computed value indices.
///
/// Loaded once and treated as immutable for the lifetime of the session;
/// every downstream stage takes it by shared reference.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// All speeches (rows), in source order.
    pub records: Vec<SpeechRecord>,
    /// Sorted set of unique speaker names.
    pub speakers: BTreeSet<String>,
    /// Sorted set of unique party names.
    pub parties: BTreeSet<String>,
    /// Smallest year in the corpus.
    pub year_min: i32,
    /// Largest year in the corpus. Years in between are not guaranteed
    /// to be present.
    pub year_max: i32,
}

impl Corpus {
    /// Build value indices from the loaded records.
    pub fn from_records(records: Vec<SpeechRecord>) -> Self {
        let mut speakers = BTreeSet::new();
        let mut parties = BTreeSet::new();
        let mut year_min = i32::MAX;
        let mut year_max = i32::MIN;

        for rec in &records {
            speakers.insert(rec.speaker.clone());
            parties.insert(rec.party.clone());
            year_min = year_min.min(rec.year);
            year_max = year_max.max(rec.year);
        }

        if records.is_empty() {
            year_min = 0;
            year_max = 0;
        }

        Corpus {
            records,
            speakers,
            parties,
            year_min,
            year_max,
        }
    }

    /// Number of speeches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
