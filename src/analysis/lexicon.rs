use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Stopwords
// ---------------------------------------------------------------------------

/// English stopword set, lowercased, from the `stop-words` corpus.
pub fn english_stopwords() -> HashSet<String> {
    stop_words::get(stop_words::LANGUAGE::English)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Sentiment lexicon
// ---------------------------------------------------------------------------

/// Word polarity under the opinion lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
        }
    }
}

/// Fixed positive/negative word sets. The two sets are disjoint by
/// construction: a word listed in both source files is kept as positive
/// only, so classification is unambiguous.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

const POSITIVE_WORDS: &str = include_str!("../../assets/lexicon/positive-words.txt");
const NEGATIVE_WORDS: &str = include_str!("../../assets/lexicon/negative-words.txt");

fn parse_word_list(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_lowercase())
}

impl Lexicon {
    /// The opinion lexicon bundled with the application.
    pub fn bundled() -> Self {
        Self::from_word_lists(
            parse_word_list(POSITIVE_WORDS),
            parse_word_list(NEGATIVE_WORDS),
        )
    }

    /// Build a lexicon from two word iterators, lowercasing and enforcing
    /// disjointness (positive wins).
    pub fn from_word_lists<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item = String>,
        N: IntoIterator<Item = String>,
    {
        let positive: HashSet<String> = positive.into_iter().map(|w| w.to_lowercase()).collect();
        let negative: HashSet<String> = negative
            .into_iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !positive.contains(w))
            .collect();
        Lexicon { positive, negative }
    }

    /// Polarity of a (lowercased) word, or `None` if the word is absent
    /// from the lexicon. Absence is not an error; such words are simply
    /// excluded from sentiment-based aggregators.
    pub fn classify(&self, word: &str) -> Option<Sentiment> {
        if self.positive.contains(word) {
            Some(Sentiment::Positive)
        } else if self.negative.contains(word) {
            Some(Sentiment::Negative)
        } else {
            None
        }
    }

    /// Number of (positive, negative) entries.
    pub fn sizes(&self) -> (usize, usize) {
        (self.positive.len(), self.negative.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwords_contain_the_obvious() {
        let stopwords = english_stopwords();
        for w in ["the", "and", "is", "of"] {
            assert!(stopwords.contains(w), "missing stopword: {w}");
        }
        assert!(!stopwords.contains("freedom"));
    }

    #[test]
    fn bundled_lexicon_classifies_known_words() {
        let lexicon = Lexicon::bundled();
        assert_eq!(lexicon.classify("freedom"), Some(Sentiment::Positive));
        assert_eq!(lexicon.classify("poverty"), Some(Sentiment::Negative));
        assert_eq!(lexicon.classify("india"), None);
    }

    #[test]
    fn bundled_sets_are_disjoint() {
        let lexicon = Lexicon::bundled();
        for word in parse_word_list(POSITIVE_WORDS) {
            assert_ne!(
                lexicon.classify(&word),
                Some(Sentiment::Negative),
                "{word} classified as both polarities"
            );
        }
    }

    #[test]
    fn duplicate_entry_resolves_to_positive() {
        let lexicon = Lexicon::from_word_lists(
            vec!["Calm".to_string()],
            vec!["calm".to_string(), "angry".to_string()],
        );
        assert_eq!(lexicon.classify("calm"), Some(Sentiment::Positive));
        assert_eq!(lexicon.classify("angry"), Some(Sentiment::Negative));
        assert_eq!(lexicon.sizes(), (1, 1));
    }
}
