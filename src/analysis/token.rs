use std::collections::HashSet;

use crate::corpus::model::Corpus;

// ---------------------------------------------------------------------------
// Token – one word occurrence tagged with its source metadata
// ---------------------------------------------------------------------------

/// A single word occurrence. Borrows the speaker/party labels from the
/// corpus record it came from; owns the lowercased word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub year: i32,
    pub speaker: &'a str,
    pub party: &'a str,
    pub word: String,
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Lowercase word tokens of a single text: maximal runs of alphabetic
/// characters. Digits and punctuation act as separators, so "mid-1947s"
/// yields "mid" and "s".
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Tokenize the selected records of a corpus.
///
/// Token order follows text order within a record and index order across
/// records. A record with no extractable words (empty or all-punctuation
/// text) contributes zero tokens rather than failing.
pub fn tokenize<'a>(corpus: &'a Corpus, indices: &[usize]) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    for &idx in indices {
        let rec = &corpus.records[idx];
        tokens.extend(words(&rec.text).map(|word| Token {
            year: rec.year,
            speaker: &rec.speaker,
            party: &rec.party,
            word,
        }));
    }
    tokens
}

// ---------------------------------------------------------------------------
// Stopword filter
// ---------------------------------------------------------------------------

/// Drop tokens whose word is in the stopword set. Exact match on the
/// lowercased word, no stemming; order is preserved.
pub fn remove_stopwords<'a>(
    mut tokens: Vec<Token<'a>>,
    stopwords: &HashSet<String>,
) -> Vec<Token<'a>> {
    tokens.retain(|t| !stopwords.contains(&t.word));
    tokens
}
