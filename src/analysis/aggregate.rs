use std::cmp::Ordering;
use std::collections::HashMap;

use super::lexicon::{Lexicon, Sentiment};
use super::token::Token;

/// Fallback for the "top N words" aggregators when the caller passes 0.
pub const DEFAULT_MAX_WORDS: usize = 12;

fn effective_max(max_words: usize) -> usize {
    if max_words == 0 {
        DEFAULT_MAX_WORDS
    } else {
        max_words
    }
}

// ---------------------------------------------------------------------------
// Facet – optional grouping dimension
// ---------------------------------------------------------------------------

/// Grouping dimension for the word-ranking aggregators. A closed set rather
/// than a free-form column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    None,
    Year,
    Speaker,
    Party,
}

impl Facet {
    pub const ALL: [Facet; 4] = [Facet::None, Facet::Year, Facet::Speaker, Facet::Party];

    pub fn label(&self) -> &'static str {
        match self {
            Facet::None => "None",
            Facet::Year => "Year",
            Facet::Speaker => "Speaker",
            Facet::Party => "Party",
        }
    }

    fn key_of<T: Tagged>(&self, item: &T) -> Option<String> {
        match self {
            Facet::None => None,
            Facet::Year => Some(item.year().to_string()),
            Facet::Speaker => Some(item.speaker().to_string()),
            Facet::Party => Some(item.party().to_string()),
        }
    }
}

/// Items carrying the source-record metadata. Lets the top-N machinery work
/// over both plain and sentiment-labelled tokens.
trait Tagged {
    fn year(&self) -> i32;
    fn speaker(&self) -> &str;
    fn party(&self) -> &str;
}

impl Tagged for Token<'_> {
    fn year(&self) -> i32 {
        self.year
    }
    fn speaker(&self) -> &str {
        self.speaker
    }
    fn party(&self) -> &str {
        self.party
    }
}

impl Tagged for SentimentWord<'_> {
    fn year(&self) -> i32 {
        self.year
    }
    fn speaker(&self) -> &str {
        self.speaker
    }
    fn party(&self) -> &str {
        self.party
    }
}

// ---------------------------------------------------------------------------
// Speech length
// ---------------------------------------------------------------------------

/// Token count of one speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechLength {
    pub year: i32,
    pub speaker: String,
    pub party: String,
    pub n_tokens: u32,
}

/// Tokens per (year, speaker, party), sorted by year. Speeches that
/// produced zero tokens do not appear: absence of data stays visible as a
/// gap rather than a zero.
pub fn speech_lengths(tokens: &[Token]) -> Vec<SpeechLength> {
    let mut rows: Vec<SpeechLength> = Vec::new();
    let mut index: HashMap<(i32, &str, &str), usize> = HashMap::new();

    for t in tokens {
        let slot = *index.entry((t.year, t.speaker, t.party)).or_insert_with(|| {
            rows.push(SpeechLength {
                year: t.year,
                speaker: t.speaker.to_string(),
                party: t.party.to_string(),
                n_tokens: 0,
            });
            rows.len() - 1
        });
        rows[slot].n_tokens += 1;
    }

    rows.sort_by_key(|r| r.year);
    rows
}

// ---------------------------------------------------------------------------
// Word frequency
// ---------------------------------------------------------------------------

/// One bar of the frequent-words ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    /// Facet group the row belongs to; `None` for an unfaceted ranking.
    pub facet: Option<String>,
    pub word: String,
    pub n: u32,
}

/// Top-N words by occurrence count. With a facet the ranking is computed
/// per facet group; groups are emitted in ascending key order. Ties break
/// by first-encountered order. A `max_words` of 0 means
/// [`DEFAULT_MAX_WORDS`].
pub fn word_counts(tokens: &[Token], facet: Facet, max_words: usize) -> Vec<WordCount> {
    let max = effective_max(max_words);

    let mut rows: Vec<WordCount> = Vec::new();
    let mut index: HashMap<(Option<String>, String), usize> = HashMap::new();

    for t in tokens {
        let key = (facet.key_of(t), t.word.clone());
        match index.get(&key) {
            Some(&slot) => rows[slot].n += 1,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(WordCount {
                    facet: key.0,
                    word: key.1,
                    n: 1,
                });
            }
        }
    }

    top_n_per_group(rows, max, |r| r.facet.clone(), |r| r.n)
}

/// Stable per-group top-N: rows arrive in first-encountered order, groups
/// are sorted ascending by key, rows within a group descending by weight.
fn top_n_per_group<R, K, W>(rows: Vec<R>, max: usize, group_key: K, weight: W) -> Vec<R>
where
    K: Fn(&R) -> Option<String>,
    W: Fn(&R) -> u32,
{
    let mut groups: Vec<(Option<String>, Vec<R>)> = Vec::new();
    for row in rows {
        let key = group_key(&row);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(row),
            None => groups.push((key, vec![row])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut out = Vec::new();
    for (_, mut members) in groups {
        // Stable sort keeps first-encountered order among equal counts.
        members.sort_by(|a, b| weight(b).cmp(&weight(a)));
        members.truncate(max);
        out.extend(members);
    }
    out
}

// ---------------------------------------------------------------------------
// TF-IDF
// ---------------------------------------------------------------------------

/// Score of one (year, word) pair; each distinct year is one "document".
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfRow {
    pub year: i32,
    pub speaker: String,
    pub party: String,
    pub word: String,
    /// Occurrences of the word in that year's tokens.
    pub n: u32,
    pub tf_idf: f64,
}

/// TF-IDF over the token stream, sorted by descending score.
///
/// tf(word, year)  = n(word, year) / total tokens in year
/// idf(word)       = ln(number of years / number of years containing word)
///
/// Years appear only if they contributed at least one token, so every
/// denominator is positive and no score can be NaN. A word present in every
/// year has idf = 0 and therefore score 0.
pub fn tf_idf(tokens: &[Token]) -> Vec<TfIdfRow> {
    let mut rows: Vec<TfIdfRow> = Vec::new();
    let mut index: HashMap<(i32, String), usize> = HashMap::new();
    let mut year_totals: HashMap<i32, u32> = HashMap::new();

    for t in tokens {
        *year_totals.entry(t.year).or_insert(0) += 1;
        let key = (t.year, t.word.clone());
        match index.get(&key) {
            Some(&slot) => rows[slot].n += 1,
            None => {
                index.insert(key, rows.len());
                rows.push(TfIdfRow {
                    year: t.year,
                    speaker: t.speaker.to_string(),
                    party: t.party.to_string(),
                    word: t.word.clone(),
                    n: 1,
                    tf_idf: 0.0,
                });
            }
        }
    }

    // Document frequency: in how many years does each word occur?
    let mut doc_freq: HashMap<String, u32> = HashMap::new();
    for row in &rows {
        *doc_freq.entry(row.word.clone()).or_insert(0) += 1;
    }
    let n_years = year_totals.len() as f64;

    for row in &mut rows {
        let tf = f64::from(row.n) / f64::from(year_totals[&row.year]);
        let idf = (n_years / f64::from(doc_freq[&row.word])).ln();
        row.tf_idf = tf * idf;
    }

    // Stable: equal scores keep first-appearance order.
    rows.sort_by(|a, b| b.tf_idf.partial_cmp(&a.tf_idf).unwrap_or(Ordering::Equal));
    rows
}

/// Per-year top-N slice of a descending-score TF-IDF table, with the years
/// emitted in ascending order. Display helper for the faceted TF-IDF plot.
pub fn top_tf_idf_per_year(rows: &[TfIdfRow], max_words: usize) -> Vec<TfIdfRow> {
    let max = effective_max(max_words);

    let mut per_year: Vec<(i32, Vec<TfIdfRow>)> = Vec::new();
    for row in rows {
        match per_year.iter_mut().find(|(y, _)| *y == row.year) {
            Some((_, members)) => {
                if members.len() < max {
                    members.push(row.clone());
                }
            }
            None => per_year.push((row.year, vec![row.clone()])),
        }
    }
    per_year.sort_by_key(|(year, _)| *year);
    per_year.into_iter().flat_map(|(_, rows)| rows).collect()
}

// ---------------------------------------------------------------------------
// Sentiment join
// ---------------------------------------------------------------------------

/// A token that matched the opinion lexicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentWord<'a> {
    pub year: i32,
    pub speaker: &'a str,
    pub party: &'a str,
    pub word: String,
    pub sentiment: Sentiment,
}

/// Inner join of the token stream against the lexicon. Tokens matching
/// neither polarity are dropped from this output only; other aggregators
/// run independently on the full stream.
pub fn sentiment_words<'a>(tokens: &[Token<'a>], lexicon: &Lexicon) -> Vec<SentimentWord<'a>> {
    tokens
        .iter()
        .filter_map(|t| {
            lexicon.classify(&t.word).map(|sentiment| SentimentWord {
                year: t.year,
                speaker: t.speaker,
                party: t.party,
                word: t.word.clone(),
                sentiment,
            })
        })
        .collect()
}

/// One bar of the positive/negative words ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentWordCount {
    pub facet: Option<String>,
    pub word: String,
    pub sentiment: Sentiment,
    pub n: u32,
}

/// Top-N sentiment-bearing words, per facet group when faceted. Same
/// ranking rules as [`word_counts`].
pub fn sentiment_word_counts(
    words: &[SentimentWord],
    facet: Facet,
    max_words: usize,
) -> Vec<SentimentWordCount> {
    let max = effective_max(max_words);

    let mut rows: Vec<SentimentWordCount> = Vec::new();
    let mut index: HashMap<(Option<String>, String), usize> = HashMap::new();

    for w in words {
        let key = (facet.key_of(w), w.word.clone());
        match index.get(&key) {
            Some(&slot) => rows[slot].n += 1,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(SentimentWordCount {
                    facet: key.0,
                    word: key.1,
                    sentiment: w.sentiment,
                    n: 1,
                });
            }
        }
    }

    top_n_per_group(rows, max, |r| r.facet.clone(), |r| r.n)
}

// ---------------------------------------------------------------------------
// Net sentiment
// ---------------------------------------------------------------------------

/// Positive/negative balance of one speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetSentimentRow {
    pub year: i32,
    pub speaker: String,
    pub party: String,
    pub positive: u32,
    pub negative: u32,
    /// positive − negative, exactly.
    pub net: i64,
}

/// Sentiment balance per (year, speaker, party), sorted by year. Groups
/// come from the join output, so a speech with no sentiment-bearing tokens
/// never appears as a zero row.
pub fn net_sentiment(words: &[SentimentWord]) -> Vec<NetSentimentRow> {
    let mut rows: Vec<NetSentimentRow> = Vec::new();
    let mut index: HashMap<(i32, &str, &str), usize> = HashMap::new();

    for w in words {
        let slot = *index.entry((w.year, w.speaker, w.party)).or_insert_with(|| {
            rows.push(NetSentimentRow {
                year: w.year,
                speaker: w.speaker.to_string(),
                party: w.party.to_string(),
                positive: 0,
                negative: 0,
                net: 0,
            });
            rows.len() - 1
        });
        match w.sentiment {
            Sentiment::Positive => rows[slot].positive += 1,
            Sentiment::Negative => rows[slot].negative += 1,
        }
    }

    for row in &mut rows {
        row.net = i64::from(row.positive) - i64::from(row.negative);
    }

    rows.sort_by_key(|r| r.year);
    rows
}

// ---------------------------------------------------------------------------
// Single-word trend
// ---------------------------------------------------------------------------

/// Count of one chosen word in one speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordTrendRow {
    pub year: i32,
    pub speaker: String,
    pub party: String,
    pub n: u32,
}

/// Occurrences of `word` (case-insensitive) per (year, speaker, party),
/// sorted by year. Every group present in the token stream gets a row, so
/// a genuine zero count is plotted as 0 while a speech that produced no
/// tokens at all stays absent.
pub fn word_trend(tokens: &[Token], word: &str) -> Vec<WordTrendRow> {
    let needle = word.to_lowercase();

    let mut rows: Vec<WordTrendRow> = Vec::new();
    let mut index: HashMap<(i32, &str, &str), usize> = HashMap::new();

    for t in tokens {
        let slot = *index.entry((t.year, t.speaker, t.party)).or_insert_with(|| {
            rows.push(WordTrendRow {
                year: t.year,
                speaker: t.speaker.to_string(),
                party: t.party.to_string(),
                n: 0,
            });
            rows.len() - 1
        });
        if t.word == needle {
            rows[slot].n += 1;
        }
    }

    rows.sort_by_key(|r| r.year);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::Lexicon;
    use crate::analysis::token::tokenize;
    use crate::corpus::model::{Corpus, SpeechRecord};

    fn corpus(rows: &[(i32, &str, &str, &str)]) -> Corpus {
        Corpus::from_records(
            rows.iter()
                .map(|&(year, speaker, party, text)| SpeechRecord {
                    year,
                    speaker: speaker.to_string(),
                    party: party.to_string(),
                    text: text.to_string(),
                })
                .collect(),
        )
    }

    fn all_tokens(corpus: &Corpus) -> Vec<Token<'_>> {
        let indices: Vec<usize> = (0..corpus.len()).collect();
        tokenize(corpus, &indices)
    }

    fn test_lexicon() -> Lexicon {
        Lexicon::from_word_lists(
            ["freedom", "hope", "progress"].map(String::from),
            ["poverty", "fear"].map(String::from),
        )
    }

    #[test]
    fn speech_lengths_count_tokens_per_speech() {
        let corpus = corpus(&[
            (1947, "Nehru", "INC", "freedom at midnight"),
            (1948, "Nehru", "INC", ""),
            (1998, "Vajpayee", "BJP", "india shining"),
        ]);
        let lengths = speech_lengths(&all_tokens(&corpus));

        assert_eq!(lengths.len(), 2); // the empty 1948 speech is absent
        assert_eq!(lengths[0].year, 1947);
        assert_eq!(lengths[0].n_tokens, 3);
        assert_eq!(lengths[1].n_tokens, 2);
    }

    #[test]
    fn word_counts_rank_descending_with_stable_ties() {
        let corpus = corpus(&[(1947, "Nehru", "INC", "unity unity peace peace work")]);
        let counts = word_counts(&all_tokens(&corpus), Facet::None, 10);

        let ranked: Vec<(&str, u32)> = counts.iter().map(|c| (c.word.as_str(), c.n)).collect();
        // unity and peace tie at 2; unity was seen first.
        assert_eq!(ranked, vec![("unity", 2), ("peace", 2), ("work", 1)]);
    }

    #[test]
    fn word_counts_never_exceed_max() {
        let corpus = corpus(&[(1947, "Nehru", "INC", "a b c d e f g h")]);
        let counts = word_counts(&all_tokens(&corpus), Facet::None, 3);
        assert_eq!(counts.len(), 3);
        assert!(counts.iter().all(|c| c.n >= 1));
    }

    #[test]
    fn word_counts_zero_max_defaults() {
        let text = "one two three four five six seven eight nine ten eleven twelve thirteen";
        let corpus = corpus(&[(1947, "Nehru", "INC", text)]);
        let counts = word_counts(&all_tokens(&corpus), Facet::None, 0);
        assert_eq!(counts.len(), DEFAULT_MAX_WORDS);
    }

    #[test]
    fn word_counts_facet_ranks_per_group() {
        let corpus = corpus(&[
            (1947, "Nehru", "INC", "freedom freedom unity"),
            (1998, "Vajpayee", "BJP", "nation nation nation"),
        ]);
        let counts = word_counts(&all_tokens(&corpus), Facet::Year, 1);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].facet.as_deref(), Some("1947"));
        assert_eq!(counts[0].word, "freedom");
        assert_eq!(counts[1].facet.as_deref(), Some("1998"));
        assert_eq!(counts[1].word, "nation");
    }

    #[test]
    fn word_counts_match_brute_force() {
        let corpus = corpus(&[
            (1947, "Nehru", "INC", "freedom unity freedom peace"),
            (1948, "Nehru", "INC", "peace peace freedom"),
        ]);
        let tokens = all_tokens(&corpus);
        let counts = word_counts(&tokens, Facet::None, 100);

        for c in &counts {
            let brute = tokens.iter().filter(|t| t.word == c.word).count() as u32;
            assert_eq!(c.n, brute, "count mismatch for {}", c.word);
        }
    }

    #[test]
    fn tf_idf_scores_are_non_negative_and_everywhere_words_score_zero() {
        let corpus = corpus(&[
            (1947, "Nehru", "INC", "india freedom"),
            (1948, "Nehru", "INC", "india unity"),
            (1949, "Nehru", "INC", "india work"),
        ]);
        let rows = tf_idf(&all_tokens(&corpus));

        assert!(rows.iter().all(|r| r.tf_idf >= 0.0));
        let india = rows.iter().find(|r| r.word == "india").unwrap();
        assert_eq!(india.tf_idf, 0.0);
    }

    #[test]
    fn tf_idf_sorted_descending_and_unique_word_ranks_top() {
        let corpus = corpus(&[
            (1947, "Nehru", "INC", "india india tryst"),
            (1948, "Nehru", "INC", "india india india"),
        ]);
        let rows = tf_idf(&all_tokens(&corpus));

        assert!(rows.windows(2).all(|w| w[0].tf_idf >= w[1].tf_idf));
        // "tryst" appears in exactly one year: top of the ranking.
        assert_eq!(rows[0].word, "tryst");
        assert_eq!(rows[0].year, 1947);
    }

    #[test]
    fn tf_idf_empty_input_is_empty() {
        assert!(tf_idf(&[]).is_empty());
    }

    #[test]
    fn top_tf_idf_per_year_limits_and_orders() {
        let corpus = corpus(&[
            (1948, "Nehru", "INC", "unity unity work hope"),
            (1947, "Nehru", "INC", "tryst destiny midnight"),
        ]);
        let rows = tf_idf(&all_tokens(&corpus));
        let top = top_tf_idf_per_year(&rows, 2);

        let years: Vec<i32> = top.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1947, 1947, 1948, 1948]);
    }

    #[test]
    fn sentiment_join_drops_unknown_words() {
        let corpus = corpus(&[(1947, "Nehru", "INC", "freedom from poverty and fear")]);
        let tokens = all_tokens(&corpus);
        let words = sentiment_words(&tokens, &test_lexicon());

        let labelled: Vec<(&str, Sentiment)> = words
            .iter()
            .map(|w| (w.word.as_str(), w.sentiment))
            .collect();
        assert_eq!(
            labelled,
            vec![
                ("freedom", Sentiment::Positive),
                ("poverty", Sentiment::Negative),
                ("fear", Sentiment::Negative),
            ]
        );
    }

    #[test]
    fn sentiment_word_counts_keep_polarity() {
        let corpus = corpus(&[(1947, "Nehru", "INC", "hope hope poverty")]);
        let tokens = all_tokens(&corpus);
        let words = sentiment_words(&tokens, &test_lexicon());
        let counts = sentiment_word_counts(&words, Facet::None, 10);

        assert_eq!(counts[0].word, "hope");
        assert_eq!(counts[0].sentiment, Sentiment::Positive);
        assert_eq!(counts[0].n, 2);
        assert_eq!(counts[1].sentiment, Sentiment::Negative);
    }

    #[test]
    fn net_sentiment_is_exact_difference() {
        let corpus = corpus(&[
            (1947, "Nehru", "INC", "freedom hope poverty"),
            (1948, "Nehru", "INC", "fear fear"),
            (1949, "Nehru", "INC", "india"), // no sentiment-bearing tokens
        ]);
        let tokens = all_tokens(&corpus);
        let rows = net_sentiment(&sentiment_words(&tokens, &test_lexicon()));

        assert_eq!(rows.len(), 2); // 1949 omitted, not a zero row
        assert_eq!((rows[0].positive, rows[0].negative, rows[0].net), (2, 1, 1));
        assert_eq!((rows[1].positive, rows[1].negative, rows[1].net), (0, 2, -2));
        assert!(rows
            .iter()
            .all(|r| r.net == i64::from(r.positive) - i64::from(r.negative)));
    }

    #[test]
    fn word_trend_zero_fills_present_groups() {
        let corpus = corpus(&[
            (1947, "Nehru", "INC", "freedom freedom now"),
            (1948, "Nehru", "INC", "unity above all"),
        ]);
        let rows = word_trend(&all_tokens(&corpus), "FREEDOM");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].n, 2);
        assert_eq!(rows[1].n, 0); // genuine zero for a year that has tokens
    }

    #[test]
    fn aggregators_accept_empty_input() {
        let lexicon = test_lexicon();
        assert!(speech_lengths(&[]).is_empty());
        assert!(word_counts(&[], Facet::Party, 5).is_empty());
        assert!(tf_idf(&[]).is_empty());
        assert!(sentiment_words(&[], &lexicon).is_empty());
        assert!(net_sentiment(&[]).is_empty());
        assert!(word_trend(&[], "freedom").is_empty());
    }
}
