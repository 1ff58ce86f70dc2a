use std::collections::HashSet;

use crate::analysis::aggregate::{
    self, Facet, NetSentimentRow, SentimentWordCount, SpeechLength, TfIdfRow, WordCount,
    WordTrendRow, DEFAULT_MAX_WORDS,
};
use crate::analysis::lexicon::{english_stopwords, Lexicon};
use crate::analysis::token;
use crate::color::ColorMap;
use crate::corpus::filter::{filtered_indices, FilterCriteria};
use crate::corpus::model::Corpus;

/// Example word pre-filled in the trend input.
pub const DEFAULT_TREND_WORD: &str = "freedom";

// ---------------------------------------------------------------------------
// Plot selection
// ---------------------------------------------------------------------------

/// The six available visualizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    #[default]
    SpeechLength,
    FrequentWords,
    ImportantWords,
    SentimentWords,
    NetSentiment,
    WordTrend,
}

impl PlotKind {
    pub const ALL: [PlotKind; 6] = [
        PlotKind::SpeechLength,
        PlotKind::FrequentWords,
        PlotKind::ImportantWords,
        PlotKind::SentimentWords,
        PlotKind::NetSentiment,
        PlotKind::WordTrend,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlotKind::SpeechLength => "Speech Length",
            PlotKind::FrequentWords => "Most Frequent Words",
            PlotKind::ImportantWords => "Most Important Words",
            PlotKind::SentimentWords => "+/- Sentiment Words",
            PlotKind::NetSentiment => "Net Sentiment",
            PlotKind::WordTrend => "Specific Word Trend",
        }
    }

    /// One-paragraph description shown under the plot.
    pub fn explanation(&self) -> &'static str {
        match self {
            PlotKind::SpeechLength => {
                "'Speech Length' is a simple count of all words in a speech over time."
            }
            PlotKind::FrequentWords => {
                "'Most Frequent Words' plots the most frequent words among included speeches, \
                 after excluding a generic list of stopwords (a, the, etc). It can be faceted \
                 by year, speaker, or party."
            }
            PlotKind::ImportantWords => {
                "'Most Important Words' sorts words according to TF-IDF, a statistic that \
                 measures the 'importance' of a word in a speech by adjusting its frequency \
                 by how rarely it is otherwise used."
            }
            PlotKind::SentimentWords => {
                "'+/- Sentiment Words' labels words among included speeches as either positive \
                 or negative using an opinion lexicon, then plots the most frequent ones."
            }
            PlotKind::NetSentiment => {
                "'Net Sentiment' plots the difference between the number of positive and \
                 negative words as determined by the opinion lexicon."
            }
            PlotKind::WordTrend => {
                "'Specific Word Trend' plots the counts of any user-given word. 'freedom' is \
                 provided as an example."
            }
        }
    }

    /// Whether the max-words input applies to this plot.
    pub fn uses_max_words(&self) -> bool {
        matches!(
            self,
            PlotKind::FrequentWords | PlotKind::ImportantWords | PlotKind::SentimentWords
        )
    }

    /// Whether the facet selector applies to this plot.
    pub fn uses_facet(&self) -> bool {
        matches!(self, PlotKind::FrequentWords | PlotKind::SentimentWords)
    }
}

// ---------------------------------------------------------------------------
// Pipeline request and cached output
// ---------------------------------------------------------------------------

/// Everything that determines one pipeline run. The cache below is keyed on
/// this value, so the pipeline reruns only when an input actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    pub criteria: FilterCriteria,
    pub kind: PlotKind,
    pub max_words: usize,
    pub facet: Facet,
    pub trend_word: String,
}

/// Aggregator output, one variant per plot kind.
#[derive(Debug, Clone)]
pub enum PlotData {
    Lengths(Vec<SpeechLength>),
    Words(Vec<WordCount>),
    TfIdf(Vec<TfIdfRow>),
    SentimentWords(Vec<SentimentWordCount>),
    Net(Vec<NetSentimentRow>),
    Trend(Vec<WordTrendRow>),
}

/// One computed pipeline result.
#[derive(Debug, Clone)]
pub struct PlotOutput {
    /// Speeches passing the filter.
    pub n_included: usize,
    pub data: PlotData,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded corpus (None until a file is loaded).
    pub corpus: Option<Corpus>,

    /// Current filter selections.
    pub criteria: FilterCriteria,

    /// Which plot is shown.
    pub plot_kind: PlotKind,

    /// Top-N cutoff for the word-ranking plots.
    pub max_words: usize,

    /// Optional grouping dimension for the word-ranking plots.
    pub facet: Facet,

    /// Word tracked by the trend plot.
    pub trend_word: String,

    /// Party → colour mapping for the loaded corpus.
    pub party_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    stopwords: HashSet<String>,
    lexicon: Lexicon,

    /// Last computed pipeline result, keyed by the request that produced it.
    cache: Option<(PlotRequest, PlotOutput)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            corpus: None,
            criteria: FilterCriteria {
                year_range: (0, 0),
                speakers: Default::default(),
                parties: Default::default(),
            },
            plot_kind: PlotKind::default(),
            max_words: DEFAULT_MAX_WORDS,
            facet: Facet::None,
            trend_word: DEFAULT_TREND_WORD.to_string(),
            party_colors: None,
            status_message: None,
            stopwords: english_stopwords(),
            lexicon: Lexicon::bundled(),
            cache: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded corpus, select everything, rebuild colours.
    pub fn set_corpus(&mut self, corpus: Corpus) {
        self.criteria = FilterCriteria::all_of(&corpus);
        self.party_colors = Some(ColorMap::new(&corpus.parties));
        self.corpus = Some(corpus);
        self.status_message = None;
        self.cache = None;
    }

    /// Restore all inputs to their defaults for the loaded corpus.
    pub fn reset_inputs(&mut self) {
        if let Some(corpus) = &self.corpus {
            self.criteria = FilterCriteria::all_of(corpus);
        }
        self.max_words = DEFAULT_MAX_WORDS;
        self.facet = Facet::None;
        self.trend_word = DEFAULT_TREND_WORD.to_string();
    }

    /// The request the current inputs describe.
    pub fn current_request(&self) -> PlotRequest {
        PlotRequest {
            criteria: self.criteria.clone(),
            kind: self.plot_kind,
            max_words: self.max_words,
            facet: if self.plot_kind.uses_facet() {
                self.facet
            } else {
                Facet::None
            },
            trend_word: self.trend_word.trim().to_lowercase(),
        }
    }

    /// Recompute the pipeline if the current request differs from the
    /// cached one. The pipeline itself is stateless; this is the only
    /// memoization in the application.
    pub fn ensure_plot(&mut self) {
        let Some(corpus) = &self.corpus else {
            self.cache = None;
            return;
        };

        let request = self.current_request();
        if let Some((cached, _)) = &self.cache {
            if *cached == request {
                return;
            }
        }

        let indices = match filtered_indices(corpus, &request.criteria) {
            Ok(indices) => indices,
            Err(e) => {
                log::error!("filter error: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.cache = None;
                return;
            }
        };
        let n_included = indices.len();

        let tokens = token::tokenize(corpus, &indices);

        let data = match request.kind {
            PlotKind::SpeechLength => PlotData::Lengths(aggregate::speech_lengths(&tokens)),
            PlotKind::FrequentWords => {
                let kept = token::remove_stopwords(tokens, &self.stopwords);
                PlotData::Words(aggregate::word_counts(
                    &kept,
                    request.facet,
                    request.max_words,
                ))
            }
            PlotKind::ImportantWords => {
                let rows = aggregate::tf_idf(&tokens);
                PlotData::TfIdf(aggregate::top_tf_idf_per_year(&rows, request.max_words))
            }
            PlotKind::SentimentWords => {
                let kept = token::remove_stopwords(tokens, &self.stopwords);
                let words = aggregate::sentiment_words(&kept, &self.lexicon);
                PlotData::SentimentWords(aggregate::sentiment_word_counts(
                    &words,
                    request.facet,
                    request.max_words,
                ))
            }
            PlotKind::NetSentiment => {
                let kept = token::remove_stopwords(tokens, &self.stopwords);
                let words = aggregate::sentiment_words(&kept, &self.lexicon);
                PlotData::Net(aggregate::net_sentiment(&words))
            }
            PlotKind::WordTrend => {
                PlotData::Trend(aggregate::word_trend(&tokens, &request.trend_word))
            }
        };

        self.status_message = None;
        self.cache = Some((request, PlotOutput { n_included, data }));
    }

    /// The cached pipeline result, if any.
    pub fn plot_output(&self) -> Option<&PlotOutput> {
        self.cache.as_ref().map(|(_, output)| output)
    }

    /// Summary line, e.g. "75 of 77 speeches included."
    pub fn summary_line(&self) -> Option<String> {
        let corpus = self.corpus.as_ref()?;
        let output = self.plot_output()?;
        let total = corpus.len();
        if output.n_included == total {
            Some(format!("{total} speeches included."))
        } else {
            Some(format!(
                "{} of {total} speeches included.",
                output.n_included
            ))
        }
    }
}
