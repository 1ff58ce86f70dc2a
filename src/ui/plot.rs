use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use crate::analysis::aggregate::{
    NetSentimentRow, SentimentWordCount, SpeechLength, TfIdfRow, WordCount, WordTrendRow,
};
use crate::analysis::lexicon::Sentiment;
use crate::color::ColorMap;
use crate::state::{AppState, PlotData};

// Sentiment colours matching the classic ggplot pair.
const POSITIVE_COLOR: Color32 = Color32::from_rgb(0x00, 0xBF, 0xC4);
const NEGATIVE_COLOR: Color32 = Color32::from_rgb(0xF8, 0x76, 0x6D);
const BAR_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected analytics plot in the central panel.
pub fn analytics_plot(ui: &mut Ui, state: &AppState) {
    if state.corpus.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a corpus to view plots  (File → Open…)");
        });
        return;
    }

    let Some(output) = state.plot_output() else {
        // Filter error; the top bar already shows the message.
        return;
    };

    let colors = state.party_colors.as_ref();

    match &output.data {
        PlotData::Lengths(rows) => speech_length_plot(ui, rows, colors),
        PlotData::Words(rows) => word_count_plot(ui, rows),
        PlotData::TfIdf(rows) => tf_idf_plot(ui, rows),
        PlotData::SentimentWords(rows) => sentiment_words_plot(ui, rows),
        PlotData::Net(rows) => net_sentiment_plot(ui, rows, colors),
        PlotData::Trend(rows) => word_trend_plot(ui, rows, colors, &state.trend_word),
    }
}

// ---------------------------------------------------------------------------
// Time-series scatter plots
// ---------------------------------------------------------------------------

fn speech_length_plot(ui: &mut Ui, rows: &[SpeechLength], colors: Option<&ColorMap>) {
    let points: Vec<(i32, f64, &str)> = rows
        .iter()
        .map(|r| (r.year, f64::from(r.n_tokens) / 1000.0, r.party.as_str()))
        .collect();

    Plot::new("speech_length")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Words (Thousands)")
        .show(ui, |plot_ui| {
            scatter_by_party(plot_ui, &points, colors);
        });
}

fn net_sentiment_plot(ui: &mut Ui, rows: &[NetSentimentRow], colors: Option<&ColorMap>) {
    let points: Vec<(i32, f64, &str)> = rows
        .iter()
        .map(|r| (r.year, r.net as f64, r.party.as_str()))
        .collect();

    Plot::new("net_sentiment")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Net Sentiment")
        .show(ui, |plot_ui| {
            // Zero line separating net-positive from net-negative years.
            if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
                let zero = Line::new(PlotPoints::new(vec![
                    [f64::from(first.year) - 1.0, 0.0],
                    [f64::from(last.year) + 1.0, 0.0],
                ]))
                .color(Color32::GRAY)
                .style(LineStyle::dashed_loose());
                plot_ui.line(zero);
            }
            scatter_by_party(plot_ui, &points, colors);
        });
}

fn word_trend_plot(ui: &mut Ui, rows: &[WordTrendRow], colors: Option<&ColorMap>, word: &str) {
    let points: Vec<(i32, f64, &str)> = rows
        .iter()
        .map(|r| (r.year, f64::from(r.n), r.party.as_str()))
        .collect();

    Plot::new("word_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(format!("Count of '{}'", word.trim().to_lowercase()))
        .show(ui, |plot_ui| {
            let line: PlotPoints = points
                .iter()
                .map(|&(year, n, _)| [f64::from(year), n])
                .collect();
            plot_ui.line(Line::new(line).color(Color32::DARK_GRAY).width(1.0));
            scatter_by_party(plot_ui, &points, colors);
        });
}

/// One `Points` element per party so the legend lists parties once.
fn scatter_by_party(
    plot_ui: &mut egui_plot::PlotUi,
    points: &[(i32, f64, &str)],
    colors: Option<&ColorMap>,
) {
    let mut parties: Vec<&str> = Vec::new();
    for &(_, _, party) in points {
        if !parties.contains(&party) {
            parties.push(party);
        }
    }

    for party in parties {
        let series: PlotPoints = points
            .iter()
            .filter(|&&(_, _, p)| p == party)
            .map(|&(year, value, _)| [f64::from(year), value])
            .collect();

        let color = colors
            .map(|cm| cm.color_for(party))
            .unwrap_or(Color32::LIGHT_BLUE);

        plot_ui.points(
            Points::new(series)
                .name(party)
                .color(color)
                .shape(MarkerShape::Circle)
                .radius(4.0),
        );
    }
}

// ---------------------------------------------------------------------------
// Horizontal bar rankings
// ---------------------------------------------------------------------------

fn word_count_plot(ui: &mut Ui, rows: &[WordCount]) {
    let entries: Vec<(String, f64, Color32)> = rows
        .iter()
        .map(|r| (bar_label(r.facet.as_deref(), &r.word), f64::from(r.n), BAR_COLOR))
        .collect();
    horizontal_bars(ui, "freq_words", "Word count", entries);
}

fn tf_idf_plot(ui: &mut Ui, rows: &[TfIdfRow]) {
    let entries: Vec<(String, f64, Color32)> = rows
        .iter()
        .map(|r| {
            (
                format!("{} · {}", r.year, r.word),
                r.tf_idf,
                BAR_COLOR,
            )
        })
        .collect();
    horizontal_bars(ui, "tf_idf", "TF-IDF", entries);
}

fn sentiment_words_plot(ui: &mut Ui, rows: &[SentimentWordCount]) {
    let entries: Vec<(String, f64, Color32)> = rows
        .iter()
        .map(|r| {
            let color = match r.sentiment {
                Sentiment::Positive => POSITIVE_COLOR,
                Sentiment::Negative => NEGATIVE_COLOR,
            };
            (bar_label(r.facet.as_deref(), &r.word), f64::from(r.n), color)
        })
        .collect();
    horizontal_bars(ui, "sentiment_words", "Word count", entries);
}

fn bar_label(facet: Option<&str>, word: &str) -> String {
    match facet {
        Some(group) => format!("{group} · {word}"),
        None => word.to_string(),
    }
}

/// Horizontal bar chart with the first entry drawn at the top and entry
/// labels on the y axis.
fn horizontal_bars(ui: &mut Ui, id: &str, x_label: &str, entries: Vec<(String, f64, Color32)>) {
    let n = entries.len();
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value, color))| {
            Bar::new((n - 1 - i) as f64, *value)
                .name(label)
                .fill(*color)
                .width(0.6)
        })
        .collect();

    // Labels indexed by y position (reverse of display order).
    let labels: Vec<String> = entries.into_iter().rev().map(|(label, _, _)| label).collect();

    Plot::new(id.to_string())
        .x_axis_label(x_label)
        .y_axis_formatter(move |mark: GridMark, _range: &std::ops::RangeInclusive<f64>| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < labels.len() {
                labels[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}
