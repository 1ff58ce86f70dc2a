use std::collections::BTreeSet;

use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Slider, Ui};

use crate::analysis::aggregate::Facet;
use crate::color::ColorMap;
use crate::state::{AppState, PlotKind};

// ---------------------------------------------------------------------------
// Left side panel – filter and plot controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(corpus) = &state.corpus else {
        ui.label("No corpus loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let (year_min, year_max) = (corpus.year_min, corpus.year_max);
    let all_speakers: Vec<String> = corpus.speakers.iter().cloned().collect();
    let all_parties: Vec<String> = corpus.parties.iter().cloned().collect();
    let party_colors = state.party_colors.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if ui.button("Reset All Inputs").clicked() {
                state.reset_inputs();
            }
            ui.add_space(4.0);

            // ---- Year range ----
            ui.strong("Years");
            let (mut from, mut to) = state.criteria.year_range;
            ui.add(Slider::new(&mut from, year_min..=year_max).text("from"));
            ui.add(Slider::new(&mut to, year_min..=year_max).text("to"));
            // Keep the range valid while dragging.
            if from > to {
                to = from;
            }
            state.criteria.year_range = (from, to);
            ui.separator();

            // ---- Speakers ----
            value_set_section(
                ui,
                "Speakers",
                &all_speakers,
                &mut state.criteria.speakers,
                None,
            );

            // ---- Parties (with colour swatches) ----
            value_set_section(
                ui,
                "Parties",
                &all_parties,
                &mut state.criteria.parties,
                party_colors.as_ref(),
            );

            ui.separator();

            // ---- Plot selection ----
            ui.strong("Plot Type");
            egui::ComboBox::from_id_salt("plot_kind")
                .selected_text(state.plot_kind.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in PlotKind::ALL {
                        ui.selectable_value(&mut state.plot_kind, kind, kind.label());
                    }
                });

            if state.plot_kind.uses_max_words() {
                ui.add_space(4.0);
                ui.label("Number of Words to Include");
                ui.add(DragValue::new(&mut state.max_words).range(1..=100));
            }

            if state.plot_kind.uses_facet() {
                ui.add_space(4.0);
                ui.label("Facet Variable");
                egui::ComboBox::from_id_salt("facet")
                    .selected_text(state.facet.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for facet in Facet::ALL {
                            ui.selectable_value(&mut state.facet, facet, facet.label());
                        }
                    });
            }

            if state.plot_kind == PlotKind::WordTrend {
                ui.add_space(4.0);
                ui.label("Word to Count");
                ui.text_edit_singleline(&mut state.trend_word);
            }
        });
}

/// A collapsible checkbox list over a value set, with All/None buttons.
fn value_set_section(
    ui: &mut Ui,
    title: &str,
    all_values: &[String],
    selected: &mut BTreeSet<String>,
    swatches: Option<&ColorMap>,
) {
    let header_text = format!("{title}  ({}/{})", selected.len(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(all_values.iter().cloned());
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            for value in all_values {
                let mut text = RichText::new(value);
                if let Some(cm) = swatches {
                    text = text.color(cm.color_for(value));
                }

                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(summary) = state.summary_line() {
            ui.label(summary);
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open speech corpus")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::corpus::loader::load_file(&path) {
            Ok(corpus) => {
                log::info!(
                    "Loaded {} speeches, years {}..={}",
                    corpus.len(),
                    corpus.year_min,
                    corpus.year_max
                );
                state.set_corpus(corpus);
            }
            Err(e) => {
                log::error!("Failed to load corpus: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
