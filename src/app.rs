use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

/// Corpus file loaded at startup when present.
const DEFAULT_CORPUS_PATH: &str = "data/corpus.csv";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PodiumApp {
    pub state: AppState,
}

impl Default for PodiumApp {
    fn default() -> Self {
        let mut state = AppState::default();

        let path = Path::new(DEFAULT_CORPUS_PATH);
        if path.exists() {
            match crate::corpus::loader::load_file(path) {
                Ok(corpus) => {
                    log::info!("Loaded bundled corpus ({} speeches)", corpus.len());
                    state.set_corpus(corpus);
                }
                Err(e) => {
                    log::warn!("Could not load {DEFAULT_CORPUS_PATH}: {e:#}");
                    state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }

        Self { state }
    }
}

impl eframe::App for PodiumApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Rerun the pipeline only if an input changed since last frame.
        self.state.ensure_plot();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: plot explanation ----
        if self.state.corpus.is_some() {
            egui::TopBottomPanel::bottom("explanation").show(ctx, |ui| {
                ui.label(self.state.plot_kind.explanation());
            });
        }

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::analytics_plot(ui, &self.state);
        });
    }
}
