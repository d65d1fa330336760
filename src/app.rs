use eframe::egui;

use crate::error::{PlotError, Result};
use crate::figure::Figure;
use crate::state::ViewerState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FigureApp {
    pub state: ViewerState,
}

impl FigureApp {
    pub fn new(figure: Figure) -> Self {
        Self {
            state: ViewerState::new(figure),
        }
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: suptitle + toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: figure legend ----
        if let Some(legend) = &self.state.figure.legend {
            egui::SidePanel::right("figure_legend")
                .default_width(140.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::legend_panel(ui, legend);
                });
        }

        // ---- Central panel: the grid of charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::figure_grid(ui, &self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// Open a window showing `figure` and block until it is closed.
pub fn show(figure: Figure) -> Result<()> {
    log::info!(
        "showing '{}' ({} panels)",
        figure.title,
        figure.panels().count()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(figure.window_size())
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = figure.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            // Annotations are drawn in black.
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(FigureApp::new(figure)))
        }),
    )
    .map_err(|e| PlotError::Display(e.to_string()))
}
