use eframe::egui::{self, RichText, ScrollArea, Ui, Vec2};

use crate::figure::Legend;
use crate::state::ViewerState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar – suptitle and view toggles
// ---------------------------------------------------------------------------

/// Render the suptitle and the toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&state.figure.title).size(20.0).strong());
    });

    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui
            .selectable_label(state.show_annotations, "Percentages")
            .clicked()
        {
            state.toggle_annotations();
        }
        if ui.selectable_label(state.force_grid, "Grid").clicked() {
            state.toggle_grid();
        }
        if ui.button("Reset view").clicked() {
            state.reset_views();
        }

        ui.separator();
        ui.label(state.summary());
    });
}

// ---------------------------------------------------------------------------
// Right side panel – figure legend
// ---------------------------------------------------------------------------

pub fn legend_panel(ui: &mut Ui, legend: &Legend) {
    ui.heading(legend.title.as_deref().unwrap_or("Legend"));
    ui.separator();
    for (label, color) in &legend.entries {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").size(18.0).color(*color));
            ui.label(RichText::new(label).size(16.0));
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel – the panel grid
// ---------------------------------------------------------------------------

pub fn figure_grid(ui: &mut Ui, state: &ViewerState) {
    let fig = &state.figure;
    if fig.ncols == 0 || fig.cells.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Nothing to plot.");
        });
        return;
    }

    let spacing = ui.spacing().item_spacing.x;
    let width = ((ui.available_width() - spacing * (fig.ncols - 1) as f32) / fig.ncols as f32)
        .max(200.0);
    // Leave room for the panel title above each plot.
    let height = fig.row_height() - 24.0;

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for row in 0..fig.nrows() {
                ui.horizontal(|ui: &mut Ui| {
                    for col in 0..fig.ncols {
                        let idx = row * fig.ncols + col;
                        ui.vertical(|ui: &mut Ui| {
                            ui.set_width(width);
                            match fig.panel(row, col) {
                                Some(panel) => plot::panel_plot(ui, idx, panel, state, width, height),
                                None => {
                                    ui.allocate_space(Vec2::new(width, height));
                                }
                            }
                        });
                    }
                });
                ui.add_space(8.0);
            }
        });
}
