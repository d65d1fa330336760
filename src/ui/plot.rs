use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, MarkerShape, Plot, PlotPoint,
    PlotPoints, PlotUi, Points, Text,
};

use crate::figure::{Anchor, Chart, Panel};
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// One figure panel
// ---------------------------------------------------------------------------

/// Render a single panel (title + chart) into a `width × height` cell.
pub fn panel_plot(
    ui: &mut Ui,
    idx: usize,
    panel: &Panel,
    state: &ViewerState,
    width: f32,
    height: f32,
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(&panel.title).strong());
        if let Some(title) = panel.legend.as_ref().and_then(|l| l.title.as_deref()) {
            ui.label(RichText::new(format!("({title})")).weak());
        }
    });

    let labels = panel.chart.category_labels().to_vec();
    let mut plot = Plot::new(("figure_panel", idx, state.view_generation))
        .width(width)
        .height(height)
        .x_axis_label(panel.x_label.as_str())
        .y_axis_label(panel.y_label.as_str())
        .show_grid(state.grid_for(idx))
        .include_y(0.0)
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true);

    if !labels.is_empty() {
        // Categorical axis: one tick per bar, labelled with its category.
        plot = plot
            .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
            .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                category_tick(&labels, mark.value)
            });
    }
    if panel.legend.is_some() {
        plot = plot.legend(Legend::default().position(egui_plot::Corner::RightTop));
    }

    plot.show(ui, |plot_ui| {
        draw_chart(plot_ui, &panel.chart);
        if state.show_annotations {
            draw_annotations(plot_ui, panel);
        }
    });
}

/// Label of the category at an integer axis position, blank elsewhere.
fn category_tick(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn draw_chart(plot_ui: &mut PlotUi, chart: &Chart) {
    match chart {
        Chart::Bars(c) => {
            let bars = c
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| Bar::new(i as f64, v).width(0.8).fill(c.color))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(c.color));
        }
        Chart::StackedBars(c) => {
            for (j, series) in c.series.iter().enumerate() {
                let bars = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        Bar::new(i as f64, v)
                            .base_offset(c.base(j, i))
                            .width(0.5)
                            .fill(series.color)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(series.color));
            }
        }
        Chart::Histogram(c) => {
            for (j, series) in c.series.iter().enumerate() {
                let bars = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(b, &count)| {
                        let (lo, hi) = (c.edges[b], c.edges[b + 1]);
                        Bar::new((lo + hi) / 2.0, count)
                            .base_offset(c.base(j, b))
                            .width(hi - lo)
                            .fill(series.color.linear_multiply(0.8))
                            .stroke(Stroke::new(0.5, Color32::WHITE))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(series.color));
            }
        }
        Chart::Boxes(c) => {
            let elems = c
                .stats
                .iter()
                .zip(&c.labels)
                .zip(&c.colors)
                .enumerate()
                .map(|(i, ((s, label), &color))| {
                    let spread =
                        BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker);
                    BoxElem::new(i as f64, spread)
                        .name(label)
                        .box_width(0.6)
                        .fill(color.linear_multiply(0.5))
                        .stroke(Stroke::new(1.5, color))
                })
                .collect();
            plot_ui.box_plot(BoxPlot::new(elems));

            let outliers: PlotPoints = c
                .stats
                .iter()
                .enumerate()
                .flat_map(|(i, s)| s.outliers.iter().map(move |&v| [i as f64, v]))
                .collect();
            plot_ui.points(
                Points::new(outliers)
                    .shape(MarkerShape::Diamond)
                    .radius(2.5)
                    .color(Color32::DARK_GRAY),
            );
        }
    }
}

fn draw_annotations(plot_ui: &mut PlotUi, panel: &Panel) {
    for note in &panel.annotations {
        let anchor = match note.anchor {
            Anchor::Above => Align2::CENTER_BOTTOM,
            Anchor::Centered => Align2::CENTER_CENTER,
        };
        plot_ui.text(
            Text::new(PlotPoint::new(note.x, note.y), note.text.as_str())
                .anchor(anchor)
                .color(Color32::BLACK),
        );
    }
}
