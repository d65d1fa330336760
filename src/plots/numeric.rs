use crate::color;
use crate::data::aggregate::{histogram_bin_edges, stacked_histogram, BoxStats};
use crate::data::filter::{hue_groups, non_null_at, without};
use crate::data::model::Dataset;
use crate::error::Result;
use crate::figure::{Boxes, Chart, Figure, Histogram, Legend, Panel, Series};

use super::{grid_rows, groups};

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// Histogram of `col`, one stacked layer per target level.
///
/// Bin edges are shared by every layer and computed from the rows where both
/// the value and the target are present.
fn histogram_panel(df: &Dataset, col: &str, target_col: &str, title: String) -> Result<Panel> {
    let values = df.numeric(col)?;
    let hue = df.categorical(target_col)?;

    let present: Vec<f64> = values
        .iter()
        .zip(&hue)
        .filter_map(|(v, h)| h.as_ref().and(*v))
        .collect();
    let edges = histogram_bin_edges(col, &present)?;
    if edges.is_empty() {
        log::warn!("histogram '{title}': no values to bin");
    }

    let layers = stacked_histogram(&values, &hue, &edges);
    let palette = color::series_palette(layers.len());
    let series: Vec<Series> = layers
        .into_iter()
        .zip(palette)
        .map(|(layer, color)| Series {
            name: layer.level.to_string(),
            color,
            values: layer.counts.into_iter().map(|n| n as f64).collect(),
        })
        .collect();

    let legend = Legend::from_series(Some(target_col.to_string()), &series);
    log::debug!("histogram '{title}': {} bins", edges.len().saturating_sub(1));
    Ok(Panel::new(title, Chart::Histogram(Histogram { edges, series }))
        .labels(col, "Count")
        .legend(legend))
}

/// One box of `col` per target level, in hue order.
fn box_panel(
    df: &Dataset,
    col: &str,
    target_col: &str,
    title: String,
    x_label: String,
) -> Result<Panel> {
    let values = df.numeric(col)?;
    let hue = df.categorical(target_col)?;

    let mut labels = Vec::new();
    let mut stats = Vec::new();
    for (level, rows) in hue_groups(&hue) {
        match BoxStats::from_values(&non_null_at(&values, &rows)) {
            Some(s) => {
                labels.push(level.to_string());
                stats.push(s);
            }
            None => log::warn!("boxplot '{title}': no '{col}' values for level '{level}'"),
        }
    }
    let colors = color::series_palette(labels.len());

    Ok(
        Panel::new(title, Chart::Boxes(Boxes { labels, colors, stats }))
            .labels(x_label, col),
    )
}

// ---------------------------------------------------------------------------
// Histograms by target
// ---------------------------------------------------------------------------

pub fn compare_numeric_distributions(
    campaign: &Dataset,
    control: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
) -> Result<Figure> {
    let mut fig = Figure::grid(
        format!(
            "Comparison of Numerical Variable Distribution Between Campaign and Control Groups \
             by Target \"{target_col}\""
        ),
        numeric_cols.len(),
        2,
        [15.0, 30.0],
    );
    for (row, col) in numeric_cols.iter().enumerate() {
        for (group, df) in groups(campaign, control) {
            let title = format!(
                "{} Group - Distribution of {col} by target variable",
                group.label()
            );
            fig.set(row, group.column(), histogram_panel(df, col, target_col, title)?);
        }
    }
    Ok(fig)
}

pub fn plot_numeric_distributions(
    df: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
    exclude_col: &str,
) -> Result<Figure> {
    const NCOLS: usize = 2;
    let cols = without(numeric_cols, exclude_col);
    let mut fig = Figure::grid(
        format!("Distributions of Numeric Variables by Target \"{target_col}\""),
        grid_rows(cols.len(), NCOLS),
        NCOLS,
        [20.0, 20.0],
    );
    for (i, col) in cols.iter().enumerate() {
        let title = format!("Distribution of {col} by target variable");
        fig.set(i / NCOLS, i % NCOLS, histogram_panel(df, col, target_col, title)?);
    }
    Ok(fig)
}

// ---------------------------------------------------------------------------
// Boxplots by target
// ---------------------------------------------------------------------------

pub fn compare_boxplots(
    campaign: &Dataset,
    control: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
) -> Result<Figure> {
    let mut fig = Figure::grid(
        format!(
            "Comparison of Boxplots Between Campaign and Control Groups by Target \"{target_col}\""
        ),
        numeric_cols.len(),
        2,
        [15.0, 20.0],
    );
    for (row, col) in numeric_cols.iter().enumerate() {
        for (group, df) in groups(campaign, control) {
            let title = format!("{} Group - Boxplot of {col} by target variable", group.label());
            let panel = box_panel(df, col, target_col, title, "Target".to_string())?;
            fig.set(row, group.column(), panel);
        }
    }
    Ok(fig)
}

pub fn plot_numeric_boxplots(
    df: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
    exclude_col: &str,
) -> Result<Figure> {
    const NCOLS: usize = 2;
    let cols = without(numeric_cols, exclude_col);
    let mut fig = Figure::grid(
        format!("Boxplots of Numeric Variables by Target \"{target_col}\""),
        grid_rows(cols.len(), NCOLS),
        NCOLS,
        [20.0, 20.0],
    );
    for (i, col) in cols.iter().enumerate() {
        let title = format!("Boxplot of {col} by target variable");
        let panel = box_panel(df, col, target_col, title, format!("Target ({target_col})"))?;
        fig.set(i / NCOLS, i % NCOLS, panel);
    }
    Ok(fig)
}
