use crate::color;
use crate::data::aggregate::value_counts;
use crate::data::model::Dataset;
use crate::error::Result;
use crate::figure::{Bars, Chart, Figure, Panel};

use super::{grid_rows, groups};

/// Count plot of one column, most frequent value first.
///
/// Percentages are relative to every row of `df`, nulls included.
fn count_panel(df: &Dataset, col: &str, title: String) -> Result<Panel> {
    let counts = value_counts(&df.categorical(col)?);
    let bars = Bars {
        labels: counts.iter().map(|(v, _)| v.to_string()).collect(),
        values: counts.iter().map(|&(_, n)| n as f64).collect(),
        color: color::primary(),
        total: df.len() as f64,
    };
    log::debug!("count panel '{title}': {} bars", bars.values.len());
    Ok(Panel::new(title, Chart::Bars(bars))
        .labels("", "Count")
        .grid(true))
}

pub fn plot_categorical_distributions(df: &Dataset, categorical_cols: &[&str]) -> Result<Figure> {
    const NCOLS: usize = 3;
    let mut fig = Figure::grid(
        "Distributions of Categorical Variables",
        grid_rows(categorical_cols.len(), NCOLS),
        NCOLS,
        [15.0, 15.0],
    );
    for (i, col) in categorical_cols.iter().enumerate() {
        fig.set(i / NCOLS, i % NCOLS, count_panel(df, col, col.to_string())?);
    }
    Ok(fig)
}

pub fn compare_categorical_distributions(
    campaign: &Dataset,
    control: &Dataset,
    categorical_cols: &[&str],
) -> Result<Figure> {
    let mut fig = Figure::grid(
        "Comparison of Categorical Variable Distributions between Campaign and Control Groups",
        categorical_cols.len(),
        2,
        [15.0, 25.0],
    );
    for (row, col) in categorical_cols.iter().enumerate() {
        for (group, df) in groups(campaign, control) {
            let title = format!("{} Group - {col}", group.label());
            fig.set(row, group.column(), count_panel(df, col, title)?);
        }
    }
    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use crate::figure::Anchor;
    use crate::plots::fixtures::text_dataset;

    fn bars(panel: &Panel) -> &Bars {
        match &panel.chart {
            Chart::Bars(b) => b,
            other => panic!("expected count bars, got {other:?}"),
        }
    }

    fn bank() -> Dataset {
        text_dataset(&[
            (
                "job",
                vec!["admin", "services", "admin", "retired", "admin", "services", "student"],
            ),
            (
                "marital",
                vec!["married", "single", "married", "married", "divorced", "single", "single"],
            ),
            ("y", vec!["no", "no", "yes", "no", "yes", "no", "no"]),
            ("contact", vec!["cellular"; 7]),
        ])
    }

    #[test]
    fn lays_out_three_per_row() {
        let fig = plot_categorical_distributions(&bank(), &["job", "marital", "y", "contact"]).unwrap();
        assert_eq!(fig.title, "Distributions of Categorical Variables");
        assert_eq!(fig.ncols, 3);
        assert_eq!(fig.nrows(), 2);
        assert_eq!(fig.panel(1, 0).unwrap().title, "contact");
        assert!(fig.panel(1, 1).is_none());
    }

    #[test]
    fn bars_descend_by_count_and_percentages_sum_to_hundred() {
        let fig = plot_categorical_distributions(&bank(), &["job", "marital"]).unwrap();
        for panel in fig.panels() {
            let b = bars(panel);
            assert!(b.values.windows(2).all(|w| w[0] >= w[1]));
            let total: f64 = panel.annotations.iter().filter_map(|a| a.percent()).sum();
            // Each label is rounded to two decimals.
            let tolerance = 0.005 * panel.annotations.len() as f64 + 1e-9;
            assert!((total - 100.0).abs() <= tolerance, "{}: {total}", panel.title);
            assert!(panel.annotations.iter().all(|a| a.anchor == Anchor::Above));
        }
        let job = fig.panel(0, 0).unwrap();
        assert_eq!(bars(job).labels[0], "admin");
        assert_eq!(job.annotations[0].text, "42.86%");
        assert_eq!(job.y_label, "Count");
        assert!(job.show_grid);
    }

    #[test]
    fn comparison_puts_campaign_left() {
        let campaign = bank();
        let control = text_dataset(&[
            ("job", vec!["student", "student", "admin"]),
            ("marital", vec!["single", "single", "married"]),
        ]);
        let fig = compare_categorical_distributions(&campaign, &control, &["job", "marital"]).unwrap();

        assert_eq!(fig.nrows(), 2);
        assert_eq!(fig.ncols, 2);
        assert_eq!(fig.panels().count(), 4);
        assert_eq!(fig.panel(0, 0).unwrap().title, "Campaign Group - job");
        assert_eq!(fig.panel(0, 1).unwrap().title, "Control Group - job");
        assert_eq!(fig.panel(1, 1).unwrap().title, "Control Group - marital");
        assert_eq!(bars(fig.panel(0, 1).unwrap()).labels, vec!["student", "admin"]);
    }

    #[test]
    fn missing_column_propagates() {
        let control = text_dataset(&[("marital", vec!["single"])]);
        let err = compare_categorical_distributions(&bank(), &control, &["job"]).unwrap_err();
        assert!(matches!(err, PlotError::ColumnNotFound(c) if c == "job"));
    }
}
