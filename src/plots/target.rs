use crate::color;
use crate::data::aggregate::{crosstab_percent, CrossTab};
use crate::data::filter::without;
use crate::data::model::{Category, Dataset};
use crate::error::Result;
use crate::figure::{Chart, Figure, Legend, Panel, Series, StackedBars};

use super::{capitalize, grid_rows, groups, Group, POSITIVE_LEVEL};

/// Percentage of each target level per category, ranked by the positive level.
fn ranked_crosstab(df: &Dataset, category_col: &str, target_col: &str) -> Result<CrossTab> {
    let categories = df.categorical(category_col)?;
    let target = df.categorical(target_col)?;
    let mut tab = crosstab_percent(&categories, &target);
    tab.sort_by_level_desc(target_col, &Category::from(POSITIVE_LEVEL))?;
    Ok(tab)
}

fn stacked_panel(tab: CrossTab, title: String) -> Panel {
    let series = color::level_colors(&tab.levels)
        .into_iter()
        .enumerate()
        .map(|(j, (level, color))| Series {
            name: level.to_string(),
            color,
            values: tab.percent.iter().map(|row| row[j]).collect(),
        })
        .collect();
    let bars = StackedBars {
        labels: tab.categories.iter().map(|c| c.to_string()).collect(),
        series,
    };
    log::debug!("stacked panel '{title}': {} bars", bars.labels.len());
    Panel::new(title, Chart::StackedBars(bars))
}

pub fn plot_target_distribution(
    df: &Dataset,
    categorical_cols: &[&str],
    target_col: &str,
) -> Result<Figure> {
    const NCOLS: usize = 2;
    let cols = without(categorical_cols, target_col);
    let mut fig = Figure::grid(
        format!("The Distribution of Target \"{target_col}\" Across Categorical Variables"),
        grid_rows(cols.len(), NCOLS),
        NCOLS,
        [20.0, 30.0],
    );

    for (i, col) in cols.iter().enumerate() {
        let tab = ranked_crosstab(df, col, target_col)?;
        let panel = stacked_panel(tab, format!("Distribution of target in '{col}'"))
            .labels(*col, "Percentage");
        // The figure legend describes the last panel drawn.
        fig.legend = panel.series_legend(None);
        fig.set(i / NCOLS, i % NCOLS, panel);
    }
    Ok(fig)
}

pub fn compare_target_distributions(
    campaign: &Dataset,
    control: &Dataset,
    categorical_cols: &[&str],
    target_col: &str,
) -> Result<Figure> {
    let cols = without(categorical_cols, target_col);
    let mut fig = Figure::grid(
        format!(
            "Comparison of Target \"{target_col}\" Distribution Across Categorical Variables \
             Between Campaign and Control Groups"
        ),
        cols.len(),
        2,
        [15.0, 30.0],
    );

    for (row, col) in cols.iter().enumerate() {
        for (group, df) in groups(campaign, control) {
            let tab = ranked_crosstab(df, col, target_col)?;
            let title = format!("{} Group - Distribution of target in '{col}'", group.label());
            let panel = stacked_panel(tab, title).labels(*col, "Percentage");
            if group == Group::Campaign {
                fig.legend = panel.series_legend(None);
            }
            fig.set(row, group.column(), panel);
        }
    }
    Ok(fig)
}

pub fn plot_stacked_bar(df: &Dataset, category_col: &str, target_col: &str) -> Result<Figure> {
    let category = capitalize(category_col);
    let target = target_col.to_uppercase();
    let mut fig = Figure::grid(
        format!("Stacked Barplot of {category} vs {target}"),
        1,
        1,
        [10.0, 6.0],
    );

    let panel = stacked_panel(ranked_crosstab(df, category_col, target_col)?, String::new())
        .labels(category, "Percentage");
    let legend = panel.series_legend(Some(target));
    fig.set(0, 0, with_legend(panel, legend));
    Ok(fig)
}

pub fn compare_stacked_bar(
    campaign: &Dataset,
    control: &Dataset,
    category_col: &str,
    target_col: &str,
) -> Result<Figure> {
    let category = capitalize(category_col);
    let target = target_col.to_uppercase();
    let mut fig = Figure::grid(
        format!("Comparison of Target \"{target_col}\" Distribution Across {category}"),
        1,
        2,
        [15.0, 6.0],
    );

    for (group, df) in groups(campaign, control) {
        let title = format!("{} Group - Distribution of target by {category}", group.label());
        let panel = stacked_panel(ranked_crosstab(df, category_col, target_col)?, title)
            .labels(category.as_str(), "Percentage");
        if group == Group::Campaign {
            fig.legend = panel.series_legend(None);
        }
        let legend = panel.series_legend(Some(target.clone()));
        fig.set(0, group.column(), with_legend(panel, legend));
    }
    Ok(fig)
}

fn with_legend(panel: Panel, legend: Option<Legend>) -> Panel {
    match legend {
        Some(legend) => panel.legend(legend),
        None => panel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use crate::figure::Anchor;
    use crate::plots::fixtures::{jobs, text_dataset};

    fn stacked(panel: &Panel) -> &StackedBars {
        match &panel.chart {
            Chart::StackedBars(b) => b,
            other => panic!("expected stacked bars, got {other:?}"),
        }
    }

    /// (label, no %, yes %) per bar.
    fn shares(panel: &Panel) -> Vec<(String, f64, f64)> {
        let bars = stacked(panel);
        let no = bars.series.iter().find(|s| s.name == "no").unwrap();
        let yes = bars.series.iter().find(|s| s.name == "yes").unwrap();
        bars.labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), no.values[i], yes.values[i]))
            .collect()
    }

    fn bank() -> Dataset {
        text_dataset(&[
            ("job", vec!["admin", "admin", "services", "services", "retired", "retired", "retired"]),
            ("loan", vec!["no", "no", "yes", "no", "no", "yes", "no"]),
            ("y", vec!["no", "yes", "no", "no", "yes", "yes", "no"]),
        ])
    }

    #[test]
    fn stacked_bar_of_fully_separated_jobs() {
        let fig = plot_stacked_bar(&jobs(), "job", "y").unwrap();
        assert_eq!(fig.title, "Stacked Barplot of Job vs Y");

        let panel = fig.panel(0, 0).unwrap();
        assert_eq!(
            shares(panel),
            vec![
                ("admin".to_string(), 0.0, 100.0),
                ("blue-collar".to_string(), 100.0, 0.0),
            ]
        );
        assert_eq!(panel.x_label, "Job");
        assert_eq!(panel.y_label, "Percentage");
        assert_eq!(panel.legend.as_ref().unwrap().title.as_deref(), Some("Y"));
        // Zero-height segments are not labelled.
        assert_eq!(panel.annotations.len(), 2);
        assert!(panel.annotations.iter().all(|a| a.text == "100.00%"));
        assert!(panel.annotations.iter().all(|a| a.anchor == Anchor::Centered));
    }

    #[test]
    fn target_distribution_skips_target_and_ranks_by_yes() {
        let fig = plot_target_distribution(&bank(), &["job", "y", "loan"], "y").unwrap();
        assert_eq!(fig.ncols, 2);
        assert_eq!(fig.nrows(), 1);
        assert_eq!(fig.panels().count(), 2);

        let job = fig.panel(0, 0).unwrap();
        assert_eq!(job.title, "Distribution of target in 'job'");
        let rows = shares(job);
        let labels: Vec<&str> = rows.iter().map(|r| r.0.as_str()).collect();
        assert_eq!(labels, vec!["retired", "admin", "services"]);
        assert!(rows.windows(2).all(|w| w[0].2 >= w[1].2));
        for (_, no, yes) in &rows {
            assert!((no + yes - 100.0).abs() < 0.01);
        }

        let legend = fig.legend.as_ref().unwrap();
        assert_eq!(legend.entries.len(), 2);
        assert_eq!(legend.entries[0].0, "no");
        assert!(job.legend.is_none());
    }

    #[test]
    fn comparison_shares_one_legend_from_campaign() {
        let control = text_dataset(&[
            ("job", vec!["admin", "services"]),
            ("loan", vec!["no", "no"]),
            ("y", vec!["yes", "no"]),
        ]);
        let fig = compare_target_distributions(&bank(), &control, &["y", "job", "loan"], "y").unwrap();
        assert_eq!(fig.nrows(), 2);
        assert_eq!(
            fig.panel(1, 0).unwrap().title,
            "Campaign Group - Distribution of target in 'loan'"
        );
        assert_eq!(
            fig.panel(1, 1).unwrap().title,
            "Control Group - Distribution of target in 'loan'"
        );
        assert_eq!(shares(fig.panel(0, 1).unwrap())[0].0, "admin");
        assert!(fig.legend.is_some());
    }

    #[test]
    fn compare_stacked_bar_titles_and_legends() {
        let fig = compare_stacked_bar(&bank(), &jobs(), "job", "y").unwrap();
        assert_eq!(fig.title, "Comparison of Target \"y\" Distribution Across Job");
        let left = fig.panel(0, 0).unwrap();
        let right = fig.panel(0, 1).unwrap();
        assert_eq!(left.title, "Campaign Group - Distribution of target by Job");
        assert_eq!(right.title, "Control Group - Distribution of target by Job");
        assert!(left.legend.is_some() && right.legend.is_some());
        assert_eq!(shares(right)[0], ("admin".to_string(), 0.0, 100.0));
        assert_eq!(fig.legend.as_ref().unwrap().title, None);
    }

    #[test]
    fn target_without_yes_is_an_error() {
        let df = text_dataset(&[("job", vec!["admin"]), ("y", vec!["no"])]);
        let err = plot_stacked_bar(&df, "job", "y").unwrap_err();
        assert!(matches!(err, PlotError::MissingLevel { .. }));
    }

    #[test]
    fn missing_target_column_is_an_error() {
        let err = plot_stacked_bar(&jobs(), "job", "outcome").unwrap_err();
        assert!(matches!(err, PlotError::ColumnNotFound(c) if c == "outcome"));
    }
}
