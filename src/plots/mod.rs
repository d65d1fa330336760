//! Distribution plots for campaign datasets.
//!
//! Every operation comes in two halves: a builder under [`build`] that turns
//! datasets into a [`Figure`](crate::figure::Figure), and the function of the
//! same name here that builds the figure and shows it in a window.
//!
//! | pattern | single dataset | campaign vs. control |
//! |---------|----------------|----------------------|
//! | category counts | [`plot_categorical_distributions`] | [`compare_categorical_distributions`] |
//! | target share per category | [`plot_target_distribution`], [`plot_stacked_bar`] | [`compare_target_distributions`], [`compare_stacked_bar`] |
//! | numeric histogram by target | [`plot_numeric_distributions`] | [`compare_numeric_distributions`] |
//! | numeric boxplot by target | [`plot_numeric_boxplots`] | [`compare_boxplots`] |

mod categorical;
mod numeric;
mod target;

use crate::app::show;
use crate::data::model::Dataset;
use crate::error::Result;

/// Default name of the yes/no outcome column.
pub const DEFAULT_TARGET_COL: &str = "y";

/// Default identifier column left out of numeric plots.
pub const DEFAULT_EXCLUDE_COL: &str = "client_id";

/// Target level the stacked bars are ranked by.
pub const POSITIVE_LEVEL: &str = "yes";

/// Figure builders, named after the operations that display them.
pub mod build {
    pub use super::categorical::{
        compare_categorical_distributions, plot_categorical_distributions,
    };
    pub use super::numeric::{
        compare_boxplots, compare_numeric_distributions, plot_numeric_boxplots,
        plot_numeric_distributions,
    };
    pub use super::target::{
        compare_stacked_bar, compare_target_distributions, plot_stacked_bar,
        plot_target_distribution,
    };
}

// ---------------------------------------------------------------------------
// Campaign / control pairing
// ---------------------------------------------------------------------------

/// One side of a two-group comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Campaign,
    Control,
}

impl Group {
    pub fn label(self) -> &'static str {
        match self {
            Group::Campaign => "Campaign",
            Group::Control => "Control",
        }
    }

    /// Grid column the group is drawn in.
    pub fn column(self) -> usize {
        match self {
            Group::Campaign => 0,
            Group::Control => 1,
        }
    }
}

fn groups<'a>(campaign: &'a Dataset, control: &'a Dataset) -> [(Group, &'a Dataset); 2] {
    [(Group::Campaign, campaign), (Group::Control, control)]
}

/// Rows needed to lay `n` panels out `ncols` per row.
fn grid_rows(n: usize, ncols: usize) -> usize {
    n.div_ceil(ncols)
}

/// First letter upper-cased, the rest lower-cased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Displaying entry points
// ---------------------------------------------------------------------------

/// Count plots of categorical columns, three per row, bars annotated with
/// their share of all rows.
pub fn plot_categorical_distributions(df: &Dataset, categorical_cols: &[&str]) -> Result<()> {
    show(build::plot_categorical_distributions(df, categorical_cols)?)
}

/// 100 %-stacked target shares for every categorical column except the
/// target itself, two per row.
pub fn plot_target_distribution(
    df: &Dataset,
    categorical_cols: &[&str],
    target_col: &str,
) -> Result<()> {
    show(build::plot_target_distribution(df, categorical_cols, target_col)?)
}

/// Count plots of campaign (left) and control (right) side by side.
pub fn compare_categorical_distributions(
    campaign: &Dataset,
    control: &Dataset,
    categorical_cols: &[&str],
) -> Result<()> {
    show(build::compare_categorical_distributions(
        campaign,
        control,
        categorical_cols,
    )?)
}

/// Stacked target shares of campaign (left) and control (right).
pub fn compare_target_distributions(
    campaign: &Dataset,
    control: &Dataset,
    categorical_cols: &[&str],
    target_col: &str,
) -> Result<()> {
    show(build::compare_target_distributions(
        campaign,
        control,
        categorical_cols,
        target_col,
    )?)
}

/// Stacked histograms of numeric columns split by target, per group.
pub fn compare_numeric_distributions(
    campaign: &Dataset,
    control: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
) -> Result<()> {
    show(build::compare_numeric_distributions(
        campaign,
        control,
        numeric_cols,
        target_col,
    )?)
}

/// Stacked histograms of numeric columns split by target.
pub fn plot_numeric_distributions(
    df: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
    exclude_col: &str,
) -> Result<()> {
    show(build::plot_numeric_distributions(
        df,
        numeric_cols,
        target_col,
        exclude_col,
    )?)
}

/// Boxplots of numeric columns by target, per group.
pub fn compare_boxplots(
    campaign: &Dataset,
    control: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
) -> Result<()> {
    show(build::compare_boxplots(
        campaign,
        control,
        numeric_cols,
        target_col,
    )?)
}

/// A single 100 %-stacked bar chart of target shares per category.
pub fn plot_stacked_bar(df: &Dataset, category_col: &str, target_col: &str) -> Result<()> {
    show(build::plot_stacked_bar(df, category_col, target_col)?)
}

/// [`plot_stacked_bar`] for campaign and control side by side.
pub fn compare_stacked_bar(
    campaign: &Dataset,
    control: &Dataset,
    category_col: &str,
    target_col: &str,
) -> Result<()> {
    show(build::compare_stacked_bar(
        campaign,
        control,
        category_col,
        target_col,
    )?)
}

/// Boxplots of numeric columns by target, leaving out `exclude_col`.
pub fn plot_numeric_boxplots(
    df: &Dataset,
    numeric_cols: &[&str],
    target_col: &str,
    exclude_col: &str,
) -> Result<()> {
    show(build::plot_numeric_boxplots(
        df,
        numeric_cols,
        target_col,
        exclude_col,
    )?)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Float64Array, StringArray};

    use crate::data::model::Dataset;

    /// `columns` of text, all the same length.
    pub fn text_dataset(columns: &[(&str, Vec<&str>)]) -> Dataset {
        Dataset::try_from_columns(columns.iter().map(|(name, values)| {
            (
                name.to_string(),
                Arc::new(StringArray::from(values.clone())) as ArrayRef,
            )
        }))
        .unwrap()
    }

    /// `job` = 60 × admin (all yes) then 40 × blue-collar (all no).
    pub fn jobs() -> Dataset {
        let mut job = vec!["admin"; 60];
        job.extend(vec!["blue-collar"; 40]);
        let mut y = vec!["yes"; 60];
        y.extend(vec!["no"; 40]);
        text_dataset(&[("job", job), ("y", y)])
    }

    /// Numeric columns `client_id`, `age`, `balance` plus target `y`.
    pub fn numeric(rows: usize, offset: f64) -> Dataset {
        let ids: Vec<f64> = (0..rows).map(|i| i as f64).collect();
        let age: Vec<f64> = (0..rows).map(|i| 20.0 + (i % 50) as f64 + offset).collect();
        let balance: Vec<f64> = (0..rows).map(|i| (i * 37 % 1000) as f64 - 100.0).collect();
        let y: Vec<&str> = (0..rows).map(|i| if i % 3 == 0 { "yes" } else { "no" }).collect();
        Dataset::try_from_columns(vec![
            ("client_id", Arc::new(Float64Array::from(ids)) as ArrayRef),
            ("age", Arc::new(Float64Array::from(age)) as ArrayRef),
            ("balance", Arc::new(Float64Array::from(balance)) as ArrayRef),
            ("y", Arc::new(StringArray::from(y)) as ArrayRef),
        ])
        .unwrap()
    }
}
