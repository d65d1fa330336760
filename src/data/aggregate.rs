use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::filter::hue_groups;
use super::model::Category;
use crate::error::{PlotError, Result};

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Count each non-null value, most frequent first.
///
/// Ties keep the order in which the values first appear.
pub fn value_counts(values: &[Option<Category>]) -> Vec<(Category, usize)> {
    let mut position: HashMap<&Category, usize> = HashMap::new();
    let mut counts: Vec<(Category, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match position.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                position.insert(value, counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Cross tabulation
// ---------------------------------------------------------------------------

/// Percentage breakdown of target levels within each category value.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    /// Category values, one per bar.
    pub categories: Vec<Category>,
    /// Target levels, ascending; one stacked segment each.
    pub levels: Vec<Category>,
    /// `percent[i][j]`: share of level `j` among the rows of category `i`.
    pub percent: Vec<Vec<f64>>,
}

impl CrossTab {
    /// Position of `level` among the target levels.
    pub fn level_index(&self, level: &Category) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }

    /// Reorder categories by descending share of `level` (stable).
    ///
    /// `column` only names the target column in the error.
    pub fn sort_by_level_desc(&mut self, column: &str, level: &Category) -> Result<()> {
        let j = self
            .level_index(level)
            .ok_or_else(|| PlotError::MissingLevel {
                column: column.to_string(),
                level: level.to_string(),
            })?;

        let mut rows: Vec<(Category, Vec<f64>)> = self
            .categories
            .drain(..)
            .zip(self.percent.drain(..))
            .collect();
        rows.sort_by(|a, b| b.1[j].total_cmp(&a.1[j]));

        for (category, percent) in rows {
            self.categories.push(category);
            self.percent.push(percent);
        }
        Ok(())
    }
}

/// Group rows by category and normalise the target counts within each group.
///
/// Rows with a null category or null target are ignored; a combination that
/// never occurs is 0 %.
pub fn crosstab_percent(categories: &[Option<Category>], target: &[Option<Category>]) -> CrossTab {
    let mut counts: BTreeMap<&Category, BTreeMap<&Category, usize>> = BTreeMap::new();
    let mut levels: BTreeSet<&Category> = BTreeSet::new();

    for (category, level) in categories.iter().zip(target) {
        let (Some(category), Some(level)) = (category, level) else {
            continue;
        };
        *counts.entry(category).or_default().entry(level).or_default() += 1;
        levels.insert(level);
    }

    let levels: Vec<Category> = levels.into_iter().cloned().collect();
    let mut out_categories = Vec::with_capacity(counts.len());
    let mut percent = Vec::with_capacity(counts.len());

    for (category, by_level) in counts {
        let total: usize = by_level.values().sum();
        let row = levels
            .iter()
            .map(|level| {
                let n = by_level.get(level).copied().unwrap_or(0);
                n as f64 / total as f64 * 100.0
            })
            .collect();
        out_categories.push(category.clone());
        percent.push(row);
    }

    CrossTab {
        categories: out_categories,
        levels,
        percent,
    }
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Linear-interpolation quantile of already sorted data.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut s = values.to_vec();
    s.sort_by(f64::total_cmp);
    s
}

/// Equal-width bin edges picked by the "auto" rule.
///
/// Uses the narrower of the Sturges and Freedman–Diaconis widths, falling
/// back to Sturges when the interquartile range is zero. Constant data gets a
/// single bin one unit wide. An infinite value leaves no finite range to
/// split and is an error.
pub fn histogram_bin_edges(column: &str, values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }
    let s = sorted(values);
    let (min, max) = (s[0], s[s.len() - 1]);
    if !min.is_finite() || !max.is_finite() {
        return Err(PlotError::NonFiniteRange {
            column: column.to_string(),
            min,
            max,
        });
    }
    if min == max {
        return Ok(vec![min - 0.5, max + 0.5]);
    }

    let n = s.len() as f64;
    let range = max - min;
    let sturges = range / (n.log2() + 1.0);
    let iqr = quantile_sorted(&s, 0.75) - quantile_sorted(&s, 0.25);
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

    let bins = ((range / width).ceil() as usize).max(1);
    let mut edges: Vec<f64> = (0..bins)
        .map(|i| min + range * i as f64 / bins as f64)
        .collect();
    edges.push(max);
    Ok(edges)
}

/// Bin counts of one hue level.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub level: Category,
    pub counts: Vec<usize>,
}

/// Count values per bin separately for every hue level.
///
/// Levels come in hue order (see [`hue_groups`]). The last bin is closed on the
/// right, values outside the edges are ignored.
pub fn stacked_histogram(
    values: &[Option<f64>],
    hue: &[Option<Category>],
    edges: &[f64],
) -> Vec<HistogramSeries> {
    let bins = edges.len().saturating_sub(1);
    hue_groups(hue)
        .into_iter()
        .map(|(level, rows)| {
            let mut counts = vec![0usize; bins];
            for v in rows.iter().filter_map(|&row| values[row]) {
                if let Some(bin) = bin_of(edges, v) {
                    counts[bin] += 1;
                }
            }
            HistogramSeries { level, counts }
        })
        .collect()
}

fn bin_of(edges: &[f64], v: f64) -> Option<usize> {
    let bins = edges.len().checked_sub(1).filter(|&b| b > 0)?;
    if v < edges[0] || v > edges[bins] {
        return None;
    }
    let idx = edges.partition_point(|e| *e <= v).saturating_sub(1);
    Some(idx.min(bins - 1))
}

// ---------------------------------------------------------------------------
// Box statistics
// ---------------------------------------------------------------------------

/// Five-number summary plus outliers, Tukey style (1.5 × IQR whiskers).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let s = sorted(values);
        let q1 = quantile_sorted(&s, 0.25);
        let median = quantile_sorted(&s, 0.5);
        let q3 = quantile_sorted(&s, 0.75);
        let reach = 1.5 * (q3 - q1);

        let lower_whisker = s
            .iter()
            .copied()
            .find(|&v| v >= q1 - reach)
            .unwrap_or(q1);
        let upper_whisker = s
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + reach)
            .unwrap_or(q3);
        let outliers = s
            .iter()
            .copied()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();

        Some(BoxStats {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(values: &[&str]) -> Vec<Option<Category>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(Category::from(*v)) })
            .collect()
    }

    #[test]
    fn value_counts_descend_and_keep_first_seen_on_ties() {
        let counts = value_counts(&cats(&["b", "a", "c", "a", "", "c", "a"]));
        assert_eq!(
            counts,
            vec![
                (Category::from("a"), 3),
                (Category::from("c"), 2),
                (Category::from("b"), 1),
            ]
        );
    }

    #[test]
    fn crosstab_rows_sum_to_hundred() {
        let job = cats(&["admin", "admin", "admin", "services", "services", "", "admin"]);
        let y = cats(&["yes", "no", "no", "no", "yes", "yes", ""]);
        let tab = crosstab_percent(&job, &y);

        assert_eq!(tab.categories, vec![Category::from("admin"), Category::from("services")]);
        assert_eq!(tab.levels, vec![Category::from("no"), Category::from("yes")]);
        for row in &tab.percent {
            let total: f64 = row.iter().sum();
            assert!((total - 100.0).abs() < 0.01);
        }
        assert!((tab.percent[0][1] - 100.0 / 3.0).abs() < 1e-9);
        assert!((tab.percent[1][1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn crosstab_fills_missing_combinations_with_zero() {
        let tab = crosstab_percent(&cats(&["a", "b"]), &cats(&["yes", "no"]));
        assert_eq!(tab.percent, vec![vec![0.0, 100.0], vec![100.0, 0.0]]);
    }

    #[test]
    fn sorting_by_yes_descends() {
        let job = cats(&["a", "a", "b", "b", "c", "c"]);
        let y = cats(&["no", "no", "yes", "yes", "yes", "no"]);
        let mut tab = crosstab_percent(&job, &y);
        tab.sort_by_level_desc("y", &Category::from("yes")).unwrap();

        assert_eq!(
            tab.categories,
            vec![Category::from("b"), Category::from("c"), Category::from("a")]
        );
        assert_eq!(tab.percent[0], vec![0.0, 100.0]);
    }

    #[test]
    fn sorting_by_absent_level_fails() {
        let mut tab = crosstab_percent(&cats(&["a"]), &cats(&["no"]));
        let err = tab.sort_by_level_desc("y", &Category::from("yes")).unwrap_err();
        assert!(matches!(err, PlotError::MissingLevel { ref level, .. } if level == "yes"));
    }

    #[test]
    fn bin_edges_cover_the_data() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let edges = histogram_bin_edges("age", &values).unwrap();
        assert_eq!(edges[0], 0.0);
        assert_eq!(*edges.last().unwrap(), 99.0);
        // Sturges gives ceil(log2(100) + 1) = 8 bins, FD is wider here.
        assert_eq!(edges.len(), 9);
    }

    #[test]
    fn bin_edges_for_constant_and_empty_data() {
        assert_eq!(histogram_bin_edges("age", &[3.0, 3.0]).unwrap(), vec![2.5, 3.5]);
        assert!(histogram_bin_edges("age", &[]).unwrap().is_empty());
    }

    #[test]
    fn bin_edges_reject_infinite_values() {
        let err = histogram_bin_edges("balance", &[1.0, 2.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(
            err,
            PlotError::NonFiniteRange { ref column, max, .. }
                if column == "balance" && max == f64::INFINITY
        ));
        assert!(histogram_bin_edges("balance", &[f64::NEG_INFINITY, 0.0]).is_err());
    }

    #[test]
    fn stacked_histogram_splits_counts_by_level() {
        let values = vec![Some(0.0), Some(1.0), Some(2.0), Some(2.0), None];
        let hue = cats(&["no", "yes", "no", "yes", "yes"]);
        let edges = vec![0.0, 1.0, 2.0];
        let series = stacked_histogram(&values, &hue, &edges);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].level, Category::from("no"));
        assert_eq!(series[0].counts, vec![1, 1]);
        // 1.0 falls in the second bin, 2.0 on the closed right edge.
        assert_eq!(series[1].counts, vec![0, 2]);
    }

    #[test]
    fn box_stats_interpolate_quartiles_and_flag_outliers() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert!((stats.q1 - 2.25).abs() < 1e-9);
        assert!((stats.median - 3.5).abs() < 1e-9);
        assert!((stats.q3 - 4.75).abs() < 1e-9);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 5.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn box_stats_of_nothing() {
        assert!(BoxStats::from_values(&[]).is_none());
    }
}
