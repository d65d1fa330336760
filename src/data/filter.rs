use std::collections::HashMap;

use super::model::Category;

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// The requested columns, in order, minus every occurrence of `excluded`.
pub fn without<'a>(columns: &[&'a str], excluded: &str) -> Vec<&'a str> {
    columns
        .iter()
        .copied()
        .filter(|col| *col != excluded)
        .collect()
}

// ---------------------------------------------------------------------------
// Row subsets per level
// ---------------------------------------------------------------------------

/// Row indices grouped by level, levels in order of first appearance.
///
/// A row is skipped when its level is null.
pub fn indices_by_level(levels: &[Option<Category>]) -> Vec<(Category, Vec<usize>)> {
    let mut position: HashMap<&Category, usize> = HashMap::new();
    let mut groups: Vec<(Category, Vec<usize>)> = Vec::new();

    for (row, level) in levels.iter().enumerate() {
        let Some(level) = level else {
            continue;
        };
        match position.get(level) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                position.insert(level, groups.len());
                groups.push((level.clone(), vec![row]));
            }
        }
    }
    groups
}

/// Row indices grouped by hue level, in the order levels are drawn.
///
/// Text levels keep first-appearance order; numeric and boolean levels are
/// sorted.
pub fn hue_groups(levels: &[Option<Category>]) -> Vec<(Category, Vec<usize>)> {
    let mut groups = indices_by_level(levels);
    if groups.iter().any(|(level, _)| !matches!(level, Category::Text(_))) {
        groups.sort_by(|a, b| a.0.cmp(&b.0));
    }
    groups
}

/// The non-null values at the given rows.
pub fn non_null_at(values: &[Option<f64>], rows: &[usize]) -> Vec<f64> {
    rows.iter().filter_map(|&row| values[row]).collect()
}
