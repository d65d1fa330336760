//! Renderer-independent description of a figure: a grid of chart panels with
//! their annotations, legends and a suptitle.
//!
//! Builders in [`crate::plots`] produce a [`Figure`]; [`crate::app::show`]
//! draws it.

use eframe::egui::Color32;

use crate::data::aggregate::BoxStats;

/// Screen pixels per figure inch.
pub const PIXELS_PER_INCH: f32 = 64.0;

/// Largest window the viewer opens; bigger figures scroll.
const MAX_WINDOW: [f32; 2] = [1600.0, 1000.0];

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Suptitle shown above the whole grid.
    pub title: String,
    pub ncols: usize,
    /// Row-major grid cells; `None` leaves a cell blank.
    pub cells: Vec<Option<Panel>>,
    /// Figure-level legend, drawn once beside the grid.
    pub legend: Option<Legend>,
    /// Width and height in inches.
    pub size: [f32; 2],
}

impl Figure {
    /// An empty `nrows × ncols` grid.
    pub fn grid(title: impl Into<String>, nrows: usize, ncols: usize, size: [f32; 2]) -> Self {
        Figure {
            title: title.into(),
            ncols,
            cells: (0..nrows * ncols).map(|_| None).collect(),
            legend: None,
            size,
        }
    }

    pub fn nrows(&self) -> usize {
        if self.ncols == 0 {
            0
        } else {
            self.cells.len() / self.ncols
        }
    }

    pub fn set(&mut self, row: usize, col: usize, panel: Panel) {
        let idx = row * self.ncols + col;
        self.cells[idx] = Some(panel);
    }

    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        self.cells.get(row * self.ncols + col)?.as_ref()
    }

    /// Filled panels in row-major order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.cells.iter().flatten()
    }

    /// Initial window size in points.
    pub fn window_size(&self) -> [f32; 2] {
        [
            (self.size[0] * PIXELS_PER_INCH).min(MAX_WINDOW[0]),
            (self.size[1] * PIXELS_PER_INCH).min(MAX_WINDOW[1]),
        ]
    }

    /// Height of one grid row in points.
    pub fn row_height(&self) -> f32 {
        let rows = self.nrows().max(1) as f32;
        (self.size[1] * PIXELS_PER_INCH / rows).max(220.0)
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub chart: Chart,
    pub annotations: Vec<Annotation>,
    pub legend: Option<Legend>,
    pub show_grid: bool,
}

impl Panel {
    pub fn new(title: impl Into<String>, chart: Chart) -> Self {
        let annotations = chart.annotations();
        Panel {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            chart,
            annotations,
            legend: None,
            show_grid: false,
        }
    }

    pub fn labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Legend entries for this panel's series, whether or not it shows them.
    pub fn series_legend(&self, title: Option<String>) -> Option<Legend> {
        let series = match &self.chart {
            Chart::StackedBars(c) => &c.series,
            Chart::Histogram(c) => &c.series,
            Chart::Bars(_) | Chart::Boxes(_) => return None,
        };
        Some(Legend::from_series(title, series))
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    /// One bar per category, annotated with its share of `total`.
    Bars(Bars),
    /// Category bars split into stacked percentage segments.
    StackedBars(StackedBars),
    /// Stacked histogram over shared bin edges.
    Histogram(Histogram),
    Boxes(Boxes),
}

impl Chart {
    fn annotations(&self) -> Vec<Annotation> {
        match self {
            Chart::Bars(c) => c.annotations(),
            Chart::StackedBars(c) => c.annotations(),
            Chart::Histogram(_) | Chart::Boxes(_) => Vec::new(),
        }
    }

    /// Tick labels for the category axis (empty for continuous axes).
    pub fn category_labels(&self) -> &[String] {
        match self {
            Chart::Bars(c) => &c.labels,
            Chart::StackedBars(c) => &c.labels,
            Chart::Boxes(c) => &c.labels,
            Chart::Histogram(_) => &[],
        }
    }
}

/// A named, coloured series of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Color32,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bars {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: Color32,
    /// Denominator of the percentage annotations.
    pub total: f64,
}

impl Bars {
    fn annotations(&self) -> Vec<Annotation> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &height)| Annotation {
                x: i as f64,
                y: height,
                text: format!("{:.2}%", height / self.total * 100.0),
                anchor: Anchor::Above,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedBars {
    pub labels: Vec<String>,
    /// Bottom to top; `series[j].values[i]` is segment `j` of bar `i`.
    pub series: Vec<Series>,
}

impl StackedBars {
    /// Lower edge of segment `j` of bar `i`.
    pub fn base(&self, j: usize, i: usize) -> f64 {
        self.series[..j].iter().map(|s| s.values[i]).sum()
    }

    fn annotations(&self) -> Vec<Annotation> {
        let mut out = Vec::new();
        for (j, series) in self.series.iter().enumerate() {
            for (i, &height) in series.values.iter().enumerate() {
                if height > 0.0 {
                    out.push(Annotation {
                        x: i as f64,
                        y: self.base(j, i) + height / 2.0,
                        text: format!("{height:.2}%"),
                        anchor: Anchor::Centered,
                    });
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    /// Bottom to top; `series[j].values[b]` counts bin `b`.
    pub series: Vec<Series>,
}

impl Histogram {
    pub fn base(&self, j: usize, bin: usize) -> f64 {
        self.series[..j].iter().map(|s| s.values[bin]).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boxes {
    pub labels: Vec<String>,
    pub colors: Vec<Color32>,
    pub stats: Vec<BoxStats>,
}

// ---------------------------------------------------------------------------
// Annotations and legends
// ---------------------------------------------------------------------------

/// Where a label sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Horizontally centred, just above the point.
    Above,
    Centered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub anchor: Anchor,
}

impl Annotation {
    /// The annotated percentage, if the text is one.
    pub fn percent(&self) -> Option<f64> {
        self.text.strip_suffix('%')?.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: Option<String>,
    pub entries: Vec<(String, Color32)>,
}

impl Legend {
    pub fn from_series(title: Option<String>, series: &[Series]) -> Self {
        Legend {
            title,
            entries: series.iter().map(|s| (s.name.clone(), s.color)).collect(),
        }
    }
}
