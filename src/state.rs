use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the figure window shows, independent of rendering.
pub struct ViewerState {
    pub figure: Figure,

    /// Draw the percentage labels on bars.
    pub show_annotations: bool,

    /// Draw grid lines on every panel, not only where the panel asks for them.
    pub force_grid: bool,

    /// Bumped to make every panel forget its zoom/pan.
    pub view_generation: u32,
}

impl ViewerState {
    pub fn new(figure: Figure) -> Self {
        Self {
            figure,
            show_annotations: true,
            force_grid: false,
            view_generation: 0,
        }
    }

    pub fn toggle_annotations(&mut self) {
        self.show_annotations = !self.show_annotations;
    }

    pub fn toggle_grid(&mut self) {
        self.force_grid = !self.force_grid;
    }

    /// Whether the panel at `idx` (row-major) draws grid lines.
    pub fn grid_for(&self, idx: usize) -> bool {
        self.force_grid
            || self
                .figure
                .cells
                .get(idx)
                .and_then(|c| c.as_ref())
                .is_some_and(|p| p.show_grid)
    }

    pub fn reset_views(&mut self) {
        self.view_generation = self.view_generation.wrapping_add(1);
    }

    /// Status line: how many panels are drawn.
    pub fn summary(&self) -> String {
        let fig = &self.figure;
        format!(
            "{} panels in a {}×{} grid",
            fig.panels().count(),
            fig.nrows(),
            fig.ncols
        )
    }
}
