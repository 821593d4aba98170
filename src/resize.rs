use crate::grid::Grid;

/// The drawable area a grid is laid out in, in pixels.
///
/// Cells are square. Their side is picked so that `rows` cells fill the height exactly, and the
/// number of columns is however many of those cells fit across the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Side of one cell in pixels when the viewport shows `rows` rows. Never less than 1.
    pub fn cell_size(&self, rows: usize) -> usize {
        (self.height / rows.max(1)).max(1)
    }

    /// Number of columns that fit when the viewport shows `rows` rows. Never less than 1.
    pub fn num_cols(&self, rows: usize) -> usize {
        (self.width / self.cell_size(rows)).max(1)
    }

    /// Map a pixel coordinate to the `(row, col)` of `grid` under it, if any.
    pub fn cell_at(&self, x: usize, y: usize, grid: &Grid) -> Option<(usize, usize)> {
        let size = self.cell_size(grid.rows());
        let (r, c) = (y / size, x / size);

        grid.get(r, c).map(|_| (r, c))
    }
}

/// Resample `grid` to `rows x cols`, nearest neighbor on each axis.
///
/// Target cell `(i, j)` takes the value of source cell `(i * old_rows / new_rows, j * old_cols /
/// new_cols)`. This keeps the rough shape of whatever was drawn, at the cost of being lossy:
/// shrinking and growing back will not give the original grid.
pub fn resize(grid: &Grid, rows: usize, cols: usize) -> Grid {
    let (old_rows, old_cols) = (grid.rows(), grid.cols());

    Grid::from_fn(rows, cols, |i, j| {
        grid.is_alive(i * old_rows / rows, j * old_cols / cols)
    })
}
