use std::fmt;

use crate::error::Error;
use crate::error::Result;

/// A finite, bounded Life grid.
///
/// Cells are stored row-major in a single buffer. Every operation that produces a new state
/// returns a fresh `Grid` rather than mutating `self`, so a borrowed grid can be handed to a
/// renderer while the session computes the next one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell dead.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 1 && cols >= 1, "grid must be at least 1x1");

        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Build a grid from a list of rows. Panics if the rows are ragged or empty.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        assert!(!rows.is_empty(), "grid must have at least one row");

        let cols = rows[0].len();
        assert!(cols >= 1, "grid must have at least one column");

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "row {i} has {} cells, expected {cols}", row.len());
            cells.extend_from_slice(row);
        }

        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    /// Build a grid with the given cells alive. Coordinates outside the grid are ignored.
    pub fn with_alive(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(rows, cols);

        for &(r, c) in alive {
            if r < rows && c < cols {
                grid.cells[r * cols + c] = true;
            }
        }

        grid
    }

    /// Build a grid from a `rows x cols` predicate.
    pub(crate) fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut grid = Self::new(rows, cols);

        for r in 0..rows {
            for c in 0..cols {
                grid.cells[r * cols + c] = f(r, c);
            }
        }

        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// State of cell `(r, c)`, or `None` if it lies outside the grid.
    pub fn get(&self, r: usize, c: usize) -> Option<bool> {
        if r < self.rows && c < self.cols {
            Some(self.cells[r * self.cols + c])
        } else {
            None
        }
    }

    pub fn is_alive(&self, r: usize, c: usize) -> bool {
        self.get(r, c).unwrap_or(false)
    }

    /// Returns a copy of this grid with cell `(r, c)` flipped.
    pub fn toggle(&self, r: usize, c: usize) -> Result<Self> {
        if r >= self.rows || c >= self.cols {
            return Err(Error::OutOfRange {
                row: r,
                col: c,
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut next = self.clone();
        let i = r * self.cols + c;
        next.cells[i] = !next.cells[i];

        Ok(next)
    }

    /// Returns a copy of this grid with every cell flipped.
    pub fn invert(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|&alive| !alive).collect(),
        }
    }

    /// Number of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Iterate over the `(row, col)` coordinates of every alive cell, row by row.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;

        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    fn row(&self, r: usize) -> &[bool] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }
}

/// Renders the grid with `#` for alive cells and `.` for dead ones, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }

            for &alive in self.row(r) {
                f.write_str(if alive { "#" } else { "." })?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{}", self.rows, self.cols)?;
        write!(f, "{self}")
    }
}
