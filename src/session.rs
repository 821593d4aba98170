use std::time::Duration;

use tracing::debug;
use tracing::info;

use crate::clock::Clock;
use crate::clock::RunState;
use crate::clock::Tick;
use crate::clock::Timestamp;
use crate::config;
use crate::config::Settings;
use crate::digits;
use crate::digits::DIGIT_ROWS;
use crate::error::Error;
use crate::error::Result;
use crate::grid::Grid;
use crate::resize;
use crate::resize::Viewport;
use crate::rules::RuleSet;
use crate::step;

/// The one live simulation: the current grid, the clock stepping it and the viewport it is laid
/// out in.
///
/// Every operation replaces the grid with a freshly computed one. Renderers borrow
/// [`Session::grid`] between operations.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    clock: Clock,
    rule: RuleSet,
    viewport: Viewport,

    /// Rows picked by hand. The grid has [`DIGIT_ROWS`] rows instead while a number is shown.
    rows: usize,

    /// The number on display, if any
    digits: Option<String>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let rows = config::clamp_rows(settings.rows);
        let cols = settings.viewport.num_cols(rows);

        info!(rows, cols, rule = %settings.rule, "new session");

        Self {
            grid: Grid::new(rows, cols),
            clock: Clock::new(settings.speed),
            rule: settings.rule,
            viewport: settings.viewport,
            rows,
            digits: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.clock.generation()
    }

    pub fn state(&self) -> RunState {
        self.clock.state()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn speed(&self) -> Duration {
        self.clock.interval()
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The number on display, if any.
    pub fn digits(&self) -> Option<&str> {
        self.digits.as_deref()
    }

    /// Side of a cell in viewport pixels.
    pub fn cell_size(&self) -> usize {
        self.viewport.cell_size(self.grid.rows())
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Start a stopped or paused run, pause a running one.
    pub fn toggle_run(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop, clear the grid and set the generation back to 0. The grid size is kept and any
    /// number on display is dropped.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.digits = None;
        self.grid = Grid::new(self.grid.rows(), self.grid.cols());
    }

    pub fn set_speed(&mut self, interval: Duration) {
        self.clock.set_interval(interval);
    }

    /// Flip every cell. Any run is stopped first.
    pub fn invert(&mut self) {
        self.clock.stop();
        self.grid = self.grid.invert();
    }

    /// Flip cell `(r, c)`. On error the grid is left as it was.
    pub fn toggle(&mut self, r: usize, c: usize) -> Result<()> {
        self.grid = self.grid.toggle(r, c)?;

        Ok(())
    }

    /// Flip the cell under viewport pixel `(x, y)`.
    pub fn click(&mut self, x: usize, y: usize) -> Result<()> {
        let (r, c) = self.viewport.cell_at(x, y, &self.grid).ok_or(Error::OutOfRange {
            row: y / self.cell_size(),
            col: x / self.cell_size(),
            rows: self.grid.rows(),
            cols: self.grid.cols(),
        })?;

        self.toggle(r, c)
    }

    /// Change the number of rows, rescaling the current pattern. The column count follows from
    /// the viewport.
    ///
    /// Rows are clamped to [`config::MIN_ROWS`]..=[`config::MAX_ROWS`]. Refused while a number
    /// is displayed.
    pub fn resize(&mut self, rows: usize) -> Result<()> {
        if self.digits.is_some() {
            return Err(Error::ResizeLocked);
        }

        let rows = config::clamp_rows(rows);
        let cols = self.viewport.num_cols(rows);

        debug!(
            from = ?(self.grid.rows(), self.grid.cols()),
            to = ?(rows, cols),
            "resizing"
        );

        self.clock.reset();
        self.rows = rows;
        self.grid = resize::resize(&self.grid, rows, cols);

        Ok(())
    }

    /// Show `number` as seven-segment digits. Invalid input leaves everything untouched.
    pub fn render_digits(&mut self, number: &str) -> Result<()> {
        let cols = self.viewport.num_cols(DIGIT_ROWS);
        let grid = digits::render_digits(number, cols)?;

        self.clock.reset();
        self.grid = grid;
        self.digits = Some(number.to_owned());

        Ok(())
    }

    /// Take the number off display and go back to an empty grid of the hand-picked size.
    pub fn clear_digits(&mut self) {
        if self.digits.take().is_none() {
            return;
        }

        self.clock.reset();
        self.grid = Grid::new(self.rows, self.viewport.num_cols(self.rows));
    }

    /// The viewport changed size. The grid keeps its rows and is rescaled to the new column
    /// count. A number that has not started evolving is redrawn at the new width instead.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }

        self.viewport = viewport;

        let rows = self.grid.rows();
        let cols = viewport.num_cols(rows);

        if cols == self.grid.cols() {
            return;
        }

        debug!(?viewport, cols, "viewport changed");

        match self.digits.as_deref() {
            Some(number) if self.clock.generation() == 0 && !self.clock.is_running() => {
                if let Ok(grid) = digits::render_digits(number, cols) {
                    self.clock.reset();
                    self.grid = grid;
                }
            }
            _ => self.grid = resize::resize(&self.grid, rows, cols),
        }
    }

    /// Advance one generation by hand. Does nothing while a run is going.
    pub fn step_once(&mut self) {
        if self.is_running() {
            return;
        }

        self.grid = step::step_with(&self.grid, self.rule);
        self.clock.advance();
    }

    /// One scheduling opportunity at time `now`.
    ///
    /// Meant to be called on every frame. Steps at most once, and only if the run has been going
    /// for a full interval since the last step. Returns whether the grid changed.
    pub fn frame(&mut self, now: Timestamp) -> bool {
        let Some(ticket) = self.clock.pending() else {
            return false;
        };

        match self.clock.poll(ticket, now) {
            Tick::Step => {
                self.grid = step::step_with(&self.grid, self.rule);
                true
            }
            Tick::Cancelled | Tick::Baseline | Tick::Waiting => false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
