//! Seven-segment rendering of numbers onto a grid.
//!
//! ```notrust
//!      TOP
//!    +-----+
//!  T |     | T
//!  L |     | R
//!    +-----+ MIDDLE
//!  B |     | B
//!  L |     | R
//!    +-----+
//!     BOTTOM
//! ```
//!
//! The layout only makes sense at [`DIGIT_ROWS`] rows. Callers are expected to size the grid
//! with the usual viewport policy at that height and keep manual resizing off while a number is
//! shown.

use tracing::debug;
use tracing::warn;

use crate::error::Error;
use crate::error::Result;
use crate::grid::Grid;

/// Rows of every grid produced by [`render_digits`].
pub const DIGIT_ROWS: usize = 50;

/// Longest accepted number.
pub const MAX_DIGITS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Top,
    TopRight,
    BottomRight,
    Middle,
    BottomLeft,
    TopLeft,
    Bottom,
}

impl Segment {
    /// In glyph table order.
    pub const ALL: [Segment; 7] = [
        Segment::Top,
        Segment::TopRight,
        Segment::BottomRight,
        Segment::Middle,
        Segment::BottomLeft,
        Segment::TopLeft,
        Segment::Bottom,
    ];
}

/// Segments lit for each digit, in [`Segment::ALL`] order.
pub const GLYPHS: [[bool; 7]; 10] = [
    [true, true, true, false, true, true, true],     // 0
    [false, true, true, false, false, false, false], // 1
    [true, true, false, true, true, false, true],    // 2
    [true, true, true, true, false, false, true],    // 3
    [false, true, true, true, false, true, false],   // 4
    [true, false, true, true, false, true, true],    // 5
    [true, false, true, true, true, true, true],     // 6
    [true, true, true, false, false, false, false],  // 7
    [true, true, true, true, true, true, true],      // 8
    [true, true, true, true, false, true, true],     // 9
];

/// Segments lit for `digit`. Panics if `digit > 9`.
pub fn glyph(digit: u8) -> impl Iterator<Item = Segment> {
    let lit = GLYPHS[digit as usize];

    Segment::ALL
        .into_iter()
        .zip(lit)
        .filter_map(|(segment, on)| on.then_some(segment))
}

/// An axis-aligned rectangle of cells. `x` is a column and `y` a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.x..self.x + self.w).contains(&col) && (self.y..self.y + self.h).contains(&row)
    }
}

/// Size and placement of every digit of a number on a `rows x cols` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitLayout {
    pub digit_width: usize,
    pub digit_height: usize,
    pub spacing: usize,
    pub top: usize,
}

impl DigitLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        let digit_width = cols / 10;
        // floor(rows / 1.5)
        let digit_height = rows * 2 / 3;
        let spacing = digit_width / 4;
        let top = (rows - digit_height) / 2;

        Self {
            digit_width,
            digit_height,
            spacing,
            top,
        }
    }

    /// Top-left corner of the digit at `index`, as `(x, y)`.
    pub fn anchor(&self, index: usize) -> (usize, usize) {
        let x = self.spacing + index * (self.digit_width + self.spacing);

        (x, self.top)
    }

    pub fn thickness(&self) -> usize {
        (self.digit_height / 10).max(2)
    }

    /// Cells covered by `segment` of the digit at `index`.
    ///
    /// Horizontal bars leave one thickness free at each end for the vertical bars. The vertical
    /// bars split what is left of the height in two, with one thickness between them for the
    /// middle bar.
    pub fn segment(&self, index: usize, segment: Segment) -> Rect {
        let (x, y) = self.anchor(index);
        let (w, h) = (self.digit_width, self.digit_height);
        let t = self.thickness();

        let bar_w = w.saturating_sub(2 * t);
        let bar_h = h.saturating_sub(3 * t) / 2;
        let right = x + w.saturating_sub(t);

        let (x, y, w, h) = match segment {
            Segment::Top => (x + t, y, bar_w, t),
            Segment::Middle => (x + t, y + t + bar_h, bar_w, t),
            Segment::Bottom => (x + t, y + 2 * t + 2 * bar_h, bar_w, t),
            Segment::TopLeft => (x, y + t, t, bar_h),
            Segment::TopRight => (right, y + t, t, bar_h),
            Segment::BottomLeft => (x, y + 2 * t + bar_h, t, bar_h),
            Segment::BottomRight => (right, y + 2 * t + bar_h, t, bar_h),
        };

        Rect { x, y, w, h }
    }
}

/// Check that `number` is 1 to [`MAX_DIGITS`] ascii digits.
pub fn validate(number: &str) -> Result<()> {
    let reason = if number.is_empty() {
        Some("no digits")
    } else if !number.bytes().all(|b| b.is_ascii_digit()) {
        Some("only the digits 0 to 9 are allowed")
    } else if number.len() > MAX_DIGITS {
        Some("more than 8 digits")
    } else {
        None
    };

    match reason {
        Some(reason) => {
            warn!(number, reason, "rejecting number");

            Err(Error::InvalidDigitInput {
                input: number.to_owned(),
                reason,
            })
        }
        None => Ok(()),
    }
}

/// Draw `number` as seven-segment digits on a fresh [`DIGIT_ROWS`] x `cols` grid.
///
/// Segments running past the edge of the grid are clipped.
pub fn render_digits(number: &str, cols: usize) -> Result<Grid> {
    validate(number)?;

    let layout = DigitLayout::new(DIGIT_ROWS, cols);
    debug!(number, cols, ?layout, "rendering digits");

    let rects: Vec<Rect> = number
        .bytes()
        .enumerate()
        .flat_map(|(index, b)| glyph(b - b'0').map(move |s| layout.segment(index, s)))
        .collect();

    Ok(Grid::from_fn(DIGIT_ROWS, cols, |r, c| {
        rects.iter().any(|rect| rect.contains(r, c))
    }))
}
