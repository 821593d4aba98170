use crate::grid::Grid;

/// Hex values of braille dots
///
/// ```notrust
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Draws grids into a string of braille characters, one dot per viewport pixel.
///
/// Each character covers a 2x4 block of dots, so a terminal of `cols x rows` characters gives a
/// `2 * cols` by `4 * rows` pixel viewport.
pub struct Camera {
    /// The dot buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the dot buffer
    w: usize,

    /// Height of the dot buffer
    h: usize,
}

impl Camera {
    pub fn new(w: usize, h: usize) -> Self {
        // Let `w` and `h` refer to width and height of the dot buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our
        // framebuffer. Each braille character is 3 bytes, plus one byte per trailing newline.
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        Self {
            cb: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        }
    }

    /// Camera covering a terminal of `cols x rows` characters.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(2 * cols as usize, 4 * rows as usize)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turns on a single dot. Dots outside the buffer are ignored.
    pub fn draw_pixel(&mut self, x: usize, y: usize) {
        if x < self.w && y < self.h {
            let i = self.xy_from(x, y);
            self.cb[i] = true;
        }
    }

    /// Turns on an `s x s` square of dots with its top left corner at `(x, y)`, clipped to the
    /// buffer.
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize) {
        for dy in 0..s {
            for dx in 0..s {
                self.draw_pixel(x + dx, y + dy);
            }
        }
    }

    /// Draw every alive cell of `grid` as a square of `cell_size` dots.
    pub fn draw_grid(&mut self, grid: &Grid, cell_size: usize) {
        for (r, c) in grid.iter_alive() {
            self.draw_square(c * cell_size, r * cell_size, cell_size);
        }
    }

    /// Reset the dot buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Pack the dot buffer into braille characters, one line per character row.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = (n % self.w, n / self.w);
                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every codepoint in U+2800..=U+28FF is a braille pattern
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
