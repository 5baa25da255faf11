//! Arrangement of bits in a Data Matrix symbol.
//!
//! [PlacementMap] records for every module of the data area which bit of
//! which codeword it shows. It only depends on the symbol size. Combined
//! with the codewords it yields the final [Bitmap], which also contains
//! the finder and timing patterns around each data region.
use crate::symbol_size::SymbolSize;

/// Content of one module in the data area.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Bit `bit` of codeword `codeword`, bit 7 is the most significant.
    Codeword { codeword: u16, bit: u8 },
    /// Module not covered by any codeword, only in the lower right corner
    /// of some symbols.
    Fixed(bool),
}

/// Map a position outside the data area back into it.
///
/// Positions left of or above the area continue on the opposite side,
/// shifted by an offset depending on the other dimension.
pub(crate) fn wrap(mut row: isize, mut col: isize, rows: isize, cols: isize) -> (usize, usize) {
    if row < 0 {
        row += rows;
        col += 4 - ((rows + 4) % 8);
    }
    if col < 0 {
        col += cols;
        row += 4 - ((cols + 4) % 8);
    }
    debug_assert!(
        (0..rows).contains(&row) && (0..cols).contains(&col),
        "wrapped position out of range"
    );
    (row as usize, col as usize)
}

/// Positions of the eight bits of the standard "utah" shaped codeword
/// whose last bit is at `(i, j)`, most significant bit first.
fn utah(i: isize, j: isize) -> [(isize, isize); 8] {
    [
        (i - 2, j - 2),
        (i - 2, j - 1),
        (i - 1, j - 2),
        (i - 1, j - 1),
        (i - 1, j),
        (i, j - 2),
        (i, j - 1),
        (i, j),
    ]
}

fn corner_a(h: isize, w: isize) -> [(isize, isize); 8] {
    [
        (h - 1, 0),
        (h - 1, 1),
        (h - 1, 2),
        (0, w - 2),
        (0, w - 1),
        (1, w - 1),
        (2, w - 1),
        (3, w - 1),
    ]
}

fn corner_b(h: isize, w: isize) -> [(isize, isize); 8] {
    [
        (h - 3, 0),
        (h - 2, 0),
        (h - 1, 0),
        (0, w - 4),
        (0, w - 3),
        (0, w - 2),
        (0, w - 1),
        (1, w - 1),
    ]
}

fn corner_c(h: isize, w: isize) -> [(isize, isize); 8] {
    [
        (h - 3, 0),
        (h - 2, 0),
        (h - 1, 0),
        (0, w - 2),
        (0, w - 1),
        (1, w - 1),
        (2, w - 1),
        (3, w - 1),
    ]
}

fn corner_d(h: isize, w: isize) -> [(isize, isize); 8] {
    [
        (h - 1, 0),
        (h - 1, w - 1),
        (0, w - 3),
        (0, w - 2),
        (0, w - 1),
        (1, w - 3),
        (1, w - 2),
        (1, w - 1),
    ]
}

/// Representation of the bits in a Data Matrix symbol without alignment patterns.
#[derive(Debug, Clone)]
pub struct PlacementMap {
    cells: Vec<Option<Cell>>,
    rows: usize,
    cols: usize,
}

impl PlacementMap {
    /// Compute the placement for a data area with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut map = Self {
            cells: vec![None; rows * cols],
            rows,
            cols,
        };
        map.traverse();
        map.fill_corner();
        map
    }

    /// Compute the placement for the data area of a symbol size.
    pub fn for_size(size: SymbolSize) -> Self {
        let setup = size.block_setup();
        Self::new(setup.content_height(), setup.content_width())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell in row `i` and column `j` (counted from the top left).
    pub fn cell(&self, i: usize, j: usize) -> Option<Cell> {
        self.cells[i * self.cols + j]
    }

    /// Iterate over the cells in row major order.
    pub fn cells(&self) -> impl Iterator<Item = Option<Cell>> + '_ {
        self.cells.iter().cloned()
    }

    fn place(&mut self, positions: [(isize, isize); 8], codeword: u16) {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        for (n, (i, j)) in positions.into_iter().enumerate() {
            let (i, j) = wrap(i, j, rows, cols);
            self.cells[i * self.cols + j] = Some(Cell::Codeword {
                codeword,
                bit: 7 - n as u8,
            });
        }
    }

    fn is_free(&self, i: isize, j: isize) -> bool {
        self.cells[i as usize * self.cols + j as usize].is_none()
    }

    /// Walk the data area diagonally and assign the codewords in order.
    fn traverse(&mut self) {
        let nrow = self.rows as isize;
        let ncol = self.cols as isize;

        // starting in the correct location for first character, bit 8
        let mut i = 4;
        let mut j = 0;
        let mut codeword = 0;

        loop {
            // repeatedly first check for one of the special corner cases
            if i == nrow && j == 0 {
                self.place(corner_a(nrow, ncol), codeword);
                codeword += 1;
            }
            if i == nrow - 2 && j == 0 && ncol % 4 != 0 {
                self.place(corner_b(nrow, ncol), codeword);
                codeword += 1;
            }
            if i == nrow - 2 && j == 0 && ncol % 8 == 4 {
                self.place(corner_c(nrow, ncol), codeword);
                codeword += 1;
            }
            if i == nrow + 4 && j == 2 && ncol % 8 == 0 {
                self.place(corner_d(nrow, ncol), codeword);
                codeword += 1;
            }
            // sweep upward diagonally
            loop {
                if i < nrow && j >= 0 && self.is_free(i, j) {
                    self.place(utah(i, j), codeword);
                    codeword += 1;
                }
                i -= 2;
                j += 2;
                if !(i >= 0 && j < ncol) {
                    break;
                }
            }
            i += 1;
            j += 3;

            // sweep downward diagonally
            loop {
                if i >= 0 && j < ncol && self.is_free(i, j) {
                    self.place(utah(i, j), codeword);
                    codeword += 1;
                }
                i += 2;
                j -= 2;
                if !(i < nrow && j >= 0) {
                    break;
                }
            }
            i += 3;
            j += 1;

            // until entire map is traversed
            if !(i < nrow || j < ncol) {
                break;
            }
        }
    }

    /// Fill the 2x2 block in the lower right corner if no codeword covers it.
    fn fill_corner(&mut self) {
        let (h, w) = (self.rows, self.cols);
        if self.cells[h * w - 1].is_some() {
            return;
        }
        self.cells[(h - 1) * w + w - 1] = Some(Cell::Fixed(true));
        self.cells[(h - 2) * w + w - 2] = Some(Cell::Fixed(true));
        self.cells[(h - 1) * w + w - 2] = Some(Cell::Fixed(false));
        self.cells[(h - 2) * w + w - 1] = Some(Cell::Fixed(false));
    }

    /// Get the symbol as a bitmap, with finder and timing patterns added.
    ///
    /// `codewords` must contain the data and error correction codewords.
    pub fn bitmap(&self, codewords: &[u8], size: SymbolSize) -> Bitmap {
        let setup = size.block_setup();
        let (w, h) = (setup.width, setup.height);
        let (reg_w, reg_h) = (setup.region_width, setup.region_height);
        debug_assert_eq!(self.rows, setup.content_height());
        debug_assert_eq!(self.cols, setup.content_width());
        let mut bits = vec![false; w * h];

        let idx = |i: usize, j: usize| i * w + j;

        for top in (0..h).step_by(reg_h) {
            // solid bottom row, alternating top row
            for j in 0..w {
                bits[idx(top + reg_h - 1, j)] = true;
            }
            for j in (0..w).step_by(2) {
                bits[idx(top, j)] = true;
            }
        }
        for left in (0..w).step_by(reg_w) {
            // solid left column, alternating right column
            for i in 0..h {
                bits[idx(i, left)] = true;
            }
            for i in (1..h).step_by(2) {
                bits[idx(i, left + reg_w - 1)] = true;
            }
        }

        // copy the data
        for (n, cell) in self.cells.iter().enumerate() {
            let dark = match cell {
                Some(Cell::Codeword { codeword, bit }) => {
                    (codewords[*codeword as usize] >> bit) & 1 == 1
                }
                Some(Cell::Fixed(dark)) => *dark,
                None => false,
            };
            let mut i = n / self.cols;
            i += 1 + (i / (reg_h - 2)) * 2;
            let mut j = n % self.cols;
            j += 1 + (j / (reg_w - 2)) * 2;
            bits[idx(i, j)] = dark;
        }

        Bitmap { width: w, bits }
    }
}

/// The modules of a symbol, row by row from the top.
///
/// Contains helpers for rendering the content. For rendering targets which
/// use something similar to pixels try [pixels()](Self::pixels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    bits: Vec<bool>,
}

impl Bitmap {
    /// Return the width of the bitmap (no quiet zone included).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the height of the bitmap (no quiet zone included).
    pub fn height(&self) -> usize {
        self.bits.len() / self.width
    }

    /// Is the module in row `y` and column `x` dark?
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// One string per row, top row first, `'1'` for a dark module and
    /// `'0'` for a light one.
    pub fn pattern(&self) -> Vec<String> {
        self.bits
            .chunks(self.width)
            .map(|row| row.iter().map(|b| if *b { '1' } else { '0' }).collect())
            .collect()
    }

    /// Compute a unicode representation ("ASCII art").
    ///
    /// This is intended as a demo functionality. It might look weird
    /// if the line height is wrong or if you are not using a monospaced font.
    pub fn unicode(&self) -> String {
        const BORDER: usize = 1;
        const CHAR: [char; 4] = [' ', '▄', '▀', '█'];
        let height = self.height();
        let get = |i: usize, j: usize| -> usize {
            let inside = (BORDER..BORDER + height).contains(&i)
                && (BORDER..BORDER + self.width).contains(&j);
            usize::from(inside && self.get(j - BORDER, i - BORDER))
        };
        let mut out =
            String::with_capacity((height + 2 * BORDER) * (self.width + 1 + 2 * BORDER) * 3 / 2);
        for i in (0..height + 2 * BORDER).step_by(2) {
            for j in 0..(self.width + 2 * BORDER) {
                out.push(CHAR[(get(i, j) << 1) | get(i + 1, j)]);
            }
            out.push('\n');
        }
        out
    }

    /// Get an iterator over the dark modules' coordinates `(x, y)`.
    ///
    /// The coordinate system starts in the top left corner at `(0, 0)`
    /// with a horizontal x-axis and vertical y-axis. The modules are
    /// returned in order, incrementing x before y.
    ///
    /// A quiet zone is not included in the coordinates but one must
    /// be added when rendering, at least one module wide.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use ecc200::{DataMatrix, EncodeOptions};
    /// let code = DataMatrix::encode(b"Foo", &EncodeOptions::default()).unwrap();
    /// for (x, y) in code.bitmap().pixels() {
    ///     // place square/circle at (x, y) to render this Data Matrix
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width();
        self.bits
            .iter()
            .enumerate()
            .filter(|(_i, b)| **b)
            .map(move |(i, _b)| (i % w, i / w))
    }
}
