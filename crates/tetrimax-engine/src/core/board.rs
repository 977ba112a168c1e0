use std::fmt;

use crate::StateError;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

// Full row (all playable cells occupied)
const FULL_ROW_MASK: u16 = (1 << BOARD_WIDTH) - 1;

/// Single row in the bit board representation.
///
/// Bit `x` (LSB first) is set when column `x` is filled. Bits above
/// [`BOARD_WIDTH`] are always zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRow {
    bits: u16,
}

impl BitRow {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: FULL_ROW_MASK,
    };

    /// Checks if every column of the row is filled.
    #[inline]
    #[must_use]
    pub fn is_filled(self) -> bool {
        self.bits == FULL_ROW_MASK
    }

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks if the cell in column `x` is occupied.
    #[inline]
    #[must_use]
    pub fn is_cell_occupied(self, x: usize) -> bool {
        x < BOARD_WIDTH && (self.bits & (1 << x)) != 0
    }

    #[inline]
    fn occupy_cell(&mut self, x: usize) {
        debug_assert!(x < BOARD_WIDTH);
        self.bits |= 1 << x;
    }

    /// Iterates over the cells of the row from left to right.
    #[inline]
    pub fn iter_cells(self) -> impl Iterator<Item = bool> {
        (0..BOARD_WIDTH).map(move |x| self.is_cell_occupied(x))
    }
}

/// Fixed 20×10 Tetris board of binary cells.
///
/// Row 0 is the top of the board and column 0 the left edge. The board is a
/// plain value: copying it yields a fully independent board.
///
/// # Example
///
/// ```
/// use tetrimax_engine::Board;
///
/// let board = Board::from_ascii(
///     r"
///     #.........
///     ###########
///     ",
/// );
/// assert!(board.is_filled(18, 0));
/// assert!(!board.is_filled(18, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BitRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BitRow::EMPTY; BOARD_HEIGHT],
    };

    /// Builds a board from a row-major grid of `0`/`1` cells, top row first.
    ///
    /// Fails if the grid is not exactly 20×10 or contains a value other than 0 or 1.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, StateError>
    where
        R: AsRef<[u8]>,
    {
        if rows.len() != BOARD_HEIGHT {
            return Err(StateError::RowCount {
                expected: BOARD_HEIGHT,
                actual: rows.len(),
            });
        }

        let mut board = Self::EMPTY;
        for (y, (row, dst)) in rows.iter().zip(&mut board.rows).enumerate() {
            let row = row.as_ref();
            if row.len() != BOARD_WIDTH {
                return Err(StateError::ColumnCount {
                    row: y,
                    expected: BOARD_WIDTH,
                    actual: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => dst.occupy_cell(x),
                    _ => {
                        return Err(StateError::InvalidCell {
                            row: y,
                            column: x,
                            value,
                        });
                    }
                }
            }
        }
        Ok(board)
    }

    /// Returns the board as a row-major grid of `0`/`1` cells, top row first.
    #[must_use]
    pub fn to_rows(&self) -> Vec<[u8; BOARD_WIDTH]> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = [0; BOARD_WIDTH];
                for (cell, occupied) in cells.iter_mut().zip(row.iter_cells()) {
                    *cell = u8::from(occupied);
                }
                cells
            })
            .collect()
    }

    #[must_use]
    pub fn row(&self, y: usize) -> BitRow {
        self.rows[y]
    }

    /// Returns an iterator over the rows, top row first.
    pub fn rows(&self) -> impl Iterator<Item = BitRow> + '_ {
        self.rows.iter().copied()
    }

    /// Returns whether the cell at `(row, col)` is filled.
    ///
    /// Cells outside the board are reported as empty.
    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.is_cell_occupied(col))
    }

    /// Marks the given `(row, col)` cells as filled.
    pub fn fill_cells(&mut self, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            self.rows[row].occupy_cell(col);
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Remaining rows keep their relative order and drop down; as many empty
    /// rows as were removed are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;

        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }

        self.rows[..count].fill(BitRow::EMPTY);
        count
    }

    /// Creates a `Board` from ASCII art, mainly for tests.
    ///
    /// `#` is a filled cell and `.` an empty one; every row must have exactly
    /// 10 cells. The rows given form the bottom of the board, so shorter art
    /// leaves the rows above it empty.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have 10 cells or there are more than 20 rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "At most {BOARD_HEIGHT} rows are allowed, got {}",
            lines.len()
        );

        let offset = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                BOARD_WIDTH,
                "Each row must have exactly {} cells, got {} at row {}",
                BOARD_WIDTH,
                chars.len(),
                i
            );

            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.rows[offset + i].occupy_cell(x);
                }
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const BORDER: &str = "----------------------";
        writeln!(f, "{BORDER}")?;
        for row in &self.rows {
            f.write_str("|")?;
            for occupied in row.iter_cells() {
                f.write_str(if occupied { "[]" } else { "  " })?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{BORDER}")
    }
}
