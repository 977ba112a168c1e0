use std::{cell::OnceCell, iter};

use tetrimax_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board};

/// Column metrics of a board, each computed on first access.
///
/// Heights are measured from the floor: a column whose topmost filled cell is
/// in row `y` has height `20 - y`, an empty column has height 0.
#[derive(Debug)]
pub struct BoardAnalysis {
    board: Board,
    column_heights: OnceCell<[u8; BOARD_WIDTH]>,
    column_occupied_cells: OnceCell<[u8; BOARD_WIDTH]>,
    aggregate_height: OnceCell<u16>,
    holes: OnceCell<u16>,
    bumpiness: OnceCell<u16>,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            board: *board,
            column_heights: OnceCell::new(),
            column_occupied_cells: OnceCell::new(),
            aggregate_height: OnceCell::new(),
            holes: OnceCell::new(),
            bumpiness: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn column_heights(&self) -> &[u8; BOARD_WIDTH] {
        self.column_heights.get_or_init(|| {
            let mut column_heights = [0; BOARD_WIDTH];
            for (x, h) in column_heights.iter_mut().enumerate() {
                let top = self.board.rows().position(|row| row.is_cell_occupied(x));
                if let Some(top) = top {
                    *h = to_u8(BOARD_HEIGHT - top);
                }
            }
            column_heights
        })
    }

    #[must_use]
    pub fn column_occupied_cells(&self) -> &[u8; BOARD_WIDTH] {
        self.column_occupied_cells.get_or_init(|| {
            let mut column_occupied_cells = [0; BOARD_WIDTH];
            for row in self.board.rows() {
                for (occupied, count) in iter::zip(row.iter_cells(), &mut column_occupied_cells) {
                    *count += u8::from(occupied);
                }
            }
            column_occupied_cells
        })
    }

    /// Sum of all column heights.
    #[must_use]
    pub fn aggregate_height(&self) -> u16 {
        *self
            .aggregate_height
            .get_or_init(|| self.column_heights().iter().copied().map(u16::from).sum())
    }

    /// Number of empty cells lying below the topmost filled cell of their column.
    #[must_use]
    pub fn holes(&self) -> u16 {
        *self.holes.get_or_init(|| {
            iter::zip(self.column_heights(), self.column_occupied_cells())
                .map(|(h, occ)| u16::from(h - occ))
                .sum()
        })
    }

    /// Sum of absolute height differences between adjacent columns.
    #[must_use]
    pub fn bumpiness(&self) -> u16 {
        *self.bumpiness.get_or_init(|| {
            self.column_heights()
                .windows(2)
                .map(|w| u16::from(w[0].abs_diff(w[1])))
                .sum()
        })
    }
}

// Column heights never exceed the board height.
#[expect(clippy::cast_possible_truncation)]
fn to_u8(n: usize) -> u8 {
    debug_assert!(n <= BOARD_HEIGHT);
    n as u8
}
