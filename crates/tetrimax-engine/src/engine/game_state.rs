use std::{
    cell::{OnceCell, RefCell},
    collections::HashMap,
    fmt,
};

use arrayvec::ArrayVec;

use crate::{
    StateError,
    core::{
        board::{BOARD_HEIGHT, BOARD_WIDTH, Board},
        piece::{Orientation, PieceKind, PieceShape},
    },
};

/// Number of pieces in the look-ahead queue.
pub const QUEUE_LEN: usize = 3;

/// Upper bound on legal placements for one piece (L, J and T: 9 + 8 + 9 + 8).
pub const MAX_PLACEMENTS: usize = 34;

/// Absolute `(row, col)` board coordinates covered by a resting piece.
pub type PieceCells = [(usize, usize); 4];

/// Legal placements of the queue head, orientation-major then column ascending.
pub type Placements = ArrayVec<Placement, MAX_PLACEMENTS>;

/// Where to drop the current piece: the board column of the grid's left edge,
/// and the orientation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    pub column: usize,
    pub orientation: Orientation,
}

impl Placement {
    #[must_use]
    pub const fn new(column: usize, orientation: Orientation) -> Self {
        Self {
            column,
            orientation,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(col {}, orient {})", self.column, self.orientation)
    }
}

type DropKey = (PieceKind, usize, Orientation);

/// Immutable snapshot of a game: board, 3-piece queue and cleared-line count.
///
/// Every transition returns a brand-new state; no method mutates a state after
/// construction. That makes the per-instance memoization caches safe: drop
/// locations and the legal-placement list are computed at most once per state
/// when caching is enabled.
///
/// Cloning yields an independent state with empty caches.
///
/// # Example
///
/// ```
/// use tetrimax_engine::{Board, GameState, Orientation, PieceKind};
///
/// let state = GameState::new(Board::EMPTY, [PieceKind::I, PieceKind::O, PieceKind::T], 0);
/// let next = state.place_piece(0, Orientation::new(1), PieceKind::S)?;
///
/// assert!((0..4).all(|col| next.board().is_filled(19, col)));
/// assert_eq!(next.queue(), &[PieceKind::O, PieceKind::T, PieceKind::S]);
/// # Ok::<(), tetrimax_engine::StateError>(())
/// ```
pub struct GameState {
    board: Board,
    queue: [PieceKind; QUEUE_LEN],
    lines_cleared: usize,
    cache_enabled: bool,
    placements: OnceCell<Placements>,
    drop_cache: RefCell<HashMap<DropKey, Option<PieceCells>>>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("queue", &self.queue)
            .field("lines_cleared", &self.lines_cleared)
            .field("cache_enabled", &self.cache_enabled)
            .finish_non_exhaustive()
    }
}

impl Clone for GameState {
    fn clone(&self) -> Self {
        Self::with_cache(self.board, self.queue, self.lines_cleared, self.cache_enabled)
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.queue == other.queue
            && self.lines_cleared == other.lines_cleared
    }
}

impl Eq for GameState {}

impl GameState {
    /// Creates a state with memoization enabled.
    #[must_use]
    pub fn new(board: Board, queue: [PieceKind; QUEUE_LEN], lines_cleared: usize) -> Self {
        Self::with_cache(board, queue, lines_cleared, true)
    }

    /// Creates a state, choosing whether drop locations and placements are memoized.
    #[must_use]
    pub fn with_cache(
        board: Board,
        queue: [PieceKind; QUEUE_LEN],
        lines_cleared: usize,
        cache_enabled: bool,
    ) -> Self {
        Self {
            board,
            queue,
            lines_cleared,
            cache_enabled,
            placements: OnceCell::new(),
            drop_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Builds a state from untyped input, validating everything.
    ///
    /// `rows` must be a 20×10 grid of `0`/`1` cells (top row first), `queue`
    /// exactly three piece names (`"O"`, `"I"`, `"S"`, `"Z"`, `"L"`, `"J"`,
    /// `"T"`) and `lines` non-negative. The input is copied; the state never
    /// refers back to the caller's buffers.
    pub fn from_raw<R, Q>(
        rows: &[R],
        queue: &[Q],
        lines: i64,
        cache_enabled: bool,
    ) -> Result<Self, StateError>
    where
        R: AsRef<[u8]>,
        Q: AsRef<str>,
    {
        let board = Board::from_rows(rows)?;

        let [a, b, c] = queue else {
            return Err(StateError::QueueLength {
                expected: QUEUE_LEN,
                actual: queue.len(),
            });
        };
        let queue = [a.as_ref().parse()?, b.as_ref().parse()?, c.as_ref().parse()?];

        let lines_cleared =
            usize::try_from(lines).map_err(|_| StateError::NegativeLines { lines })?;

        Ok(Self::with_cache(board, queue, lines_cleared, cache_enabled))
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn queue(&self) -> &[PieceKind; QUEUE_LEN] {
        &self.queue
    }

    /// The piece to be placed now (queue slot 0).
    #[must_use]
    pub fn head(&self) -> PieceKind {
        self.queue[0]
    }

    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Returns the board cells `shape` would cover with its top-left corner at
    /// `(row, col)`.
    ///
    /// Returns `None` if any covered cell lies outside the board or is already filled.
    #[must_use]
    pub fn occupied_cells(&self, shape: &PieceShape, row: usize, col: usize) -> Option<PieceCells> {
        let mut cells = [(0, 0); 4];
        for (dst, &(dy, dx)) in cells.iter_mut().zip(shape.cells()) {
            let (Some(y), Some(x)) = (row.checked_add(dy), col.checked_add(dx)) else {
                return None;
            };
            if y >= BOARD_HEIGHT || x >= BOARD_WIDTH || self.board.is_filled(y, x) {
                return None;
            }
            *dst = (y, x);
        }
        Some(cells)
    }

    /// Computes where `piece` comes to rest when dropped straight down in `col`.
    ///
    /// Candidate top rows are scanned from the top of the board downward; the
    /// last position before the first collision is the resting position.
    /// Returns `None` if the piece collides even at row 0, or if `orientation`
    /// is not valid for `piece`.
    #[must_use]
    pub fn drop_location(
        &self,
        piece: PieceKind,
        col: usize,
        orientation: Orientation,
    ) -> Option<PieceCells> {
        let key = (piece, col, orientation);
        if self.cache_enabled
            && let Some(cells) = self.drop_cache.borrow().get(&key)
        {
            return *cells;
        }

        let cells = piece.shape(orientation).and_then(|shape| {
            let mut last = None;
            for row in 0..=(BOARD_HEIGHT - shape.height()) {
                let Some(cells) = self.occupied_cells(shape, row, col) else {
                    break;
                };
                last = Some(cells);
            }
            last
        });

        if self.cache_enabled {
            self.drop_cache.borrow_mut().insert(key, cells);
        }
        cells
    }

    /// Enumerates every placement of the head piece that has a resting position.
    ///
    /// Orientations are visited in ascending order and, within each, columns
    /// from left to right. An empty result means the state is terminal.
    #[must_use]
    pub fn legal_placements(&self) -> Placements {
        if self.cache_enabled {
            return self
                .placements
                .get_or_init(|| self.compute_legal_placements())
                .clone();
        }
        self.compute_legal_placements()
    }

    fn compute_legal_placements(&self) -> Placements {
        let piece = self.head();
        let mut placements = Placements::new();
        for orientation in piece.orientations() {
            let Some(shape) = piece.shape(orientation) else {
                continue;
            };
            for col in 0..=(BOARD_WIDTH - shape.width()) {
                if self.drop_location(piece, col, orientation).is_some() {
                    placements.push(Placement::new(col, orientation));
                }
            }
        }
        placements
    }

    /// Returns `true` when the head piece has no legal placement.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.legal_placements().is_empty()
    }

    /// Drops the head piece at `(col, orientation)` and returns the successor state.
    ///
    /// Full rows are cleared and counted, the queue shifts left, and `next_piece`
    /// becomes the last queue slot. The receiver is left untouched.
    ///
    /// # Errors
    ///
    /// - [`StateError::InvalidOrientation`] if `orientation` does not exist for the head piece
    /// - [`StateError::Collision`] if the piece has no resting position there
    pub fn place_piece(
        &self,
        col: usize,
        orientation: Orientation,
        next_piece: PieceKind,
    ) -> Result<Self, StateError> {
        let piece = self.head();
        if piece.shape(orientation).is_none() {
            return Err(StateError::InvalidOrientation { piece, orientation });
        }

        let cells = self
            .drop_location(piece, col, orientation)
            .ok_or(StateError::Collision {
                piece,
                column: col,
                orientation,
            })?;

        let mut board = self.board;
        board.fill_cells(&cells);
        let cleared_lines = board.clear_lines();

        let [_, second, third] = self.queue;
        Ok(Self::with_cache(
            board,
            [second, third, next_piece],
            self.lines_cleared + cleared_lines,
            self.cache_enabled,
        ))
    }

    /// Like [`Self::place_piece`], taking a [`Placement`].
    pub fn place(&self, placement: Placement, next_piece: PieceKind) -> Result<Self, StateError> {
        self.place_piece(placement.column, placement.orientation, next_piece)
    }

    /// Like [`Self::place_piece`], but with an untyped orientation index and piece name.
    ///
    /// # Errors
    ///
    /// Additionally returns [`StateError::UnknownPiece`] if `next_piece` is not a piece name.
    pub fn place_piece_named(
        &self,
        col: usize,
        orientation: u8,
        next_piece: &str,
    ) -> Result<Self, StateError> {
        let next_piece = next_piece.parse()?;
        self.place_piece(col, Orientation::new(orientation), next_piece)
    }

    /// Returns a copy of this state whose queue head is replaced by `piece`.
    ///
    /// Used to ask "what if `piece` were next" without touching the original.
    #[must_use]
    pub fn with_head(&self, piece: PieceKind) -> Self {
        let mut queue = self.queue;
        queue[0] = piece;
        Self::with_cache(self.board, queue, self.lines_cleared, self.cache_enabled)
    }
}
