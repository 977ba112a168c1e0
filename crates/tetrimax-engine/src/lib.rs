//! Immutable Tetris game-state model for look-ahead search.
//!
//! - [`core`] - piece catalog ([`PieceKind`], [`Orientation`], [`PieceShape`]) and the
//!   fixed 20×10 [`Board`]
//! - [`engine`] - [`GameState`] with legal-move enumeration and the `place_piece`
//!   transition, plus a seeded [`PieceGenerator`] for drivers

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Errors raised when building a [`GameState`] or applying a transition.
///
/// All variants except [`StateError::Collision`] are validation errors. Having no
/// legal move is not an error: see [`GameState::is_terminal`].
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum StateError {
    #[display("board must have exactly {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("board row {row} must have exactly {expected} columns, got {actual}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("board cell ({row}, {column}) must be 0 or 1, got {value}")]
    InvalidCell { row: usize, column: usize, value: u8 },
    #[display("queue must hold exactly {expected} pieces, got {actual}")]
    QueueLength { expected: usize, actual: usize },
    #[display("invalid piece type '{name}'")]
    UnknownPiece { name: String },
    #[display("lines cleared cannot be negative, got {lines}")]
    NegativeLines { lines: i64 },
    #[display("invalid orientation {orientation} for piece '{piece}'")]
    InvalidOrientation {
        piece: PieceKind,
        orientation: Orientation,
    },
    #[display("piece '{piece}' cannot be placed in column {column} with orientation {orientation}")]
    Collision {
        piece: PieceKind,
        column: usize,
        orientation: Orientation,
    },
}
