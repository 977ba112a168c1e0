//! Game-state transitions and piece supply.
//!
//! - [`GameState`] - immutable snapshot of board, 3-piece queue and cleared lines
//! - [`Placement`] - a `(column, orientation)` choice for the queue head
//! - [`PieceGenerator`] - uniform random piece source used by drivers
//!
//! # Game Flow
//!
//! 1. Build a [`GameState`] (validated once)
//! 2. Ask for [`GameState::legal_placements`]
//! 3. Apply one with [`GameState::place_piece`], injecting the next random piece
//! 4. Repeat until [`GameState::is_terminal`]
//!
//! # Example
//!
//! ```
//! use tetrimax_engine::{Board, GameState, PieceGenerator, PieceKind};
//!
//! let mut generator = PieceGenerator::with_seed(42);
//! let mut state = GameState::new(Board::EMPTY, generator.initial_queue(), 0);
//!
//! let placement = state.legal_placements()[0];
//! state = state.place(placement, generator.next_piece())?;
//! assert_eq!(state.lines_cleared(), 0);
//! # Ok::<(), tetrimax_engine::StateError>(())
//! ```

pub use self::{game_state::*, piece_generator::*};

mod game_state;
mod piece_generator;
