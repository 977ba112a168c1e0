//! Look-ahead agents that pick a placement for the queue head.
//!
//! All agents implement [`Agent`] and differ only in how they explore the
//! future:
//!
//! - [`ExpectimaxAgent`] - exhaustive alternating MAX/CHANCE search to a fixed depth
//! - [`BeamExpectimaxAgent`] - the same search, keeping only the best `beam_width`
//!   placements at each MAX node
//! - [`BeamChanceAgent`] - three beam stages over the known queue followed by one
//!   chance layer over the unknown fourth piece
//!
//! The unknown next piece is always modeled as uniform over the seven kinds,
//! visited in [`PieceKind::ALL`](tetrimax_engine::PieceKind::ALL) order.
//!
//! # Example
//!
//! ```
//! use tetrimax_engine::{Board, GameState, Orientation, PieceKind, Placement};
//! use tetrimax_evaluator::LinearEvaluator;
//! use tetrimax_search::{Agent as _, BeamChanceAgent, BeamChanceConfig};
//!
//! let board = Board::from_ascii(
//!     r"
//!     ##########.
//!     ##########.
//!     ##########.
//!     ##########.
//!     ",
//! );
//! let state = GameState::new(board, [PieceKind::I, PieceKind::O, PieceKind::T], 0);
//! let evaluator = Box::new(LinearEvaluator::default());
//! let agent = BeamChanceAgent::new(evaluator, BeamChanceConfig::default());
//!
//! let action = agent.choose_action(&state)?;
//! assert_eq!(action, Some(Placement::new(9, Orientation::new(0))));
//! # Ok::<(), tetrimax_engine::StateError>(())
//! ```

pub use self::{
    agent::{Agent, PLACEHOLDER_PIECE, SearchOutcome, SearchStats},
    beam_chance::{BeamChanceAgent, BeamChanceConfig},
    beam_expectimax::{BeamExpectimaxAgent, BeamExpectimaxConfig, DEFAULT_BEAM_WIDTH},
    expectimax::{ExpectimaxAgent, ExpectimaxConfig},
};

pub mod agent;
pub mod beam_chance;
pub mod beam_expectimax;
pub mod expectimax;
