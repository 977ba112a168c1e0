//! Static scoring of Tetris game states.
//!
//! The search agents never look at a board directly; they ask a
//! [`StateEvaluator`] for a single number where higher is better.
//!
//! # Architecture
//!
//! ```text
//! LinearEvaluator (weighted sum)
//!     ↓ uses
//! BoardFeatures (height, holes, bumpiness, lines)
//!     ↓ extracted by
//! BoardAnalysis (lazily computed column metrics)
//! ```
//!
//! - [`board_analysis`] - per-column heights and the derived surface metrics
//! - [`weights`] - [`EvaluatorWeights`], the tunable configuration (JSON-loadable)
//! - [`evaluator`] - the [`StateEvaluator`] trait and the [`LinearEvaluator`]
//!
//! # Example
//!
//! ```
//! use tetrimax_engine::{Board, GameState, PieceKind};
//! use tetrimax_evaluator::{EvaluatorWeights, LinearEvaluator, StateEvaluator as _};
//!
//! let evaluator = LinearEvaluator::new(EvaluatorWeights::default())?;
//! let state = GameState::new(Board::EMPTY, [PieceKind::I, PieceKind::O, PieceKind::T], 2);
//!
//! // empty board: only the cleared lines contribute
//! assert!((evaluator.evaluate(&state) - 2.0 * 0.76).abs() < 1e-6);
//! # Ok::<(), tetrimax_evaluator::WeightsError>(())
//! ```

pub use self::{
    board_analysis::BoardAnalysis,
    evaluator::{BoardFeatures, LinearEvaluator, StateEvaluator},
    weights::{EvaluatorWeights, WeightsError},
};

pub mod board_analysis;
pub mod evaluator;
pub mod weights;
