use std::fmt;

use tetrimax_engine::GameState;

use crate::{
    board_analysis::BoardAnalysis,
    weights::{EvaluatorWeights, WeightsError},
};

/// Scores a game state; higher is better.
///
/// Implementations must be pure: the same state always yields the same score.
pub trait StateEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, state: &GameState) -> f64;
}

/// The raw feature values the linear evaluator weighs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFeatures {
    pub aggregate_height: u16,
    pub holes: u16,
    pub bumpiness: u16,
    pub lines_cleared: usize,
}

impl BoardFeatures {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let analysis = BoardAnalysis::from_board(state.board());
        Self {
            aggregate_height: analysis.aggregate_height(),
            holes: analysis.holes(),
            bumpiness: analysis.bumpiness(),
            lines_cleared: state.lines_cleared(),
        }
    }
}

/// Weighted sum of [`BoardFeatures`].
///
/// ```text
/// score = height·aggregate_height + holes·holes + bumpiness·bumpiness + lines·lines_cleared
/// ```
///
/// The queue is never read, so two states that differ only in their queue
/// score the same.
#[derive(Debug, Clone, Default)]
pub struct LinearEvaluator {
    weights: EvaluatorWeights,
}

impl LinearEvaluator {
    /// Builds an evaluator, rejecting weights that are NaN or infinite.
    pub fn new(weights: EvaluatorWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    #[must_use]
    pub fn weights(&self) -> &EvaluatorWeights {
        &self.weights
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn score(&self, features: &BoardFeatures) -> f64 {
        let w = &self.weights;
        w.height * f64::from(features.aggregate_height)
            + w.holes * f64::from(features.holes)
            + w.bumpiness * f64::from(features.bumpiness)
            + w.lines * features.lines_cleared as f64
    }
}

impl StateEvaluator for LinearEvaluator {
    fn evaluate(&self, state: &GameState) -> f64 {
        self.score(&BoardFeatures::from_state(state))
    }
}

#[cfg(test)]
mod tests {
    use tetrimax_engine::{Board, PieceKind};

    use super::*;

    const QUEUE: [PieceKind; 3] = [PieceKind::I, PieceKind::O, PieceKind::T];

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-4, "{actual} != {expected}");
    }

    #[test]
    fn test_features_of_state() {
        let board = Board::from_ascii(
            r"
            .#........
            ..........
            ##.#######
            ",
        );
        let features = BoardFeatures::from_state(&GameState::new(board, QUEUE, 7));
        assert_eq!(
            features,
            BoardFeatures {
                aggregate_height: 1 + 3 + 0 + 7,
                holes: 1,
                // |1-3| + |3-0| + |0-1|
                bumpiness: 6,
                lines_cleared: 7,
            }
        );
    }

    #[test]
    fn test_linear_score_with_default_weights() {
        let evaluator = LinearEvaluator::default();
        let features = BoardFeatures {
            aggregate_height: 10,
            holes: 2,
            bumpiness: 4,
            lines_cleared: 1,
        };
        assert_close(
            evaluator.score(&features),
            -0.51 * 10.0 - 0.36 * 2.0 - 0.18 * 4.0 + 0.76,
        );
    }

    #[test]
    fn test_hole_lowers_score() {
        let evaluator = LinearEvaluator::default();
        let flat = GameState::new(Board::from_ascii("##########\n#########."), QUEUE, 0);
        let buried = GameState::new(Board::from_ascii("##########\n####.####."), QUEUE, 0);
        assert!(evaluator.evaluate(&buried) < evaluator.evaluate(&flat));
    }

    #[test]
    fn test_queue_does_not_affect_score() {
        let evaluator = LinearEvaluator::default();
        let board = Board::from_ascii("###.......");
        let a = GameState::new(board, QUEUE, 1);
        let b = a.with_head(PieceKind::Z);
        assert_close(evaluator.evaluate(&a), evaluator.evaluate(&b));
    }

    #[test]
    fn test_custom_weights_are_used() {
        let evaluator = LinearEvaluator::new(EvaluatorWeights {
            height: 0.0,
            lines: 0.0,
            holes: -10.0,
            bumpiness: 0.0,
        })
        .unwrap();
        let state = GameState::new(Board::from_ascii("#.........\n.........."), QUEUE, 3);
        assert_close(evaluator.evaluate(&state), -10.0);
    }

    #[test]
    fn test_non_finite_weights_are_refused() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let weights = EvaluatorWeights {
                height: value,
                ..EvaluatorWeights::default()
            };
            assert!(matches!(
                LinearEvaluator::new(weights),
                Err(WeightsError::NonFinite { name: "height", .. })
            ));
        }
    }
}
