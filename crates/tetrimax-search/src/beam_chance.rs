//! Beam search over the known queue with a chance layer for the unknown piece.
//!
//! 1. Every placement of queue slot 0 is applied and scored; the best
//!    `beam_width` survive.
//! 2. Every placement of the next piece (slot 1) on every survivor is scored,
//!    and the best `beam_width` *across all survivors* are kept.
//! 3. Every placement of slot 2 on those survivors is applied, then the state
//!    is valued by a chance layer: for each of the seven possible next pieces
//!    the best one-ply score is taken (`-∞` if the piece cannot be placed),
//!    and the results are averaged.
//!
//! Every candidate remembers the stage-1 placement it descends from; that
//! placement is returned for the best stage-3 candidate. When a stage produces
//! nothing, the best candidate of the previous stage decides instead.

use std::num::NonZeroUsize;

use tetrimax_engine::{GameState, PieceKind, Placement, StateError};
use tetrimax_evaluator::StateEvaluator;
use tracing::{debug, trace};

use crate::{
    DEFAULT_BEAM_WIDTH,
    agent::{Agent, Best, PIECE_PROBABILITY, PLACEHOLDER_PIECE, Scorer, SearchOutcome, prune},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamChanceConfig {
    /// Candidates kept after stages 1 and 2.
    pub beam_width: NonZeroUsize,
}

impl Default for BeamChanceConfig {
    fn default() -> Self {
        Self {
            beam_width: DEFAULT_BEAM_WIDTH,
        }
    }
}

#[derive(Debug)]
pub struct BeamChanceAgent {
    evaluator: Box<dyn StateEvaluator>,
    config: BeamChanceConfig,
}

impl BeamChanceAgent {
    #[must_use]
    pub fn new(evaluator: Box<dyn StateEvaluator>, config: BeamChanceConfig) -> Self {
        Self { evaluator, config }
    }

    #[must_use]
    pub fn config(&self) -> &BeamChanceConfig {
        &self.config
    }
}

#[derive(Debug)]
struct Candidate {
    origin: Placement,
    state: GameState,
    score: f64,
}

impl Agent for BeamChanceAgent {
    fn name(&self) -> &'static str {
        "beam-search-chance"
    }

    fn search(&self, state: &GameState) -> Result<SearchOutcome, StateError> {
        let mut search = BeamChance {
            scorer: Scorer::new(self.evaluator.as_ref()),
            beam_width: self.config.beam_width.get(),
        };

        let mut stage1 = Vec::new();
        for placement in state.legal_placements() {
            let next = state.place(placement, PLACEHOLDER_PIECE)?;
            let score = search.scorer.evaluate(&next);
            stage1.push(Candidate {
                origin: placement,
                state: next,
                score,
            });
        }
        search.scorer.stats.nodes += stage1.len() as u64;
        let Some(stage1_best) = search.keep_best(&mut stage1) else {
            debug!(agent = self.name(), "no legal placement");
            return Ok(SearchOutcome::terminal(search.scorer.stats));
        };

        let mut stage2 = search.expand(&stage1)?;
        let Some(stage2_best) = search.keep_best(&mut stage2) else {
            debug!(agent = self.name(), "stage 2 empty, using stage 1");
            return Ok(SearchOutcome::chosen(Some(stage1_best), search.scorer.stats));
        };

        let mut best = Best::new();
        for parent in &stage2 {
            for placement in parent.state.legal_placements() {
                let next = parent.state.place(placement, PLACEHOLDER_PIECE)?;
                search.scorer.stats.nodes += 1;
                let value = search.chance_layer(&next)?;
                trace!(origin = %parent.origin, %placement, value, "stage 3 candidate");
                best.offer(parent.origin, value);
            }
        }

        let stats = search.scorer.stats;
        let Some(best) = best.into_inner() else {
            debug!(agent = self.name(), "stage 3 empty, using stage 2");
            return Ok(SearchOutcome::chosen(Some(stage2_best), stats));
        };
        debug!(agent = self.name(), ?stats, "search finished");
        Ok(SearchOutcome::chosen(Some(best), stats))
    }
}

struct BeamChance<'a> {
    scorer: Scorer<'a>,
    beam_width: usize,
}

impl BeamChance<'_> {
    /// Keeps the best `beam_width` candidates and returns the top one's origin and score.
    fn keep_best(&mut self, candidates: &mut Vec<Candidate>) -> Option<(Placement, f64)> {
        prune(candidates, self.beam_width, |c| c.score);
        self.scorer.stats.record_layer(candidates.len());
        candidates.first().map(|c| (c.origin, c.score))
    }

    /// Places the current head of every parent in every legal way and scores the results.
    fn expand(&mut self, parents: &[Candidate]) -> Result<Vec<Candidate>, StateError> {
        let mut children = Vec::new();
        for parent in parents {
            for placement in parent.state.legal_placements() {
                let next = parent.state.place(placement, PLACEHOLDER_PIECE)?;
                let score = self.scorer.evaluate(&next);
                children.push(Candidate {
                    origin: parent.origin,
                    state: next,
                    score,
                });
            }
        }
        self.scorer.stats.nodes += children.len() as u64;
        Ok(children)
    }

    /// Expected best one-ply score over the seven possible next pieces.
    fn chance_layer(&mut self, state: &GameState) -> Result<f64, StateError> {
        let mut expected = 0.0;
        for piece in PieceKind::ALL {
            let hypothetical = state.with_head(piece);
            let mut best = f64::NEG_INFINITY;
            for placement in hypothetical.legal_placements() {
                let next = hypothetical.place(placement, PLACEHOLDER_PIECE)?;
                best = best.max(self.scorer.evaluate(&next));
            }
            expected += PIECE_PROBABILITY * best;
        }
        Ok(expected)
    }
}

#[cfg(test)]
mod tests {
    use tetrimax_engine::{Board, Orientation};
    use tetrimax_evaluator::LinearEvaluator;

    use super::*;

    const IOT: [PieceKind; 3] = [PieceKind::I, PieceKind::O, PieceKind::T];

    fn agent(beam_width: usize) -> BeamChanceAgent {
        BeamChanceAgent::new(
            Box::new(LinearEvaluator::default()),
            BeamChanceConfig {
                beam_width: NonZeroUsize::new(beam_width).unwrap(),
            },
        )
    }

    /// Empty rows above a checkerboard; no 2×2 block fits below them.
    fn checkerboard_below(open_rows: usize) -> Board {
        let mut rows = [[0u8; 10]; 20];
        for (y, row) in rows.iter_mut().enumerate().skip(open_rows) {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = u8::from((x + y) % 2 == 0);
            }
        }
        Board::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_takes_the_tetris() {
        let board = Board::from_ascii(
            r"
            #########.
            #########.
            #########.
            #########.
            ",
        );
        let state = GameState::new(board, IOT, 0);
        let outcome = BeamChanceAgent::new(
            Box::new(LinearEvaluator::default()),
            BeamChanceConfig::default(),
        )
        .search(&state)
        .unwrap();
        assert_eq!(outcome.action, Some(Placement::new(9, Orientation::new(0))));
        assert!(outcome.stats.max_layer_width <= 4);
    }

    #[test]
    fn test_terminal_root_returns_none() {
        let state = GameState::new(checkerboard_below(0), IOT, 0);
        assert!(state.is_terminal());
        let outcome = agent(4).search(&state).unwrap();
        assert_eq!(outcome.action, None);
        assert_eq!(outcome.value, None);
    }

    #[test]
    fn test_falls_back_to_stage_one() {
        // the I lies flat in row 0, after which the O has nowhere to go
        let state = GameState::new(checkerboard_below(1), IOT, 0);
        let outcome = agent(4).search(&state).unwrap();

        let action = outcome.action.unwrap();
        assert!(state.legal_placements().contains(&action));
        assert_eq!(action.orientation, Orientation::new(1));
        let next = state.place(action, PLACEHOLDER_PIECE).unwrap();
        let score = LinearEvaluator::default().evaluate(&next);
        assert_eq!(outcome.value, Some(score));
    }

    #[test]
    fn test_falls_back_to_stage_two() {
        // two flat I pieces fit in row 0, the O never does
        let state = GameState::new(
            checkerboard_below(1),
            [PieceKind::I, PieceKind::I, PieceKind::O],
            0,
        );
        let outcome = agent(4).search(&state).unwrap();
        let action = outcome.action.unwrap();
        assert!(state.legal_placements().contains(&action));
        assert!(outcome.value.unwrap().is_finite());
    }

    #[test]
    fn test_chance_layer_unplaceable_piece_is_certain_loss() {
        let evaluator = LinearEvaluator::default();
        let mut search = BeamChance {
            scorer: Scorer::new(&evaluator),
            beam_width: 4,
        };

        let open = GameState::new(Board::EMPTY, IOT, 0);
        assert!(search.chance_layer(&open).unwrap().is_finite());

        let cramped = GameState::new(checkerboard_below(1), IOT, 0);
        assert_eq!(search.chance_layer(&cramped).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_beam_width_bounds_layers() {
        let board = Board::from_ascii(
            r"
            ...#......
            .#.##...#.
            ####.#.###
            ",
        );
        for beam_width in [1, 3] {
            let state = GameState::new(board, [PieceKind::T, PieceKind::L, PieceKind::S], 0);
            let outcome = agent(beam_width).search(&state).unwrap();
            assert!(outcome.stats.max_layer_width <= beam_width);
            assert!(state.legal_placements().contains(&outcome.action.unwrap()));
        }
    }
}
