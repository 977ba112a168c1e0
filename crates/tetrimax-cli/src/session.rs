use std::time::{Duration, Instant};

use tetrimax_engine::{Board, GameState, PieceGenerator};
use tetrimax_search::Agent;
use tracing::{debug, info, warn};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum RunEnd {
    /// The current piece had no legal placement.
    TopOut,
    /// The configured number of pieces was placed.
    PieceLimit,
    /// The agent or the transition reported an error.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RunResult {
    pub(crate) lines: usize,
    pub(crate) pieces: usize,
    pub(crate) elapsed: Duration,
    pub(crate) end: RunEnd,
}

impl RunResult {
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn lines_per_piece(&self) -> f64 {
        if self.pieces == 0 {
            0.0
        } else {
            self.lines as f64 / self.pieces as f64
        }
    }
}

/// Headless game loop: the agent plays against a random piece generator.
#[derive(Debug)]
pub(crate) struct Session<'a> {
    agent: &'a dyn Agent,
    generator: PieceGenerator,
    max_pieces: Option<usize>,
    show_board: bool,
}

impl<'a> Session<'a> {
    pub(crate) fn new(agent: &'a dyn Agent, generator: PieceGenerator) -> Self {
        Self {
            agent,
            generator,
            max_pieces: None,
            show_board: false,
        }
    }

    /// Stops the run once `max_pieces` pieces have been placed.
    pub(crate) fn with_max_pieces(mut self, max_pieces: Option<usize>) -> Self {
        self.max_pieces = max_pieces;
        self
    }

    /// Prints the board to stdout after every placement.
    pub(crate) fn with_show_board(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    pub(crate) fn run(mut self) -> RunResult {
        let start = Instant::now();
        let mut state = GameState::new(Board::EMPTY, self.generator.initial_queue(), 0);
        let mut pieces = 0;

        let end = loop {
            if self.max_pieces.is_some_and(|max| pieces >= max) {
                break RunEnd::PieceLimit;
            }

            let outcome = match self.agent.search(&state) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(agent = self.agent.name(), error = %e, "search failed, ending run");
                    break RunEnd::Error;
                }
            };
            debug!(pieces, stats = ?outcome.stats, value = ?outcome.value, "decision");
            let Some(action) = outcome.action else {
                break RunEnd::TopOut;
            };

            let next_piece = self.generator.next_piece();
            state = match state.place(action, next_piece) {
                Ok(next) => next,
                Err(e) => {
                    warn!(%action, error = %e, "placement rejected, ending run");
                    break RunEnd::Error;
                }
            };
            pieces += 1;

            if self.show_board {
                println!("{}", state.board());
            }
            if pieces % 5 == 0 {
                info!(pieces, lines = state.lines_cleared(), "progress");
            }
        };

        let result = RunResult {
            lines: state.lines_cleared(),
            pieces,
            elapsed: start.elapsed(),
            end,
        };
        info!(
            lines = result.lines,
            pieces = result.pieces,
            end = ?result.end,
            "run finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use tetrimax_evaluator::LinearEvaluator;
    use tetrimax_search::{BeamChanceAgent, BeamChanceConfig};

    use super::*;

    fn agent() -> BeamChanceAgent {
        BeamChanceAgent::new(Box::new(LinearEvaluator::default()), BeamChanceConfig::default())
    }

    #[test]
    fn test_run_stops_at_piece_limit() {
        let agent = agent();
        let result = Session::new(&agent, PieceGenerator::with_seed(3))
            .with_max_pieces(Some(12))
            .run();
        assert_eq!(result.pieces, 12);
        assert_eq!(result.end, RunEnd::PieceLimit);
    }

    #[test]
    fn test_zero_piece_limit_places_nothing() {
        let agent = agent();
        let result = Session::new(&agent, PieceGenerator::with_seed(3))
            .with_max_pieces(Some(0))
            .run();
        assert_eq!((result.lines, result.pieces), (0, 0));
        assert!((result.lines_per_piece() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_seed_same_run() {
        let agent = agent();
        let a = Session::new(&agent, PieceGenerator::with_seed(11))
            .with_max_pieces(Some(20))
            .run();
        let b = Session::new(&agent, PieceGenerator::with_seed(11))
            .with_max_pieces(Some(20))
            .run();
        assert_eq!((a.lines, a.pieces, a.end), (b.lines, b.pieces, b.end));
    }
}
