//! Exhaustive expectimax over placements and the unknown next piece.
//!
//! The tree alternates two kinds of nodes:
//!
//! - **MAX** (a piece must be placed): every placement is expanded into a
//!   CHANCE node at `depth - 1` and the best value is taken.
//! - **CHANCE** (a placement is chosen, the next piece is not): each of the
//!   seven pieces is injected with probability 1/7 and the resulting state is
//!   searched as a MAX node at the *same* depth.
//!
//! Either node scores its state directly once `depth` reaches 0, and a MAX
//! node without legal placements does the same. A CHANCE node at depth 0 thus
//! scores the state *before* its placement is applied.
//!
//! The root expands each of its placements through a CHANCE node at the
//! configured depth, so `depth` is the number of pieces placed along every
//! path, the root decision included. Depth 0 scores the root itself and every
//! candidate ties. Nothing is pruned, so the cost grows as roughly
//! `(placements × 7)^depth`.

use tetrimax_engine::{GameState, PieceKind, Placement, StateError};
use tetrimax_evaluator::StateEvaluator;
use tracing::{debug, trace};

use crate::agent::{Agent, Best, PIECE_PROBABILITY, Scorer, SearchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectimaxConfig {
    /// Pieces placed along each searched path, counting the root decision.
    pub depth: u32,
}

impl Default for ExpectimaxConfig {
    fn default() -> Self {
        Self { depth: 3 }
    }
}

#[derive(Debug)]
pub struct ExpectimaxAgent {
    evaluator: Box<dyn StateEvaluator>,
    config: ExpectimaxConfig,
}

impl ExpectimaxAgent {
    #[must_use]
    pub fn new(evaluator: Box<dyn StateEvaluator>, config: ExpectimaxConfig) -> Self {
        Self { evaluator, config }
    }

    #[must_use]
    pub fn config(&self) -> &ExpectimaxConfig {
        &self.config
    }
}

impl Agent for ExpectimaxAgent {
    fn name(&self) -> &'static str {
        "expectimax"
    }

    fn search(&self, state: &GameState) -> Result<SearchOutcome, StateError> {
        let mut search = Expectimax {
            scorer: Scorer::new(self.evaluator.as_ref()),
        };

        let placements = state.legal_placements();
        if placements.is_empty() {
            debug!(agent = self.name(), "no legal placement");
            return Ok(SearchOutcome::terminal(search.scorer.stats));
        }
        search.scorer.stats.record_layer(placements.len());

        let mut best = Best::new();
        for placement in placements {
            let value = search.chance_node(state, placement, self.config.depth)?;
            trace!(%placement, value, "root candidate");
            best.offer(placement, value);
        }

        let stats = search.scorer.stats;
        debug!(agent = self.name(), ?stats, "search finished");
        Ok(SearchOutcome::chosen(best.into_inner(), stats))
    }
}

struct Expectimax<'a> {
    scorer: Scorer<'a>,
}

impl Expectimax<'_> {
    fn max_node(&mut self, state: &GameState, depth: u32) -> Result<f64, StateError> {
        self.scorer.stats.nodes += 1;

        if depth == 0 {
            return Ok(self.scorer.evaluate(state));
        }
        let placements = state.legal_placements();
        if placements.is_empty() {
            return Ok(self.scorer.evaluate(state));
        }
        self.scorer.stats.record_layer(placements.len());

        let mut best = f64::NEG_INFINITY;
        for placement in placements {
            best = best.max(self.chance_node(state, placement, depth - 1)?);
        }
        Ok(best)
    }

    fn chance_node(
        &mut self,
        state: &GameState,
        placement: Placement,
        depth: u32,
    ) -> Result<f64, StateError> {
        self.scorer.stats.nodes += 1;

        if depth == 0 {
            return Ok(self.scorer.evaluate(state));
        }
        let mut expected = 0.0;
        for piece in PieceKind::ALL {
            let next = state.place(placement, piece)?;
            expected += PIECE_PROBABILITY * self.max_node(&next, depth)?;
        }
        Ok(expected)
    }
}
