//! Expectimax with a beam at every MAX node.
//!
//! Before a MAX node (the root included) expands its placements, each one is
//! applied with [`PLACEHOLDER_PIECE`] and the successor is scored by the
//! evaluator. Candidates are sorted by that score (stable, descending) and
//! only the first `beam_width` are expanded through CHANCE nodes. Depth is
//! counted exactly as in [`ExpectimaxAgent`](crate::ExpectimaxAgent).

use std::num::NonZeroUsize;

use tetrimax_engine::{GameState, PieceKind, Placement, StateError};
use tetrimax_evaluator::StateEvaluator;
use tracing::{debug, trace};

use crate::agent::{Agent, Best, PIECE_PROBABILITY, PLACEHOLDER_PIECE, Scorer, SearchOutcome, prune};

pub const DEFAULT_BEAM_WIDTH: NonZeroUsize = NonZeroUsize::new(4).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamExpectimaxConfig {
    /// Pieces placed along each searched path, counting the root decision.
    pub depth: u32,
    /// Placements expanded per MAX node.
    pub beam_width: NonZeroUsize,
}

impl Default for BeamExpectimaxConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            beam_width: DEFAULT_BEAM_WIDTH,
        }
    }
}

#[derive(Debug)]
pub struct BeamExpectimaxAgent {
    evaluator: Box<dyn StateEvaluator>,
    config: BeamExpectimaxConfig,
}

impl BeamExpectimaxAgent {
    #[must_use]
    pub fn new(evaluator: Box<dyn StateEvaluator>, config: BeamExpectimaxConfig) -> Self {
        Self { evaluator, config }
    }

    #[must_use]
    pub fn config(&self) -> &BeamExpectimaxConfig {
        &self.config
    }
}

impl Agent for BeamExpectimaxAgent {
    fn name(&self) -> &'static str {
        "beam-pruned-expectimax"
    }

    fn search(&self, state: &GameState) -> Result<SearchOutcome, StateError> {
        let mut search = BeamExpectimax {
            scorer: Scorer::new(self.evaluator.as_ref()),
            beam_width: self.config.beam_width.get(),
        };

        let beam = search.beam(state)?;
        if beam.is_empty() {
            debug!(agent = self.name(), "no legal placement");
            return Ok(SearchOutcome::terminal(search.scorer.stats));
        }

        let mut best = Best::new();
        for placement in beam {
            let value = search.chance_node(state, placement, self.config.depth)?;
            trace!(%placement, value, "root candidate");
            best.offer(placement, value);
        }

        let stats = search.scorer.stats;
        debug!(agent = self.name(), ?stats, "search finished");
        Ok(SearchOutcome::chosen(best.into_inner(), stats))
    }
}

struct BeamExpectimax<'a> {
    scorer: Scorer<'a>,
    beam_width: usize,
}

impl BeamExpectimax<'_> {
    /// Returns the legal placements of `state` worth expanding, best first.
    fn beam(&mut self, state: &GameState) -> Result<Vec<Placement>, StateError> {
        let placements = state.legal_placements();
        let mut scored = Vec::with_capacity(placements.len());
        for placement in placements {
            let next = state.place(placement, PLACEHOLDER_PIECE)?;
            scored.push((placement, self.scorer.evaluate(&next)));
        }
        prune(&mut scored, self.beam_width, |(_, score)| *score);
        self.scorer.stats.record_layer(scored.len());
        Ok(scored.into_iter().map(|(placement, _)| placement).collect())
    }

    fn max_node(&mut self, state: &GameState, depth: u32) -> Result<f64, StateError> {
        self.scorer.stats.nodes += 1;

        if depth == 0 {
            return Ok(self.scorer.evaluate(state));
        }
        let beam = self.beam(state)?;
        if beam.is_empty() {
            return Ok(self.scorer.evaluate(state));
        }

        let mut best = f64::NEG_INFINITY;
        for placement in beam {
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
