use std::fmt;

use tetrimax_engine::{GameState, PieceKind, Placement, StateError};
use tetrimax_evaluator::StateEvaluator;

/// Next piece injected when a search applies a placement only to score it.
///
/// Scores never depend on the queue, so the choice has no effect on any
/// decision.
pub const PLACEHOLDER_PIECE: PieceKind = PieceKind::O;

/// Probability of each piece kind appearing next.
#[expect(clippy::cast_precision_loss)]
pub(crate) const PIECE_PROBABILITY: f64 = 1.0 / PieceKind::LEN as f64;

/// Counters collected during one decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes (MAX, CHANCE or beam candidates) visited.
    pub nodes: u64,
    /// Calls to the state evaluator.
    pub evaluations: u64,
    /// Largest number of placements expanded at a single decision layer.
    pub max_layer_width: usize,
}

impl SearchStats {
    pub(crate) fn record_layer(&mut self, width: usize) {
        self.max_layer_width = self.max_layer_width.max(width);
    }
}

/// Result of one search from a root state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Chosen placement, `None` when the root state is terminal.
    pub action: Option<Placement>,
    /// Value the agent assigned to `action`.
    pub value: Option<f64>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub(crate) fn terminal(stats: SearchStats) -> Self {
        Self {
            action: None,
            value: None,
            stats,
        }
    }

    pub(crate) fn chosen(best: Option<(Placement, f64)>, stats: SearchStats) -> Self {
        Self {
            action: best.map(|(placement, _)| placement),
            value: best.map(|(_, value)| value),
            stats,
        }
    }
}

/// A placement policy.
///
/// Agents are deterministic: the same state and evaluator always produce the
/// same outcome.
pub trait Agent: fmt::Debug {
    /// Human-readable agent name.
    fn name(&self) -> &'static str;

    /// Searches from `state` and reports the chosen placement with its statistics.
    ///
    /// Placements are only taken from [`GameState::legal_placements`], so an
    /// error here means the game-state kernel broke its own contract.
    fn search(&self, state: &GameState) -> Result<SearchOutcome, StateError>;

    /// Chooses a placement for the queue head, or `None` if no legal move exists.
    fn choose_action(&self, state: &GameState) -> Result<Option<Placement>, StateError> {
        Ok(self.search(state)?.action)
    }
}

/// Evaluator wrapper that counts calls.
pub(crate) struct Scorer<'a> {
    evaluator: &'a dyn StateEvaluator,
    pub(crate) stats: SearchStats,
}

impl<'a> Scorer<'a> {
    pub(crate) fn new(evaluator: &'a dyn StateEvaluator) -> Self {
        Self {
            evaluator,
            stats: SearchStats::default(),
        }
    }

    pub(crate) fn evaluate(&mut self, state: &GameState) -> f64 {
        self.stats.evaluations += 1;
        self.evaluator.evaluate(state)
    }
}

/// Tracks the highest-valued candidate; the first one seen wins ties.
#[derive(Debug)]
pub(crate) struct Best<T> {
    best: Option<(T, f64)>,
}

impl<T> Best<T> {
    pub(crate) fn new() -> Self {
        Self { best: None }
    }

    pub(crate) fn offer(&mut self, candidate: T, value: f64) {
        if self.best.as_ref().is_none_or(|(_, best)| value > *best) {
            self.best = Some((candidate, value));
        }
    }

    pub(crate) fn into_inner(self) -> Option<(T, f64)> {
        self.best
    }
}

/// Stable descending sort by score, keeping at most `width` candidates.
pub(crate) fn prune<T>(candidates: &mut Vec<T>, width: usize, score: impl Fn(&T) -> f64) {
    candidates.sort_by(|a, b| score(b).total_cmp(&score(a)));
    candidates.truncate(width);
}
