use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{PieceKind, QUEUE_LEN};

/// Source of upcoming pieces.
///
/// Every piece is drawn independently and uniformly from the seven kinds.
/// A generator built with [`PieceGenerator::with_seed`] yields the same
/// sequence on every run.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn next_piece(&mut self) -> PieceKind {
        self.rng.random()
    }

    /// Draws the three pieces of a fresh game's queue.
    pub fn initial_queue(&mut self) -> [PieceKind; QUEUE_LEN] {
        std::array::from_fn(|_| self.next_piece())
    }
}
