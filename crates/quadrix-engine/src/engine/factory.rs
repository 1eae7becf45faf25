use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::piece::Piece;

/// Produces the sequence of upcoming pieces.
///
/// Every draw is an independent uniform choice among the seven kinds - no
/// bag, no anti-repetition. Droughts and repeats are part of the ruleset.
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: Pcg32,
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceFactory {
    /// Creates a factory seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a fixed seed for a reproducible piece
    /// sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draws the next piece, placed at the spawn position.
    pub fn next_piece(&mut self) -> Piece {
        Piece::spawn(self.rng.random())
    }
}
