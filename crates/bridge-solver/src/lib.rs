//! Double-dummy trick counting and duplicate scoring.

mod dds;
pub mod scoring;

pub use dds::DdsSolver;
pub use scoring::{points, MAX_SCORE, MIN_SCORE};

use bridge_core::{Contract, Deal, Position, Strain};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("double dummy solver failed: {0}")]
    Solver(String),
    #[error("deal is not a permutation of the 52 cards")]
    IncompleteDeal,
}

/// Tricks declarer takes with perfect play, for every strain and seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleDummySolution {
    /// Indexed by `Strain::idx()`, then `Position::idx()`.
    pub tricks: [[u8; 4]; 5],
}

impl DoubleDummySolution {
    pub fn tricks(&self, declarer: Position, strain: Strain) -> u8 {
        self.tricks[strain.idx()][declarer.idx()]
    }
}

/// Perfect-information trick counting. Implementations must be
/// deterministic: the same deal always yields the same solution.
pub trait TrickOracle: Send + Sync {
    fn solve(&self, deal: &Deal) -> Result<DoubleDummySolution, SolverError>;

    fn tricks(&self, deal: &Deal, contract: &Contract) -> Result<u8, SolverError> {
        Ok(self.solve(deal)?.tricks(contract.declarer, contract.strain))
    }
}
