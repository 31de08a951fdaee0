use crate::error::GameError;
use crate::filter::DealFilter;
use bridge_core::Deal;
use rand::Rng;
use tracing::{debug, warn};

pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Rejection sampler: shuffles the whole pack until the filter accepts.
#[derive(Debug, Clone)]
pub struct Sampler {
    filter: DealFilter,
    max_attempts: u64,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DealFilter::Any, DEFAULT_MAX_ATTEMPTS)
    }
}

impl Sampler {
    pub fn new(filter: DealFilter, max_attempts: u64) -> Self {
        Self {
            filter,
            max_attempts,
        }
    }

    pub fn filter(&self) -> &DealFilter {
        &self.filter
    }

    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// Draws a deal the filter accepts. Successive attempts keep shuffling
    /// the same permutation, so the result depends only on the RNG state.
    /// The accepted deal has its hands sorted.
    pub fn sample(&self, rng: &mut impl Rng) -> Result<Deal, GameError> {
        let mut deal = Deal::new();
        for attempt in 1..=self.max_attempts {
            deal.shuffle(rng);
            if self.filter.accepts(&deal) {
                debug!(attempt, filter = ?self.filter, "deal accepted");
                deal.sort_hands();
                return Ok(deal);
            }
        }
        warn!(
            attempts = self.max_attempts,
            filter = ?self.filter,
            "no acceptable deal found"
        );
        Err(GameError::FilterUnsatisfiable {
            attempts: self.max_attempts,
        })
    }
}
