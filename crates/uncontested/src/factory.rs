use crate::action::NUM_ACTIONS;
use crate::error::GameError;
use crate::filter::DealFilter;
use crate::game::Game;
use crate::params::GameParams;
use crate::sampler::Sampler;
use crate::state::{SessionConfig, UncontestedBiddingState, SEATS, TENSOR_SIZE};
use crate::NUM_PLAYERS;
use bridge_core::call::MAX_LEVEL;
use bridge_core::io::record::import_record;
use bridge_core::{Auction, Call, Contract, DoubleStatus};
use bridge_solver::{DdsSolver, TrickOracle, MAX_SCORE, MIN_SCORE};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Builds sessions. Each new session gets the next seed from a counter, so a
/// run of sessions is reproducible from the starting seed alone.
pub struct UncontestedBiddingGame {
    config: SessionConfig,
    relative_scoring: bool,
    seed: AtomicU64,
}

impl UncontestedBiddingGame {
    /// A game scored with the DDS solver.
    pub fn new(params: &GameParams) -> Result<Self, GameError> {
        Self::with_oracle(params, Arc::new(DdsSolver))
    }

    pub fn with_oracle(
        params: &GameParams,
        oracle: Arc<dyn TrickOracle>,
    ) -> Result<Self, GameError> {
        let forced = params.subgame.forced_calls();
        validate_forced(&forced)?;
        let references = if params.relative_scoring {
            reachable_contracts(&forced)
        } else {
            Vec::new()
        };
        debug!(
            subgame = %params.subgame,
            references = references.len(),
            seed = params.rng_seed,
            "new game"
        );
        Ok(Self {
            config: SessionConfig {
                forced: forced.into(),
                sampler: Sampler::new(params.subgame.deal_filter(), params.max_deal_attempts),
                references: references.into(),
                oracle,
            },
            relative_scoring: params.relative_scoring,
            seed: AtomicU64::new(params.rng_seed),
        })
    }

    /// Replaces the forced opening calls. They must be bids in ascending
    /// order. Under relative scoring the reference set is rebuilt from the
    /// new prefix.
    pub fn with_forced_calls(mut self, forced: Vec<Call>) -> Result<Self, GameError> {
        validate_forced(&forced)?;
        if self.relative_scoring {
            self.config.references = reachable_contracts(&forced).into();
        }
        self.config.forced = forced.into();
        Ok(self)
    }

    pub fn with_filter(mut self, filter: DealFilter) -> Self {
        let max_attempts = self.config.sampler.max_attempts();
        self.config.sampler = Sampler::new(filter, max_attempts);
        self
    }

    /// Replaces the reference contracts player 1 is scored against. An empty
    /// list turns relative scoring off. References must be undoubled
    /// contracts declared by West or East.
    pub fn with_references(mut self, references: Vec<Contract>) -> Result<Self, GameError> {
        if let Some(bad) = references.iter().find(|c| !is_reference_contract(c)) {
            return Err(GameError::Config(format!(
                "{bad} cannot be a reference contract"
            )));
        }
        self.relative_scoring = !references.is_empty();
        self.config.references = references.into();
        Ok(self)
    }

    pub fn forced_calls(&self) -> &[Call] {
        &self.config.forced
    }

    pub fn references(&self) -> &[Contract] {
        &self.config.references
    }

    fn next_seed(&self) -> u64 {
        self.seed.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}

fn is_reference_contract(contract: &Contract) -> bool {
    contract.double_status == DoubleStatus::Undoubled
        && (1..=MAX_LEVEL).contains(&contract.level)
        && SEATS.contains(&contract.declarer)
}

fn validate_forced(forced: &[Call]) -> Result<(), GameError> {
    if forced.iter().any(|call| !call.is_bid()) || !Auction::validate_calls(forced) {
        return Err(GameError::Config(format!(
            "forced calls must be ascending bids, got {forced:?}"
        )));
    }
    Ok(())
}

/// Every contract the partnership can still reach after `forced`: each bid
/// from the last forced bid upwards, declared by whichever player would end
/// up declaring it. Strains already named in the prefix keep their declarer.
pub fn reachable_contracts(forced: &[Call]) -> Vec<Contract> {
    let prefix = Auction {
        dealer: SEATS[0],
        forced: Vec::new(),
        calls: forced.to_vec(),
    };
    let floor = forced.iter().filter_map(|call| call.rank()).max().unwrap_or(0);

    let mut contracts = Vec::new();
    for bid in Call::all_bids().skip(floor) {
        let (Some(level), Some(strain)) = (bid.level(), bid.strain()) else {
            continue;
        };
        match prefix.first_bidder_of(strain) {
            Some(declarer) => contracts.push(Contract::new(level, strain, declarer)),
            None => {
                for declarer in SEATS {
                    contracts.push(Contract::new(level, strain, declarer));
                }
            }
        }
    }
    contracts
}

impl Game for UncontestedBiddingGame {
    type State = UncontestedBiddingState;

    fn new_initial_state(&self) -> UncontestedBiddingState {
        UncontestedBiddingState::new(self.config.clone(), self.next_seed())
    }

    fn num_distinct_actions(&self) -> usize {
        NUM_ACTIONS
    }

    fn num_players(&self) -> usize {
        NUM_PLAYERS
    }

    fn min_utility(&self) -> f64 {
        if self.config.references.is_empty() {
            MIN_SCORE as f64
        } else {
            (MIN_SCORE - MAX_SCORE) as f64
        }
    }

    fn max_utility(&self) -> f64 {
        if self.config.references.is_empty() {
            MAX_SCORE as f64
        } else {
            0.0
        }
    }

    /// Every bid, then a pass.
    fn max_game_length(&self) -> usize {
        NUM_ACTIONS
    }

    fn information_state_tensor_shape(&self) -> Vec<usize> {
        vec![TENSOR_SIZE]
    }

    fn serialize_state(&self, state: &UncontestedBiddingState) -> String {
        state.to_string()
    }

    /// Reads a record written by [`Game::serialize_state`]. Score annotations
    /// are ignored and a finished auction is scored again.
    fn deserialize_state(&self, text: &str) -> Result<UncontestedBiddingState, GameError> {
        let record = import_record(text)
            .ok_or_else(|| GameError::InvalidRecord(text.to_string()))?;
        UncontestedBiddingState::from_record(
            self.config.clone(),
            self.next_seed(),
            record.deal,
            &record.calls,
        )
    }
}
