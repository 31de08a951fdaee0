use crate::action::{action_to_call, call_to_action, DEAL, NUM_ACTIONS};
use crate::error::GameError;
use crate::game::{Action, GameState, Player};
use crate::sampler::Sampler;
use crate::scoring::{score_auction, Outcome};
use crate::NUM_PLAYERS;
use bridge_core::card::NUM_CARDS;
use bridge_core::io::record::{export_hand, export_record};
use bridge_core::{Auction, Call, Contract, Deal, Position};
use bridge_solver::TrickOracle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Length of the information state tensor: own cards, each player's calls,
/// and the observer's seat.
pub const TENSOR_SIZE: usize = NUM_CARDS + NUM_PLAYERS * NUM_ACTIONS + NUM_PLAYERS;

/// Player 0 sits West and player 1 East.
pub const SEATS: [Position; NUM_PLAYERS] = [Position::West, Position::East];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealState {
    NotDealt,
    Dealt(Deal),
}

impl DealState {
    pub fn deal(&self) -> Option<&Deal> {
        match self {
            DealState::NotDealt => None,
            DealState::Dealt(deal) => Some(deal),
        }
    }
}

/// What every session built by one game shares.
#[derive(Clone)]
pub(crate) struct SessionConfig {
    pub forced: Arc<[Call]>,
    pub sampler: Sampler,
    pub references: Arc<[Contract]>,
    pub oracle: Arc<dyn TrickOracle>,
}

/// One deal and auction of uncontested bidding.
///
/// The forced calls are made as soon as the session is created, so a fresh
/// session sits at the dealing chance node with the prefix already in the
/// auction.
#[derive(Clone)]
pub struct UncontestedBiddingState {
    config: SessionConfig,
    rng: StdRng,
    deal: DealState,
    auction: Auction,
    outcome: Option<Outcome>,
}

impl UncontestedBiddingState {
    pub(crate) fn new(config: SessionConfig, seed: u64) -> Self {
        let mut auction = Auction::with_forced(SEATS[0], config.forced.to_vec());
        auction.apply_forced();
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            deal: DealState::NotDealt,
            auction,
            outcome: None,
        }
    }

    /// Rebuilds a session from a recorded deal and calls, rescoring it if
    /// the auction is over.
    pub(crate) fn from_record(
        config: SessionConfig,
        seed: u64,
        deal: Option<Deal>,
        calls: &[Call],
    ) -> Result<Self, GameError> {
        let forced = config.forced.len();
        if calls.len() < forced || calls[..forced] != config.forced[..] {
            return Err(GameError::InvalidRecord(format!(
                "auction does not start with the forced calls {}",
                render_calls(&config.forced)
            )));
        }
        if deal.is_none() && calls.len() > forced {
            return Err(GameError::InvalidRecord(
                "calls recorded before the deal".to_string(),
            ));
        }

        let mut auction = Auction::with_forced(SEATS[0], config.forced.to_vec());
        for &call in calls {
            auction
                .add_call(call)
                .map_err(|e| GameError::InvalidRecord(e.to_string()))?;
        }

        let mut state = Self::new(config, seed);
        state.auction = auction;
        if let Some(deal) = deal {
            if state.auction.is_finished() {
                state.outcome = Some(state.score(&deal, &state.auction)?);
            }
            state.deal = DealState::Dealt(deal);
        }
        Ok(state)
    }

    pub fn deal(&self) -> Option<&Deal> {
        self.deal.deal()
    }

    pub fn deal_state(&self) -> &DealState {
        &self.deal
    }

    pub fn auction(&self) -> &Auction {
        &self.auction
    }

    pub fn references(&self) -> &[Contract] {
        &self.config.references
    }

    /// Scores of the finished session.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    fn score(&self, deal: &Deal, auction: &Auction) -> Result<Outcome, GameError> {
        Ok(score_auction(
            self.config.oracle.as_ref(),
            deal,
            auction,
            &self.config.references,
        )?)
    }

    fn apply_deal(&mut self, action: Action) -> Result<(), GameError> {
        if action != DEAL {
            return Err(GameError::IllegalAction {
                action,
                player: Player::Chance,
            });
        }
        let mut rng = self.rng.clone();
        let deal = self.config.sampler.sample(&mut rng)?;
        self.rng = rng;
        self.deal = DealState::Dealt(deal);
        Ok(())
    }

    fn apply_call(&mut self, deal: &Deal, action: Action) -> Result<(), GameError> {
        let player = Player::Seat(self.auction.current_seat());
        let call = action_to_call(action).ok_or(GameError::IllegalAction { action, player })?;

        let mut auction = self.auction.clone();
        auction
            .add_call(call)
            .map_err(|_| GameError::IllegalAction { action, player })?;
        trace!(%player, %call, "call");

        if auction.is_finished() {
            self.outcome = Some(self.score(deal, &auction)?);
        }
        self.auction = auction;
        Ok(())
    }
}

fn render_calls(calls: &[Call]) -> String {
    calls
        .iter()
        .map(|c| c.render())
        .collect::<Vec<_>>()
        .join("-")
}

impl GameState for UncontestedBiddingState {
    fn current_player(&self) -> Player {
        match &self.deal {
            _ if self.is_terminal() => Player::Terminal,
            DealState::NotDealt => Player::Chance,
            DealState::Dealt(_) => Player::Seat(self.auction.current_seat()),
        }
    }

    fn legal_actions(&self) -> Vec<Action> {
        match self.current_player() {
            Player::Terminal => Vec::new(),
            Player::Chance => vec![DEAL],
            Player::Seat(_) => self
                .auction
                .legal_calls()
                .into_iter()
                .filter_map(call_to_action)
                .collect(),
        }
    }

    fn chance_outcomes(&self) -> Vec<(Action, f64)> {
        match self.current_player() {
            Player::Chance => vec![(DEAL, 1.0)],
            _ => Vec::new(),
        }
    }

    fn apply_action(&mut self, action: Action) -> Result<(), GameError> {
        if self.is_terminal() {
            return Err(GameError::IllegalAction {
                action,
                player: Player::Terminal,
            });
        }
        match self.deal.clone() {
            DealState::NotDealt => self.apply_deal(action),
            DealState::Dealt(deal) => self.apply_call(&deal, action),
        }
    }

    fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Player 0 gets the contract's score; player 1 gets the same, or the
    /// shortfall against the best reference contract if there are any.
    /// Reaching a contract at least as good as every reference returns 0.
    fn returns(&self) -> Vec<f64> {
        match &self.outcome {
            None => vec![0.0; NUM_PLAYERS],
            Some(outcome) => {
                let relative = outcome.relative_score().unwrap_or(outcome.score);
                vec![outcome.score as f64, relative as f64]
            }
        }
    }

    fn information_state(&self, player: usize) -> String {
        assert!(player < NUM_PLAYERS, "no player {player}");
        let auction = self.auction.render();
        match self.deal() {
            None => auction,
            Some(deal) => {
                let hand = export_hand(&deal.hand(SEATS[player]));
                if auction.is_empty() {
                    hand
                } else {
                    format!("{hand} {auction}")
                }
            }
        }
    }

    fn information_state_tensor(&self, player: usize) -> Vec<f32> {
        assert!(player < NUM_PLAYERS, "no player {player}");
        let mut values = vec![0.0; TENSOR_SIZE];
        if let Some(deal) = self.deal() {
            for &card in deal.hand_ids(SEATS[player]) {
                values[card as usize] = 1.0;
            }
        }
        for (i, &call) in self.auction.calls.iter().enumerate() {
            if let Some(action) = call_to_action(call) {
                values[NUM_CARDS + (i % NUM_PLAYERS) * NUM_ACTIONS + action] = 1.0;
            }
        }
        values[NUM_CARDS + NUM_PLAYERS * NUM_ACTIONS + player] = 1.0;
        values
    }

    fn action_to_string(&self, player: Player, action: Action) -> String {
        match (player, action_to_call(action)) {
            (Player::Chance, _) => "Deal".to_string(),
            (_, Some(call)) => call.render(),
            (_, None) => format!("Action({action})"),
        }
    }

    /// The dealing action, then every call after the forced prefix.
    fn history(&self) -> Vec<Action> {
        if self.deal().is_none() {
            return Vec::new();
        }
        std::iter::once(DEAL)
            .chain(
                self.auction.calls[self.config.forced.len()..]
                    .iter()
                    .filter_map(|&call| call_to_action(call)),
            )
            .collect()
    }
}

/// The session record: hands and auction, plus scores once terminal.
impl fmt::Display for UncontestedBiddingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", export_record(self.deal(), &self.auction))?;
        if let Some(outcome) = &self.outcome {
            write!(f, " Score:{}", outcome.score)?;
            for (contract, score) in self.config.references.iter().zip(&outcome.reference_scores) {
                write!(f, " {contract}:{score}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for UncontestedBiddingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UncontestedBiddingState")
            .field("deal", &self.deal)
            .field("auction", &self.auction)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
