//! Uncontested bridge bidding: a two-player cooperative game.
//!
//! One partnership bids while the opponents stay silent. A single chance
//! event deals the cards (optionally rejecting deals until a filter accepts
//! one), the two players bid until someone passes, and the final contract is
//! scored double dummy on the sampled deal. With reference contracts
//! configured, player 1 is scored relative to the best of them.

pub mod action;
pub mod error;
pub mod factory;
pub mod filter;
pub mod game;
pub mod params;
pub mod sampler;
pub mod scoring;
pub mod state;

pub use error::GameError;
pub use factory::UncontestedBiddingGame;
pub use filter::DealFilter;
pub use game::{Action, Game, GameState, Player};
pub use params::{GameParams, Subgame};
pub use sampler::Sampler;
pub use scoring::Outcome;
pub use state::{DealState, UncontestedBiddingState};

pub const NUM_PLAYERS: usize = 2;
