//! The turn-based game surface the session exposes to agents and search.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Action = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Chance,
    Terminal,
    Seat(usize),
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Chance => write!(f, "chance"),
            Player::Terminal => write!(f, "terminal"),
            Player::Seat(seat) => write!(f, "player {seat}"),
        }
    }
}

/// A position in the game tree. `Clone` must be a deep copy: clones evolve
/// independently.
pub trait GameState: Clone + fmt::Display {
    fn current_player(&self) -> Player;

    /// Ascending action ids; empty once terminal.
    fn legal_actions(&self) -> Vec<Action>;

    /// `(outcome, probability)` pairs at chance nodes, empty elsewhere.
    fn chance_outcomes(&self) -> Vec<(Action, f64)>;

    /// Fails without changing the state if `action` is not legal here.
    fn apply_action(&mut self, action: Action) -> Result<(), GameError>;

    fn is_terminal(&self) -> bool;

    /// Per-player payoff; all zero until the game is over.
    fn returns(&self) -> Vec<f64>;

    /// What `player` knows, as text.
    fn information_state(&self, player: usize) -> String;

    fn information_state_tensor(&self, player: usize) -> Vec<f32>;

    fn action_to_string(&self, player: Player, action: Action) -> String;

    /// Actions applied since the state was created.
    fn history(&self) -> Vec<Action>;
}

pub trait Game {
    type State: GameState;

    fn new_initial_state(&self) -> Self::State;
    fn num_distinct_actions(&self) -> usize;
    fn num_players(&self) -> usize;
    fn min_utility(&self) -> f64;
    fn max_utility(&self) -> f64;
    fn max_game_length(&self) -> usize;
    fn information_state_tensor_shape(&self) -> Vec<usize>;
    fn serialize_state(&self, state: &Self::State) -> String;
    fn deserialize_state(&self, text: &str) -> Result<Self::State, GameError>;
}
