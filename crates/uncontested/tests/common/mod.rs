#![allow(dead_code)]

use bridge_core::{Deal, Position, Strain};
use bridge_solver::{DoubleDummySolution, SolverError, TrickOracle};
use std::sync::Arc;
use uncontested::action::call_to_action;
use uncontested::{Action, GameParams, UncontestedBiddingGame};

/// Deterministic stand-in for double dummy analysis: tricks grow with the
/// partnership's high cards and trump fit.
pub struct HcpOracle;

impl TrickOracle for HcpOracle {
    fn solve(&self, deal: &Deal) -> Result<DoubleDummySolution, SolverError> {
        let mut tricks = [[0u8; 4]; 5];
        for strain in Strain::ALL {
            for position in Position::ALL {
                let hands = [deal.hand(position), deal.hand(position.partner())];
                let hcp: u8 = hands.iter().map(|h| h.hcp()).sum();
                let fit: u8 = match strain.to_suit() {
                    Some(suit) => hands.iter().map(|h| h.length(suit)).sum(),
                    None => 7,
                };
                tricks[strain.idx()][position.idx()] = ((hcp + 2 * fit) / 4).min(13);
            }
        }
        Ok(DoubleDummySolution { tricks })
    }
}

pub struct FailingOracle;

impl TrickOracle for FailingOracle {
    fn solve(&self, _deal: &Deal) -> Result<DoubleDummySolution, SolverError> {
        Err(SolverError::Solver("out of memory".to_string()))
    }
}

pub fn game(params: &GameParams) -> UncontestedBiddingGame {
    UncontestedBiddingGame::with_oracle(params, Arc::new(HcpOracle)).unwrap()
}

/// Action id for a call written like `3N` or `P`.
pub fn act(call: &str) -> Action {
    call_to_action(call.parse().unwrap()).unwrap()
}
