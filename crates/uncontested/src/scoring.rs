//! Turning a finished auction into scores.

use bridge_core::{Auction, Contract, Deal};
use bridge_solver::{points, DoubleDummySolution, SolverError, TrickOracle, MAX_SCORE, MIN_SCORE};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Scores of a finished session. Every figure is on the same deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// `None` when the auction was passed out.
    pub contract: Option<Contract>,
    pub score: i32,
    pub reference_scores: Vec<i32>,
}

impl Outcome {
    pub fn best_reference(&self) -> Option<i32> {
        self.reference_scores.iter().copied().max()
    }

    /// Score against the best of the reference contracts and the contract
    /// reached, so never positive; `None` without references.
    pub fn relative_score(&self) -> Option<i32> {
        self.best_reference().map(|best| self.score - best.max(self.score))
    }
}

fn contract_score(solution: &DoubleDummySolution, contract: &Contract) -> i32 {
    let tricks = solution.tricks(contract.declarer, contract.strain);
    assert!(tricks <= 13, "{contract}: oracle reported {tricks} tricks");
    let score = points(contract, tricks, false);
    assert!(
        (MIN_SCORE..=MAX_SCORE).contains(&score),
        "{contract} with {tricks} tricks scored {score}"
    );
    score
}

/// Scores a finished auction and each reference contract on `deal`.
///
/// A passed-out auction scores zero, as does every reference, and the oracle
/// is not consulted.
pub fn score_auction(
    oracle: &dyn TrickOracle,
    deal: &Deal,
    auction: &Auction,
    references: &[Contract],
) -> Result<Outcome, SolverError> {
    let Some(contract) = auction.final_contract() else {
        info!(auction = %auction, "passed out");
        return Ok(Outcome {
            contract: None,
            score: 0,
            reference_scores: vec![0; references.len()],
        });
    };

    let solution = oracle.solve(deal)?;
    let score = contract_score(&solution, &contract);
    let reference_scores: Vec<i32> = references
        .iter()
        .map(|reference| contract_score(&solution, reference))
        .collect();

    let outcome = Outcome {
        contract: Some(contract),
        score,
        reference_scores,
    };
    info!(
        contract = %contract,
        score,
        best_reference = ?outcome.best_reference(),
        "scored auction"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::{Position, Strain};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// West takes nine tricks in notrump and ten in spades; everything else
    /// takes six.
    #[derive(Default)]
    struct Fixed {
        calls: AtomicUsize,
    }

    impl TrickOracle for Fixed {
        fn solve(&self, _deal: &Deal) -> Result<DoubleDummySolution, SolverError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut tricks = [[6; 4]; 5];
            tricks[Strain::NoTrump.idx()][Position::West.idx()] = 9;
            tricks[Strain::Spades.idx()][Position::West.idx()] = 10;
            Ok(DoubleDummySolution { tricks })
        }
    }

    fn contract(text: &str) -> Contract {
        text.parse().unwrap()
    }

    #[test]
    fn test_score_against_references() {
        let oracle = Fixed::default();
        let auction = Auction::bidding(Position::West, "1N 3N P");
        let references = [contract("3NW"), contract("4SW")];

        let outcome = score_auction(&oracle, &Deal::new(), &auction, &references).unwrap();
        assert_eq!(outcome.contract, Some(contract("3NW")));
        assert_eq!(outcome.score, 400);
        assert_eq!(outcome.reference_scores, vec![400, 420]);
        assert_eq!(outcome.relative_score(), Some(-20));
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);

        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(serde_json::from_str::<Outcome>(&json).unwrap(), outcome);
    }

    #[test]
    fn test_declarer_is_first_to_name_strain() {
        // East raises West's spades: West still declares.
        let oracle = Fixed::default();
        let auction = Auction::bidding(Position::West, "1S 4S P");
        let outcome = score_auction(&oracle, &Deal::new(), &auction, &[]).unwrap();
        assert_eq!(outcome.contract, Some(contract("4SW")));
        assert_eq!(outcome.score, 420);
        assert_eq!(outcome.relative_score(), None);
    }

    #[test]
    fn test_passed_out_skips_oracle() {
        let oracle = Fixed::default();
        let auction = Auction::bidding(Position::West, "P");
        let references = [contract("3NW"), contract("4SW")];

        let outcome = score_auction(&oracle, &Deal::new(), &auction, &references).unwrap();
        assert_eq!(outcome.contract, None);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.reference_scores, vec![0, 0]);
        assert_eq!(outcome.relative_score(), Some(0));
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_beating_every_reference_scores_zero() {
        let oracle = Fixed::default();
        let auction = Auction::bidding(Position::West, "1S 4S P");
        let references = [contract("3NW")];

        let outcome = score_auction(&oracle, &Deal::new(), &auction, &references).unwrap();
        assert_eq!(outcome.score, 420);
        assert_eq!(outcome.reference_scores, vec![400]);
        assert_eq!(outcome.relative_score(), Some(0));
    }

    #[test]
    fn test_oracle_failure_propagates() {
        struct Broken;
        impl TrickOracle for Broken {
            fn solve(&self, _deal: &Deal) -> Result<DoubleDummySolution, SolverError> {
                Err(SolverError::Solver("no memory".to_string()))
            }
        }
        let auction = Auction::bidding(Position::West, "1N P");
        let err = score_auction(&Broken, &Deal::new(), &auction, &[]).unwrap_err();
        assert_eq!(err, SolverError::Solver("no memory".to_string()));
    }

    #[test]
    #[should_panic]
    fn test_impossible_trick_count_is_fatal() {
        struct Liar;
        impl TrickOracle for Liar {
            fn solve(&self, _deal: &Deal) -> Result<DoubleDummySolution, SolverError> {
                Ok(DoubleDummySolution {
                    tricks: [[14; 4]; 5],
                })
            }
        }
        let auction = Auction::bidding(Position::West, "1N P");
        let _ = score_auction(&Liar, &Deal::new(), &auction, &[]);
    }
}
