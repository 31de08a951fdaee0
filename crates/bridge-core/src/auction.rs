use crate::call::Call;
use crate::contract::Contract;
use crate::position::Position;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An uncontested auction: the dealer and partner call alternately while the
/// opponents stay silent.
///
/// `forced` is a prefix of calls the bidders are required to make, in order.
/// While a forced call is pending it is the only legal call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Auction {
    pub dealer: Position,
    pub forced: Vec<Call>,
    pub calls: Vec<Call>,
}

/// A call rejected by [`Auction::add_call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalCall {
    pub call: Call,
    pub index: usize,
}

impl fmt::Display for IllegalCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal call {} at position {}", self.call, self.index)
    }
}

impl std::error::Error for IllegalCall {}

impl Auction {
    pub fn new(dealer: Position) -> Self {
        Self {
            dealer,
            forced: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn with_forced(dealer: Position, forced: Vec<Call>) -> Self {
        Self {
            dealer,
            forced,
            calls: Vec::new(),
        }
    }

    /// Build an auction from space-separated calls like "1N P".
    /// Panics on invalid input; for tests and known-good data only.
    pub fn bidding(dealer: Position, calls: &str) -> Self {
        let mut auction = Self::new(dealer);
        for token in calls.split_whitespace() {
            let call = token.parse().expect("invalid call");
            auction.add_call(call).expect("illegal call");
        }
        auction
    }

    /// The seat making call number `index`.
    pub fn bidder(&self, index: usize) -> Position {
        if index % 2 == 0 {
            self.dealer
        } else {
            self.dealer.partner()
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Call)> {
        self.calls
            .iter()
            .enumerate()
            .map(move |(i, call)| (self.bidder(i), call))
    }

    pub fn current_player(&self) -> Position {
        self.bidder(self.calls.len())
    }

    /// 0 when the dealer is to call, 1 for the partner.
    pub fn current_seat(&self) -> usize {
        self.calls.len() % 2
    }

    pub fn pending_forced(&self) -> Option<Call> {
        self.forced.get(self.calls.len()).copied()
    }

    /// A pass always closes an uncontested auction; an empty auction is open.
    pub fn is_finished(&self) -> bool {
        matches!(self.calls.last(), Some(Call::Pass))
    }

    fn highest_rank(&self) -> Option<usize> {
        self.calls.iter().filter_map(|c| c.rank()).max()
    }

    pub fn is_legal(&self, call: Call) -> bool {
        if self.is_finished() {
            return false;
        }
        if let Some(forced) = self.pending_forced() {
            return call == forced;
        }
        match call {
            Call::Pass => true,
            Call::Bid { .. } => match (call.rank(), self.highest_rank()) {
                (None, _) => false,
                (Some(rank), Some(highest)) => rank > highest,
                (Some(_), None) => true,
            },
        }
    }

    /// Return all calls that would be legal as the next call, in bidding
    /// order with `Pass` first.
    pub fn legal_calls(&self) -> Vec<Call> {
        if self.is_finished() {
            return Vec::new();
        }
        if let Some(forced) = self.pending_forced() {
            return vec![forced];
        }

        let floor = self.highest_rank().map_or(0, |r| r + 1);
        std::iter::once(Call::Pass)
            .chain(Call::all_bids().skip(floor))
            .collect()
    }

    pub fn add_call(&mut self, call: Call) -> Result<(), IllegalCall> {
        if !self.is_legal(call) {
            return Err(IllegalCall {
                call,
                index: self.calls.len(),
            });
        }
        self.calls.push(call);
        Ok(())
    }

    /// Makes every pending forced call.
    pub fn apply_forced(&mut self) {
        while let Some(call) = self.pending_forced() {
            self.calls.push(call);
        }
    }

    /// The contract the auction would end in if it closed now.
    ///
    /// Declarer is whichever of the two bidders first named the final strain,
    /// even if the partner later raised it.
    pub fn current_contract(&self) -> Option<Contract> {
        let mut first_bidders: [Option<Position>; 5] = [None; 5];
        let mut last_bid = None;

        for (position, call) in self.iter() {
            if let Call::Bid { level, strain } = call {
                let first = *first_bidders[strain.idx()].get_or_insert(position);
                last_bid = Some((*level, *strain, first));
            }
        }

        last_bid.map(|(level, strain, declarer)| Contract::new(level, strain, declarer))
    }

    pub fn final_contract(&self) -> Option<Contract> {
        if self.is_finished() {
            self.current_contract()
        } else {
            None
        }
    }

    /// Who would declare `strain` if the auction ended in it now: the first
    /// bidder to have named it, if anyone has.
    pub fn first_bidder_of(&self, strain: Strain) -> Option<Position> {
        self.iter()
            .find(|(_, call)| call.strain() == Some(strain))
            .map(|(position, _)| position)
    }

    pub fn is_valid(&self) -> bool {
        Self::validate_calls(&self.calls)
    }

    /// Bids strictly ascend and nothing follows a pass.
    pub fn validate_calls(calls: &[Call]) -> bool {
        let mut highest: Option<usize> = None;
        for (i, call) in calls.iter().enumerate() {
            match call.rank() {
                None if *call == Call::Pass => {
                    if i + 1 != calls.len() {
                        return false;
                    }
                }
                None => return false,
                Some(rank) => {
                    if highest.is_some_and(|h| rank <= h) {
                        return false;
                    }
                    highest = Some(rank);
                }
            }
        }
        true
    }

    /// Calls joined with `-`, e.g. `2N-3C-3S-P`.
    pub fn render(&self) -> String {
        self.calls
            .iter()
            .map(|c| c.render())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Auction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nt(level: u8) -> Call {
        Call::bid(level, Strain::NoTrump)
    }

    #[test]
    fn test_auction_finished() {
        let mut auction = Auction::new(Position::West);
        assert!(!auction.is_finished());
        auction.add_call(nt(1)).unwrap();
        assert!(!auction.is_finished());
        auction.add_call(Call::Pass).unwrap();
        assert!(auction.is_finished());
    }

    #[test]
    fn test_opening_pass_is_passed_out() {
        let auction = Auction::bidding(Position::West, "P");
        assert!(auction.is_finished());
        assert_eq!(auction.final_contract(), None);
    }

    #[test]
    fn test_current_player_alternates() {
        let mut auction = Auction::new(Position::West);
        assert_eq!(auction.current_player(), Position::West);
        assert_eq!(auction.current_seat(), 0);
        auction.add_call(Call::bid(1, Strain::Clubs)).unwrap();
        assert_eq!(auction.current_player(), Position::East);
        assert_eq!(auction.current_seat(), 1);
        auction.add_call(Call::bid(1, Strain::Hearts)).unwrap();
        assert_eq!(auction.current_player(), Position::West);
    }

    #[test]
    fn test_legal_calls_empty_auction() {
        let auction = Auction::new(Position::West);
        let calls = auction.legal_calls();
        // Pass + 35 bids (7 levels × 5 strains) = 36
        assert_eq!(calls.len(), 36);
        assert_eq!(calls[0], Call::Pass);
        assert_eq!(calls[1], Call::bid(1, Strain::Clubs));
    }

    #[test]
    fn test_legal_calls_after_bid() {
        let auction = Auction::bidding(Position::West, "1H");
        let calls = auction.legal_calls();
        assert!(calls.contains(&Call::Pass));
        assert!(!calls.contains(&Call::bid(1, Strain::Clubs)));
        assert!(!calls.contains(&Call::bid(1, Strain::Hearts)));
        assert!(calls.contains(&Call::bid(1, Strain::Spades)));
        assert_eq!(calls.len(), 1 + 32);
    }

    #[test]
    fn test_legal_calls_after_seven_no_trump() {
        let auction = Auction::bidding(Position::West, "7N");
        assert_eq!(auction.legal_calls(), vec![Call::Pass]);
    }

    #[test]
    fn test_legal_calls_finished_auction() {
        let auction = Auction::bidding(Position::West, "1C 1S P");
        assert!(auction.legal_calls().is_empty());
        assert!(!auction.is_legal(Call::Pass));
    }

    #[test]
    fn test_add_call_rejects_lower_bid() {
        let mut auction = Auction::bidding(Position::West, "2S");
        let err = auction.add_call(Call::bid(2, Strain::Hearts)).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(auction.calls.len(), 1);
        assert!(auction.add_call(Call::bid(2, Strain::Spades)).is_err());
        assert!(auction.add_call(nt(2)).is_ok());
    }

    #[test]
    fn test_add_call_rejects_out_of_range_level() {
        let mut auction = Auction::new(Position::West);
        assert!(auction.add_call(Call::bid(8, Strain::Clubs)).is_err());
        assert!(auction.add_call(Call::bid(0, Strain::Clubs)).is_err());
    }

    #[test]
    fn test_forced_call_is_only_legal_call() {
        let mut auction = Auction::with_forced(Position::West, vec![nt(2)]);
        assert_eq!(auction.pending_forced(), Some(nt(2)));
        assert_eq!(auction.legal_calls(), vec![nt(2)]);
        assert!(auction.add_call(Call::Pass).is_err());
        assert!(auction.add_call(nt(3)).is_err());
        auction.add_call(nt(2)).unwrap();
        assert_eq!(auction.pending_forced(), None);
        assert_eq!(auction.current_player(), Position::East);
        assert!(auction.legal_calls().contains(&Call::Pass));
    }

    #[test]
    fn test_apply_forced() {
        let mut auction =
            Auction::with_forced(Position::West, vec![Call::bid(1, Strain::Clubs), nt(1)]);
        auction.apply_forced();
        assert_eq!(auction.calls, vec![Call::bid(1, Strain::Clubs), nt(1)]);
        assert_eq!(auction.current_player(), Position::West);
    }

    #[test]
    fn test_final_contract() {
        let mut auction = Auction::bidding(Position::West, "1N");
        assert_eq!(auction.final_contract(), None);
        assert_eq!(
            auction.current_contract(),
            Some(Contract::new(1, Strain::NoTrump, Position::West))
        );
        auction.add_call(Call::Pass).unwrap();
        assert_eq!(
            auction.final_contract(),
            Some(Contract::new(1, Strain::NoTrump, Position::West))
        );
    }

    #[test]
    fn test_declarer_is_first_to_name_strain() {
        // W: 1S, E: 2H, W: 3S, E: 4S. West named spades first.
        let auction = Auction::bidding(Position::West, "1S 2H 3S 4S P");
        assert_eq!(
            auction.final_contract(),
            Some(Contract::new(4, Strain::Spades, Position::West))
        );

        // W: 1C, E: 1H, W: 1N, E: 3H. East named hearts first.
        let auction = Auction::bidding(Position::West, "1C 1H 1N 3H P");
        assert_eq!(
            auction.final_contract().map(|c| c.declarer),
            Some(Position::East)
        );

        // The partner repeats the opener's strain at a higher level.
        let auction = Auction::bidding(Position::West, "2N 3N P");
        assert_eq!(
            auction.final_contract(),
            Some(Contract::new(3, Strain::NoTrump, Position::West))
        );
        assert_eq!(auction.first_bidder_of(Strain::NoTrump), Some(Position::West));
        assert_eq!(auction.first_bidder_of(Strain::Clubs), None);
    }

    #[test]
    fn test_validate_calls() {
        assert!(Auction::validate_calls(&[]));
        assert!(Auction::validate_calls(&[Call::Pass]));
        assert!(Auction::bidding(Position::West, "1C 1D 2N P").is_valid());
        assert!(!Auction::validate_calls(&[
            Call::bid(1, Strain::Diamonds),
            Call::bid(1, Strain::Clubs),
        ]));
        assert!(!Auction::validate_calls(&[Call::Pass, Call::bid(1, Strain::Clubs)]));
        assert!(!Auction::validate_calls(&[nt(1), nt(1)]));
    }

    #[test]
    fn test_render() {
        assert_eq!(Auction::new(Position::West).render(), "");
        assert_eq!(Auction::bidding(Position::West, "2N 3C 3S P").to_string(), "2N-3C-3S-P");
    }

    proptest! {
        #[test]
        fn accepted_bids_strictly_ascend(choices in prop::collection::vec(0usize..36, 0..40)) {
            let mut auction = Auction::new(Position::West);
            for choice in choices {
                let legal = auction.legal_calls();
                if legal.is_empty() {
                    break;
                }
                prop_assert!(legal.contains(&Call::Pass));
                let call = legal[choice % legal.len()];
                auction.add_call(call).unwrap();
            }
            prop_assert!(auction.is_valid());
            let ranks: Vec<usize> = auction.calls.iter().filter_map(|c| c.rank()).collect();
            for pair in ranks.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
            prop_assert_eq!(auction.is_finished(), auction.calls.last() == Some(&Call::Pass));
        }
    }
}
