use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_LEVEL: u8 = 7;
/// 7 levels x 5 strains.
pub const NUM_BIDS: usize = MAX_LEVEL as usize * Strain::ALL.len();

/// A call in an uncontested auction. Only the bidding side acts, so doubles
/// and redoubles never occur.
///
/// The derived ordering is the bidding order: `Pass` sorts below every bid and
/// bids compare by level, then strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Call {
    Pass,
    Bid { level: u8, strain: Strain },
}

impl Call {
    pub fn bid(level: u8, strain: Strain) -> Self {
        Call::Bid { level, strain }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Call::Bid { .. })
    }

    /// Returns the level of this call, if it's a bid.
    pub fn level(&self) -> Option<u8> {
        match self {
            Call::Bid { level, .. } => Some(*level),
            Call::Pass => None,
        }
    }

    /// Returns the strain of this call, if it's a bid.
    pub fn strain(&self) -> Option<Strain> {
        match self {
            Call::Bid { strain, .. } => Some(*strain),
            Call::Pass => None,
        }
    }

    /// Position of a bid in the total bid order, `0` (1C) through `34` (7N).
    /// `Pass` and out-of-range levels have no rank.
    pub fn rank(&self) -> Option<usize> {
        match self {
            Call::Bid { level, strain } if (1..=MAX_LEVEL).contains(level) => {
                Some((*level as usize - 1) * Strain::ALL.len() + strain.idx())
            }
            Call::Bid { .. } => None,
            Call::Pass => None,
        }
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        if rank >= NUM_BIDS {
            return None;
        }
        Some(Call::Bid {
            level: (rank / Strain::ALL.len()) as u8 + 1,
            strain: Strain::from_idx(rank % Strain::ALL.len())?,
        })
    }

    /// All 35 bids in ascending order.
    pub fn all_bids() -> impl Iterator<Item = Call> {
        (0..NUM_BIDS).filter_map(Call::from_rank)
    }

    pub fn render(self) -> String {
        match self {
            Call::Pass => "P".to_string(),
            Call::Bid { level, strain } => format!("{}{}", level, strain.to_char()),
        }
    }
}

impl FromStr for Call {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_uppercase();
        if s == "P" || s == "PASS" {
            return Ok(Call::Pass);
        }
        let mut chars = s.chars();
        let level = chars.next().ok_or(())?.to_digit(10).ok_or(())? as u8;
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(());
        }
        let strain = Strain::from_char(chars.next().ok_or(())?).ok_or(())?;
        match chars.as_str() {
            "" | "T" => Ok(Call::Bid { level, strain }),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_parsing() {
        assert_eq!("P".parse::<Call>(), Ok(Call::Pass));
        assert_eq!("pass".parse::<Call>(), Ok(Call::Pass));
        assert_eq!("2N".parse::<Call>(), Ok(Call::bid(2, Strain::NoTrump)));
        assert_eq!("3nt".parse::<Call>(), Ok(Call::bid(3, Strain::NoTrump)));
        assert_eq!("4s".parse::<Call>(), Ok(Call::bid(4, Strain::Spades)));
        assert!("8C".parse::<Call>().is_err());
        assert!("0C".parse::<Call>().is_err());
        assert!("1X".parse::<Call>().is_err());
        assert!("X".parse::<Call>().is_err());
        assert!("1CC".parse::<Call>().is_err());
    }

    #[test]
    fn test_call_render() {
        assert_eq!(Call::Pass.render(), "P");
        assert_eq!(Call::bid(7, Strain::NoTrump).to_string(), "7N");
        assert_eq!(Call::bid(1, Strain::Clubs).to_string(), "1C");
    }

    #[test]
    fn test_bid_rank() {
        assert_eq!(Call::Pass.rank(), None);
        assert_eq!(Call::bid(1, Strain::Clubs).rank(), Some(0));
        assert_eq!(Call::bid(1, Strain::NoTrump).rank(), Some(4));
        assert_eq!(Call::bid(2, Strain::Clubs).rank(), Some(5));
        assert_eq!(Call::bid(2, Strain::NoTrump).rank(), Some(9));
        assert_eq!(Call::bid(7, Strain::NoTrump).rank(), Some(34));
        assert_eq!(Call::from_rank(35), None);
    }

    #[test]
    fn test_rank_matches_ordering() {
        let bids: Vec<Call> = Call::all_bids().collect();
        assert_eq!(bids.len(), NUM_BIDS);
        for (i, bid) in bids.iter().enumerate() {
            assert_eq!(bid.rank(), Some(i));
            assert!(Call::Pass < *bid);
        }
        for pair in bids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
