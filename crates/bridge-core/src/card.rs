use crate::rank::Rank;
use crate::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact card identifier in `0..52`: `suit = id % 4`, `rank = id / 4`.
pub type CardId = u8;

pub const NUM_CARDS: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn id(self) -> CardId {
        (self.rank.idx() * Suit::ALL.len() + self.suit.idx()) as CardId
    }

    pub fn from_id(id: CardId) -> Option<Self> {
        let id = id as usize;
        if id >= NUM_CARDS {
            return None;
        }
        Some(Self {
            suit: Suit::from_idx(id % 4)?,
            rank: Rank::from_idx(id / 4)?,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}
