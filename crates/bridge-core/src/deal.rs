use crate::card::{Card, CardId, NUM_CARDS};
use crate::hand::Hand;
use crate::position::Position;
use crate::rank::Rank;
use crate::suit::Suit;
use rand::Rng;
use std::ops::Range;

pub const CARDS_PER_HAND: usize = 13;

/// A permutation of the 52 card identifiers. Positions `[0, 13)` hold West's
/// hand, then East, North and South.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deal {
    cards: [CardId; NUM_CARDS],
}

impl Default for Deal {
    fn default() -> Self {
        Self::new()
    }
}

impl Deal {
    /// Hand order within the permutation.
    pub const SEATS: [Position; 4] = [
        Position::West,
        Position::East,
        Position::North,
        Position::South,
    ];

    /// The identity permutation.
    pub fn new() -> Self {
        let mut cards = [0; NUM_CARDS];
        for (i, card) in cards.iter_mut().enumerate() {
            *card = i as CardId;
        }
        Self { cards }
    }

    /// Returns `None` unless `cards` is a permutation of `0..52`.
    pub fn from_cards(cards: [CardId; NUM_CARDS]) -> Option<Self> {
        let deal = Self { cards };
        deal.is_permutation().then_some(deal)
    }

    /// Builds a deal from four 13-card hands given in [`Deal::SEATS`] order.
    pub fn from_hands(hands: &[Hand; 4]) -> Option<Self> {
        let mut cards = [0; NUM_CARDS];
        let mut slot = 0;
        for hand in hands {
            if hand.len() != CARDS_PER_HAND {
                return None;
            }
            for card in &hand.cards {
                cards[slot] = card.id();
                slot += 1;
            }
        }
        Self::from_cards(cards)
    }

    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; NUM_CARDS];
        for &id in &self.cards {
            let Some(slot) = seen.get_mut(id as usize) else {
                return false;
            };
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.shuffle_range(rng, 0..NUM_CARDS);
    }

    /// Fisher–Yates over `range` only; cards outside it stay put.
    pub fn shuffle_range(&mut self, rng: &mut impl Rng, range: Range<usize>) {
        let Range { start, end } = range;
        let end = end.min(NUM_CARDS);
        for i in start..end.saturating_sub(1) {
            let j = i + rng.gen_range(0..end - i);
            self.cards.swap(i, j);
        }
    }

    /// Puts every hand in display order: spades first, high cards first
    /// within a suit. A sorted deal survives a text round trip unchanged.
    pub fn sort_hands(&mut self) {
        for hand in self.cards.chunks_mut(CARDS_PER_HAND) {
            hand.sort_by(|a, b| (b % 4).cmp(&(a % 4)).then_with(|| (b / 4).cmp(&(a / 4))));
        }
    }

    pub fn cards(&self) -> &[CardId; NUM_CARDS] {
        &self.cards
    }

    pub fn card_id(&self, i: usize) -> CardId {
        self.cards[i]
    }

    pub fn card(&self, i: usize) -> Card {
        Card::new(self.suit(i), self.rank(i))
    }

    pub fn suit(&self, i: usize) -> Suit {
        Suit::ALL[self.cards[i] as usize % 4]
    }

    pub fn rank(&self, i: usize) -> Rank {
        Rank::ALL[self.cards[i] as usize / 4]
    }

    pub fn hand_range(position: Position) -> Range<usize> {
        let block = match position {
            Position::West => 0,
            Position::East => 1,
            Position::North => 2,
            Position::South => 3,
        };
        block * CARDS_PER_HAND..(block + 1) * CARDS_PER_HAND
    }

    pub fn hand_ids(&self, position: Position) -> &[CardId] {
        &self.cards[Self::hand_range(position)]
    }

    pub fn hand(&self, position: Position) -> Hand {
        Hand::new(Self::hand_range(position).map(|i| self.card(i)).collect())
    }
}
