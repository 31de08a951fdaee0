//! The textual session record.
//!
//! A record is `<W> <E> <N> <S> <auction>` once the cards are dealt, or just
//! `<auction>` before. Hands are written `spades.hearts.diamonds.clubs` with
//! ranks high to low; the auction is the calls joined with `-`. Tokens
//! containing `:` (score annotations such as `Score:400` or `3NW:430`) are
//! ignored on import.

use crate::auction::Auction;
use crate::call::Call;
use crate::card::Card;
use crate::deal::Deal;
use crate::hand::Hand;
use crate::rank::Rank;
use crate::suit::Suit;
use once_cell::sync::Lazy;
use regex::Regex;

static HAND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[AKQJT2-9]*\.[AKQJT2-9]*\.[AKQJT2-9]*\.[AKQJT2-9]*$")
        .expect("hand pattern is valid")
});

const SUIT_SEQUENCE: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

/// A parsed record: the deal, if one was written, and the calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub deal: Option<Deal>,
    pub calls: Vec<Call>,
}

pub fn export_hand(hand: &Hand) -> String {
    let sorted_hand = hand.sorted();
    SUIT_SEQUENCE
        .iter()
        .map(|suit| {
            sorted_hand
                .cards
                .iter()
                .filter(|c| c.suit == *suit)
                .map(|c| c.rank.to_char())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Parses `spades.hearts.diamonds.clubs`. Duplicate cards are rejected; the
/// card count is not checked here.
pub fn import_hand(hand_str: &str) -> Option<Hand> {
    if !HAND_PATTERN.is_match(hand_str) {
        return None;
    }
    let mut cards = Vec::new();
    for (suit, holding) in SUIT_SEQUENCE.iter().zip(hand_str.split('.')) {
        for c in holding.chars() {
            let card = Card::new(*suit, Rank::from_char(c)?);
            if cards.contains(&card) {
                return None;
            }
            cards.push(card);
        }
    }
    Some(Hand::new(cards))
}

/// Hands in [`Deal::SEATS`] order, separated by spaces.
pub fn export_deal(deal: &Deal) -> String {
    Deal::SEATS
        .iter()
        .map(|&pos| export_hand(&deal.hand(pos)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn import_deal(deal_str: &str) -> Option<Deal> {
    let tokens: Vec<&str> = deal_str.split_whitespace().collect();
    if tokens.len() != Deal::SEATS.len() {
        return None;
    }
    let hands = [
        import_hand(tokens[0])?,
        import_hand(tokens[1])?,
        import_hand(tokens[2])?,
        import_hand(tokens[3])?,
    ];
    Deal::from_hands(&hands)
}

/// Parses `2N-3C-P`. The empty string is the empty auction.
pub fn import_calls(calls_str: &str) -> Option<Vec<Call>> {
    let calls_str = calls_str.trim();
    if calls_str.is_empty() {
        return Some(Vec::new());
    }
    calls_str
        .split('-')
        .map(|token| token.parse::<Call>().ok())
        .collect()
}

pub fn export_record(deal: Option<&Deal>, auction: &Auction) -> String {
    let calls = auction.render();
    match deal {
        Some(deal) if calls.is_empty() => export_deal(deal),
        Some(deal) => format!("{} {}", export_deal(deal), calls),
        None => calls,
    }
}

pub fn import_record(record: &str) -> Option<Record> {
    let tokens: Vec<&str> = record
        .split_whitespace()
        .filter(|token| !token.contains(':'))
        .collect();

    let (deal, rest) = match tokens.first() {
        Some(first) if first.contains('.') => {
            if tokens.len() < Deal::SEATS.len() {
                return None;
            }
            let (hands, rest) = tokens.split_at(Deal::SEATS.len());
            (Some(import_deal(&hands.join(" "))?), rest)
        }
        _ => (None, &tokens[..]),
    };

    let calls = match rest {
        [] => Vec::new(),
        [calls] => import_calls(calls)?,
        _ => return None,
    };
    Some(Record { deal, calls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::strain::Strain;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_export_hand_order() {
        let hand = Hand::new(vec![
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Spades, Rank::Ten),
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Diamonds, Rank::King),
        ]);
        assert_eq!(export_hand(&hand), "AT..K.2");
    }

    #[test]
    fn test_import_hand() {
        let hand = import_hand("AKQ.JT9.876.5432").unwrap();
        assert_eq!(hand.len(), 13);
        assert_eq!(hand.hcp(), 10);
        assert_eq!(hand.distribution(), [3, 3, 3, 4]);
        assert_eq!(import_hand("akq.jt9.876.5432"), Some(hand));
    }

    #[test]
    fn test_import_hand_rejects_garbage() {
        assert_eq!(import_hand("AKQ.JT9.876"), None);
        assert_eq!(import_hand("AKQ.JT9.876.54.3"), None);
        assert_eq!(import_hand("AKX.JT9.876.5432"), None);
        assert_eq!(import_hand("AAK.JT9.876.5432"), None);
    }

    #[test]
    fn test_deal_roundtrip() {
        let mut deal = Deal::new();
        deal.shuffle(&mut StdRng::seed_from_u64(42));
        let text = export_deal(&deal);
        let imported = import_deal(&text).unwrap();
        for pos in Position::ALL {
            assert_eq!(imported.hand(pos).sorted(), deal.hand(pos).sorted());
        }
        assert_eq!(export_deal(&imported), text);
    }

    #[test]
    fn test_sorted_deal_roundtrip_is_exact() {
        let mut deal = Deal::new();
        deal.shuffle(&mut StdRng::seed_from_u64(17));
        deal.sort_hands();
        assert_eq!(import_deal(&export_deal(&deal)), Some(deal));
    }

    #[test]
    fn test_import_deal_rejects_overlapping_hands() {
        let text = "AKQJT98765432... AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432.";
        assert_eq!(import_deal(text), None);
    }

    #[test]
    fn test_import_calls() {
        assert_eq!(import_calls(""), Some(vec![]));
        assert_eq!(
            import_calls("2N-3C-P"),
            Some(vec![
                Call::bid(2, Strain::NoTrump),
                Call::bid(3, Strain::Clubs),
                Call::Pass
            ])
        );
        assert_eq!(import_calls("2N--P"), None);
    }

    #[test]
    fn test_record_roundtrip() {
        let mut deal = Deal::new();
        deal.shuffle(&mut StdRng::seed_from_u64(5));
        let auction = Auction::bidding(Position::West, "1C 1S 3N P");
        let text = export_record(Some(&deal), &auction);
        assert!(text.ends_with(" 1C-1S-3N-P"));

        let record = import_record(&format!("{text} Score:400 3NW:400")).unwrap();
        assert_eq!(record.calls, auction.calls);
        assert_eq!(export_deal(&record.deal.unwrap()), export_deal(&deal));
    }

    #[test]
    fn test_record_without_deal() {
        let auction = Auction::bidding(Position::West, "2N");
        let record = import_record(&export_record(None, &auction)).unwrap();
        assert_eq!(record.deal, None);
        assert_eq!(record.calls, auction.calls);

        let empty = import_record("").unwrap();
        assert_eq!(empty.deal, None);
        assert!(empty.calls.is_empty());
    }

    #[test]
    fn test_record_dealt_without_calls() {
        let deal = Deal::new();
        let text = export_record(Some(&deal), &Auction::new(Position::West));
        let record = import_record(&text).unwrap();
        assert!(record.deal.is_some());
        assert!(record.calls.is_empty());
    }
}
