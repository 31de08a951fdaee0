//! Duplicate bridge contract scoring.

use bridge_core::{Contract, DoubleStatus, Strain};

/// 7NT undoubled, non-vulnerable, going down all thirteen.
pub const MIN_SCORE: i32 = -650;
/// 7NT undoubled, non-vulnerable, making.
pub const MAX_SCORE: i32 = 1520;

fn trick_value(strain: Strain) -> i32 {
    match strain {
        Strain::Clubs | Strain::Diamonds => 20,
        Strain::Hearts | Strain::Spades | Strain::NoTrump => 30,
    }
}

/// Declarer's score for taking `tricks` tricks in `contract`.
pub fn points(contract: &Contract, tricks: u8, vulnerable: bool) -> i32 {
    let required = contract.tricks_required() as i32;
    let taken = tricks as i32;
    if taken >= required {
        making_score(contract, taken - required, vulnerable)
    } else {
        -undertrick_penalty(contract, required - taken, vulnerable)
    }
}

fn making_score(contract: &Contract, overtricks: i32, vulnerable: bool) -> i32 {
    let level = contract.level as i32;
    let base = match contract.strain {
        Strain::NoTrump => 40 + (level - 1) * 30,
        strain => level * trick_value(strain),
    };
    let contract_value = match contract.double_status {
        DoubleStatus::Undoubled => base,
        DoubleStatus::Doubled => base * 2,
        DoubleStatus::Redoubled => base * 4,
    };

    let game_bonus = match (contract_value >= 100, vulnerable) {
        (true, true) => 500,
        (true, false) => 300,
        (false, _) => 50,
    };
    let slam_bonus = match (contract.level, vulnerable) {
        (6, false) => 500,
        (6, true) => 750,
        (7, false) => 1000,
        (7, true) => 1500,
        _ => 0,
    };
    let overtrick_value = match (contract.double_status, vulnerable) {
        (DoubleStatus::Undoubled, _) => trick_value(contract.strain),
        (DoubleStatus::Doubled, false) => 100,
        (DoubleStatus::Doubled, true) => 200,
        (DoubleStatus::Redoubled, false) => 200,
        (DoubleStatus::Redoubled, true) => 400,
    };
    let insult = match contract.double_status {
        DoubleStatus::Undoubled => 0,
        DoubleStatus::Doubled => 50,
        DoubleStatus::Redoubled => 100,
    };

    contract_value + game_bonus + slam_bonus + overtricks * overtrick_value + insult
}

fn undertrick_penalty(contract: &Contract, undertricks: i32, vulnerable: bool) -> i32 {
    let doubled = match (vulnerable, undertricks) {
        (true, n) => 200 + (n - 1) * 300,
        (false, 1) => 100,
        (false, 2) => 300,
        (false, n) => 500 + (n - 3) * 300,
    };
    match contract.double_status {
        DoubleStatus::Undoubled if vulnerable => undertricks * 100,
        DoubleStatus::Undoubled => undertricks * 50,
        DoubleStatus::Doubled => doubled,
        DoubleStatus::Redoubled => doubled * 2,
    }
}
