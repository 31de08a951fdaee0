use crate::call::{Call, MAX_LEVEL};
use crate::position::Position;
use crate::strain::Strain;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoubleStatus {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub double_status: DoubleStatus,
    pub declarer: Position,
}

impl Contract {
    pub fn new(level: u8, strain: Strain, declarer: Position) -> Self {
        Self {
            level,
            strain,
            double_status: DoubleStatus::Undoubled,
            declarer,
        }
    }

    /// The bid that names this contract.
    pub fn bid(&self) -> Call {
        Call::Bid {
            level: self.level,
            strain: self.strain,
        }
    }

    /// Tricks declarer needs to make the contract.
    pub fn tricks_required(&self) -> u8 {
        self.level + 6
    }

    pub fn render(&self) -> String {
        let doubling = match self.double_status {
            DoubleStatus::Undoubled => "",
            DoubleStatus::Doubled => "X",
            DoubleStatus::Redoubled => "XX",
        };
        format!("{}{}{}{}", self.level, self.strain, doubling, self.declarer)
    }
}

/// Parses `<level><strain>[X|XX]<declarer>`, e.g. `3NW` or `4SXE`.
impl FromStr for Contract {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_uppercase();
        let mut chars = s.chars();
        let level = chars.next().ok_or(())?.to_digit(10).ok_or(())? as u8;
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(());
        }
        let strain = Strain::from_char(chars.next().ok_or(())?).ok_or(())?;
        let rest = chars.as_str();
        let (double_status, declarer) = match rest.len() {
            1 => (DoubleStatus::Undoubled, rest),
            2 if rest.starts_with('X') => (DoubleStatus::Doubled, &rest[1..]),
            3 if rest.starts_with("XX") => (DoubleStatus::Redoubled, &rest[2..]),
            _ => return Err(()),
        };
        let declarer = declarer.chars().next().and_then(Position::from_char).ok_or(())?;
        Ok(Contract {
            level,
            strain,
            double_status,
            declarer,
        })
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
