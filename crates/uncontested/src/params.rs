use crate::error::GameError;
use crate::filter::DealFilter;
use crate::sampler::DEFAULT_MAX_ATTEMPTS;
use bridge_core::{Call, Strain};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Subgame {
    /// Any deal, normal auction.
    #[default]
    #[serde(rename = "any")]
    Any,
    /// Player 0 holds a 2NT opener and must open 2NT.
    #[serde(rename = "2NT")]
    TwoNoTrump,
}

impl Subgame {
    pub fn forced_calls(self) -> Vec<Call> {
        match self {
            Subgame::Any => Vec::new(),
            Subgame::TwoNoTrump => vec![Call::bid(2, Strain::NoTrump)],
        }
    }

    pub fn deal_filter(self) -> DealFilter {
        match self {
            Subgame::Any => DealFilter::Any,
            Subgame::TwoNoTrump => DealFilter::StrongNoTrump,
        }
    }
}

impl FromStr for Subgame {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Subgame::Any),
            "2NT" => Ok(Subgame::TwoNoTrump),
            _ => Err(GameError::Config(format!("unknown subgame {s:?}"))),
        }
    }
}

impl fmt::Display for Subgame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subgame::Any => write!(f, "any"),
            Subgame::TwoNoTrump => write!(f, "2NT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameParams {
    /// The first session is seeded with `rng_seed + 1`, the next with
    /// `rng_seed + 2`, and so on.
    pub rng_seed: u64,
    /// Score player 1 against the best contract reachable after the forced
    /// calls.
    pub relative_scoring: bool,
    pub subgame: Subgame,
    pub max_deal_attempts: u64,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            rng_seed: 0,
            relative_scoring: false,
            subgame: Subgame::Any,
            max_deal_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GameParams {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GameError> {
        serde_yaml::from_str(yaml).map_err(|e| GameError::Config(e.to_string()))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&yaml)
    }
}
