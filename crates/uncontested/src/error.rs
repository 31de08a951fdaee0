use crate::game::{Action, Player};
use bridge_solver::SolverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("illegal action {action} for {player}")]
    IllegalAction { action: Action, player: Player },
    #[error("deal filter rejected {attempts} consecutive deals")]
    FilterUnsatisfiable { attempts: u64 },
    #[error("scoring failed: {0}")]
    Scoring(#[from] SolverError),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("configuration error: {0}")]
    Config(String),
}
