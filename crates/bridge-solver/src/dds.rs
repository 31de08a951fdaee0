use crate::{DoubleDummySolution, SolverError, TrickOracle};
use bridge_core::{Deal, Position, Strain, Suit};
use dds_bridge::contract::Strain as DdsStrain;
use dds_bridge::deal::{Deal as DdsDeal, Seat, SmallSet, Suit as DdsSuit};
use dds_bridge::solver::{self, StrainFlags};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use tracing::trace;

// The DDS library keeps global search state.
static DDS_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// [`TrickOracle`] backed by Bo Haglund's DDS through `dds-bridge`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DdsSolver;

fn seat(position: Position) -> Seat {
    match position {
        Position::North => Seat::North,
        Position::East => Seat::East,
        Position::South => Seat::South,
        Position::West => Seat::West,
    }
}

fn dds_suit(suit: Suit) -> DdsSuit {
    match suit {
        Suit::Clubs => DdsSuit::Clubs,
        Suit::Diamonds => DdsSuit::Diamonds,
        Suit::Hearts => DdsSuit::Hearts,
        Suit::Spades => DdsSuit::Spades,
    }
}

fn dds_strain(strain: Strain) -> DdsStrain {
    match strain {
        Strain::Clubs => DdsStrain::Clubs,
        Strain::Diamonds => DdsStrain::Diamonds,
        Strain::Hearts => DdsStrain::Hearts,
        Strain::Spades => DdsStrain::Spades,
        Strain::NoTrump => DdsStrain::Notrump,
    }
}

fn to_dds_deal(deal: &Deal) -> DdsDeal {
    let mut dds_deal = DdsDeal::default();
    for position in Position::ALL {
        for card in deal.hand(position).cards {
            let rank_val = card.rank as u8;
            dds_deal[seat(position)][dds_suit(card.suit)].insert(rank_val);
        }
    }
    dds_deal
}

impl TrickOracle for DdsSolver {
    fn solve(&self, deal: &Deal) -> Result<DoubleDummySolution, SolverError> {
        if !deal.is_permutation() {
            return Err(SolverError::IncompleteDeal);
        }
        let dds_deal = to_dds_deal(deal);

        let results = {
            let _guard = DDS_LOCK
                .lock()
                .map_err(|_| SolverError::Solver("solver lock poisoned".to_string()))?;
            solver::solve_deals(&[dds_deal], StrainFlags::all())
                .map_err(|e| SolverError::Solver(format!("{e:?}")))?
        };
        let table = results
            .first()
            .copied()
            .ok_or_else(|| SolverError::Solver("no table returned".to_string()))?;

        let mut tricks = [[0u8; 4]; 5];
        for strain in Strain::ALL {
            for position in Position::ALL {
                let count = u32::from(table[dds_strain(strain)].get(seat(position)));
                tricks[strain.idx()][position.idx()] = count as u8;
            }
        }
        trace!(?tricks, "solved deal");
        Ok(DoubleDummySolution { tricks })
    }
}
