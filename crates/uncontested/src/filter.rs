use bridge_core::{Deal, Position};
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// HCP range for a 2NT opening.
pub const STRONG_NO_TRUMP_HCP: RangeInclusive<u8> = 20..=21;

/// Which deals the sampler keeps.
#[derive(Clone, Default)]
pub enum DealFilter {
    /// Every deal.
    #[default]
    Any,
    /// Player 0 is balanced with 20-21 HCP.
    StrongNoTrump,
    Custom(Arc<dyn Fn(&Deal) -> bool + Send + Sync>),
}

impl DealFilter {
    pub fn custom(predicate: impl Fn(&Deal) -> bool + Send + Sync + 'static) -> Self {
        DealFilter::Custom(Arc::new(predicate))
    }

    pub fn accepts(&self, deal: &Deal) -> bool {
        match self {
            DealFilter::Any => true,
            DealFilter::StrongNoTrump => {
                let hand = deal.hand(Position::West);
                hand.is_balanced() && STRONG_NO_TRUMP_HCP.contains(&hand.hcp())
            }
            DealFilter::Custom(predicate) => predicate(deal),
        }
    }
}

impl fmt::Debug for DealFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealFilter::Any => write!(f, "Any"),
            DealFilter::StrongNoTrump => write!(f, "StrongNoTrump"),
            DealFilter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
