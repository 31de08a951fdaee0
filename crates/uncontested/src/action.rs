//! Action ids: `0` is Pass, `1 + rank` is the bid of that rank.

use crate::game::Action;
use bridge_core::call::NUM_BIDS;
use bridge_core::Call;

pub const NUM_ACTIONS: usize = NUM_BIDS + 1;

pub const PASS: Action = 0;

/// The single outcome of the dealing chance node.
pub const DEAL: Action = 0;

pub fn call_to_action(call: Call) -> Option<Action> {
    match call {
        Call::Pass => Some(PASS),
        bid => bid.rank().map(|rank| rank + 1),
    }
}

pub fn action_to_call(action: Action) -> Option<Call> {
    match action {
        PASS => Some(Call::Pass),
        bid => Call::from_rank(bid - 1),
    }
}
