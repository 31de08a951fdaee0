pub mod suit;
pub mod rank;
pub mod strain;
pub mod card;
pub mod hand;
pub mod position;
pub mod call;
pub mod contract;
pub mod auction;
pub mod deal;
pub mod io;

pub use suit::Suit;
pub use rank::Rank;
pub use strain::Strain;
pub use card::Card;
pub use hand::{Hand, Shape};
pub use position::Position;
pub use call::Call;
pub use contract::{Contract, DoubleStatus};
pub use auction::{Auction, IllegalCall};
pub use deal::Deal;
