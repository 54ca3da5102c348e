//! Routes through pools, trades along them, and the search for the best
//! trade over a set of pools.

mod best_trade;
mod route;
mod sorted_insert;
mod v3_trade;

pub use best_trade::BestTradeOptions;
pub use route::Route;
pub use sorted_insert::sorted_insert;
pub use v3_trade::{Swap, Trade, TradeType, trade_comparator};
