//! Off-chain Uniswap V3 pool, position and routing math in pure Rust.
//!
//! This crate exposes:
//! - Low‑level math primitives (`math::*`) for ticks, prices, swap steps and
//!   liquidity, bit‑exact with the on‑chain contracts.
//! - Exact rational value types (`entities::*`): tokens, fractions, amounts
//!   and prices.
//! - An immutable [`Pool`] that simulates swaps across initialized ticks
//!   supplied by any [`TickDataProvider`](tick::TickDataProvider).
//! - [`Position`] amounts, mint/burn slippage bounds and liquidity from
//!   token budgets.
//! - [`Route`](trade::Route) and [`Trade`] composition, plus a bounded
//!   search for the best single‑route trade over a set of pools.
//!
//! Nothing here performs I/O. Every operation is a pure function of its
//! inputs, so values can be shared freely across threads.
//!
//! # Examples
//!
//! ## Pure math
//! ```no_run
//! use univ3_sdk::{constants::RESOLUTION, math::tick_math, U256};
//!
//! let sqrt_price = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
//! assert_eq!(sqrt_price, U256::from(1) << RESOLUTION);
//! ```
//!
//! ## Quoting a swap
//! ```no_run
//! use std::sync::Arc;
//! use univ3_sdk::{
//!     constants::{FeeAmount, MAX_TICK, MIN_TICK},
//!     entities::{CurrencyAmount, Token},
//!     math::{encode_sqrt_ratio::encode_sqrt_ratio_x96, tick_math},
//!     tick::{Tick, TickListDataProvider},
//!     Address, Pool,
//! };
//!
//! let dai = Token::new(1, "0x6B175474E89094C44Da98b954EedeAC495271d0F".parse::<Address>().unwrap(), 18, Some("DAI"), None);
//! let usdc = Token::new(1, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse::<Address>().unwrap(), 6, Some("USDC"), None);
//!
//! let fee = FeeAmount::Low;
//! let liquidity = 1_000_000_000_000_000_000u128;
//! let ticks = vec![
//!     Tick::new(tick_math::nearest_usable_tick(MIN_TICK, fee.tick_spacing()).unwrap(), liquidity, liquidity as i128),
//!     Tick::new(tick_math::nearest_usable_tick(MAX_TICK, fee.tick_spacing()).unwrap(), liquidity, -(liquidity as i128)),
//! ];
//! let provider = TickListDataProvider::new(ticks, fee.tick_spacing()).unwrap();
//!
//! let pool = Pool::new(dai, usdc.clone(), fee, encode_sqrt_ratio_x96(1, 1).unwrap(), liquidity, 0, Arc::new(provider)).unwrap();
//!
//! let amount_in = CurrencyAmount::from_raw_amount(usdc, 100).unwrap();
//! let (amount_out, pool_after) = pool.get_output_amount(&amount_in, None).unwrap();
//! println!("{} DAI out, new price {}", amount_out.quotient(), pool_after.sqrt_ratio_x96());
//! ```

pub use alloy_primitives::{Address, I256, U256};

pub mod constants;
pub mod entities;
pub mod error;
mod hash;
pub mod math;
pub mod pool;
pub mod position;
pub mod tick;
pub mod trade;

#[cfg(test)]
mod test_utils;

pub use entities::{CurrencyAmount, Fraction, Percent, Price, Token};
pub use error::Error;
pub use hash::FastMap;
pub use pool::Pool;
pub use position::Position;
pub use trade::{BestTradeOptions, Route, Trade, TradeType};
