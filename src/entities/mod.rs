//! Exact-arithmetic value types shared by pools, positions and trades.

mod currency_amount;
mod fraction;
mod price;
mod token;

pub use currency_amount::CurrencyAmount;
pub use fraction::{Fraction, Percent};
pub use price::{Price, price_to_closest_tick, tick_to_price};
pub use token::{Token, address_to_u160};
