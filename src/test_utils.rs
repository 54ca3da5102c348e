//! Tokens and pools shared by the unit tests.

use crate::constants::{FeeAmount, MAX_TICK, MIN_TICK};
use crate::entities::{CurrencyAmount, Token};
use crate::math::encode_sqrt_ratio::encode_sqrt_ratio_x96;
use crate::math::tick_math::{get_tick_at_sqrt_ratio, nearest_usable_tick};
use crate::pool::Pool;
use crate::tick::Tick;
use alloy_primitives::address;
use num_traits::ToPrimitive;

pub(crate) fn token0() -> Token {
    Token::new(
        1,
        address!("0x0000000000000000000000000000000000000001"),
        18,
        Some("t0"),
        Some("token0"),
    )
}

pub(crate) fn token1() -> Token {
    Token::new(
        1,
        address!("0x0000000000000000000000000000000000000002"),
        18,
        Some("t1"),
        Some("token1"),
    )
}

pub(crate) fn token2() -> Token {
    Token::new(
        1,
        address!("0x0000000000000000000000000000000000000003"),
        18,
        Some("t2"),
        Some("token2"),
    )
}

pub(crate) fn token3() -> Token {
    Token::new(
        1,
        address!("0x0000000000000000000000000000000000000004"),
        18,
        Some("t3"),
        Some("token3"),
    )
}

pub(crate) fn dai() -> Token {
    Token::new(
        1,
        address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
        18,
        Some("DAI"),
        Some("Dai Stablecoin"),
    )
}

pub(crate) fn usdc() -> Token {
    Token::new(
        1,
        address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
        6,
        Some("USDC"),
        Some("USD Coin"),
    )
}

pub(crate) fn weth() -> Token {
    Token::new(
        1,
        address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
        18,
        Some("WETH"),
        Some("Wrapped Ether"),
    )
}

pub(crate) fn amount(token: Token, raw: u64) -> CurrencyAmount {
    CurrencyAmount::from_raw_amount(token, raw).unwrap()
}

/// A full-range pool priced and sized like a constant-product pair holding
/// the two reserves.
pub(crate) fn v2_style_pool(
    reserve0: &CurrencyAmount,
    reserve1: &CurrencyAmount,
    fee: FeeAmount,
) -> Pool {
    let r0 = reserve0.quotient().to_u128().unwrap();
    let r1 = reserve1.quotient().to_u128().unwrap();
    let sqrt_ratio_x96 = encode_sqrt_ratio_x96(r1, r0).unwrap();
    let liquidity = (r0 * r1).isqrt();
    let spacing = fee.tick_spacing();

    Pool::with_ticks(
        reserve0.currency().clone(),
        reserve1.currency().clone(),
        fee,
        sqrt_ratio_x96,
        liquidity,
        get_tick_at_sqrt_ratio(sqrt_ratio_x96).unwrap(),
        vec![
            Tick::new(
                nearest_usable_tick(MIN_TICK, spacing).unwrap(),
                liquidity,
                liquidity as i128,
            ),
            Tick::new(
                nearest_usable_tick(MAX_TICK, spacing).unwrap(),
                liquidity,
                -(liquidity as i128),
            ),
        ],
    )
    .unwrap()
}
