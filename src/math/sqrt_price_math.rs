//! Price movement and token amounts over a constant-liquidity range.
//!
//! All prices are `sqrt(token1 / token0)` as Q64.96. Rounding always favors
//! the pool.

use crate::constants::{Q96, RESOLUTION, U160_MAX};
use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up, unlikely};
use alloy_primitives::{I256, U256};

#[inline]
fn ordered(a: U256, b: U256) -> (U256, U256) {
    if a > b { (b, a) } else { (a, b) }
}

#[inline]
fn fits_u160(price: U256) -> Result<U256, MathError> {
    if price > U160_MAX {
        return Err(MathError::Overflow);
    }
    Ok(price)
}

/// Next sqrt price after `amount` of token0 enters (`add`) or leaves the
/// pool, rounded up.
///
/// Uses `L * P / (L ± amount * P)`, falling back to `L / (L / P + amount)`
/// when `amount * P` does not fit in 256 bits.
pub fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }

    let scaled_liquidity = U256::from(liquidity) << RESOLUTION;
    let product = amount.checked_mul(sqrt_price_x96);

    if add {
        if let Some(denominator) = product.and_then(|p| scaled_liquidity.checked_add(p)) {
            return Ok(mul_div_rounding_up(scaled_liquidity, sqrt_price_x96, denominator)?);
        }
        let denominator = (scaled_liquidity / sqrt_price_x96)
            .checked_add(amount)
            .ok_or(MathError::Overflow)?;
        return Ok(div_rounding_up(scaled_liquidity, denominator));
    }

    match product {
        Some(product) if product < scaled_liquidity => Ok(mul_div_rounding_up(
            scaled_liquidity,
            sqrt_price_x96,
            scaled_liquidity - product,
        )?),
        _ => Err(StateError::InsufficientReserves.into()),
    }
}

/// Next sqrt price after `amount` of token1 enters (`add`) or leaves the
/// pool, rounded down: `P ± amount / L`.
pub fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    let liquidity = U256::from(liquidity);
    let small = amount <= U160_MAX;

    if add {
        let delta = if small {
            (amount << RESOLUTION) / liquidity
        } else {
            mul_div(amount, Q96, liquidity)?
        };
        let next = sqrt_price_x96
            .checked_add(delta)
            .ok_or(MathError::Overflow)?;
        return Ok(fits_u160(next)?);
    }

    let delta = if small {
        div_rounding_up(amount << RESOLUTION, liquidity)
    } else {
        mul_div_rounding_up(amount, Q96, liquidity)?
    };
    if sqrt_price_x96 <= delta {
        return Err(StateError::InsufficientReserves.into());
    }
    Ok(fits_u160(sqrt_price_x96 - delta)?)
}

/// Amount of token0 covering the move between two sqrt prices at fixed
/// liquidity: `L * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)`.
///
/// Argument order does not matter. Round up when quoting an input, down
/// when quoting an output.
pub fn get_amount_0_delta_base(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if lower.is_zero() {
        return Err(StateError::SqrtRatioIsZero.into());
    }

    let scaled_liquidity = U256::from(liquidity) << RESOLUTION;
    let spread = upper - lower;

    Ok(if round_up {
        div_rounding_up(mul_div_rounding_up(scaled_liquidity, spread, upper)?, lower)
    } else {
        mul_div(scaled_liquidity, spread, upper)? / lower
    })
}

/// Amount of token1 covering the move between two sqrt prices at fixed
/// liquidity: `L * (sqrt_b - sqrt_a)`.
pub fn get_amount_1_delta_base(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);

    if round_up {
        mul_div_rounding_up(liquidity, upper - lower, Q96)
    } else {
        mul_div(liquidity, upper - lower, Q96)
    }
}

/// Adding liquidity owes the pool (rounded up, positive); removing it is
/// owed by the pool (rounded down, negative).
#[inline]
fn signed_delta<E>(
    liquidity: i128,
    base: impl FnOnce(u128, bool) -> Result<U256, E>,
) -> Result<I256, E> {
    let adding = liquidity >= 0;
    let amount = I256::from_raw(base(liquidity.unsigned_abs(), adding)?);
    Ok(if adding { amount } else { -amount })
}

/// Signed token0 delta for a signed liquidity change.
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<I256, Error> {
    signed_delta(liquidity, |liquidity, round_up| {
        get_amount_0_delta_base(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, round_up)
    })
}

/// Signed token1 delta for a signed liquidity change.
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<I256, MathError> {
    signed_delta(liquidity, |liquidity, round_up| {
        get_amount_1_delta_base(sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity, round_up)
    })
}

#[inline]
fn check_state(sqrt_price_x96: U256, liquidity: u128) -> Result<(), StateError> {
    if unlikely(sqrt_price_x96.is_zero()) {
        return Err(StateError::SqrtPriceIsZero);
    }
    if unlikely(liquidity == 0) {
        return Err(StateError::LiquidityIsZero);
    }
    Ok(())
}

/// Next sqrt price after `amount_in` enters the pool. Selling token0
/// (`zero_for_one`) lowers the price.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    check_state(sqrt_price_x96, liquidity)?;
    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_price_x96, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Next sqrt price after `amount_out` leaves the pool. Buying token1
/// (`zero_for_one`) lowers the price.
pub fn get_next_sqrt_price_from_output(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    check_state(sqrt_price_x96, liquidity)?;
    if zero_for_one {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_price_x96, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_price_x96, liquidity, amount_out, false)
    }
}
