use crate::constants::Q96;
use crate::error::MathError;
use crate::math::u256_num::u256_to_biguint;
use alloy_primitives::U256;
use num_bigint::BigUint;
use std::cmp::min;

#[inline]
fn sorted(a: U256, b: U256) -> Result<(U256, U256), MathError> {
    let (a, b) = if a > b { (b, a) } else { (a, b) };
    if a == b {
        return Err(MathError::DivisionByZero);
    }
    Ok((a, b))
}

/// Liquidity for `amount0`, dividing by Q96 before multiplying by the
/// amount. This matches what the periphery contracts compute.
fn max_liquidity_for_amount0_imprecise(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<BigUint, MathError> {
    let (a, b) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let (a, b) = (u256_to_biguint(a), u256_to_biguint(b));
    let intermediate = &a * &b / u256_to_biguint(Q96);
    Ok(u256_to_biguint(amount0) * intermediate / (b - a))
}

fn max_liquidity_for_amount0_precise(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<BigUint, MathError> {
    let (a, b) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    let (a, b) = (u256_to_biguint(a), u256_to_biguint(b));
    let numerator = u256_to_biguint(amount0) * &a * &b;
    let denominator = u256_to_biguint(Q96) * (b - a);
    Ok(numerator / denominator)
}

fn max_liquidity_for_amount1(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<BigUint, MathError> {
    let (a, b) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;
    Ok(u256_to_biguint(amount1) * u256_to_biguint(Q96) / u256_to_biguint(b - a))
}

/// Maximum liquidity a position over `[sqrt_ratio_a_x96, sqrt_ratio_b_x96]`
/// can take given both token budgets at the current price.
///
/// Below the range only token0 counts, above it only token1, and in range
/// the smaller of the two. `use_full_precision` keeps the full Q192
/// numerator for the token0 leg instead of dividing by Q96 first.
///
/// The result is unbounded; callers decide whether it fits in a `u128`.
pub fn max_liquidity_for_amounts(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
    use_full_precision: bool,
) -> Result<BigUint, MathError> {
    let (a, b) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96)?;

    let for_amount0: fn(U256, U256, U256) -> Result<BigUint, MathError> = if use_full_precision {
        max_liquidity_for_amount0_precise
    } else {
        max_liquidity_for_amount0_imprecise
    };

    if sqrt_ratio_current_x96 <= a {
        for_amount0(a, b, amount0)
    } else if sqrt_ratio_current_x96 < b {
        let liquidity0 = for_amount0(sqrt_ratio_current_x96, b, amount0)?;
        let liquidity1 = max_liquidity_for_amount1(a, sqrt_ratio_current_x96, amount1)?;
        Ok(min(liquidity0, liquidity1))
    } else {
        max_liquidity_for_amount1(a, b, amount1)
    }
}
