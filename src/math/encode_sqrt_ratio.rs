use crate::error::MathError;
use crate::math::u256_num::bigint_to_u256;
use alloy_primitives::U256;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Encodes the price `amount1 / amount0` as a Q64.96 sqrt price:
/// `isqrt((amount1 << 192) / amount0)`.
pub fn encode_sqrt_ratio_x96(
    amount1: impl Into<BigInt>,
    amount0: impl Into<BigInt>,
) -> Result<U256, MathError> {
    bigint_to_u256(&encode_sqrt_ratio_x96_big(&amount1.into(), &amount0.into())?)
}

/// Unbounded variant, for callers that clamp the result themselves.
pub(crate) fn encode_sqrt_ratio_x96_big(
    amount1: &BigInt,
    amount0: &BigInt,
) -> Result<BigInt, MathError> {
    if amount0.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let ratio_x192 = (amount1 << 192usize) / amount0;
    if ratio_x192.is_negative() {
        return Err(MathError::InvalidInput);
    }
    Ok(ratio_x192.sqrt())
}
