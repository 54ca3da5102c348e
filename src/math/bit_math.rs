use crate::error::MathError;
use alloy_primitives::U256;

/// Returns the index (0–255) of the most significant set bit in a `U256`,
/// or `MathError::InvalidInput` if the input is zero.
///
/// Every `U256` is at most `MaxUint256`, so zero is the only rejected value.
pub fn most_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::InvalidInput);
    }
    Ok(255 - x.leading_zeros() as u8)
}

/// Returns the index (0–255) of the least significant set bit in a `U256`,
/// or `MathError::InvalidInput` if the input is zero.
///
/// Used when scanning a bitmap word from the right for the first
/// initialized tick.
pub fn least_significant_bit(x: U256) -> Result<u8, MathError> {
    if x.is_zero() {
        return Err(MathError::InvalidInput);
    }
    Ok(x.trailing_zeros() as u8)
}
