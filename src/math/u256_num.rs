//! Conversions between the fixed-width alloy integers used by the swap
//! engine and the arbitrary-precision integers behind prices and amounts.

use crate::error::MathError;
use alloy_primitives::{I256, U256};
use num_bigint::{BigInt, BigUint};
use num_traits::Signed;

#[inline]
pub fn u256_to_biguint(x: U256) -> BigUint {
    BigUint::from_bytes_be(&x.to_be_bytes::<32>())
}

#[inline]
pub fn u256_to_bigint(x: U256) -> BigInt {
    BigInt::from(u256_to_biguint(x))
}

pub fn i256_to_bigint(x: I256) -> BigInt {
    let magnitude = u256_to_bigint(x.unsigned_abs());
    if x.is_negative() { -magnitude } else { magnitude }
}

/// Fails with `MathError::Overflow` if `x` needs more than 256 bits.
#[inline]
pub fn biguint_to_u256(x: &BigUint) -> Result<U256, MathError> {
    U256::try_from_be_slice(&x.to_bytes_be()).ok_or(MathError::Overflow)
}

/// Fails with `MathError::Underflow` for negative values.
pub fn bigint_to_u256(x: &BigInt) -> Result<U256, MathError> {
    if x.is_negative() {
        return Err(MathError::Underflow);
    }
    biguint_to_u256(x.magnitude())
}

pub fn bigint_to_i256(x: &BigInt) -> Result<I256, MathError> {
    let abs = biguint_to_u256(x.magnitude())?;
    if x.is_negative() {
        // |I256::MIN| = 2^255
        if abs > U256::ONE << 255usize {
            return Err(MathError::Underflow);
        }
        Ok(I256::from_raw(abs.wrapping_neg()))
    } else {
        if abs > I256::MAX.into_raw() {
            return Err(MathError::Overflow);
        }
        Ok(I256::from_raw(abs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u256_round_trips_through_biguint() {
        for x in [U256::ZERO, U256::ONE, U256::from(1u128 << 100), U256::MAX] {
            assert_eq!(biguint_to_u256(&u256_to_biguint(x)).unwrap(), x);
        }
    }

    #[test]
    fn biguint_above_u256_overflows() {
        let too_big = u256_to_biguint(U256::MAX) + 1u32;
        assert_eq!(biguint_to_u256(&too_big), Err(MathError::Overflow));
    }

    #[test]
    fn negative_bigint_is_not_a_u256() {
        assert_eq!(bigint_to_u256(&BigInt::from(-1)), Err(MathError::Underflow));
    }

    #[test]
    fn signed_conversions_keep_sign() {
        let minus_five = I256::try_from(-5).unwrap();
        assert_eq!(i256_to_bigint(minus_five), BigInt::from(-5));
        assert_eq!(bigint_to_i256(&BigInt::from(-5)).unwrap(), minus_five);
        assert_eq!(i256_to_bigint(I256::MIN), -(BigInt::from(1) << 255usize));
        assert_eq!(bigint_to_i256(&i256_to_bigint(I256::MIN)).unwrap(), I256::MIN);
        assert_eq!(bigint_to_i256(&i256_to_bigint(I256::MAX)).unwrap(), I256::MAX);
    }

    #[test]
    fn signed_out_of_range() {
        let two_255 = BigInt::from(1) << 255usize;
        assert_eq!(bigint_to_i256(&two_255), Err(MathError::Overflow));
        assert_eq!(
            bigint_to_i256(&(-two_255 - 1)),
            Err(MathError::Underflow)
        );
    }
}
