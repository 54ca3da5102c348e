use crate::entities::{Fraction, Token};
use crate::error::{CurrencyError, Error};
use crate::math::u256_num::u256_to_bigint;
use alloy_primitives::U256;
use num_bigint::BigInt;

/// An amount of a token in its smallest unit, kept as an exact fraction so
/// prices can be applied without intermediate rounding.
///
/// The integer part never exceeds `U256::MAX`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurrencyAmount {
    currency: Token,
    fraction: Fraction,
}

impl CurrencyAmount {
    fn checked(currency: Token, fraction: Fraction) -> Result<Self, CurrencyError> {
        if fraction.quotient() > u256_to_bigint(U256::MAX) {
            return Err(CurrencyError::AmountExceedsMaxUint256);
        }
        Ok(Self { currency, fraction })
    }

    pub fn from_raw_amount(
        currency: Token,
        raw_amount: impl Into<BigInt>,
    ) -> Result<Self, CurrencyError> {
        Self::checked(currency, Fraction::from_integer(raw_amount))
    }

    pub fn from_fractional_amount(
        currency: Token,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, Error> {
        Ok(Self::checked(currency, Fraction::new(numerator, denominator)?)?)
    }

    #[inline]
    pub fn currency(&self) -> &Token {
        &self.currency
    }

    #[inline]
    pub fn as_fraction(&self) -> &Fraction {
        &self.fraction
    }

    #[inline]
    pub fn numerator(&self) -> &BigInt {
        self.fraction.numerator()
    }

    #[inline]
    pub fn denominator(&self) -> &BigInt {
        self.fraction.denominator()
    }

    /// The raw integer amount, truncated toward zero.
    #[inline]
    pub fn quotient(&self) -> BigInt {
        self.fraction.quotient()
    }

    fn same_currency(&self, other: &CurrencyAmount) -> Result<(), CurrencyError> {
        if self.currency != other.currency {
            return Err(CurrencyError::CurrencyMismatch);
        }
        Ok(())
    }

    pub fn try_add(&self, other: &CurrencyAmount) -> Result<Self, CurrencyError> {
        self.same_currency(other)?;
        Self::checked(self.currency.clone(), &self.fraction + &other.fraction)
    }

    pub fn try_sub(&self, other: &CurrencyAmount) -> Result<Self, CurrencyError> {
        self.same_currency(other)?;
        Self::checked(self.currency.clone(), &self.fraction - &other.fraction)
    }

    pub fn multiply(&self, other: &Fraction) -> Result<Self, CurrencyError> {
        Self::checked(self.currency.clone(), &self.fraction * other)
    }

    pub fn divide(&self, other: &Fraction) -> Result<Self, Error> {
        Ok(Self::checked(
            self.currency.clone(),
            self.fraction.checked_div(other)?,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;
    use crate::test_utils::token0;

    #[test]
    fn from_raw_amount_is_an_integer() {
        let amount = CurrencyAmount::from_raw_amount(token0(), 100).unwrap();
        assert_eq!(amount.quotient(), BigInt::from(100));
        assert_eq!(amount.denominator(), &BigInt::from(1));
        assert_eq!(amount.currency(), &token0());
    }

    #[test]
    fn multiply_by_percent_fraction() {
        let amount = CurrencyAmount::from_raw_amount(token0(), 100).unwrap();
        let fifteen_percent = Fraction::new(15, 100).unwrap();
        assert_eq!(amount.multiply(&fifteen_percent).unwrap().quotient(), BigInt::from(15));
    }

    #[test]
    fn max_uint256_is_allowed_but_not_exceeded() {
        let max = u256_to_bigint(U256::MAX);
        let amount = CurrencyAmount::from_raw_amount(token0(), max.clone()).unwrap();
        assert_eq!(amount.quotient(), max);

        assert_eq!(
            CurrencyAmount::from_raw_amount(token0(), &max + 1),
            Err(CurrencyError::AmountExceedsMaxUint256)
        );
        let one = CurrencyAmount::from_raw_amount(token0(), 1).unwrap();
        assert_eq!(
            amount.try_add(&one),
            Err(CurrencyError::AmountExceedsMaxUint256)
        );
    }

    #[test]
    fn fractional_amount_above_max_is_allowed_below_next_integer() {
        let max = u256_to_bigint(U256::MAX);
        let amount =
            CurrencyAmount::from_fractional_amount(token0(), &max * 2 + 1, 2).unwrap();
        assert_eq!(amount.quotient(), max);
    }

    #[test]
    fn add_and_sub_require_same_currency() {
        let a = CurrencyAmount::from_raw_amount(token0(), 10).unwrap();
        let b = CurrencyAmount::from_raw_amount(crate::test_utils::token1(), 5).unwrap();
        assert_eq!(a.try_add(&b), Err(CurrencyError::CurrencyMismatch));
        assert_eq!(a.try_sub(&b), Err(CurrencyError::CurrencyMismatch));

        let c = CurrencyAmount::from_raw_amount(token0(), 4).unwrap();
        assert_eq!(a.try_add(&c).unwrap().quotient(), BigInt::from(14));
        assert_eq!(a.try_sub(&c).unwrap().quotient(), BigInt::from(6));
    }

    #[test]
    fn divide_by_zero_fraction_fails() {
        let a = CurrencyAmount::from_raw_amount(token0(), 10).unwrap();
        let zero = Fraction::from_integer(0);
        assert_eq!(
            a.divide(&zero),
            Err(Error::MathError(MathError::DivisionByZero))
        );
        let half = Fraction::new(1, 2).unwrap();
        assert_eq!(a.divide(&half).unwrap().quotient(), BigInt::from(20));
    }
}
