use crate::constants::Q192;
use crate::entities::{CurrencyAmount, Fraction, Token};
use crate::error::{CurrencyError, Error, MathError};
use crate::math::encode_sqrt_ratio::encode_sqrt_ratio_x96;
use crate::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};
use crate::math::u256_num::u256_to_bigint;
use num_bigint::BigInt;
use num_traits::Pow;

/// How many `quote` tokens one `base` token is worth, in raw units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Price {
    base_currency: Token,
    quote_currency: Token,
    fraction: Fraction,
    // converts raw units to whole-token units
    scalar: Fraction,
}

impl Price {
    /// Argument order follows the ratio `numerator / denominator` being
    /// quote per base.
    pub fn new(
        base_currency: Token,
        quote_currency: Token,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Result<Self, MathError> {
        let fraction = Fraction::new(numerator, denominator)?;
        let scalar = Fraction::new(
            BigInt::from(10).pow(u32::from(base_currency.decimals)),
            BigInt::from(10).pow(u32::from(quote_currency.decimals)),
        )?;
        Ok(Self {
            base_currency,
            quote_currency,
            fraction,
            scalar,
        })
    }

    /// The price implied by trading `base_amount` for `quote_amount`.
    pub fn from_amounts(
        base_amount: &CurrencyAmount,
        quote_amount: &CurrencyAmount,
    ) -> Result<Self, MathError> {
        let ratio = quote_amount.as_fraction().checked_div(base_amount.as_fraction())?;
        Price::new(
            base_amount.currency().clone(),
            quote_amount.currency().clone(),
            ratio.denominator().clone(),
            ratio.numerator().clone(),
        )
    }

    #[inline]
    pub fn base_currency(&self) -> &Token {
        &self.base_currency
    }

    #[inline]
    pub fn quote_currency(&self) -> &Token {
        &self.quote_currency
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

    pub fn invert(&self) -> Result<Price, MathError> {
        Price::new(
            self.quote_currency.clone(),
            self.base_currency.clone(),
            self.numerator().clone(),
            self.denominator().clone(),
        )
    }

    /// Chains `self` (A -> B) with `other` (B -> C) into A -> C.
    pub fn multiply(&self, other: &Price) -> Result<Price, Error> {
        if self.quote_currency != other.base_currency {
            return Err(CurrencyError::CurrencyMismatch.into());
        }
        let fraction = &self.fraction * &other.fraction;
        Ok(Price::new(
            self.base_currency.clone(),
            other.quote_currency.clone(),
            fraction.denominator().clone(),
            fraction.numerator().clone(),
        )?)
    }

    /// Converts an amount of the base currency into the quote currency.
    pub fn quote(&self, currency_amount: &CurrencyAmount) -> Result<CurrencyAmount, Error> {
        if currency_amount.currency() != &self.base_currency {
            return Err(CurrencyError::CurrencyMismatch.into());
        }
        let result = &self.fraction * currency_amount.as_fraction();
        CurrencyAmount::from_fractional_amount(
            self.quote_currency.clone(),
            result.numerator().clone(),
            result.denominator().clone(),
        )
    }

    /// Price in whole tokens rather than raw units.
    pub fn adjusted_for_decimals(&self) -> Fraction {
        &self.fraction * &self.scalar
    }
}

/// The price of `base_token` in `quote_token` at `tick`.
pub fn tick_to_price(base_token: Token, quote_token: Token, tick: i32) -> Result<Price, Error> {
    let sqrt_ratio_x96 = u256_to_bigint(get_sqrt_ratio_at_tick(tick)?);
    let ratio_x192 = &sqrt_ratio_x96 * &sqrt_ratio_x96;
    let q192 = u256_to_bigint(Q192);

    let price = if base_token.sorts_before(&quote_token)? {
        Price::new(base_token, quote_token, q192, ratio_x192)?
    } else {
        Price::new(base_token, quote_token, ratio_x192, q192)?
    };
    Ok(price)
}

/// The greatest tick whose price does not exceed `price`, compared in the
/// direction of the pool's token order.
pub fn price_to_closest_tick(price: &Price) -> Result<i32, Error> {
    let sorted = price.base_currency.sorts_before(&price.quote_currency)?;

    let sqrt_ratio_x96 = if sorted {
        encode_sqrt_ratio_x96(price.numerator().clone(), price.denominator().clone())?
    } else {
        encode_sqrt_ratio_x96(price.denominator().clone(), price.numerator().clone())?
    };

    let tick = get_tick_at_sqrt_ratio(sqrt_ratio_x96)?;
    let next_tick_price = tick_to_price(
        price.base_currency.clone(),
        price.quote_currency.clone(),
        tick + 1,
    )?;

    let reached_next = if sorted {
        price.as_fraction() >= next_tick_price.as_fraction()
    } else {
        price.as_fraction() <= next_tick_price.as_fraction()
    };
    Ok(if reached_next { tick + 1 } else { tick })
}
