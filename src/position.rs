//! Liquidity positions over a tick range and their token amounts.

use crate::constants::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, U256_1};
use crate::entities::{CurrencyAmount, Fraction, Percent, Price, tick_to_price};
use crate::error::{Error, PositionError, TradeError};
use crate::math::encode_sqrt_ratio::encode_sqrt_ratio_x96_big;
use crate::math::max_liquidity::max_liquidity_for_amounts;
use crate::math::sqrt_price_math::{get_amount_0_delta_base, get_amount_1_delta_base};
use crate::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};
use crate::math::u256_num::{bigint_to_u256, u256_to_bigint};
use crate::pool::Pool;
use crate::tick::NoTickDataProvider;
use alloy_primitives::U256;
use num_traits::ToPrimitive;
use std::sync::Arc;

/// Token amounts owed to or by a position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MintAmounts {
    pub amount0: U256,
    pub amount1: U256,
}

/// Liquidity provided over `[tick_lower, tick_upper)` in a pool.
#[derive(Clone, Debug)]
pub struct Position {
    pool: Pool,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
}

impl Position {
    pub fn new(
        pool: Pool,
        liquidity: u128,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<Self, PositionError> {
        if tick_lower >= tick_upper {
            return Err(PositionError::TickOrder);
        }
        let tick_spacing = pool.tick_spacing();
        if tick_lower < MIN_TICK || tick_lower % tick_spacing != 0 {
            return Err(PositionError::TickLower);
        }
        if tick_upper > MAX_TICK || tick_upper % tick_spacing != 0 {
            return Err(PositionError::TickUpper);
        }
        Ok(Self {
            pool,
            tick_lower,
            tick_upper,
            liquidity,
        })
    }

    #[inline]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    #[inline]
    pub fn tick_lower(&self) -> i32 {
        self.tick_lower
    }

    #[inline]
    pub fn tick_upper(&self) -> i32 {
        self.tick_upper
    }

    #[inline]
    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    /// Price of token0 at the lower tick.
    pub fn token0_price_lower(&self) -> Result<Price, Error> {
        tick_to_price(
            self.pool.token0().clone(),
            self.pool.token1().clone(),
            self.tick_lower,
        )
    }

    /// Price of token0 at the upper tick.
    pub fn token0_price_upper(&self) -> Result<Price, Error> {
        tick_to_price(
            self.pool.token0().clone(),
            self.pool.token1().clone(),
            self.tick_upper,
        )
    }

    #[inline]
    fn sqrt_ratios(&self) -> Result<(U256, U256), Error> {
        Ok((
            get_sqrt_ratio_at_tick(self.tick_lower)?,
            get_sqrt_ratio_at_tick(self.tick_upper)?,
        ))
    }

    /// Both token amounts at the current pool price, rounded up when
    /// `round_up` is set.
    fn amounts(&self, round_up: bool) -> Result<MintAmounts, Error> {
        let (sqrt_lower, sqrt_upper) = self.sqrt_ratios()?;
        let tick_current = self.pool.tick_current();

        Ok(if tick_current < self.tick_lower {
            MintAmounts {
                amount0: get_amount_0_delta_base(sqrt_lower, sqrt_upper, self.liquidity, round_up)?,
                amount1: U256::ZERO,
            }
        } else if tick_current < self.tick_upper {
            let sqrt_current = self.pool.sqrt_ratio_x96();
            MintAmounts {
                amount0: get_amount_0_delta_base(
                    sqrt_current,
                    sqrt_upper,
                    self.liquidity,
                    round_up,
                )?,
                amount1: get_amount_1_delta_base(
                    sqrt_lower,
                    sqrt_current,
                    self.liquidity,
                    round_up,
                )?,
            }
        } else {
            MintAmounts {
                amount0: U256::ZERO,
                amount1: get_amount_1_delta_base(sqrt_lower, sqrt_upper, self.liquidity, round_up)?,
            }
        })
    }

    /// Amount of token0 the position is worth at the current price.
    pub fn amount0(&self) -> Result<CurrencyAmount, Error> {
        let amount0 = self.amounts(false)?.amount0;
        Ok(CurrencyAmount::from_raw_amount(
            self.pool.token0().clone(),
            u256_to_bigint(amount0),
        )?)
    }

    /// Amount of token1 the position is worth at the current price.
    pub fn amount1(&self) -> Result<CurrencyAmount, Error> {
        let amount1 = self.amounts(false)?.amount1;
        Ok(CurrencyAmount::from_raw_amount(
            self.pool.token1().clone(),
            u256_to_bigint(amount1),
        )?)
    }

    /// Token amounts needed to mint this position's liquidity at the
    /// current price, rounded up.
    pub fn mint_amounts(&self) -> Result<MintAmounts, Error> {
        self.amounts(true)
    }

    /// Sqrt prices bounding `token0_price * (1 ± slippage_tolerance)`,
    /// clamped strictly inside the global price range. Returned as
    /// `(lower, upper)`.
    pub fn ratios_after_slippage(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<(U256, U256), Error> {
        if slippage_tolerance.is_negative() {
            return Err(TradeError::InvalidSlippageTolerance.into());
        }

        let one = Fraction::from_integer(1);
        let price = self.pool.token0_price().as_fraction();
        let tolerance = slippage_tolerance.as_fraction();
        let price_lower = price * &(&one - tolerance);
        let price_upper = price * &(tolerance + &one);

        let min_sqrt = u256_to_bigint(MIN_SQRT_RATIO);
        let sqrt_lower = if price_lower.is_negative() {
            MIN_SQRT_RATIO + U256_1
        } else {
            let sqrt =
                encode_sqrt_ratio_x96_big(price_lower.numerator(), price_lower.denominator())?;
            if sqrt <= min_sqrt {
                MIN_SQRT_RATIO + U256_1
            } else {
                bigint_to_u256(&sqrt)?
            }
        };

        let max_sqrt = u256_to_bigint(MAX_SQRT_RATIO);
        let sqrt = encode_sqrt_ratio_x96_big(price_upper.numerator(), price_upper.denominator())?;
        let sqrt_upper = if sqrt >= max_sqrt {
            MAX_SQRT_RATIO - U256_1
        } else {
            bigint_to_u256(&sqrt)?
        };

        Ok((sqrt_lower, sqrt_upper))
    }

    /// An empty copy of the pool moved to `sqrt_ratio_x96`.
    fn counterfactual_pool(&self, sqrt_ratio_x96: U256) -> Result<Pool, Error> {
        Pool::with_tick_spacing(
            self.pool.token0().clone(),
            self.pool.token1().clone(),
            self.pool.fee(),
            self.pool.tick_spacing(),
            sqrt_ratio_x96,
            0,
            get_tick_at_sqrt_ratio(sqrt_ratio_x96)?,
            Arc::new(NoTickDataProvider),
        )
    }

    fn at_price(&self, sqrt_ratio_x96: U256, liquidity: u128) -> Result<Position, Error> {
        Ok(Position::new(
            self.counterfactual_pool(sqrt_ratio_x96)?,
            liquidity,
            self.tick_lower,
            self.tick_upper,
        )?)
    }

    /// Maximum amounts to supply when minting, such that the mint still
    /// succeeds anywhere within the slippage band. Token0 is bounded by the
    /// upper price and token1 by the lower one.
    pub fn mint_amounts_with_slippage(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<MintAmounts, Error> {
        let (sqrt_lower, sqrt_upper) = self.ratios_after_slippage(slippage_tolerance)?;

        // the liquidity actually minted for these amounts
        let MintAmounts { amount0, amount1 } = self.mint_amounts()?;
        let minted = Position::from_amounts(
            self.pool.clone(),
            self.tick_lower,
            self.tick_upper,
            amount0,
            amount1,
            false,
        )?;

        Ok(MintAmounts {
            amount0: self.at_price(sqrt_upper, minted.liquidity)?.mint_amounts()?.amount0,
            amount1: self.at_price(sqrt_lower, minted.liquidity)?.mint_amounts()?.amount1,
        })
    }

    /// Minimum amounts to expect when burning the whole position anywhere
    /// within the slippage band.
    pub fn burn_amounts_with_slippage(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<MintAmounts, Error> {
        let (sqrt_lower, sqrt_upper) = self.ratios_after_slippage(slippage_tolerance)?;

        Ok(MintAmounts {
            amount0: self.at_price(sqrt_upper, self.liquidity)?.amounts(false)?.amount0,
            amount1: self.at_price(sqrt_lower, self.liquidity)?.amounts(false)?.amount1,
        })
    }

    /// The largest position the two budgets can fund at the pool's current
    /// price. Pass `U256::MAX` for a budget that should not constrain.
    ///
    /// `use_full_precision` selects the exact token0 formula; `false`
    /// reproduces the rounding of the periphery contracts.
    pub fn from_amounts(
        pool: Pool,
        tick_lower: i32,
        tick_upper: i32,
        amount0: U256,
        amount1: U256,
        use_full_precision: bool,
    ) -> Result<Self, Error> {
        let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
        let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;
        let liquidity = max_liquidity_for_amounts(
            pool.sqrt_ratio_x96(),
            sqrt_lower,
            sqrt_upper,
            amount0,
            amount1,
            use_full_precision,
        )?
        .to_u128()
        .ok_or(PositionError::LiquidityOverflow)?;

        Ok(Position::new(pool, liquidity, tick_lower, tick_upper)?)
    }

    /// The largest position `amount0` can fund, with token1 unconstrained.
    pub fn from_amount0(
        pool: Pool,
        tick_lower: i32,
        tick_upper: i32,
        amount0: U256,
        use_full_precision: bool,
    ) -> Result<Self, Error> {
        Self::from_amounts(
            pool,
            tick_lower,
            tick_upper,
            amount0,
            U256::MAX,
            use_full_precision,
        )
    }

    /// The largest position `amount1` can fund, with token0 unconstrained.
    pub fn from_amount1(
        pool: Pool,
        tick_lower: i32,
        tick_upper: i32,
        amount1: U256,
    ) -> Result<Self, Error> {
        // token1 liquidity has no precision choice
        Self::from_amounts(pool, tick_lower, tick_upper, U256::MAX, amount1, true)
    }
}
