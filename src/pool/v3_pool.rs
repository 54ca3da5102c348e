use crate::constants::{FACTORY_ADDRESS, FEE_MAX, FeeAmount, Q192};
use crate::entities::{CurrencyAmount, Price, Token};
use crate::error::{Error, PoolError, StateError, TickError};
use crate::math::tick_math::get_sqrt_ratio_at_tick;
use crate::math::u256_num::{bigint_to_i256, i256_to_bigint, u256_to_bigint};
use crate::pool::compute_pool_address;
use crate::tick::{Tick, TickDataProvider, TickListDataProvider};
use alloy_primitives::{Address, B256, U256};
use std::sync::Arc;

/// Immutable snapshot of a concentrated-liquidity pool.
///
/// Tokens are stored in canonical address order. A swap never mutates the
/// pool; [`get_output_amount`](Self::get_output_amount) and
/// [`get_input_amount`](Self::get_input_amount) hand back the pool state
/// after the trade instead.
#[derive(Clone, Debug)]
pub struct Pool {
    token0: Token,
    token1: Token,
    fee: u32,
    tick_spacing: i32,
    sqrt_ratio_x96: U256,
    liquidity: u128,
    tick_current: i32,
    tick_data_provider: Arc<dyn TickDataProvider>,
    token0_price: Price,
    token1_price: Price,
}

impl Pool {
    /// Creates a pool on one of the canonical fee tiers.
    pub fn new(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
        tick_data_provider: Arc<dyn TickDataProvider>,
    ) -> Result<Self, Error> {
        Self::with_tick_spacing(
            token_a,
            token_b,
            fee.pips(),
            fee.tick_spacing(),
            sqrt_ratio_x96,
            liquidity,
            tick_current,
            tick_data_provider,
        )
    }

    /// Creates a pool from a fee tier and a list of ticks, validated and
    /// wrapped in a [`TickListDataProvider`].
    pub fn with_ticks(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: Vec<Tick>,
    ) -> Result<Self, Error> {
        let provider = TickListDataProvider::new(ticks, fee.tick_spacing())?;
        Self::new(
            token_a,
            token_b,
            fee,
            sqrt_ratio_x96,
            liquidity,
            tick_current,
            Arc::new(provider),
        )
    }

    /// Creates a pool with an arbitrary fee and tick spacing, for fee tiers
    /// enabled after deployment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_tick_spacing(
        token_a: Token,
        token_b: Token,
        fee: u32,
        tick_spacing: i32,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
        tick_data_provider: Arc<dyn TickDataProvider>,
    ) -> Result<Self, Error> {
        if fee >= FEE_MAX {
            return Err(PoolError::FeeTooHigh.into());
        }
        if tick_spacing <= 0 {
            return Err(TickError::ZeroTickSpacing.into());
        }

        let lower = get_sqrt_ratio_at_tick(tick_current)?;
        let next_tick = tick_current.checked_add(1).ok_or(StateError::InvalidTick)?;
        let upper = get_sqrt_ratio_at_tick(next_tick)?;
        if sqrt_ratio_x96 < lower || sqrt_ratio_x96 > upper {
            return Err(PoolError::InvalidSqrtRatioX96.into());
        }

        let (token0, token1) = if token_a.sorts_before(&token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let ratio_x192 = u256_to_bigint(sqrt_ratio_x96).pow(2);
        let q192 = u256_to_bigint(Q192);
        let token0_price =
            Price::new(token0.clone(), token1.clone(), q192.clone(), ratio_x192.clone())?;
        let token1_price = Price::new(token1.clone(), token0.clone(), ratio_x192, q192)?;

        Ok(Self {
            token0,
            token1,
            fee,
            tick_spacing,
            sqrt_ratio_x96,
            liquidity,
            tick_current,
            tick_data_provider,
            token0_price,
            token1_price,
        })
    }

    #[inline]
    pub fn token0(&self) -> &Token {
        &self.token0
    }

    #[inline]
    pub fn token1(&self) -> &Token {
        &self.token1
    }

    /// Fee in hundredths of a bip.
    #[inline]
    pub fn fee(&self) -> u32 {
        self.fee
    }

    #[inline]
    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    #[inline]
    pub fn sqrt_ratio_x96(&self) -> U256 {
        self.sqrt_ratio_x96
    }

    #[inline]
    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    #[inline]
    pub fn tick_current(&self) -> i32 {
        self.tick_current
    }

    #[inline]
    pub fn tick_data_provider(&self) -> &Arc<dyn TickDataProvider> {
        &self.tick_data_provider
    }

    #[inline]
    pub fn chain_id(&self) -> u64 {
        self.token0.chain_id
    }

    /// Price of token0 in token1.
    #[inline]
    pub fn token0_price(&self) -> &Price {
        &self.token0_price
    }

    /// Price of token1 in token0.
    #[inline]
    pub fn token1_price(&self) -> &Price {
        &self.token1_price
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        token == &self.token0 || token == &self.token1
    }

    /// Price of `token` in terms of the pool's other token.
    pub fn price_of(&self, token: &Token) -> Result<&Price, PoolError> {
        if token == &self.token0 {
            Ok(&self.token0_price)
        } else if token == &self.token1 {
            Ok(&self.token1_price)
        } else {
            Err(PoolError::TokenNotInvolved)
        }
    }

    /// CREATE2 address of this pool under the canonical factory.
    pub fn address(&self, init_code_hash: Option<B256>) -> Result<Address, Error> {
        Ok(compute_pool_address(
            FACTORY_ADDRESS,
            &self.token0,
            &self.token1,
            self.fee,
            init_code_hash,
        )?)
    }

    /// Simulates selling `input_amount` into the pool.
    ///
    /// Returns the amount of the other token received and the pool as it
    /// would be after the trade.
    pub fn get_output_amount(
        &self,
        input_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<(CurrencyAmount, Pool), Error> {
        if !self.involves_token(input_amount.currency()) {
            return Err(PoolError::TokenNotInvolved.into());
        }

        let zero_for_one = input_amount.currency() == &self.token0;
        let amount_specified = bigint_to_i256(&input_amount.quotient())
            .map_err(|_| PoolError::AmountOutOfRange)?;

        let result = self.swap(zero_for_one, amount_specified, sqrt_price_limit_x96)?;

        let (output_token, output_amount) = if zero_for_one {
            (&self.token1, result.amount1)
        } else {
            (&self.token0, result.amount0)
        };
        let output_amount =
            CurrencyAmount::from_raw_amount(output_token.clone(), -i256_to_bigint(output_amount))?;

        let pool = self.after_swap(result.sqrt_ratio_x96, result.liquidity, result.tick_current)?;
        Ok((output_amount, pool))
    }

    /// Simulates buying exactly `output_amount` from the pool.
    ///
    /// Returns the amount of the other token required and the pool as it
    /// would be after the trade. Fails with
    /// [`StateError::InsufficientReserves`] when the pool cannot deliver the
    /// full amount before reaching the price limit.
    pub fn get_input_amount(
        &self,
        output_amount: &CurrencyAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<(CurrencyAmount, Pool), Error> {
        if !self.involves_token(output_amount.currency()) {
            return Err(PoolError::TokenNotInvolved.into());
        }

        let zero_for_one = output_amount.currency() == &self.token1;
        let requested = bigint_to_i256(&output_amount.quotient())
            .map_err(|_| PoolError::AmountOutOfRange)?;

        let result = self.swap(zero_for_one, -requested, sqrt_price_limit_x96)?;

        let (input_token, input_amount, delivered) = if zero_for_one {
            (&self.token0, result.amount0, result.amount1)
        } else {
            (&self.token1, result.amount1, result.amount0)
        };
        if -delivered != requested {
            return Err(StateError::InsufficientReserves.into());
        }
        let input_amount =
            CurrencyAmount::from_raw_amount(input_token.clone(), i256_to_bigint(input_amount))?;

        let pool = self.after_swap(result.sqrt_ratio_x96, result.liquidity, result.tick_current)?;
        Ok((input_amount, pool))
    }

    fn after_swap(
        &self,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
    ) -> Result<Pool, Error> {
        Pool::with_tick_spacing(
            self.token0.clone(),
            self.token1.clone(),
            self.fee,
            self.tick_spacing,
            sqrt_ratio_x96,
            liquidity,
            tick_current,
            Arc::clone(&self.tick_data_provider),
        )
    }
}
