use crate::constants::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK, U256_1};
use crate::error::{Error, MathError, PoolError};
use crate::math::liquidity_math::add_delta;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio};
use crate::pool::Pool;
use alloy_primitives::{I256, U256};
use tracing::{debug, trace};

/// Outcome of [`Pool::swap`].
///
/// Amounts are signed from the pool's point of view: positive is paid into
/// the pool, negative is paid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwapResult {
    pub amount0: I256,
    pub amount1: I256,
    pub sqrt_ratio_x96: U256,
    pub liquidity: u128,
    pub tick_current: i32,
    pub fees_paid: U256,
}

// the top level state of the swap, the results of which are recorded in storage at the end
struct SwapState {
    // the amount remaining to be swapped in/out of the input/output asset
    amount_specified_remaining: I256,
    // the amount already swapped out/in of the output/input asset
    amount_calculated: I256,
    // current sqrt(price)
    sqrt_price_x96: U256,
    // the tick associated with the current price
    tick: i32,
    // the current liquidity in range
    liquidity: u128,
    // accumulated swap fees
    swap_fee: U256,
}

#[derive(Default)]
struct StepComputations {
    // the price at the beginning of the step
    sqrt_price_start_x96: U256,
    // the next tick to swap to from the current tick in the swap direction
    tick_next: i32,
    // whether tickNext is initialized or not
    initialized: bool,
    // sqrt(price) for the next tick (1/0)
    sqrt_price_next_x96: U256,
    // how much is being swapped in this step
    amount_in: U256,
    // how much is being swapped out
    amount_out: U256,
    // how much fee is being paid in
    fee_amount: U256,
}

fn to_signed(x: U256) -> Result<I256, MathError> {
    I256::try_from(x).map_err(|_| MathError::Overflow)
}

impl Pool {
    /// Runs the tick-crossing swap loop against this snapshot.
    ///
    /// `amount_specified` is positive for exact input and negative for exact
    /// output. Without a `sqrt_price_limit_x96` the swap may move the price
    /// all the way to one step inside the global bound. The pool itself is
    /// left untouched.
    pub fn swap(
        &self,
        zero_for_one: bool,
        amount_specified: I256,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<SwapResult, Error> {
        let sqrt_price_limit_x96 = sqrt_price_limit_x96.unwrap_or(if zero_for_one {
            MIN_SQRT_RATIO + U256_1
        } else {
            MAX_SQRT_RATIO - U256_1
        });

        if zero_for_one {
            if sqrt_price_limit_x96 <= MIN_SQRT_RATIO {
                return Err(PoolError::SqrtPriceLimitX96TooLow.into());
            }
            if sqrt_price_limit_x96 >= self.sqrt_ratio_x96() {
                return Err(PoolError::SqrtPriceLimitX96TooHigh.into());
            }
        } else {
            if sqrt_price_limit_x96 >= MAX_SQRT_RATIO {
                return Err(PoolError::SqrtPriceLimitX96TooHigh.into());
            }
            if sqrt_price_limit_x96 <= self.sqrt_ratio_x96() {
                return Err(PoolError::SqrtPriceLimitX96TooLow.into());
            }
        }

        let exact_input = !amount_specified.is_negative();
        let tick_data_provider = self.tick_data_provider();

        let mut state = SwapState {
            amount_specified_remaining: amount_specified,
            amount_calculated: I256::ZERO,
            sqrt_price_x96: self.sqrt_ratio_x96(),
            tick: self.tick_current(),
            liquidity: self.liquidity(),
            swap_fee: U256::ZERO,
        };

        while !state.amount_specified_remaining.is_zero()
            && state.sqrt_price_x96 != sqrt_price_limit_x96
        {
            let mut step = StepComputations {
                sqrt_price_start_x96: state.sqrt_price_x96,
                ..StepComputations::default()
            };

            (step.tick_next, step.initialized) = tick_data_provider
                .next_initialized_tick_within_one_word(
                    state.tick,
                    zero_for_one,
                    self.tick_spacing(),
                )?;

            step.tick_next = step.tick_next.clamp(MIN_TICK, MAX_TICK);

            step.sqrt_price_next_x96 = get_sqrt_ratio_at_tick(step.tick_next)?;

            let sqrt_price_target_x96 = if zero_for_one {
                step.sqrt_price_next_x96.max(sqrt_price_limit_x96)
            } else {
                step.sqrt_price_next_x96.min(sqrt_price_limit_x96)
            };

            (
                state.sqrt_price_x96,
                step.amount_in,
                step.amount_out,
                step.fee_amount,
            ) = compute_swap_step(
                state.sqrt_price_x96,
                sqrt_price_target_x96,
                state.liquidity,
                state.amount_specified_remaining,
                self.fee(),
            )?;

            trace!(
                tick = state.tick,
                tick_next = step.tick_next,
                initialized = step.initialized,
                sqrt_price_x96 = %state.sqrt_price_x96,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                fee_amount = %step.fee_amount,
                "swap step"
            );

            state.swap_fee += step.fee_amount;

            let amount_in_with_fee = to_signed(step.amount_in + step.fee_amount)?;
            let amount_out = to_signed(step.amount_out)?;
            if exact_input {
                state.amount_specified_remaining -= amount_in_with_fee;
                state.amount_calculated -= amount_out;
            } else {
                state.amount_specified_remaining += amount_out;
                state.amount_calculated += amount_in_with_fee;
            }

            if state.sqrt_price_x96 == step.sqrt_price_next_x96 {
                if step.initialized {
                    let liquidity_net =
                        tick_data_provider.get_tick(step.tick_next)?.liquidity_net;
                    let liquidity_net = if zero_for_one {
                        liquidity_net.checked_neg().ok_or(MathError::Overflow)?
                    } else {
                        liquidity_net
                    };
                    state.liquidity = add_delta(state.liquidity, liquidity_net)?;
                    trace!(
                        tick = step.tick_next,
                        liquidity_net,
                        liquidity = state.liquidity,
                        "crossed tick"
                    );
                }
                state.tick = if zero_for_one {
                    step.tick_next - 1
                } else {
                    step.tick_next
                };
            } else if state.sqrt_price_x96 != step.sqrt_price_start_x96 {
                state.tick = get_tick_at_sqrt_ratio(state.sqrt_price_x96)?;
            }
        }

        let (amount0, amount1) = if zero_for_one == exact_input {
            (
                amount_specified - state.amount_specified_remaining,
                state.amount_calculated,
            )
        } else {
            (
                state.amount_calculated,
                amount_specified - state.amount_specified_remaining,
            )
        };

        debug!(
            zero_for_one,
            %amount_specified,
            %amount0,
            %amount1,
            tick = state.tick,
            liquidity = state.liquidity,
            "swap complete"
        );

        Ok(SwapResult {
            amount0,
            amount1,
            sqrt_ratio_x96: state.sqrt_price_x96,
            liquidity: state.liquidity,
            tick_current: state.tick,
            fees_paid: state.swap_fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FastMap;
    use crate::constants::FeeAmount;
    use crate::test_utils::{token0, token1};
    use crate::tick::{Tick, TickBitmapProvider, TickDataProvider};
    use std::str::FromStr;
    use std::sync::Arc;

    fn make_basic_pool(
        sqrt_price_x96: U256,
        tick: i32,
        liquidity: u128,
        ticks: Vec<Tick>,
    ) -> Pool {
        let provider = TickBitmapProvider::from_ticks(ticks, 1).unwrap();
        Pool::with_tick_spacing(
            token0(),
            token1(),
            3000,
            1,
            sqrt_price_x96,
            liquidity,
            tick,
            Arc::new(provider),
        )
        .unwrap()
    }

    // ---------------- Basic validation tests ----------------

    #[test]
    fn zero_amount_is_a_no_op() {
        let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
        let pool = make_basic_pool(sqrt_price, 0, 1_000_000, vec![]);

        let result = pool.swap(true, I256::ZERO, None).unwrap();
        assert_eq!(result.amount0, I256::ZERO);
        assert_eq!(result.amount1, I256::ZERO);
        assert_eq!(result.sqrt_ratio_x96, sqrt_price);
        assert_eq!(result.tick_current, 0);
    }

    #[test]
    fn swap_rejects_sqrt_price_limit_out_of_bounds_zero_for_one() {
        let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
        let pool = make_basic_pool(sqrt_price, 0, 1_000_000, vec![]);
        let amount = I256::try_from(1_000).unwrap();

        // limit >= current price
        assert_eq!(
            pool.swap(true, amount, Some(sqrt_price)),
            Err(Error::PoolError(PoolError::SqrtPriceLimitX96TooHigh))
        );
        // limit <= MIN_SQRT_RATIO
        assert_eq!(
            pool.swap(true, amount, Some(MIN_SQRT_RATIO)),
            Err(Error::PoolError(PoolError::SqrtPriceLimitX96TooLow))
        );
    }

    #[test]
    fn swap_rejects_sqrt_price_limit_out_of_bounds_one_for_zero() {
        let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
        let pool = make_basic_pool(sqrt_price, 0, 1_000_000, vec![]);
        let amount = I256::try_from(1_000).unwrap();

        // limit <= current price
        assert_eq!(
            pool.swap(false, amount, Some(sqrt_price)),
            Err(Error::PoolError(PoolError::SqrtPriceLimitX96TooLow))
        );
        // limit >= MAX_SQRT_RATIO
        assert_eq!(
            pool.swap(false, amount, Some(MAX_SQRT_RATIO)),
            Err(Error::PoolError(PoolError::SqrtPriceLimitX96TooHigh))
        );
    }

    // ---------------- Behavioural / invariants tests ----------------

    #[test]
    fn swap_with_zero_liquidity_moves_price_for_free() {
        let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
        let pool = make_basic_pool(sqrt_price, 0, 0, vec![]);
        let limit = get_sqrt_ratio_at_tick(-10).unwrap();

        let result = pool
            .swap(true, I256::try_from(1_000_000).unwrap(), Some(limit))
            .unwrap();

        assert_eq!(result.amount0, I256::ZERO);
        assert_eq!(result.amount1, I256::ZERO);
        assert_eq!(result.fees_paid, U256::ZERO);
        assert_eq!(result.sqrt_ratio_x96, limit);
        assert_eq!(result.tick_current, -10);
    }

    #[test]
    fn swap_exact_input_one_for_zero_has_expected_signs() {
        let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
        let pool = make_basic_pool(
            sqrt_price,
            0,
            1_000_000,
            vec![Tick::new(MIN_TICK, 1_000_000, 1_000_000)],
        );

        let limit = sqrt_price * U256::from(2u8);
        let amount = I256::try_from(1_000_000_000_000_000_000u128).unwrap();

        let result = pool.swap(false, amount, Some(limit)).unwrap();

        assert!(result.amount1 > I256::ZERO);
        assert!(result.amount0 < I256::ZERO);
        assert!(result.fees_paid > U256::ZERO);
        // the input outweighs the range, so the price stops at the limit
        assert_eq!(result.sqrt_ratio_x96, limit);
    }

    #[test]
    fn crossing_an_initialized_tick_applies_liquidity_net() {
        let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
        let pool = make_basic_pool(
            sqrt_price,
            0,
            3_000,
            vec![
                Tick::new(-20, 1_000, 1_000),
                Tick::new(-10, 2_000, 2_000),
                Tick::new(10, 2_000, -2_000),
                Tick::new(20, 1_000, -1_000),
            ],
        );

        let limit = get_sqrt_ratio_at_tick(-15).unwrap();
        let result = pool.swap(true, I256::MAX, Some(limit)).unwrap();
        // left the [-10, 10) band, only the wide range remains
        assert_eq!(result.liquidity, 1_000);
        assert_eq!(result.tick_current, -15);

        let limit = get_sqrt_ratio_at_tick(25).unwrap();
        let result = pool.swap(false, I256::MAX, Some(limit)).unwrap();
        assert_eq!(result.liquidity, 0);
        assert_eq!(result.tick_current, 25);
    }

    #[test]
    fn exact_output_stops_once_filled() {
        let sqrt_price = get_sqrt_ratio_at_tick(0).unwrap();
        let liquidity = 1_000_000_000_000_000_000u128;
        let pool = make_basic_pool(
            sqrt_price,
            0,
            liquidity,
            vec![
                Tick::new(MIN_TICK, liquidity, liquidity as i128),
                Tick::new(MAX_TICK, liquidity, -(liquidity as i128)),
            ],
        );

        let wanted = I256::try_from(1_000_000).unwrap();
        let result = pool.swap(true, -wanted, None).unwrap();
        assert_eq!(result.amount1, -wanted);
        assert!(result.amount0 > wanted);
    }

    fn build_real_example_pool() -> Pool {
        let mut bitmap: FastMap<i16, U256> = FastMap::default();
        bitmap.insert(
            -15_i16,
            U256::from_str("39614081257132168796771975168").unwrap(),
        );
        bitmap.insert(
            57_i16,
            U256::from_str("50216813883093446110686315385661331328818843555712276103168").unwrap(),
        );

        let ticks = [
            Tick::new(-224700, 203624287356963452704, -203624287356963452704),
            Tick::new(887220, 10358775050768, -10358775050768),
        ];
        let provider = TickBitmapProvider::from_words(60, bitmap, ticks).unwrap();

        Pool::new(
            token0(),
            token1(),
            FeeAmount::Medium,
            U256::from_str("1046706758115479018135889").unwrap(),
            203624297715738503472,
            -224701,
            Arc::new(provider),
        )
        .unwrap()
    }

    #[test]
    fn swap_one_for_zero_fills_within_limit() {
        let pool = build_real_example_pool();
        // the bitmap words flag exactly the two stored ticks
        let provider = pool.tick_data_provider();
        assert_eq!(
            provider.next_initialized_tick_within_one_word(-224701, false, 60),
            Ok((-224700, true))
        );

        // 1.5x the start price, far enough to fill completely
        let limit = pool.sqrt_ratio_x96() * U256::from(15_000u32) / U256::from(10_000u32);
        let result = pool
            .swap(false, I256::try_from(1_098_120).unwrap(), Some(limit))
            .expect("swap should succeed");

        assert_eq!(
            result.amount0,
            -I256::try_from(6_222_896_066_140_743u64).unwrap(),
            "Swap amount0_out does not match expected amountOut"
        );
        assert_eq!(
            result.amount1,
            I256::try_from(1_098_120).unwrap(),
            "Swap amount1_out does not match expected amountUsed"
        );
    }

    #[test]
    fn swap_stops_at_a_tight_limit() {
        let pool = build_real_example_pool();
        let limit = pool.sqrt_ratio_x96() * U256::from(10_050u32) / U256::from(10_000u32);
        let result = pool
            .swap(false, I256::try_from(1_098_120).unwrap(), Some(limit))
            .unwrap();

        assert_eq!(result.sqrt_ratio_x96, limit);
        assert_eq!(result.amount1, I256::try_from(686_326).unwrap());
        assert_eq!(
            result.amount0,
            -I256::try_from(3_900_919_522_440_934u64).unwrap()
        );
    }

    #[test]
    fn returned_state_is_a_valid_pool() {
        let pool = build_real_example_pool();
        let result = pool
            .swap(false, I256::try_from(1_000_000_000_000_000u64).unwrap(), None)
            .unwrap();

        // the price crossed -224700 and lost most of the liquidity
        assert!(result.tick_current >= -224700);
        assert_eq!(result.liquidity, 203624297715738503472 - 203624287356963452704);
        assert!(
            Pool::new(
                token0(),
                token1(),
                FeeAmount::Medium,
                result.sqrt_ratio_x96,
                result.liquidity,
                result.tick_current,
                Arc::clone(pool.tick_data_provider()),
            )
            .is_ok()
        );
    }
}
