use crate::constants::U256_E6;
use crate::error::{Error, MathError};
use crate::math::math_helpers::{mul_div, mul_div_rounding_up};
use crate::math::sqrt_price_math::{
    get_amount_0_delta_base, get_amount_1_delta_base, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use alloy_primitives::{I256, U256};

/// Computes one bounded step of a swap between the current price and a
/// target price.
///
/// `amount_remaining` is positive for exact input and negative for exact
/// output. The direction is implied by the prices: the step is
/// `zero_for_one` when `sqrt_ratio_current_x96 >= sqrt_ratio_target_x96`.
///
/// Returns `(sqrt_ratio_next_x96, amount_in, amount_out, fee_amount)`. The
/// fee is charged on the input leg only.
pub fn compute_swap_step(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_target_x96: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee_pips: u32,
) -> Result<(U256, U256, U256, U256), Error> {
    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let exact_in = !amount_remaining.is_negative();

    let fee = U256::from(fee_pips);
    let fee_complement = U256_E6.checked_sub(fee).ok_or(MathError::Underflow)?;
    let amount_remaining_abs = amount_remaining.unsigned_abs();

    let mut amount_in = U256::ZERO;
    let mut amount_out = U256::ZERO;

    let sqrt_ratio_next_x96 = if exact_in {
        let amount_remaining_less_fee = mul_div(amount_remaining_abs, fee_complement, U256_E6)?;
        amount_in = if zero_for_one {
            get_amount_0_delta_base(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, true)?
        } else {
            get_amount_1_delta_base(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, true)?
        };
        if amount_remaining_less_fee >= amount_in {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_input(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_less_fee,
                zero_for_one,
            )?
        }
    } else {
        amount_out = if zero_for_one {
            get_amount_1_delta_base(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, false)?
        } else {
            get_amount_0_delta_base(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, false)?
        };
        if amount_remaining_abs >= amount_out {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_output(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_abs,
                zero_for_one,
            )?
        }
    };

    let max = sqrt_ratio_target_x96 == sqrt_ratio_next_x96;

    // amounts that reached the target were already computed against it
    if zero_for_one {
        if !(max && exact_in) {
            amount_in =
                get_amount_0_delta_base(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, true)?;
        }
        if !(max && !exact_in) {
            amount_out =
                get_amount_1_delta_base(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, false)?;
        }
    } else {
        if !(max && exact_in) {
            amount_in =
                get_amount_1_delta_base(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, true)?;
        }
        if !(max && !exact_in) {
            amount_out =
                get_amount_0_delta_base(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, false)?;
        }
    }

    if !exact_in && amount_out > amount_remaining_abs {
        amount_out = amount_remaining_abs;
    }

    let fee_amount = if exact_in && sqrt_ratio_next_x96 != sqrt_ratio_target_x96 {
        // the remainder of the input is all fee
        amount_remaining_abs - amount_in
    } else {
        mul_div_rounding_up(amount_in, fee, fee_complement)?
    };

    Ok((sqrt_ratio_next_x96, amount_in, amount_out, fee_amount))
}
