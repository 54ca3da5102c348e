#![allow(dead_code)]

use criterion::{Criterion, black_box};
use std::sync::Arc;
use univ3_sdk::constants::{FeeAmount, MAX_TICK, MIN_TICK};
use univ3_sdk::entities::{CurrencyAmount, Token};
use univ3_sdk::math::{
    bit_math, encode_sqrt_ratio::encode_sqrt_ratio_x96, math_helpers, sqrt_price_math, swap_math,
    tick_bitmap, tick_math,
};
use univ3_sdk::tick::{Tick, TickListDataProvider};
use univ3_sdk::trade::{BestTradeOptions, Route};
use univ3_sdk::{Address, FastMap, I256, Pool, Position, Trade, U256};

const LIQUIDITY: u128 = 1_000_000_000_000_000_000;

fn token(last_byte: u8) -> Token {
    let mut bytes = [0u8; 20];
    bytes[19] = last_byte;
    Token::new(1, Address::from(bytes), 18, None, None)
}

fn full_range_pool(a: u8, b: u8, amount1: u128, amount0: u128) -> Pool {
    let fee = FeeAmount::Medium;
    let spacing = fee.tick_spacing();
    let sqrt_ratio_x96 = encode_sqrt_ratio_x96(amount1, amount0).unwrap();
    let ticks = vec![
        Tick::new(
            tick_math::nearest_usable_tick(MIN_TICK, spacing).unwrap(),
            LIQUIDITY,
            LIQUIDITY as i128,
        ),
        Tick::new(
            tick_math::nearest_usable_tick(MAX_TICK, spacing).unwrap(),
            LIQUIDITY,
            -(LIQUIDITY as i128),
        ),
    ];
    Pool::new(
        token(a),
        token(b),
        fee,
        sqrt_ratio_x96,
        LIQUIDITY,
        tick_math::get_tick_at_sqrt_ratio(sqrt_ratio_x96).unwrap(),
        Arc::new(TickListDataProvider::new(ticks, spacing).unwrap()),
    )
    .unwrap()
}

pub fn bench_tick_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_math");

    group.bench_function("get_sqrt_ratio_at_tick", |b| {
        b.iter(|| {
            for tick in [-887_272, -100_000, -1, 0, 1, 100_000, 887_272] {
                black_box(tick_math::get_sqrt_ratio_at_tick(black_box(tick)).unwrap());
            }
        })
    });

    let ratios: Vec<U256> = [-500_000, -1_000, 0, 1_000, 500_000]
        .into_iter()
        .map(|tick| tick_math::get_sqrt_ratio_at_tick(tick).unwrap())
        .collect();
    group.bench_function("get_tick_at_sqrt_ratio", |b| {
        b.iter(|| {
            for ratio in &ratios {
                black_box(tick_math::get_tick_at_sqrt_ratio(black_box(*ratio)).unwrap());
            }
        })
    });

    group.finish();
}

pub fn bench_sqrt_price_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("sqrt_price_math");
    let sqrt_a = tick_math::get_sqrt_ratio_at_tick(-600).unwrap();
    let sqrt_b = tick_math::get_sqrt_ratio_at_tick(600).unwrap();
    let amount = U256::from(1_000_000_000_000_000u128);

    group.bench_function("get_amount_0_delta", |b| {
        b.iter(|| {
            sqrt_price_math::get_amount_0_delta_base(
                black_box(sqrt_a),
                black_box(sqrt_b),
                black_box(LIQUIDITY),
                true,
            )
            .unwrap()
        })
    });

    group.bench_function("get_amount_1_delta", |b| {
        b.iter(|| {
            sqrt_price_math::get_amount_1_delta_base(
                black_box(sqrt_a),
                black_box(sqrt_b),
                black_box(LIQUIDITY),
                true,
            )
            .unwrap()
        })
    });

    group.bench_function("get_next_sqrt_price_from_input", |b| {
        b.iter(|| {
            sqrt_price_math::get_next_sqrt_price_from_input(
                black_box(sqrt_b),
                black_box(LIQUIDITY),
                black_box(amount),
                true,
            )
            .unwrap()
        })
    });

    group.bench_function("get_next_sqrt_price_from_output", |b| {
        b.iter(|| {
            sqrt_price_math::get_next_sqrt_price_from_output(
                black_box(sqrt_b),
                black_box(LIQUIDITY),
                black_box(amount),
                true,
            )
            .unwrap()
        })
    });

    group.finish();
}

pub fn bench_swap_math(c: &mut Criterion) {
    let current = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
    let target = tick_math::get_sqrt_ratio_at_tick(-60).unwrap();
    let exact_in = I256::try_from(1_000_000_000_000_000i64).unwrap();
    let exact_out = -exact_in;

    let mut group = c.benchmark_group("swap_math");
    group.bench_function("compute_swap_step_exact_in", |b| {
        b.iter(|| {
            swap_math::compute_swap_step(
                black_box(current),
                black_box(target),
                black_box(LIQUIDITY),
                black_box(exact_in),
                3000,
            )
            .unwrap()
        })
    });
    group.bench_function("compute_swap_step_exact_out", |b| {
        b.iter(|| {
            swap_math::compute_swap_step(
                black_box(current),
                black_box(target),
                black_box(LIQUIDITY),
                black_box(exact_out),
                3000,
            )
            .unwrap()
        })
    });
    group.finish();
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let a = U256::from(u128::MAX);
    let b_ = U256::from(u64::MAX);
    let denominator = U256::from(1_000_000_007u64);

    let mut group = c.benchmark_group("math_helpers");
    group.bench_function("mul_div", |b| {
        b.iter(|| math_helpers::mul_div(black_box(a), black_box(b_), black_box(denominator)))
    });
    group.bench_function("mul_div_rounding_up", |b| {
        b.iter(|| {
            math_helpers::mul_div_rounding_up(black_box(a), black_box(b_), black_box(denominator))
        })
    });
    group.finish();
}

pub fn bench_tick_bitmap(c: &mut Criterion) {
    let mut bitmap: FastMap<i16, U256> = FastMap::default();
    for tick in [-8_400, -600, -60, 0, 60, 1_200, 9_000] {
        tick_bitmap::flip_tick(&mut bitmap, tick, 60).unwrap();
    }

    let mut group = c.benchmark_group("tick_bitmap");
    group.bench_function("next_initialized_tick_lte", |b| {
        b.iter(|| {
            tick_bitmap::next_initialized_tick_within_one_word(
                black_box(&bitmap),
                black_box(30),
                60,
                true,
            )
            .unwrap()
        })
    });
    group.bench_function("next_initialized_tick_gt", |b| {
        b.iter(|| {
            tick_bitmap::next_initialized_tick_within_one_word(
                black_box(&bitmap),
                black_box(30),
                60,
                false,
            )
            .unwrap()
        })
    });
    group.finish();
}

pub fn bench_bit_math(c: &mut Criterion) {
    let values = [
        U256::from(1u8),
        U256::from(u64::MAX),
        U256::from(u128::MAX),
        U256::MAX,
    ];

    let mut group = c.benchmark_group("bit_math");
    group.bench_function("most_significant_bit", |b| {
        b.iter(|| {
            for value in &values {
                black_box(bit_math::most_significant_bit(black_box(*value)).unwrap());
            }
        })
    });
    group.bench_function("least_significant_bit", |b| {
        b.iter(|| {
            for value in &values {
                black_box(bit_math::least_significant_bit(black_box(*value)).unwrap());
            }
        })
    });
    group.finish();
}

pub fn bench_pool(c: &mut Criterion) {
    let pool = full_range_pool(1, 2, 1, 1);
    let amount_in = CurrencyAmount::from_raw_amount(token(1), 1_000_000_000_000_000u64).unwrap();
    let amount_out = CurrencyAmount::from_raw_amount(token(2), 1_000_000_000_000_000u64).unwrap();

    let mut group = c.benchmark_group("pool");
    group.bench_function("get_output_amount", |b| {
        b.iter(|| pool.get_output_amount(black_box(&amount_in), None).unwrap())
    });
    group.bench_function("get_input_amount", |b| {
        b.iter(|| pool.get_input_amount(black_box(&amount_out), None).unwrap())
    });
    group.finish();
}

pub fn bench_trade(c: &mut Criterion) {
    let pools = vec![
        full_range_pool(1, 2, 1, 1),
        full_range_pool(1, 3, 11, 10),
        full_range_pool(2, 3, 10, 12),
        full_range_pool(1, 4, 9, 10),
        full_range_pool(2, 4, 13, 12),
    ];
    let amount_in = CurrencyAmount::from_raw_amount(token(1), 1_000_000_000_000u64).unwrap();
    let route = Route::new(vec![pools[0].clone(), pools[2].clone()], token(1), token(3)).unwrap();

    let mut group = c.benchmark_group("trade");
    group.bench_function("exact_in_two_hops", |b| {
        b.iter(|| Trade::exact_in(route.clone(), black_box(amount_in.clone())).unwrap())
    });
    group.bench_function("best_trade_exact_in", |b| {
        b.iter(|| {
            Trade::best_trade_exact_in(
                black_box(&pools),
                black_box(&amount_in),
                &token(3),
                BestTradeOptions::default(),
            )
            .unwrap()
        })
    });
    group.finish();
}

pub fn bench_position(c: &mut Criterion) {
    let pool = full_range_pool(1, 2, 1, 1);
    let budget = U256::from(1_000_000_000_000_000_000u128);
    let position = Position::new(pool.clone(), LIQUIDITY, -600, 600).unwrap();

    let mut group = c.benchmark_group("position");
    group.bench_function("from_amounts", |b| {
        b.iter(|| {
            Position::from_amounts(
                pool.clone(),
                -600,
                600,
                black_box(budget),
                black_box(budget),
                true,
            )
            .unwrap()
        })
    });
    group.bench_function("mint_amounts", |b| {
        b.iter(|| black_box(&position).mint_amounts().unwrap())
    });
    group.finish();
}
