use crate::error::{Error, StateError, TickError};
use alloy_primitives::{I256, U256};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

/// `log2(sqrt(1.0001))` as Q128.128, used to turn a log2 into a tick.
pub const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
pub const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
pub const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

/// Returns the sqrt price (Q64.96) at a given tick, or
/// `StateError::InvalidTick` if the tick is outside `[MIN_TICK, MAX_TICK]`.
///
/// Each set bit of `|tick|` multiplies in a precomputed Q128
/// `sqrt(1.0001)^-(2^i)` constant; positive ticks invert the product.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(StateError::InvalidTick);
    }

    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    macro_rules! apply_multiplier {
        ($bit:expr, $l0:expr, $l1:expr) => {
            if abs_tick & $bit != 0 {
                ratio = ratio.wrapping_mul(U256::from_limbs([$l0, $l1, 0, 0])) >> 128usize;
            }
        };
    }

    apply_multiplier!(0x2, 6459403834229662010, 18444899583751176498);
    apply_multiplier!(0x4, 17226890335427755468, 18443055278223354162);
    apply_multiplier!(0x8, 2032852871939366096, 18439367220385604838);
    apply_multiplier!(0x10, 14545316742740207172, 18431993317065449817);
    apply_multiplier!(0x20, 5129152022828963008, 18417254355718160513);
    apply_multiplier!(0x40, 4894419605888772193, 18387811781193591352);
    apply_multiplier!(0x80, 1280255884321894483, 18329067761203520168);
    apply_multiplier!(0x100, 15924666964335305636, 18212142134806087854);
    apply_multiplier!(0x200, 8010504389359918676, 17980523815641551639);
    apply_multiplier!(0x400, 10668036004952895731, 17526086738831147013);
    apply_multiplier!(0x800, 4878133418470705625, 16651378430235024244);
    apply_multiplier!(0x1000, 9537173718739605541, 15030750278693429944);
    apply_multiplier!(0x2000, 9972618978014552549, 12247334978882834399);
    apply_multiplier!(0x4000, 10428997489610666743, 8131365268884726200);
    apply_multiplier!(0x8000, 9305304367709015974, 3584323654723342297);
    apply_multiplier!(0x10000, 14301143598189091785, 696457651847595233);
    apply_multiplier!(0x20000, 7393154844743099908, 26294789957452057);
    apply_multiplier!(0x40000, 2209338891292245656, 37481735321082);
    apply_multiplier!(0x80000, 10518117631919034274, 76158723);

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128 -> Q96, rounding up so tick_at_sqrt_ratio stays consistent
    let lower_32_bits = ratio.as_limbs()[0] & 0xFFFF_FFFF;
    Ok((ratio >> 32usize) + U256::from((lower_32_bits != 0) as u64))
}

const MASK_128: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0, 0]);
const MASK_64: U256 = U256::from_limbs([u64::MAX, 0, 0, 0]);
const MASK_32: U256 = U256::from_limbs([u32::MAX as u64, 0, 0, 0]);
const MASK_16: U256 = U256::from_limbs([u16::MAX as u64, 0, 0, 0]);

#[inline(always)]
fn compute_msb(mut r: U256) -> u32 {
    let mut msb: u32 = 0;

    macro_rules! msb_step {
        ($mask:expr, $shift:expr) => {
            if r > $mask {
                msb |= $shift;
                r >>= $shift as usize;
            }
        };
    }

    msb_step!(MASK_128, 128);
    msb_step!(MASK_64, 64);
    msb_step!(MASK_32, 32);
    msb_step!(MASK_16, 16);
    msb_step!(U256::from(0xFFu64), 8);
    msb_step!(U256::from(0xFu64), 4);
    msb_step!(U256::from(0x3u64), 2);
    if r > U256::ONE {
        msb |= 1;
    }

    msb
}

/// Returns the greatest tick whose sqrt ratio is at most `sqrt_price_x96`.
///
/// Fails with `StateError::InvalidSqrtRatio` outside
/// `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U256) -> Result<i32, StateError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(StateError::InvalidSqrtRatio);
    }

    let ratio = sqrt_price_x96 << 32usize;
    let msb = compute_msb(ratio);

    let mut r = if msb >= 128 {
        ratio >> (msb - 127) as usize
    } else {
        ratio << (127 - msb) as usize
    };

    let mut log_2: I256 =
        (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u64))) << 64usize;

    macro_rules! log2_step {
        ($shift:expr) => {{
            r = r.wrapping_mul(r) >> 127usize;
            let f = r >> 128usize;
            log_2 |= I256::from_raw(f << ($shift as usize));
            r >>= f.as_limbs()[0] as usize;
        }};
    }

    log2_step!(63);
    log2_step!(62);
    log2_step!(61);
    log2_step!(60);
    log2_step!(59);
    log2_step!(58);
    log2_step!(57);
    log2_step!(56);
    log2_step!(55);
    log2_step!(54);
    log2_step!(53);
    log2_step!(52);
    log2_step!(51);
    log2_step!(50);

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    let tick_low = (log_sqrt10001 - TICK_LOW).asr(128).low_i32();
    let tick_high = (log_sqrt10001 + TICK_HIGH).asr(128).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x96 {
        tick_high
    } else {
        tick_low
    })
}

/// Rounds `tick` to the nearest multiple of `tick_spacing`, half-way
/// cases toward positive infinity, then steps one spacing inward if the
/// result left `[MIN_TICK, MAX_TICK]`.
///
/// Uses exact integer arithmetic: `floor((2 * tick + spacing) / (2 * spacing))`.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, Error> {
    if tick_spacing <= 0 {
        return Err(TickError::ZeroTickSpacing.into());
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(StateError::InvalidTick.into());
    }

    let (tick, spacing) = (i64::from(tick), i64::from(tick_spacing));
    let rounded = (2 * tick + spacing).div_euclid(2 * spacing) * spacing;

    let usable = if rounded < i64::from(MIN_TICK) {
        rounded + spacing
    } else if rounded > i64::from(MAX_TICK) {
        rounded - spacing
    } else {
        rounded
    };
    Ok(usable as i32)
}
