use crate::constants::U256_1;
use crate::error::{Error, TickError};
use crate::hash::FastMap;
use crate::math::bit_math::{least_significant_bit, most_significant_bit};
use alloy_primitives::U256;

/// Maps a compressed tick to its `(word, bit)` coordinates in the bitmap.
pub fn position(compressed: i32) -> (i16, u8) {
    ((compressed >> 8) as i16, compressed.rem_euclid(256) as u8)
}

/// Returns the bitmap word stored at `word`, or zero if absent.
pub fn get_word(bitmap: &FastMap<i16, U256>, word: i16) -> U256 {
    bitmap.get(&word).copied().unwrap_or_default()
}

/// Toggles the initialized bit of `tick`, which must be a multiple of
/// `tick_spacing`.
pub fn flip_tick(
    tick_bitmap: &mut FastMap<i16, U256>,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), TickError> {
    if tick_spacing <= 0 {
        return Err(TickError::ZeroTickSpacing);
    }
    if tick % tick_spacing != 0 {
        return Err(TickError::InvalidTickSpacing);
    }

    let (word_pos, bit_pos) = position(tick / tick_spacing);
    let mask = U256_1 << bit_pos;
    let word = tick_bitmap.entry(word_pos).or_default();
    *word ^= mask;
    if word.is_zero() {
        tick_bitmap.remove(&word_pos);
    }
    Ok(())
}

/// Searches the bitmap word containing `tick` for the next initialized tick
/// at or to the left (`lte`) or strictly to the right of it.
///
/// Returns the tick found, or the word boundary in the search direction
/// with `false` when the word holds none.
pub fn next_initialized_tick_within_one_word(
    bitmap: &FastMap<i16, U256>,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> Result<(i32, bool), Error> {
    if tick_spacing <= 0 {
        return Err(TickError::ZeroTickSpacing.into());
    }
    // round towards negative infinity
    let compressed = tick.div_euclid(tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);
        // bits at or below bit_pos
        let mask = U256::MAX >> (255 - bit_pos);
        let masked = get_word(bitmap, word_pos) & mask;

        if masked.is_zero() {
            return Ok(((compressed - i32::from(bit_pos)) * tick_spacing, false));
        }
        let distance = i32::from(bit_pos - most_significant_bit(masked)?);
        Ok(((compressed - distance) * tick_spacing, true))
    } else {
        let (word_pos, bit_pos) = position(compressed + 1);
        // bits at or above bit_pos
        let mask = U256::MAX << bit_pos;
        let masked = get_word(bitmap, word_pos) & mask;

        if masked.is_zero() {
            return Ok(((compressed + 1 + i32::from(255 - bit_pos)) * tick_spacing, false));
        }
        let distance = i32::from(least_significant_bit(masked)? - bit_pos);
        Ok(((compressed + 1 + distance) * tick_spacing, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(ticks: &[i32], tick_spacing: i32) -> FastMap<i16, U256> {
        let mut bitmap = FastMap::default();
        for &tick in ticks {
            flip_tick(&mut bitmap, tick, tick_spacing).unwrap();
        }
        bitmap
    }

    fn sample() -> FastMap<i16, U256> {
        bitmap(&[-200, -55, -4, 70, 78, 84, 139, 240, 535], 1)
    }

    #[test]
    fn position_splits_word_and_bit() {
        let cases = [
            (0, (0, 0)),
            (1, (0, 1)),
            (255, (0, 255)),
            (256, (1, 0)),
            (300, (1, 44)),
            (-1, (-1, 255)),
            (-256, (-1, 0)),
            (-257, (-2, 255)),
        ];
        for (compressed, expected) in cases {
            assert_eq!(position(compressed), expected, "compressed {compressed}");
        }
    }

    #[test]
    fn flipping_twice_clears_the_word() {
        let mut map = FastMap::default();
        let (word, bit) = position(78);

        flip_tick(&mut map, 78, 1).unwrap();
        assert_eq!(get_word(&map, word), U256_1 << bit);

        flip_tick(&mut map, 78, 1).unwrap();
        assert_eq!(get_word(&map, word), U256::ZERO);
        assert!(map.is_empty());
    }

    #[test]
    fn flip_validates_spacing() {
        let mut map = FastMap::default();
        assert_eq!(flip_tick(&mut map, 61, 60), Err(TickError::InvalidTickSpacing));
        assert_eq!(flip_tick(&mut map, 60, 0), Err(TickError::ZeroTickSpacing));
        assert_eq!(
            next_initialized_tick_within_one_word(&map, 0, 0, true),
            Err(TickError::ZeroTickSpacing.into())
        );
    }

    #[test]
    fn searching_right() {
        let map = sample();
        // (from, expected, initialized)
        let cases = [
            (78, 84, true),
            (77, 78, true),
            (-56, -55, true),
            (-5, -4, true),
            (255, 511, false),
            (383, 511, false),
            (536, 767, false),
        ];
        for (from, expected, initialized) in cases {
            assert_eq!(
                next_initialized_tick_within_one_word(&map, from, 1, false),
                Ok((expected, initialized)),
                "from {from}"
            );
        }

        let mut map = map;
        flip_tick(&mut map, 340, 1).unwrap();
        assert_eq!(
            next_initialized_tick_within_one_word(&map, 328, 1, false),
            Ok((340, true))
        );
    }

    #[test]
    fn searching_left() {
        let map = sample();
        let cases = [
            (78, 78, true),
            (79, 78, true),
            (-55, -55, true),
            (258, 256, false),
            (256, 256, false),
            (72, 70, true),
            (-257, -512, false),
            (1023, 768, false),
        ];
        for (from, expected, initialized) in cases {
            assert_eq!(
                next_initialized_tick_within_one_word(&map, from, 1, true),
                Ok((expected, initialized)),
                "from {from}"
            );
        }
    }

    #[test]
    fn spaced_ticks_compress_toward_negative_infinity() {
        let map = bitmap(&[-120], 60);
        assert_eq!(
            next_initialized_tick_within_one_word(&map, -61, 60, true),
            Ok((-120, true))
        );
        assert_eq!(
            next_initialized_tick_within_one_word(&map, -180, 60, false),
            Ok((-120, true))
        );
    }
}
