use crate::error::{Error, TickError};
use crate::tick::{Tick, TickDataProvider};

/// Checks that `ticks` describes a consistent snapshot: positive spacing,
/// every index on the spacing grid, net liquidity summing to zero, and
/// indices in non-decreasing order. Fails on the first violation.
pub fn validate_list(ticks: &[Tick], tick_spacing: i32) -> Result<(), TickError> {
    if tick_spacing <= 0 {
        return Err(TickError::ZeroTickSpacing);
    }
    if ticks.iter().any(|tick| tick.index % tick_spacing != 0) {
        return Err(TickError::InvalidTickSpacing);
    }

    let net = ticks
        .iter()
        .try_fold(0i128, |acc, tick| acc.checked_add(tick.liquidity_net));
    if net != Some(0) {
        return Err(TickError::ZeroNet);
    }

    if ticks.windows(2).any(|pair| pair[0].index > pair[1].index) {
        return Err(TickError::Sorted);
    }
    Ok(())
}

/// Reference tick provider over a validated, ascending list of ticks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickListDataProvider {
    ticks: Vec<Tick>,
}

impl TickListDataProvider {
    pub fn new(ticks: Vec<Tick>, tick_spacing: i32) -> Result<Self, TickError> {
        validate_list(&ticks, tick_spacing)?;
        Ok(Self { ticks })
    }

    #[inline]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Also true for an empty list.
    #[inline]
    pub fn is_below_smallest(&self, tick: i32) -> bool {
        self.ticks.first().is_none_or(|first| tick < first.index)
    }

    /// Also true for an empty list.
    #[inline]
    pub fn is_at_or_above_largest(&self, tick: i32) -> bool {
        self.ticks.last().is_none_or(|last| tick >= last.index)
    }

    /// Position of the largest tick with index <= `tick`. Callers must rule
    /// out `is_below_smallest` first.
    #[inline]
    fn binary_search_by_tick(&self, tick: i32) -> usize {
        self.ticks.partition_point(|t| t.index <= tick) - 1
    }

    /// The nearest tick at or below (`lte`) or strictly above `tick`.
    pub fn next_initialized_tick(&self, tick: i32, lte: bool) -> Result<Tick, TickError> {
        if lte {
            if self.is_below_smallest(tick) {
                return Err(TickError::BelowSmallest);
            }
            if self.is_at_or_above_largest(tick) {
                return Ok(self.ticks[self.ticks.len() - 1]);
            }
            Ok(self.ticks[self.binary_search_by_tick(tick)])
        } else {
            if self.is_at_or_above_largest(tick) {
                return Err(TickError::AtOrAboveLargest);
            }
            if self.is_below_smallest(tick) {
                return Ok(self.ticks[0]);
            }
            Ok(self.ticks[self.binary_search_by_tick(tick) + 1])
        }
    }
}

impl TickDataProvider for TickListDataProvider {
    fn get_tick(&self, index: i32) -> Result<Tick, Error> {
        if self.is_below_smallest(index) {
            return Err(TickError::NotFound(index).into());
        }
        let tick = self.ticks[self.binary_search_by_tick(index)];
        if tick.index != index {
            return Err(TickError::NotFound(index).into());
        }
        Ok(tick)
    }

    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> Result<(i32, bool), Error> {
        if tick_spacing <= 0 {
            return Err(TickError::ZeroTickSpacing.into());
        }
        let compressed = tick.div_euclid(tick_spacing);

        if lte {
            let word_pos = compressed >> 8;
            let minimum = (word_pos << 8) * tick_spacing;

            if self.is_below_smallest(tick) {
                return Ok((minimum, false));
            }

            let index = self.next_initialized_tick(tick, lte)?.index;
            let next_initialized_tick = minimum.max(index);
            Ok((next_initialized_tick, next_initialized_tick == index))
        } else {
            let word_pos = (compressed + 1) >> 8;
            let maximum = (((word_pos + 1) << 8) - 1) * tick_spacing;

            if self.is_at_or_above_largest(tick) {
                return Ok((maximum, false));
            }

            let index = self.next_initialized_tick(tick, lte)?.index;
            let next_initialized_tick = maximum.min(index);
            Ok((next_initialized_tick, next_initialized_tick == index))
        }
    }
}
