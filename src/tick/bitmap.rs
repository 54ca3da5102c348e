use crate::constants::{MAX_TICK, MIN_TICK};
use crate::error::{Error, TickError};
use crate::hash::FastMap;
use crate::math::tick_bitmap::{self, flip_tick, get_word, position};
use crate::tick::{Tick, TickDataProvider};
use alloy_primitives::U256;

/// Tick provider mirroring the pool contract's storage: a sparse map of
/// 256-bit words flagging initialized ticks, plus the ticks themselves.
///
/// Suited to snapshots loaded word by word from a node; see
/// [`search_words`](Self::search_words) for the words a swap may touch.
#[derive(Clone, Debug)]
pub struct TickBitmapProvider {
    tick_spacing: i32,
    bitmap: FastMap<i16, U256>,
    ticks: FastMap<i32, Tick>,
}

impl TickBitmapProvider {
    pub fn new(tick_spacing: i32) -> Result<Self, TickError> {
        if tick_spacing <= 0 {
            return Err(TickError::ZeroTickSpacing);
        }
        Ok(Self {
            tick_spacing,
            bitmap: FastMap::default(),
            ticks: FastMap::default(),
        })
    }

    pub fn from_ticks(
        ticks: impl IntoIterator<Item = Tick>,
        tick_spacing: i32,
    ) -> Result<Self, TickError> {
        let mut provider = Self::new(tick_spacing)?;
        for tick in ticks {
            provider.insert(tick)?;
        }
        Ok(provider)
    }

    /// Builds a provider from raw bitmap words and the ticks they flag, as
    /// read from the pool contract.
    ///
    /// Every tick must be aligned and flagged, and every flagged bit must
    /// have its tick: a flagged bit without a tick is `NotFound`, a stored
    /// tick without its bit is `Unflagged`.
    pub fn from_words(
        tick_spacing: i32,
        bitmap: FastMap<i16, U256>,
        ticks: impl IntoIterator<Item = Tick>,
    ) -> Result<Self, TickError> {
        let mut provider = Self::new(tick_spacing)?;
        provider.bitmap = bitmap;

        for tick in ticks {
            if tick.index % tick_spacing != 0 {
                return Err(TickError::InvalidTickSpacing);
            }
            let (word_pos, bit_pos) = position(tick.index / tick_spacing);
            if !provider.word(word_pos).bit(bit_pos as usize) {
                return Err(TickError::Unflagged(tick.index));
            }
            provider.ticks.insert(tick.index, tick);
        }

        for (&word_pos, word) in &provider.bitmap {
            for bit_pos in (0..256usize).filter(|&bit| word.bit(bit)) {
                let index = (i32::from(word_pos) * 256 + bit_pos as i32) * tick_spacing;
                if !provider.ticks.contains_key(&index) {
                    return Err(TickError::NotFound(index));
                }
            }
        }

        Ok(provider)
    }

    #[inline]
    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    #[inline]
    pub fn word(&self, word_pos: i16) -> U256 {
        get_word(&self.bitmap, word_pos)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Stores `tick`, flagging it in the bitmap. A tick with no gross
    /// liquidity is uninitialized and removes any stored entry.
    pub fn insert(&mut self, tick: Tick) -> Result<(), TickError> {
        if tick.index % self.tick_spacing != 0 {
            return Err(TickError::InvalidTickSpacing);
        }
        if tick.liquidity_gross == 0 {
            self.remove(tick.index)?;
            return Ok(());
        }
        if self.ticks.insert(tick.index, tick).is_none() {
            flip_tick(&mut self.bitmap, tick.index, self.tick_spacing)?;
        }
        Ok(())
    }

    pub fn remove(&mut self, index: i32) -> Result<Option<Tick>, TickError> {
        let removed = self.ticks.remove(&index);
        if removed.is_some() {
            flip_tick(&mut self.bitmap, index, self.tick_spacing)?;
        }
        Ok(removed)
    }

    /// Inclusive range of bitmap words between `current_tick` and the tick
    /// bound in the swap direction.
    pub fn search_words(&self, current_tick: i32, zero_for_one: bool) -> Vec<i16> {
        let word_of = |tick: i32| position(tick.div_euclid(self.tick_spacing)).0;
        let current_word = word_of(current_tick);

        if zero_for_one {
            (word_of(MIN_TICK)..=current_word).collect()
        } else {
            (current_word..=word_of(MAX_TICK)).collect()
        }
    }
}

impl TickDataProvider for TickBitmapProvider {
    fn get_tick(&self, index: i32) -> Result<Tick, Error> {
        self.ticks
            .get(&index)
            .copied()
            .ok_or_else(|| TickError::NotFound(index).into())
    }

    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> Result<(i32, bool), Error> {
        if tick_spacing != self.tick_spacing {
            return Err(TickError::InvalidTickSpacing.into());
        }
        tick_bitmap::next_initialized_tick_within_one_word(&self.bitmap, tick, tick_spacing, lte)
    }
}
