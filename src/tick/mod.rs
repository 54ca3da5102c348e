//! Per-tick liquidity bookkeeping and the lookup capability the swap loop
//! runs on.
//!
//! A [`Pool`](crate::Pool) only needs two questions answered: what is
//! stored at an initialized tick, and where is the next initialized tick
//! within the current bitmap word. [`TickListDataProvider`] answers them
//! from a sorted slice, [`TickBitmapProvider`] from a sparse bitmap shaped
//! like the on-chain storage. Callers backed by a node implement
//! [`TickDataProvider`] themselves.

mod bitmap;
mod list;

pub use bitmap::TickBitmapProvider;
pub use list::TickListDataProvider;

use crate::error::{Error, TickError};
use std::fmt::Debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick {
    pub index: i32,
    pub liquidity_gross: u128,
    pub liquidity_net: i128,
}

impl Tick {
    #[inline]
    pub const fn new(index: i32, liquidity_gross: u128, liquidity_net: i128) -> Self {
        Self {
            index,
            liquidity_gross,
            liquidity_net,
        }
    }
}

pub trait TickDataProvider: Debug + Send + Sync {
    /// Returns the tick stored at `index`, failing if it is not initialized.
    fn get_tick(&self, index: i32) -> Result<Tick, Error>;

    /// Returns the next initialized tick at or below (`lte`) or strictly
    /// above `tick`, bounded by the 256-tick word containing it.
    ///
    /// When the word holds no initialized tick in that direction the word
    /// boundary is returned with `false`.
    fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        lte: bool,
        tick_spacing: i32,
    ) -> Result<(i32, bool), Error>;
}

/// Provider for pools that are only priced, never swapped through.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTickDataProvider;

impl TickDataProvider for NoTickDataProvider {
    fn get_tick(&self, _index: i32) -> Result<Tick, Error> {
        Err(TickError::NoTickData.into())
    }

    fn next_initialized_tick_within_one_word(
        &self,
        _tick: i32,
        _lte: bool,
        _tick_spacing: i32,
    ) -> Result<(i32, bool), Error> {
        Err(TickError::NoTickData.into())
    }
}
