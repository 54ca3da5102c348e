//! Protocol constants and fee tiers.
//!
//! Everything here is fixed at compile time. The factory address and
//! init-code hash are only used to derive deterministic pool addresses,
//! never to talk to a node.

use alloy_primitives::{Address, B256, U256, address, b256};

pub use crate::math::tick_math::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};

/// Uniswap V3 factory on Ethereum mainnet and most L2 deployments.
pub const FACTORY_ADDRESS: Address = address!("0x1F98431c8aD98523631AE4a59f267346ea31F984");

/// `keccak256` of the `UniswapV3Pool` creation code.
pub const POOL_INIT_CODE_HASH: B256 =
    b256!("0xe34f199b19b2b4f47f68442619d555527d244f78a3297ea89325f843f87b8b54");

/// Exclusive upper bound for a pool fee, in hundredths of a bip.
pub const FEE_MAX: u32 = 1_000_000;

/// Denominator of `fee_pips`.
pub const FEE_DENOMINATOR: u32 = 1_000_000;

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

pub(crate) const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);
pub(crate) const U256_E6: U256 = U256::from_limbs([1000000, 0, 0, 0]);
pub(crate) const U160_MAX: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

/// Fee tiers enabled on the canonical factory, in hundredths of a bip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum FeeAmount {
    Lowest = 100,
    Low = 500,
    Medium = 3000,
    High = 10000,
}

impl FeeAmount {
    #[inline]
    pub const fn pips(self) -> u32 {
        self as u32
    }

    /// Tick spacing the factory assigns to this fee tier.
    #[inline]
    pub const fn tick_spacing(self) -> i32 {
        match self {
            FeeAmount::Lowest => 1,
            FeeAmount::Low => 10,
            FeeAmount::Medium => 60,
            FeeAmount::High => 200,
        }
    }
}

impl TryFrom<u32> for FeeAmount {
    type Error = u32;

    fn try_from(pips: u32) -> Result<Self, Self::Error> {
        match pips {
            100 => Ok(FeeAmount::Lowest),
            500 => Ok(FeeAmount::Low),
            3000 => Ok(FeeAmount::Medium),
            10000 => Ok(FeeAmount::High),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_tiers_map_to_canonical_spacing() {
        assert_eq!(FeeAmount::Lowest.tick_spacing(), 1);
        assert_eq!(FeeAmount::Low.tick_spacing(), 10);
        assert_eq!(FeeAmount::Medium.tick_spacing(), 60);
        assert_eq!(FeeAmount::High.tick_spacing(), 200);
    }

    #[test]
    fn fee_amount_round_trips_through_pips() {
        for fee in [
            FeeAmount::Lowest,
            FeeAmount::Low,
            FeeAmount::Medium,
            FeeAmount::High,
        ] {
            assert_eq!(FeeAmount::try_from(fee.pips()), Ok(fee));
        }
        assert_eq!(FeeAmount::try_from(2500), Err(2500));
    }

    #[test]
    fn q_constants() {
        assert_eq!(Q96, U256::ONE << 96);
        assert_eq!(Q192, U256::ONE << 192);
        assert_eq!(U160_MAX, (U256::ONE << 160) - U256::ONE);
    }
}
