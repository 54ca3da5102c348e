use crate::error::CurrencyError;
use alloy_primitives::{Address, U160};
use std::hash::{Hash, Hasher};

/// Converts an `Address` into its `U160` numeric representation.
#[inline(always)]
pub fn address_to_u160(address: Address) -> U160 {
    address.into()
}

/// An ERC-20 token on a given chain.
///
/// Identity is `(chain_id, address)`; decimals and labels are metadata.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

impl Token {
    pub fn new(
        chain_id: u64,
        address: Address,
        decimals: u8,
        symbol: Option<&str>,
        name: Option<&str>,
    ) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.map(str::to_owned),
            name: name.map(str::to_owned),
        }
    }

    /// Whether this token is `token0` of a pool with `other`, i.e. has the
    /// numerically smaller address.
    pub fn sorts_before(&self, other: &Token) -> Result<bool, CurrencyError> {
        if self.chain_id != other.chain_id {
            return Err(CurrencyError::ChainIdMismatch);
        }
        if self.address == other.address {
            return Err(CurrencyError::IdenticalAddresses);
        }
        Ok(address_to_u160(self.address) < address_to_u160(other.address))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}
