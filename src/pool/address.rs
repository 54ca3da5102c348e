use crate::constants::POOL_INIT_CODE_HASH;
use crate::entities::Token;
use crate::error::CurrencyError;
use alloy_primitives::{Address, B256, keccak256};

/// Deterministic CREATE2 address of the pool for a token pair and fee.
///
/// The salt is `keccak256(abi.encode(token0, token1, fee))`; pass
/// `init_code_hash` for deployments whose pool bytecode differs from
/// mainnet.
pub fn compute_pool_address(
    factory: Address,
    token_a: &Token,
    token_b: &Token,
    fee: u32,
    init_code_hash: Option<B256>,
) -> Result<Address, CurrencyError> {
    let (token0, token1) = if token_a.sorts_before(token_b)? {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };

    // three left-padded 32-byte words
    let mut encoded = [0u8; 96];
    encoded[12..32].copy_from_slice(token0.address.as_slice());
    encoded[44..64].copy_from_slice(token1.address.as_slice());
    encoded[92..96].copy_from_slice(&fee.to_be_bytes());
    let salt = keccak256(encoded);

    let init_code_hash = init_code_hash.unwrap_or(POOL_INIT_CODE_HASH);
    Ok(factory.create2(salt.0, init_code_hash.0))
}
