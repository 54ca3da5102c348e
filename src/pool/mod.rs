mod address;
pub mod swap;
mod v3_pool;

pub use address::compute_pool_address;
pub use swap::SwapResult;
pub use v3_pool::Pool;
