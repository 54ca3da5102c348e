//! Hash map alias backing the bitmap tick provider.
//!
//! Precedence when several hasher features are on: `std-hash`, then
//! `ahash`, then `rustc-hash` (the default). Enabling `ahash` on top of the
//! default features therefore selects `AHashMap`.

#[cfg(feature = "std-hash")]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;

#[cfg(all(feature = "ahash", not(feature = "std-hash")))]
pub type FastMap<K, V> = ahash::AHashMap<K, V>;

#[cfg(all(
    feature = "rustc-hash",
    not(any(feature = "ahash", feature = "std-hash"))
))]
pub type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(not(any(feature = "rustc-hash", feature = "ahash", feature = "std-hash")))]
pub type FastMap<K, V> = std::collections::HashMap<K, V>;
