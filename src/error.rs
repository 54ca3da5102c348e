use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
    #[error("Math error - invalid input")]
    InvalidInput,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - tick out of bounds")]
    InvalidTick,
    #[error("State error - sqrtPrice out of bounds")]
    InvalidSqrtRatio,
    #[error("State error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("State error - sqrtRatio is 0")]
    SqrtRatioIsZero,
    #[error("State error - liquidity is 0")]
    LiquidityIsZero,
    #[error("State error - requested amount exceeds pool reserves")]
    InsufficientReserves,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TickError {
    #[error("Tick error - tick spacing must be greater than 0")]
    ZeroTickSpacing,
    #[error("Tick error - tick index is not a multiple of the tick spacing")]
    InvalidTickSpacing,
    #[error("Tick error - sum of liquidity net is not zero")]
    ZeroNet,
    #[error("Tick error - ticks are not sorted by index")]
    Sorted,
    #[error("Tick error - tick {0} is not initialized")]
    NotFound(i32),
    #[error("Tick error - tick {0} is stored but not flagged in the bitmap")]
    Unflagged(i32),
    #[error("Tick error - tick is below the smallest initialized tick")]
    BelowSmallest,
    #[error("Tick error - tick is at or above the largest initialized tick")]
    AtOrAboveLargest,
    #[error("Tick error - no tick data available")]
    NoTickData,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Currency error - tokens are on different chains")]
    ChainIdMismatch,
    #[error("Currency error - tokens have identical addresses")]
    IdenticalAddresses,
    #[error("Currency error - currencies do not match")]
    CurrencyMismatch,
    #[error("Currency error - amount exceeds MaxUint256")]
    AmountExceedsMaxUint256,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Pool error - fee must be below FEE_MAX")]
    FeeTooHigh,
    #[error("Pool error - sqrtRatioX96 is outside the current tick")]
    InvalidSqrtRatioX96,
    #[error("Pool error - token is not one of the pool tokens")]
    TokenNotInvolved,
    #[error("Pool error - sqrtPriceLimitX96 too low")]
    SqrtPriceLimitX96TooLow,
    #[error("Pool error - sqrtPriceLimitX96 too high")]
    SqrtPriceLimitX96TooHigh,
    #[error("Pool error - amount does not fit in int256")]
    AmountOutOfRange,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Position error - tickLower must be below tickUpper")]
    TickOrder,
    #[error("Position error - invalid tickLower")]
    TickLower,
    #[error("Position error - invalid tickUpper")]
    TickUpper,
    #[error("Position error - liquidity does not fit in uint128")]
    LiquidityOverflow,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route error - route has no pools")]
    RouteNoPools,
    #[error("Route error - pools are not all on the same chain")]
    AllOnSameChain,
    #[error("Route error - input token is not in the first pool")]
    InputNotInvolved,
    #[error("Route error - output token is not in the last pool")]
    OutputNotInvolved,
    #[error("Route error - path is not continuous")]
    PathNotContinuous,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TradeError {
    #[error("Trade error - trade has no swaps")]
    EmptyTrade,
    #[error("Trade error - trade has more than one route")]
    MultipleRoutes,
    #[error("Trade error - the same pool is used by more than one swap")]
    DuplicatePools,
    #[error("Trade error - swap input currency does not match the trade")]
    InputCurrencyMismatch,
    #[error("Trade error - swap output currency does not match the trade")]
    OutputCurrencyMismatch,
    #[error("Trade error - slippage tolerance must not be negative")]
    InvalidSlippageTolerance,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search error - max hops must be greater than 0")]
    InvalidMaxHops,
    #[error("Search error - recursion state is inconsistent")]
    InvalidRecursion,
    #[error("Search error - max size must be greater than 0")]
    InvalidMaxSize,
    #[error("Search error - results buffer exceeds max size")]
    MaxSizeExceeded,
    #[error("Search error - no pools to search")]
    NoPools,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] MathError),

    #[error(transparent)]
    StateError(#[from] StateError),

    #[error(transparent)]
    TickError(#[from] TickError),

    #[error(transparent)]
    CurrencyError(#[from] CurrencyError),

    #[error(transparent)]
    PoolError(#[from] PoolError),

    #[error(transparent)]
    PositionError(#[from] PositionError),

    #[error(transparent)]
    RouteError(#[from] RouteError),

    #[error(transparent)]
    TradeError(#[from] TradeError),

    #[error(transparent)]
    SearchError(#[from] SearchError),
}
