use crate::entities::{CurrencyAmount, Token};
use crate::error::{Error, SearchError, StateError};
use crate::pool::Pool;
use crate::trade::{Route, Trade, sorted_insert, trade_comparator};
use tracing::debug;

/// Bounds on the best-trade search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestTradeOptions {
    /// Capacity of the ranked result list.
    pub max_num_results: usize,
    /// Longest route considered, in pools.
    pub max_hops: usize,
}

impl Default for BestTradeOptions {
    fn default() -> Self {
        Self {
            max_num_results: 3,
            max_hops: 3,
        }
    }
}

/// Pools that cannot fill a hop are dropped from the search instead of
/// failing it.
#[inline]
fn is_skippable(error: &Error) -> bool {
    matches!(
        error,
        Error::StateError(StateError::InsufficientReserves | StateError::LiquidityIsZero)
    )
}

/// Inputs fixed for one search; the path, frontier amount and result list
/// are threaded through the recursion.
struct Search<'a> {
    pools: &'a [Pool],
    fixed_amount: &'a CurrencyAmount,
    target: &'a Token,
    max_num_results: usize,
}

impl Search<'_> {
    fn check(
        &self,
        max_hops: usize,
        path: &[usize],
        frontier: &CurrencyAmount,
    ) -> Result<(), SearchError> {
        if self.pools.is_empty() {
            return Err(SearchError::NoPools);
        }
        if max_hops == 0 {
            return Err(SearchError::InvalidMaxHops);
        }
        if path.is_empty() && frontier != self.fixed_amount {
            return Err(SearchError::InvalidRecursion);
        }
        Ok(())
    }

    fn route_pools(&self, path: &[usize]) -> Vec<Pool> {
        path.iter().map(|&index| self.pools[index].clone()).collect()
    }

    /// Extends `path` forward from the token of `amount_in`.
    fn exact_in(
        &self,
        max_hops: usize,
        path: &[usize],
        amount_in: &CurrencyAmount,
        mut best: Vec<Trade>,
    ) -> Result<Vec<Trade>, Error> {
        self.check(max_hops, path, amount_in)?;
        let remaining = self.pools.len() - path.len();

        for (index, pool) in self.pools.iter().enumerate() {
            if path.contains(&index) || !pool.involves_token(amount_in.currency()) {
                continue;
            }

            let amount_out = match pool.get_output_amount(amount_in, None) {
                Ok((amount_out, _)) => amount_out,
                Err(error) if is_skippable(&error) => {
                    debug!(pool = index, %error, "skipping pool");
                    continue;
                }
                Err(error) => return Err(error),
            };

            let mut next_path = path.to_vec();
            next_path.push(index);

            if amount_out.currency() == self.target {
                let route = Route::new(
                    self.route_pools(&next_path),
                    self.fixed_amount.currency().clone(),
                    self.target.clone(),
                )?;
                let trade = Trade::exact_in(route, self.fixed_amount.clone())?;
                debug!(
                    hops = next_path.len(),
                    output = %trade.output_amount().quotient(),
                    "exact input candidate"
                );
                sorted_insert(&mut best, trade, self.max_num_results, trade_comparator)?;
            } else if max_hops > 1 && remaining > 1 {
                best = self.exact_in(max_hops - 1, &next_path, &amount_out, best)?;
            }
        }

        Ok(best)
    }

    /// Extends `path` backward from the token of `amount_out`.
    fn exact_out(
        &self,
        max_hops: usize,
        path: &[usize],
        amount_out: &CurrencyAmount,
        mut best: Vec<Trade>,
    ) -> Result<Vec<Trade>, Error> {
        self.check(max_hops, path, amount_out)?;
        let remaining = self.pools.len() - path.len();

        for (index, pool) in self.pools.iter().enumerate() {
            if path.contains(&index) || !pool.involves_token(amount_out.currency()) {
                continue;
            }

            let amount_in = match pool.get_input_amount(amount_out, None) {
                Ok((amount_in, _)) => amount_in,
                Err(error) if is_skippable(&error) => {
                    debug!(pool = index, %error, "skipping pool");
                    continue;
                }
                Err(error) => return Err(error),
            };

            let mut next_path = Vec::with_capacity(path.len() + 1);
            next_path.push(index);
            next_path.extend_from_slice(path);

            if amount_in.currency() == self.target {
                let route = Route::new(
                    self.route_pools(&next_path),
                    self.target.clone(),
                    self.fixed_amount.currency().clone(),
                )?;
                let trade = Trade::exact_out(route, self.fixed_amount.clone())?;
                debug!(
                    hops = next_path.len(),
                    input = %trade.input_amount().quotient(),
                    "exact output candidate"
                );
                sorted_insert(&mut best, trade, self.max_num_results, trade_comparator)?;
            } else if max_hops > 1 && remaining > 1 {
                best = self.exact_out(max_hops - 1, &next_path, &amount_in, best)?;
            }
        }

        Ok(best)
    }
}

impl Trade {
    /// Finds up to `options.max_num_results` single-route trades selling
    /// `amount_in` for `token_out`, best first.
    ///
    /// Every route uses each pool at most once and at most
    /// `options.max_hops` pools. Only single-route trades are returned;
    /// splitting across routes is left to the caller.
    pub fn best_trade_exact_in(
        pools: &[Pool],
        amount_in: &CurrencyAmount,
        token_out: &Token,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>, Error> {
        Search {
            pools,
            fixed_amount: amount_in,
            target: token_out,
            max_num_results: options.max_num_results,
        }
        .exact_in(options.max_hops, &[], amount_in, Vec::new())
    }

    /// Finds up to `options.max_num_results` single-route trades buying
    /// exactly `amount_out` with `token_in`, cheapest first.
    pub fn best_trade_exact_out(
        pools: &[Pool],
        token_in: &Token,
        amount_out: &CurrencyAmount,
        options: BestTradeOptions,
    ) -> Result<Vec<Trade>, Error> {
        Search {
            pools,
            fixed_amount: amount_out,
            target: token_in,
            max_num_results: options.max_num_results,
        }
        .exact_out(options.max_hops, &[], amount_out, Vec::new())
    }
}
