use crate::entities::{Price, Token};
use crate::error::{Error, RouteError};
use crate::pool::Pool;

/// An ordered chain of pools taking `input` to `output`.
#[derive(Clone, Debug)]
pub struct Route {
    pools: Vec<Pool>,
    token_path: Vec<Token>,
    input: Token,
    output: Token,
    mid_price: Price,
}

impl Route {
    pub fn new(pools: Vec<Pool>, input: Token, output: Token) -> Result<Self, Error> {
        let (Some(first), Some(last)) = (pools.first(), pools.last()) else {
            return Err(RouteError::RouteNoPools.into());
        };

        let chain_id = first.chain_id();
        if pools.iter().any(|pool| pool.chain_id() != chain_id) {
            return Err(RouteError::AllOnSameChain.into());
        }
        if !first.involves_token(&input) {
            return Err(RouteError::InputNotInvolved.into());
        }
        if !last.involves_token(&output) {
            return Err(RouteError::OutputNotInvolved.into());
        }

        let mut token_path = Vec::with_capacity(pools.len() + 1);
        token_path.push(input.clone());
        for pool in &pools {
            let current = &token_path[token_path.len() - 1];
            let next = if current == pool.token0() {
                pool.token1().clone()
            } else if current == pool.token1() {
                pool.token0().clone()
            } else {
                return Err(RouteError::PathNotContinuous.into());
            };
            token_path.push(next);
        }
        if token_path[token_path.len() - 1] != output {
            return Err(RouteError::PathNotContinuous.into());
        }

        let mid_price = Self::compose_mid_price(&pools, &input, &output)?;

        Ok(Self {
            pools,
            token_path,
            input,
            output,
            mid_price,
        })
    }

    /// Multiplies each hop's spot price along the path.
    fn compose_mid_price(pools: &[Pool], input: &Token, output: &Token) -> Result<Price, Error> {
        let mut next_input = input;
        let mut price: Option<Price> = None;

        for pool in pools {
            let (hop, next) = if next_input == pool.token0() {
                (pool.token0_price(), pool.token1())
            } else {
                (pool.token1_price(), pool.token0())
            };
            price = Some(match price {
                Some(price) => price.multiply(hop)?,
                None => hop.clone(),
            });
            next_input = next;
        }

        let price = price.ok_or(RouteError::RouteNoPools)?;
        Ok(Price::new(
            input.clone(),
            output.clone(),
            price.denominator().clone(),
            price.numerator().clone(),
        )?)
    }

    #[inline]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Every token visited, starting with `input` and ending with `output`.
    #[inline]
    pub fn token_path(&self) -> &[Token] {
        &self.token_path
    }

    #[inline]
    pub fn input(&self) -> &Token {
        &self.input
    }

    #[inline]
    pub fn output(&self) -> &Token {
        &self.output
    }

    #[inline]
    pub fn chain_id(&self) -> u64 {
        self.input.chain_id
    }

    /// Spot price of `input` in `output` across the whole route.
    #[inline]
    pub fn mid_price(&self) -> &Price {
        &self.mid_price
    }
}
