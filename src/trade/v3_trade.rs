use crate::entities::{CurrencyAmount, Fraction, Percent, Price};
use crate::error::{Error, TradeError};
use crate::trade::Route;
use num_bigint::BigInt;
use std::cmp::Ordering;

/// Which side of a trade is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// One routed leg of a trade.
#[derive(Clone, Debug)]
pub struct Swap {
    pub route: Route,
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
}

/// One or more routes between the same two tokens, executed together.
///
/// Totals are summed at construction. No pool may appear in more than one
/// leg.
#[derive(Clone, Debug)]
pub struct Trade {
    swaps: Vec<Swap>,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
}

impl Trade {
    fn new(swaps: Vec<Swap>, trade_type: TradeType) -> Result<Self, Error> {
        let Some(first) = swaps.first() else {
            return Err(TradeError::EmptyTrade.into());
        };
        let input_currency = first.input_amount.currency();
        let output_currency = first.output_amount.currency();

        for swap in &swaps {
            if swap.route.input() != input_currency
                || swap.input_amount.currency() != input_currency
            {
                return Err(TradeError::InputCurrencyMismatch.into());
            }
            if swap.route.output() != output_currency
                || swap.output_amount.currency() != output_currency
            {
                return Err(TradeError::OutputCurrencyMismatch.into());
            }
        }

        let mut addresses = Vec::new();
        for swap in &swaps {
            for pool in swap.route.pools() {
                addresses.push(pool.address(None)?);
            }
        }
        let pool_count = addresses.len();
        addresses.sort_unstable();
        addresses.dedup();
        if addresses.len() != pool_count {
            return Err(TradeError::DuplicatePools.into());
        }

        let mut input_amount = CurrencyAmount::from_raw_amount(input_currency.clone(), 0)?;
        let mut output_amount = CurrencyAmount::from_raw_amount(output_currency.clone(), 0)?;
        for swap in &swaps {
            input_amount = input_amount.try_add(&swap.input_amount)?;
            output_amount = output_amount.try_add(&swap.output_amount)?;
        }

        Ok(Self {
            swaps,
            trade_type,
            input_amount,
            output_amount,
        })
    }

    /// Simulates `amount` through every pool of `route`.
    ///
    /// For exact input `amount` is the input and each hop feeds the next; for
    /// exact output `amount` is the output and the route is walked backwards.
    pub fn from_route(
        route: Route,
        amount: CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        let swap = Self::simulate(route, amount, trade_type)?;
        Self::new(vec![swap], trade_type)
    }

    /// Like [`from_route`](Self::from_route) for several routes at once.
    pub fn from_routes(
        routes: Vec<(CurrencyAmount, Route)>,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        let swaps = routes
            .into_iter()
            .map(|(amount, route)| Self::simulate(route, amount, trade_type))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(swaps, trade_type)
    }

    #[inline]
    pub fn exact_in(route: Route, amount_in: CurrencyAmount) -> Result<Self, Error> {
        Self::from_route(route, amount_in, TradeType::ExactInput)
    }

    #[inline]
    pub fn exact_out(route: Route, amount_out: CurrencyAmount) -> Result<Self, Error> {
        Self::from_route(route, amount_out, TradeType::ExactOutput)
    }

    /// Builds a trade from amounts computed elsewhere, e.g. by an on-chain
    /// quoter. The route is validated but not simulated.
    pub fn create_unchecked_trade(
        route: Route,
        input_amount: CurrencyAmount,
        output_amount: CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        Self::new(
            vec![Swap {
                route,
                input_amount,
                output_amount,
            }],
            trade_type,
        )
    }

    pub fn create_unchecked_trade_with_multiple_routes(
        swaps: Vec<Swap>,
        trade_type: TradeType,
    ) -> Result<Self, Error> {
        Self::new(swaps, trade_type)
    }

    fn simulate(route: Route, amount: CurrencyAmount, trade_type: TradeType) -> Result<Swap, Error> {
        match trade_type {
            TradeType::ExactInput => {
                if amount.currency() != route.input() {
                    return Err(TradeError::InputCurrencyMismatch.into());
                }
                let mut next = amount.clone();
                for pool in route.pools() {
                    next = pool.get_output_amount(&next, None)?.0;
                }
                Ok(Swap {
                    route,
                    input_amount: amount,
                    output_amount: next,
                })
            }
            TradeType::ExactOutput => {
                if amount.currency() != route.output() {
                    return Err(TradeError::OutputCurrencyMismatch.into());
                }
                let mut next = amount.clone();
                for pool in route.pools().iter().rev() {
                    next = pool.get_input_amount(&next, None)?.0;
                }
                Ok(Swap {
                    route,
                    input_amount: next,
                    output_amount: amount,
                })
            }
        }
    }

    #[inline]
    pub fn swaps(&self) -> &[Swap] {
        &self.swaps
    }

    #[inline]
    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// The route of a single-route trade.
    pub fn route(&self) -> Result<&Route, TradeError> {
        match self.swaps.as_slice() {
            [swap] => Ok(&swap.route),
            _ => Err(TradeError::MultipleRoutes),
        }
    }

    #[inline]
    pub fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    #[inline]
    pub fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    /// Hops summed over all legs, counted as tokens visited.
    pub(crate) fn path_len(&self) -> usize {
        self.swaps
            .iter()
            .map(|swap| swap.route.token_path().len())
            .sum()
    }

    /// Average price paid, output per input.
    pub fn execution_price(&self) -> Result<Price, Error> {
        Ok(Price::new(
            self.input_amount.currency().clone(),
            self.output_amount.currency().clone(),
            self.input_amount.quotient(),
            self.output_amount.quotient(),
        )?)
    }

    /// Relative shortfall of the output against what the routes' mid prices
    /// would give for the same input.
    pub fn price_impact(&self) -> Result<Percent, Error> {
        let mut spot_output =
            CurrencyAmount::from_raw_amount(self.output_amount.currency().clone(), 0)?;
        for swap in &self.swaps {
            let quoted = swap.route.mid_price().quote(&swap.input_amount)?;
            spot_output = spot_output.try_add(&quoted)?;
        }
        let shortfall = spot_output.as_fraction() - self.output_amount.as_fraction();
        Ok(shortfall.checked_div(spot_output.as_fraction())?.into())
    }

    /// Least output accepted under `slippage_tolerance`.
    pub fn minimum_amount_out(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<CurrencyAmount, Error> {
        if slippage_tolerance.is_negative() {
            return Err(TradeError::InvalidSlippageTolerance.into());
        }
        if self.trade_type == TradeType::ExactOutput {
            return Ok(self.output_amount.clone());
        }
        let factor = (Fraction::from_integer(1) + slippage_tolerance.as_fraction()).invert()?;
        let slipped = &factor * &Fraction::from_integer(self.output_amount.quotient());
        Ok(CurrencyAmount::from_raw_amount(
            self.output_amount.currency().clone(),
            slipped.quotient(),
        )?)
    }

    /// Most input spent under `slippage_tolerance`.
    pub fn maximum_amount_in(
        &self,
        slippage_tolerance: &Percent,
    ) -> Result<CurrencyAmount, Error> {
        if slippage_tolerance.is_negative() {
            return Err(TradeError::InvalidSlippageTolerance.into());
        }
        if self.trade_type == TradeType::ExactInput {
            return Ok(self.input_amount.clone());
        }
        let factor = Fraction::from_integer(1) + slippage_tolerance.as_fraction();
        let slipped = &factor * &Fraction::from_integer(self.input_amount.quotient());
        Ok(CurrencyAmount::from_raw_amount(
            self.input_amount.currency().clone(),
            slipped.quotient(),
        )?)
    }

    /// Execution price at the slippage bounds.
    pub fn worst_execution_price(&self, slippage_tolerance: &Percent) -> Result<Price, Error> {
        let amount_in: BigInt = self.maximum_amount_in(slippage_tolerance)?.quotient();
        let amount_out: BigInt = self.minimum_amount_out(slippage_tolerance)?.quotient();
        Ok(Price::new(
            self.input_amount.currency().clone(),
            self.output_amount.currency().clone(),
            amount_in,
            amount_out,
        )?)
    }
}

/// Ranks trades between the same tokens, best first.
///
/// Exact input prefers more output, exact output prefers less input. Ties go
/// to the shorter path, then to the better amount on the other side.
pub fn trade_comparator(a: &Trade, b: &Trade) -> Ordering {
    let by_hops = a.path_len().cmp(&b.path_len());
    match a.trade_type {
        TradeType::ExactInput => b
            .output_amount
            .as_fraction()
            .cmp(a.output_amount.as_fraction())
            .then(by_hops)
            .then_with(|| a.input_amount.as_fraction().cmp(b.input_amount.as_fraction())),
        TradeType::ExactOutput => a
            .input_amount
            .as_fraction()
            .cmp(b.input_amount.as_fraction())
            .then(by_hops)
            .then_with(|| b.output_amount.as_fraction().cmp(a.output_amount.as_fraction())),
    }
}
