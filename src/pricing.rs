// 2.0: pricing. converts a horse's morning-line odds into its virtual acquisition cost.
// 2.0 has the params struct. 2.1+ has the cost formula and odds parsing.
// shorter odds (favorites) cost more; the cost is frozen onto the horse before entries open.

use crate::types::{Cost, Odds};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingParams {
    // floor every horse trends toward as odds grow
    pub base_cost: Cost,
    // scales how steeply favorites get more expensive
    pub multiplier: Decimal,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            base_cost: Cost::new(5000),
            multiplier: dec!(100000),
        }
    }
}

// 2.1: cost = round(base + multiplier / (odds + 1)), half rounds away from zero.
// odds 0 prices at base + multiplier, the maximum. floored at 1 so a cost is
// always a positive integer no matter how long the shot.
pub fn price(odds: Odds, params: &PricingParams) -> Cost {
    let raw = Decimal::from(params.base_cost.value())
        + params.multiplier / (odds.value() + Decimal::ONE);
    let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Cost::new(rounded.to_u64().unwrap_or(u64::MAX).max(1))
}

pub fn max_price(params: &PricingParams) -> Cost {
    price(Odds::new_unchecked(Decimal::ZERO), params)
}

// 2.2: published morning lines arrive as decimal ("3.5") or fractional ("7-2") text.
// fractional N-M reads as N-to-M, i.e. N/M expressed against 1.
pub fn parse_odds(input: &str) -> Result<Odds, PricingError> {
    let trimmed = input.trim();

    // plain decimal first so a negative like "-3" reports its sign,
    // not a bogus fractional split
    let value = if let Ok(decimal) = trimmed.parse::<Decimal>() {
        decimal
    } else if let Some((num, den)) = trimmed.split_once('-') {
        let n: Decimal = num
            .trim()
            .parse()
            .map_err(|_| PricingError::MalformedOdds { input: input.to_string() })?;
        let d: Decimal = den
            .trim()
            .parse()
            .map_err(|_| PricingError::MalformedOdds { input: input.to_string() })?;
        if d <= Decimal::ZERO {
            return Err(PricingError::MalformedOdds { input: input.to_string() });
        }
        n / d
    } else {
        return Err(PricingError::MalformedOdds { input: input.to_string() });
    };

    Odds::new(value).ok_or(PricingError::InvalidOdds { odds: value })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Odds {odds} are negative")]
    InvalidOdds { odds: Decimal },

    #[error("Unparseable odds {input:?}")]
    MalformedOdds { input: String },
}
