// 5.0: scoring. a structured result plus the picks for that race become points.
// scoring is total: no result yet, no placing, no picks all mean 0 points,
// never an error. tournaments fill in race by race and standings must be
// computable at every step in between.

use crate::results::RaceResult;
use crate::types::{Points, StableNumber};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointTable {
    pub first: Points,
    pub second: Points,
    pub third: Points,
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            first: Points::new(10),
            second: Points::new(5),
            third: Points::new(3),
        }
    }
}

// 5.1: points one horse earns from a result. a dead heat pays the full
// position value to every tied horse; ties never split the pot.
pub fn placement_points(result: &RaceResult, number: StableNumber, table: &PointTable) -> Points {
    if result.first.contains(&number) {
        table.first
    } else if result.second.contains(&number) {
        table.second
    } else if result.third.contains(&number) {
        table.third
    } else {
        Points::zero()
    }
}

// 5.2: points an entry's picks earn from one race. in one-per-race mode the
// slice holds a single number; in roster mode, every picked horse running in
// this race.
pub fn score_picks(
    result: &RaceResult,
    picked: &[StableNumber],
    table: &PointTable,
) -> Points {
    picked
        .iter()
        .map(|&number| placement_points(result, number, table))
        .sum()
}
