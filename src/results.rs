// 4.0: race results. raw finish input arrives as three comma-separated strings
// of stable numbers, one per placing ("1,3" = dead heat for that spot). parsing
// happens exactly once, here, at ingestion; everything downstream works on the
// structured sets and never re-reads text.

use crate::tournament::Race;
use crate::types::{RaceId, StableNumber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A race's recorded finish. Each position holds more than one stable number
/// only for a dead heat. Positions may be empty while the result is still
/// being entered; only a complete result is scoreable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_id: RaceId,
    pub first: BTreeSet<StableNumber>,
    pub second: BTreeSet<StableNumber>,
    pub third: BTreeSet<StableNumber>,
}

impl RaceResult {
    pub fn is_complete(&self) -> bool {
        !self.first.is_empty() && !self.second.is_empty() && !self.third.is_empty()
    }

    pub fn placed(&self, number: StableNumber) -> bool {
        self.first.contains(&number) || self.second.contains(&number) || self.third.contains(&number)
    }
}

// 4.1: trims, splits on comma, parses positive stable numbers, and verifies
// every number exists in the race and appears in at most one placing.
pub fn normalize_result(
    race: &Race,
    raw_first: &str,
    raw_second: &str,
    raw_third: &str,
) -> Result<RaceResult, ResultError> {
    let first = parse_position(race, raw_first)?;
    let second = parse_position(race, raw_second)?;
    let third = parse_position(race, raw_third)?;

    // a horse cannot occupy two placings
    for number in second.iter() {
        if first.contains(number) {
            return Err(ResultError::DuplicateStableNumber { number: *number });
        }
    }
    for number in third.iter() {
        if first.contains(number) || second.contains(number) {
            return Err(ResultError::DuplicateStableNumber { number: *number });
        }
    }

    Ok(RaceResult {
        race_id: race.id,
        first,
        second,
        third,
    })
}

fn parse_position(race: &Race, raw: &str) -> Result<BTreeSet<StableNumber>, ResultError> {
    let mut numbers = BTreeSet::new();

    // empty input is a position not yet entered
    if raw.trim().is_empty() {
        return Ok(numbers);
    }

    for token in raw.split(',') {
        let token = token.trim();
        let value: u32 = token.parse().map_err(|_| ResultError::MalformedResult {
            token: token.to_string(),
        })?;
        let number = StableNumber::new(value).ok_or(ResultError::MalformedResult {
            token: token.to_string(),
        })?;

        if race.horse_by_number(number).is_none() {
            return Err(ResultError::UnknownHorse {
                race_id: race.id,
                number,
            });
        }
        // the same number twice within one placing is a data-entry error
        if !numbers.insert(number) {
            return Err(ResultError::DuplicateStableNumber { number });
        }
    }

    Ok(numbers)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultError {
    #[error("Unparseable stable number {token:?}")]
    MalformedResult { token: String },

    #[error("Stable number {number} listed more than once")]
    DuplicateStableNumber { number: StableNumber },

    #[error("No horse {number} in race {race_id:?}")]
    UnknownHorse { race_id: RaceId, number: StableNumber },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::Horse;
    use crate::types::{HorseId, Odds, Timestamp, TournamentId};
    use rust_decimal_macros::dec;

    fn four_horse_race() -> Race {
        let horses = (1..=4u32)
            .map(|n| Horse {
                id: HorseId(n as u64),
                race_id: RaceId(1),
                number: StableNumber::new(n).unwrap(),
                name: format!("Runner {n}"),
                jockey: "L. Saez".to_string(),
                trainer: "S. Asmussen".to_string(),
                odds: Odds::new(dec!(5)).unwrap(),
                cost: None,
            })
            .collect();

        Race {
            id: RaceId(1),
            tournament_id: TournamentId(1),
            number: 1,
            name: "Race 1".to_string(),
            track: "Saratoga".to_string(),
            post_time: Timestamp::from_millis(0),
            horses,
        }
    }

    fn nums(result: &BTreeSet<StableNumber>) -> Vec<u32> {
        result.iter().map(|n| n.value()).collect()
    }

    #[test]
    fn dead_heat_for_first() {
        let race = four_horse_race();
        let result = normalize_result(&race, "1,3", "2", "4").unwrap();

        assert_eq!(nums(&result.first), vec![1, 3]);
        assert_eq!(nums(&result.second), vec![2]);
        assert_eq!(nums(&result.third), vec![4]);
        assert!(result.is_complete());
        // 2 placed second only
        assert!(!result.first.contains(&StableNumber::new(2).unwrap()));
        assert!(!result.third.contains(&StableNumber::new(2).unwrap()));
    }

    #[test]
    fn whitespace_tolerated() {
        let race = four_horse_race();
        let result = normalize_result(&race, " 1 , 3 ", "  2", "4  ").unwrap();
        assert_eq!(nums(&result.first), vec![1, 3]);
    }

    #[test]
    fn partial_result_allowed_but_incomplete() {
        let race = four_horse_race();
        let result = normalize_result(&race, "1", "", "").unwrap();
        assert!(!result.is_complete());
        assert!(result.second.is_empty());
    }

    #[test]
    fn rejects_non_numeric_token() {
        let race = four_horse_race();
        let err = normalize_result(&race, "1,x", "2", "3").unwrap_err();
        assert!(matches!(err, ResultError::MalformedResult { token } if token == "x"));
    }

    #[test]
    fn rejects_zero_stable_number() {
        let race = four_horse_race();
        assert!(matches!(
            normalize_result(&race, "0", "2", "3"),
            Err(ResultError::MalformedResult { .. })
        ));
    }

    #[test]
    fn rejects_number_in_two_positions() {
        let race = four_horse_race();
        assert!(matches!(
            normalize_result(&race, "1", "1", "3"),
            Err(ResultError::DuplicateStableNumber { .. })
        ));
        assert!(matches!(
            normalize_result(&race, "1,2", "3", "2"),
            Err(ResultError::DuplicateStableNumber { .. })
        ));
    }

    #[test]
    fn rejects_repeat_within_position() {
        let race = four_horse_race();
        assert!(matches!(
            normalize_result(&race, "1,1", "2", "3"),
            Err(ResultError::DuplicateStableNumber { .. })
        ));
    }

    #[test]
    fn rejects_unknown_horse() {
        let race = four_horse_race();
        let err = normalize_result(&race, "9", "2", "3").unwrap_err();
        assert!(matches!(err, ResultError::UnknownHorse { .. }));
    }
}
