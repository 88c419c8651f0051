//! Tournament, race, and horse records.
//!
//! A tournament owns an ordered card of races, each with its own field of
//! horses. Structural invariants live here: race numbers are unique within a
//! tournament, stable numbers are unique within a race, and the lock flag
//! only ever moves from open to locked.

use crate::config::ContestConfig;
use crate::types::{Cost, HorseId, Odds, RaceId, StableNumber, Timestamp, TournamentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Horse {
    pub id: HorseId,
    pub race_id: RaceId,
    pub number: StableNumber,
    pub name: String,
    pub jockey: String,
    pub trainer: String,
    pub odds: Odds,
    /// Virtual acquisition cost. `None` until the pricing pass runs;
    /// derived from odds, never user-supplied afterwards.
    pub cost: Option<Cost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub tournament_id: TournamentId,
    /// Ordinal on the card, unique within the tournament.
    pub number: u32,
    pub name: String,
    pub track: String,
    pub post_time: Timestamp,
    pub horses: Vec<Horse>,
}

impl Race {
    pub fn horse_by_number(&self, number: StableNumber) -> Option<&Horse> {
        self.horses.iter().find(|h| h.number == number)
    }

    pub fn horse(&self, horse_id: HorseId) -> Option<&Horse> {
        self.horses.iter().find(|h| h.id == horse_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub entry_fee: Cost,
    pub total_budget: Cost,
    /// Monotonic: once true, entries can no longer be created or changed.
    pub is_locked: bool,
    pub races: Vec<Race>,
    pub config: ContestConfig,
    pub created_at: Timestamp,
}

impl Tournament {
    pub fn new(
        id: TournamentId,
        name: String,
        config: ContestConfig,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            entry_fee: config.entry_fee,
            total_budget: config.total_budget,
            is_locked: false,
            races: Vec::new(),
            config,
            created_at: timestamp,
        }
    }

    /// One-way transition. Returns whether this call changed anything.
    pub fn lock(&mut self) -> bool {
        let was_open = !self.is_locked;
        self.is_locked = true;
        was_open
    }

    pub fn race(&self, race_id: RaceId) -> Option<&Race> {
        self.races.iter().find(|r| r.id == race_id)
    }

    pub fn race_mut(&mut self, race_id: RaceId) -> Option<&mut Race> {
        self.races.iter_mut().find(|r| r.id == race_id)
    }

    /// Look a horse up across every race of the card.
    pub fn horse(&self, horse_id: HorseId) -> Option<&Horse> {
        self.races.iter().find_map(|r| r.horse(horse_id))
    }

    pub fn add_race(&mut self, race: Race) -> Result<(), TournamentError> {
        if self.is_locked {
            return Err(TournamentError::TournamentLocked(self.id));
        }
        if self.races.iter().any(|r| r.number == race.number) {
            return Err(TournamentError::DuplicateRaceNumber {
                tournament_id: self.id,
                number: race.number,
            });
        }
        self.races.push(race);
        self.races.sort_by_key(|r| r.number);
        Ok(())
    }

    pub fn add_horse(&mut self, race_id: RaceId, horse: Horse) -> Result<(), TournamentError> {
        if self.is_locked {
            return Err(TournamentError::TournamentLocked(self.id));
        }
        let race = self
            .race_mut(race_id)
            .ok_or(TournamentError::RaceNotFound(race_id))?;
        if race.horse_by_number(horse.number).is_some() {
            return Err(TournamentError::DuplicateStableNumber {
                race_id,
                number: horse.number,
            });
        }
        race.horses.push(horse);
        Ok(())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TournamentError {
    #[error("Tournament {0:?} is locked")]
    TournamentLocked(TournamentId),

    #[error("Race number {number} already exists in tournament {tournament_id:?}")]
    DuplicateRaceNumber {
        tournament_id: TournamentId,
        number: u32,
    },

    #[error("Stable number {number} already exists in race {race_id:?}")]
    DuplicateStableNumber {
        race_id: RaceId,
        number: StableNumber,
    },

    #[error("Race {0:?} not found")]
    RaceNotFound(RaceId),

    #[error("Horse {0:?} not found")]
    HorseNotFound(HorseId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContestConfig;
    use rust_decimal_macros::dec;

    fn test_tournament() -> Tournament {
        Tournament::new(
            TournamentId(1),
            "Keeneland Challenge".to_string(),
            ContestConfig::default(),
            Timestamp::from_millis(0),
        )
    }

    fn test_race(id: u64, number: u32) -> Race {
        Race {
            id: RaceId(id),
            tournament_id: TournamentId(1),
            number,
            name: format!("Race {number}"),
            track: "Keeneland".to_string(),
            post_time: Timestamp::from_millis(number as i64 * 1_800_000),
            horses: Vec::new(),
        }
    }

    fn test_horse(id: u64, race: u64, number: u32) -> Horse {
        Horse {
            id: HorseId(id),
            race_id: RaceId(race),
            number: StableNumber::new(number).unwrap(),
            name: format!("Horse {number}"),
            jockey: "J. Rosario".to_string(),
            trainer: "T. Pletcher".to_string(),
            odds: Odds::new(dec!(4)).unwrap(),
            cost: None,
        }
    }

    #[test]
    fn race_numbers_unique_within_tournament() {
        let mut tournament = test_tournament();
        tournament.add_race(test_race(1, 1)).unwrap();

        let result = tournament.add_race(test_race(2, 1));
        assert!(matches!(
            result,
            Err(TournamentError::DuplicateRaceNumber { number: 1, .. })
        ));
    }

    #[test]
    fn races_kept_in_card_order() {
        let mut tournament = test_tournament();
        tournament.add_race(test_race(1, 3)).unwrap();
        tournament.add_race(test_race(2, 1)).unwrap();
        tournament.add_race(test_race(3, 2)).unwrap();

        let numbers: Vec<u32> = tournament.races.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn stable_numbers_unique_within_race() {
        let mut tournament = test_tournament();
        tournament.add_race(test_race(1, 1)).unwrap();
        tournament.add_horse(RaceId(1), test_horse(1, 1, 4)).unwrap();

        let result = tournament.add_horse(RaceId(1), test_horse(2, 1, 4));
        assert!(matches!(
            result,
            Err(TournamentError::DuplicateStableNumber { .. })
        ));
    }

    #[test]
    fn same_stable_number_allowed_across_races() {
        let mut tournament = test_tournament();
        tournament.add_race(test_race(1, 1)).unwrap();
        tournament.add_race(test_race(2, 2)).unwrap();

        tournament.add_horse(RaceId(1), test_horse(1, 1, 4)).unwrap();
        tournament.add_horse(RaceId(2), test_horse(2, 2, 4)).unwrap();
    }

    #[test]
    fn lock_is_one_way() {
        let mut tournament = test_tournament();
        assert!(tournament.lock());
        assert!(tournament.is_locked);
        // a second lock is a no-op, never an unlock
        assert!(!tournament.lock());
        assert!(tournament.is_locked);
    }

    #[test]
    fn locked_tournament_rejects_setup_changes() {
        let mut tournament = test_tournament();
        tournament.add_race(test_race(1, 1)).unwrap();
        tournament.lock();

        assert!(matches!(
            tournament.add_race(test_race(2, 2)),
            Err(TournamentError::TournamentLocked(_))
        ));
        assert!(matches!(
            tournament.add_horse(RaceId(1), test_horse(1, 1, 1)),
            Err(TournamentError::TournamentLocked(_))
        ));
    }

    #[test]
    fn horse_lookup_across_card() {
        let mut tournament = test_tournament();
        tournament.add_race(test_race(1, 1)).unwrap();
        tournament.add_horse(RaceId(1), test_horse(7, 1, 3)).unwrap();

        let horse = tournament.horse(HorseId(7)).unwrap();
        assert_eq!(horse.number.value(), 3);
        assert!(tournament.horse(HorseId(99)).is_none());
    }
}
