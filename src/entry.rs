// 3.0: a player's entry. picks plus the identity of who owns them.
// picks come in two shapes depending on tournament rules: one horse per race
// (the classic card game) or a flat roster of up to K horses from any races.
// total cost is never stored. it is recomputed from current picks and current
// horse costs every time it matters.

use crate::types::{EntryId, HorseId, OwnerId, RaceId, Timestamp, TournamentId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Picks {
    /// One chosen horse per race, keyed by race.
    PerRace(BTreeMap<RaceId, HorseId>),
    /// Unordered set of horses, no per-race constraint.
    Roster(BTreeSet<HorseId>),
}

impl Picks {
    pub fn empty_per_race() -> Self {
        Self::PerRace(BTreeMap::new())
    }

    pub fn empty_roster() -> Self {
        Self::Roster(BTreeSet::new())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::PerRace(map) => map.len(),
            Self::Roster(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn horse_ids(&self) -> Box<dyn Iterator<Item = HorseId> + '_> {
        match self {
            Self::PerRace(map) => Box::new(map.values().copied()),
            Self::Roster(set) => Box::new(set.iter().copied()),
        }
    }

    pub fn pick_for_race(&self, race_id: RaceId) -> Option<HorseId> {
        match self {
            Self::PerRace(map) => map.get(&race_id).copied(),
            Self::Roster(_) => None,
        }
    }

    /// Atomic replace of the pick in one slot. Building a candidate picks set
    /// this way and re-validating the whole thing is the only supported way
    /// to change a selection; there is no incremental spend bookkeeping.
    pub fn with_pick(&self, race_id: RaceId, horse_id: HorseId) -> Self {
        match self {
            Self::PerRace(map) => {
                let mut next = map.clone();
                next.insert(race_id, horse_id);
                Self::PerRace(next)
            }
            Self::Roster(set) => {
                let mut next = set.clone();
                next.insert(horse_id);
                Self::Roster(next)
            }
        }
    }

    pub fn without_pick(&self, race_id: RaceId, horse_id: HorseId) -> Self {
        match self {
            Self::PerRace(map) => {
                let mut next = map.clone();
                next.remove(&race_id);
                Self::PerRace(next)
            }
            Self::Roster(set) => {
                let mut next = set.clone();
                next.remove(&horse_id);
                Self::Roster(next)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub tournament_id: TournamentId,
    pub owner: OwnerId,
    /// Display name for the player's stable.
    pub stable_name: String,
    pub picks: Picks,
    pub created_at: Timestamp,
}

impl Entry {
    pub fn new(
        id: EntryId,
        tournament_id: TournamentId,
        owner: OwnerId,
        stable_name: String,
        picks: Picks,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            tournament_id,
            owner,
            stable_name,
            picks,
            created_at: timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_race_replace_is_atomic() {
        let picks = Picks::empty_per_race()
            .with_pick(RaceId(1), HorseId(10))
            .with_pick(RaceId(2), HorseId(20));

        // swapping the race-1 pick replaces, never accumulates
        let swapped = picks.with_pick(RaceId(1), HorseId(11));
        assert_eq!(swapped.len(), 2);
        assert_eq!(swapped.pick_for_race(RaceId(1)), Some(HorseId(11)));
        // original is untouched
        assert_eq!(picks.pick_for_race(RaceId(1)), Some(HorseId(10)));
    }

    #[test]
    fn deselect_removes_slot() {
        let picks = Picks::empty_per_race().with_pick(RaceId(1), HorseId(10));
        let cleared = picks.without_pick(RaceId(1), HorseId(10));
        assert!(cleared.is_empty());
    }

    #[test]
    fn roster_ignores_duplicate_adds() {
        let picks = Picks::empty_roster()
            .with_pick(RaceId(1), HorseId(10))
            .with_pick(RaceId(2), HorseId(10));
        assert_eq!(picks.len(), 1);
    }

    #[test]
    fn roster_has_no_per_race_slot() {
        let picks = Picks::empty_roster().with_pick(RaceId(1), HorseId(10));
        assert_eq!(picks.pick_for_race(RaceId(1)), None);
    }
}
