// 6.0: standings. folds every entry's per-race scores into a ranked leaderboard.
// always a full recompute from the recorded results, so it can be re-run at any
// time (and concurrently with result entry) and lands on the same answer.
// ordered by points, ties broken by earliest entry, then entry id for a total order.

use crate::entry::{Entry, Picks};
use crate::results::RaceResult;
use crate::roster::picks_complete;
use crate::scoring::{score_picks, PointTable};
use crate::tournament::{Race, Tournament};
use crate::types::{EntryId, OwnerId, Points, RaceId, StableNumber, Timestamp, TournamentId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One leaderboard row. Derived data: replaced wholesale on every
/// recompute, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub tournament_id: TournamentId,
    pub owner: OwnerId,
    pub entry_id: EntryId,
    pub total_points: Points,
    /// 1-based, strictly sequential. Point ties still get distinct ranks.
    pub rank: u32,
    pub updated_at: Timestamp,
}

// 6.1: the stable numbers an entry has running in one race.
pub fn picked_numbers(picks: &Picks, race: &Race) -> Vec<StableNumber> {
    match picks {
        Picks::PerRace(_) => picks
            .pick_for_race(race.id)
            .and_then(|horse_id| race.horse(horse_id))
            .map(|h| vec![h.number])
            .unwrap_or_default(),
        Picks::Roster(set) => race
            .horses
            .iter()
            .filter(|h| set.contains(&h.id))
            .map(|h| h.number)
            .collect(),
    }
}

// 6.2: an entry's total across every race with a complete recorded result.
// races still unscored contribute nothing, and an entry that is not yet
// complete holds at zero until it is.
pub fn entry_total(
    entry: &Entry,
    tournament: &Tournament,
    results: &HashMap<RaceId, RaceResult>,
    table: &PointTable,
) -> Points {
    if !picks_complete(&entry.picks, tournament) {
        return Points::zero();
    }

    tournament
        .races
        .iter()
        .filter_map(|race| results.get(&race.id).map(|result| (race, result)))
        .filter(|(_, result)| result.is_complete())
        .map(|(race, result)| score_picks(result, &picked_numbers(&entry.picks, race), table))
        .sum()
}

#[derive(Debug, Clone)]
struct RankedEntry {
    entry_id: EntryId,
    owner: OwnerId,
    total_points: Points,
    created_at: Timestamp,
}

impl PartialEq for RankedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.entry_id == other.entry_id
    }
}

impl Eq for RankedEntry {}

impl PartialOrd for RankedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // most points first; earliest entrant wins point ties; entry id
        // makes the order total
        other
            .total_points
            .cmp(&self.total_points)
            .then(self.created_at.cmp(&other.created_at))
            .then(self.entry_id.cmp(&other.entry_id))
    }
}

// 6.3: ranked standings for a tournament. every entry appears, scored or not.
pub fn rank_entries<'a>(
    tournament: &Tournament,
    entries: impl Iterator<Item = &'a Entry>,
    results: &HashMap<RaceId, RaceResult>,
    now: Timestamp,
) -> Vec<Standing> {
    let table = &tournament.config.points;

    let mut ranked: Vec<RankedEntry> = entries
        .filter(|e| e.tournament_id == tournament.id)
        .map(|entry| RankedEntry {
            entry_id: entry.id,
            owner: entry.owner,
            total_points: entry_total(entry, tournament, results, table),
            created_at: entry.created_at,
        })
        .collect();

    ranked.sort();

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, r)| Standing {
            tournament_id: tournament.id,
            owner: r.owner,
            entry_id: r.entry_id,
            total_points: r.total_points,
            rank: i as u32 + 1,
            updated_at: now,
        })
        .collect()
}
