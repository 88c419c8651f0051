//! Roster validation for candidate entries.
//!
//! A decision function the entry-submission layer calls before committing
//! anything. Spend is recomputed from the full candidate picks set on every
//! call; there is no incremental add/subtract bookkeeping, so toggling
//! selections in any order cannot drift the total.
//!
//! Rules are checked in a fixed order and the first failure wins: lock state,
//! horse membership, roster shape, then budget.

use crate::entry::Picks;
use crate::tournament::Tournament;
use crate::types::{Cost, HorseId, RaceId, TournamentId};
use serde::{Deserialize, Serialize};

/// Which entry shape a tournament accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterRules {
    /// One pick per race of the card.
    OnePerRace,
    /// Up to `max_horses` picks from any races.
    FixedRoster { max_horses: usize },
}

impl Default for RosterRules {
    fn default() -> Self {
        Self::OnePerRace
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterDecision {
    /// Summed virtual cost of every pick.
    pub spend: Cost,
    /// Whether the entry is eligible for scoring. A partial entry is
    /// representable and validates against the budget, but only a complete
    /// one competes.
    pub complete: bool,
}

pub fn validate_roster(
    picks: &Picks,
    tournament: &Tournament,
) -> Result<RosterDecision, RosterError> {
    if tournament.is_locked {
        return Err(RosterError::TournamentLocked(tournament.id));
    }

    check_membership(picks, tournament)?;
    let complete = check_shape(picks, tournament)?;
    let spend = compute_spend(picks, tournament)?;

    if spend > tournament.total_budget {
        return Err(RosterError::BudgetExceeded {
            spend,
            budget: tournament.total_budget,
            overage: spend.excess_over(tournament.total_budget),
        });
    }

    Ok(RosterDecision { spend, complete })
}

fn check_membership(picks: &Picks, tournament: &Tournament) -> Result<(), RosterError> {
    match picks {
        Picks::PerRace(map) => {
            for (&race_id, &horse_id) in map {
                let race = tournament
                    .race(race_id)
                    .ok_or(RosterError::ForeignHorse { horse_id })?;
                // the horse must run in the race it is slotted under
                if race.horse(horse_id).is_none() {
                    if tournament.horse(horse_id).is_some() {
                        return Err(RosterError::PickOutsideRace { horse_id, race_id });
                    }
                    return Err(RosterError::ForeignHorse { horse_id });
                }
            }
        }
        Picks::Roster(set) => {
            for &horse_id in set {
                if tournament.horse(horse_id).is_none() {
                    return Err(RosterError::ForeignHorse { horse_id });
                }
            }
        }
    }
    Ok(())
}

fn check_shape(picks: &Picks, tournament: &Tournament) -> Result<bool, RosterError> {
    match (tournament.config.rules, picks) {
        (RosterRules::OnePerRace, Picks::PerRace(_)) => Ok(picks_complete(picks, tournament)),
        (RosterRules::FixedRoster { max_horses }, Picks::Roster(set)) => {
            if set.len() > max_horses {
                return Err(RosterError::RosterTooLarge {
                    count: set.len(),
                    max: max_horses,
                });
            }
            Ok(picks_complete(picks, tournament))
        }
        (rules, _) => Err(RosterError::PickModeMismatch { rules }),
    }
}

/// Whether a picks set makes the entry eligible for scoring. Per-race mode
/// needs every race on the card covered; roster mode needs at least one pick.
/// Incomplete entries stay on the books but earn nothing until finished.
pub fn picks_complete(picks: &Picks, tournament: &Tournament) -> bool {
    match (tournament.config.rules, picks) {
        (RosterRules::OnePerRace, Picks::PerRace(map)) => {
            // the map enforces one slot per race; complete once every race
            // on the card is covered
            !tournament.races.is_empty()
                && tournament.races.iter().all(|r| map.contains_key(&r.id))
        }
        (RosterRules::FixedRoster { .. }, Picks::Roster(set)) => !set.is_empty(),
        _ => false,
    }
}

fn compute_spend(picks: &Picks, tournament: &Tournament) -> Result<Cost, RosterError> {
    let mut spend = Cost::zero();
    for horse_id in picks.horse_ids() {
        // membership already checked
        let horse = tournament
            .horse(horse_id)
            .ok_or(RosterError::ForeignHorse { horse_id })?;
        let cost = horse.cost.ok_or(RosterError::UnpricedHorse { horse_id })?;
        spend = spend.add(cost);
    }
    Ok(spend)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Tournament {0:?} is locked")]
    TournamentLocked(TournamentId),

    #[error("Horse {horse_id:?} does not run in this tournament")]
    ForeignHorse { horse_id: HorseId },

    #[error("Horse {horse_id:?} does not run in race {race_id:?}")]
    PickOutsideRace { horse_id: HorseId, race_id: RaceId },

    #[error("Picks do not match tournament rules {rules:?}")]
    PickModeMismatch { rules: RosterRules },

    #[error("Roster holds {count} horses, maximum is {max}")]
    RosterTooLarge { count: usize, max: usize },

    #[error("Horse {horse_id:?} has no price yet")]
    UnpricedHorse { horse_id: HorseId },

    #[error("Spend {spend} exceeds budget {budget} by {overage}")]
    BudgetExceeded {
        spend: Cost,
        budget: Cost,
        overage: Cost,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContestConfig;
    use crate::tournament::{Horse, Race};
    use crate::types::{Odds, StableNumber, Timestamp};
    use rust_decimal_macros::dec;

    fn build_tournament(rules: RosterRules, budget: u64) -> Tournament {
        let config = ContestConfig {
            rules,
            total_budget: Cost::new(budget),
            ..ContestConfig::default()
        };
        let mut tournament = Tournament::new(
            TournamentId(1),
            "Test Cup".to_string(),
            config,
            Timestamp::from_millis(0),
        );

        for (race_idx, race_id) in [RaceId(1), RaceId(2)].into_iter().enumerate() {
            tournament
                .add_race(Race {
                    id: race_id,
                    tournament_id: TournamentId(1),
                    number: race_idx as u32 + 1,
                    name: format!("Race {}", race_idx + 1),
                    track: "Churchill Downs".to_string(),
                    post_time: Timestamp::from_millis(0),
                    horses: Vec::new(),
                })
                .unwrap();

            for n in 1..=4u32 {
                let horse_id = HorseId(race_idx as u64 * 10 + n as u64);
                tournament
                    .add_horse(
                        race_id,
                        Horse {
                            id: horse_id,
                            race_id,
                            number: StableNumber::new(n).unwrap(),
                            name: format!("Runner {n}"),
                            jockey: "J. Velazquez".to_string(),
                            trainer: "B. Cox".to_string(),
                            odds: Odds::new(dec!(4)).unwrap(),
                            cost: Some(Cost::new(n as u64 * 1000)),
                        },
                    )
                    .unwrap();
            }
        }
        tournament
    }

    #[test]
    fn accepts_within_budget() {
        let tournament = build_tournament(RosterRules::OnePerRace, 10000);
        let picks = Picks::empty_per_race()
            .with_pick(RaceId(1), HorseId(2))
            .with_pick(RaceId(2), HorseId(13));

        let decision = validate_roster(&picks, &tournament).unwrap();
        assert_eq!(decision.spend.value(), 5000);
        assert!(decision.complete);
    }

    #[test]
    fn accepts_spend_exactly_at_budget() {
        let tournament = build_tournament(RosterRules::OnePerRace, 8000);
        let picks = Picks::empty_per_race()
            .with_pick(RaceId(1), HorseId(4))
            .with_pick(RaceId(2), HorseId(14));

        let decision = validate_roster(&picks, &tournament).unwrap();
        assert_eq!(decision.spend, tournament.total_budget);
    }

    #[test]
    fn rejects_over_budget_with_overage() {
        let tournament = build_tournament(RosterRules::OnePerRace, 7000);
        let picks = Picks::empty_per_race()
            .with_pick(RaceId(1), HorseId(4))
            .with_pick(RaceId(2), HorseId(14));

        let err = validate_roster(&picks, &tournament).unwrap_err();
        match err {
            RosterError::BudgetExceeded { spend, budget, overage } => {
                assert_eq!(spend.value(), 8000);
                assert_eq!(budget.value(), 7000);
                assert_eq!(overage.value(), 1000);
            }
            other => panic!("expected BudgetExceeded, got {other:?}"),
        }
    }

    #[test]
    fn partial_entry_validates_but_is_incomplete() {
        let tournament = build_tournament(RosterRules::OnePerRace, 10000);
        let picks = Picks::empty_per_race().with_pick(RaceId(1), HorseId(1));

        let decision = validate_roster(&picks, &tournament).unwrap();
        assert!(!decision.complete);
        assert_eq!(decision.spend.value(), 1000);
    }

    #[test]
    fn locked_tournament_rejects_first() {
        let mut tournament = build_tournament(RosterRules::OnePerRace, 1);
        tournament.lock();
        // over budget too, but the lock check wins
        let picks = Picks::empty_per_race().with_pick(RaceId(1), HorseId(4));

        assert!(matches!(
            validate_roster(&picks, &tournament),
            Err(RosterError::TournamentLocked(_))
        ));
    }

    #[test]
    fn foreign_horse_rejected() {
        let tournament = build_tournament(RosterRules::OnePerRace, 10000);
        let picks = Picks::empty_per_race().with_pick(RaceId(1), HorseId(999));

        assert!(matches!(
            validate_roster(&picks, &tournament),
            Err(RosterError::ForeignHorse { .. })
        ));
    }

    #[test]
    fn horse_slotted_under_wrong_race_rejected() {
        let tournament = build_tournament(RosterRules::OnePerRace, 10000);
        // HorseId(13) runs in race 2, slotted under race 1
        let picks = Picks::empty_per_race().with_pick(RaceId(1), HorseId(13));

        assert!(matches!(
            validate_roster(&picks, &tournament),
            Err(RosterError::PickOutsideRace { .. })
        ));
    }

    #[test]
    fn unpriced_horse_rejected() {
        let mut tournament = build_tournament(RosterRules::OnePerRace, 10000);
        tournament
            .race_mut(RaceId(1))
            .unwrap()
            .horses
            .iter_mut()
            .for_each(|h| h.cost = None);
        let picks = Picks::empty_per_race().with_pick(RaceId(1), HorseId(1));

        assert!(matches!(
            validate_roster(&picks, &tournament),
            Err(RosterError::UnpricedHorse { .. })
        ));
    }

    #[test]
    fn roster_mode_caps_total_picks() {
        let tournament = build_tournament(RosterRules::FixedRoster { max_horses: 2 }, 50000);
        let picks = Picks::empty_roster()
            .with_pick(RaceId(1), HorseId(1))
            .with_pick(RaceId(1), HorseId(2))
            .with_pick(RaceId(2), HorseId(13));

        assert!(matches!(
            validate_roster(&picks, &tournament),
            Err(RosterError::RosterTooLarge { count: 3, max: 2 })
        ));
    }

    #[test]
    fn roster_mode_allows_any_races() {
        let tournament = build_tournament(RosterRules::FixedRoster { max_horses: 4 }, 50000);
        // two horses from the same race is fine in roster mode
        let picks = Picks::empty_roster()
            .with_pick(RaceId(1), HorseId(1))
            .with_pick(RaceId(1), HorseId(2));

        let decision = validate_roster(&picks, &tournament).unwrap();
        assert_eq!(decision.spend.value(), 3000);
        assert!(decision.complete);
    }

    #[test]
    fn pick_shape_must_match_rules() {
        let tournament = build_tournament(RosterRules::OnePerRace, 50000);
        let picks = Picks::empty_roster().with_pick(RaceId(1), HorseId(1));

        assert!(matches!(
            validate_roster(&picks, &tournament),
            Err(RosterError::PickModeMismatch { .. })
        ));
    }

    #[test]
    fn revalidation_is_idempotent() {
        let tournament = build_tournament(RosterRules::OnePerRace, 10000);
        let picks = Picks::empty_per_race()
            .with_pick(RaceId(1), HorseId(3))
            .with_pick(RaceId(2), HorseId(12));

        let first = validate_roster(&picks, &tournament).unwrap();
        let second = validate_roster(&picks, &tournament).unwrap();
        assert_eq!(first, second);
    }
}
