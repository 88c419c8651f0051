//! Result ingestion and leaderboard recomputation.

use super::core::Engine;
use super::outcomes::{EngineError, ResultReceipt};
use crate::events::{EventPayload, LeaderboardUpdatedEvent, ResultRecordedEvent};
use crate::leaderboard::{rank_entries, Standing};
use crate::results::normalize_result;
use crate::types::{Points, RaceId, TournamentId};

impl Engine {
    /// Normalize and record a race's finish. Recording replaces any prior
    /// result for the race, so re-submitting the same finish (or a
    /// correction) is safe under retry and never double-counts.
    pub fn record_result(
        &mut self,
        race_id: RaceId,
        raw_first: &str,
        raw_second: &str,
        raw_third: &str,
    ) -> Result<ResultReceipt, EngineError> {
        let tournament_id = self
            .tournament_of_race(race_id)
            .ok_or(EngineError::RaceNotFound(race_id))?;

        // normalize against the race's actual field
        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;
        let race = tournament
            .race(race_id)
            .ok_or(EngineError::RaceNotFound(race_id))?;

        let result = normalize_result(race, raw_first, raw_second, raw_third)?;
        let complete = result.is_complete();

        let replaced = self.results.insert(race_id, result.clone()).is_some();

        self.emit_event(EventPayload::ResultRecorded(ResultRecordedEvent {
            race_id,
            first: result.first,
            second: result.second,
            third: result.third,
            replaced,
        }));

        Ok(ResultReceipt {
            race_id,
            replaced,
            complete,
        })
    }

    /// Recompute the tournament's standings from scratch and replace the
    /// stored rows. Safe to call any number of times; with unchanged results
    /// the output is identical.
    pub fn recompute_leaderboard(
        &mut self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Standing>, EngineError> {
        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;

        let standings = rank_entries(
            tournament,
            self.entries.values(),
            &self.results,
            self.current_time,
        );

        let leading_points = standings
            .first()
            .map(|s| s.total_points)
            .unwrap_or(Points::zero());

        self.emit_event(EventPayload::LeaderboardUpdated(LeaderboardUpdatedEvent {
            tournament_id,
            entries_ranked: standings.len(),
            leading_points,
        }));

        self.standings.insert(tournament_id, standings.clone());
        Ok(standings)
    }
}
