//! Tournament setup operations: card building, pricing, lock.
//!
//! These are the contest-setup collaborator's entry points. The card is built
//! race by race, priced in one pass, and then locked before players enter.

use super::core::Engine;
use super::outcomes::EngineError;
use crate::config::ContestConfig;
use crate::events::{
    EventPayload, PricesAssignedEvent, TournamentCreatedEvent, TournamentLockedEvent,
};
use crate::pricing::price;
use crate::tournament::{Horse, Race, Tournament, TournamentError};
use crate::types::{HorseId, Odds, RaceId, StableNumber, Timestamp, TournamentId};

impl Engine {
    /// Create a tournament from a validated contest configuration.
    pub fn create_tournament(
        &mut self,
        name: &str,
        config: ContestConfig,
    ) -> Result<TournamentId, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        let id = TournamentId(self.next_tournament_id);
        self.next_tournament_id += 1;

        let tournament = Tournament::new(id, name.to_string(), config, self.current_time);

        self.emit_event(EventPayload::TournamentCreated(TournamentCreatedEvent {
            tournament_id: id,
            name: tournament.name.clone(),
            total_budget: tournament.total_budget,
            entry_fee: tournament.entry_fee,
        }));

        self.tournaments.insert(id, tournament);
        Ok(id)
    }

    /// Add a race to the card. Race numbers must be unique within the tournament.
    pub fn add_race(
        &mut self,
        tournament_id: TournamentId,
        number: u32,
        name: &str,
        track: &str,
        post_time: Timestamp,
    ) -> Result<RaceId, EngineError> {
        let race_id = RaceId(self.next_race_id);

        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;

        tournament.add_race(Race {
            id: race_id,
            tournament_id,
            number,
            name: name.to_string(),
            track: track.to_string(),
            post_time,
            horses: Vec::new(),
        })?;

        self.next_race_id += 1;
        Ok(race_id)
    }

    /// Add a horse to a race. Stable numbers must be unique within the race.
    /// The cost starts unset; `assign_prices` derives it from the odds.
    #[allow(clippy::too_many_arguments)]
    pub fn add_horse(
        &mut self,
        tournament_id: TournamentId,
        race_id: RaceId,
        number: StableNumber,
        name: &str,
        jockey: &str,
        trainer: &str,
        odds: Odds,
    ) -> Result<HorseId, EngineError> {
        let horse_id = HorseId(self.next_horse_id);

        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;

        tournament.add_horse(
            race_id,
            Horse {
                id: horse_id,
                race_id,
                number,
                name: name.to_string(),
                jockey: jockey.to_string(),
                trainer: trainer.to_string(),
                odds,
                cost: None,
            },
        )?;

        self.next_horse_id += 1;
        Ok(horse_id)
    }

    /// Price every horse in the tournament from its odds. Costs persist on
    /// the horse records; the returned count is how many were priced.
    /// Re-running before lock simply recomputes; after lock the card is frozen.
    pub fn assign_prices(&mut self, tournament_id: TournamentId) -> Result<usize, EngineError> {
        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;

        if tournament.is_locked {
            return Err(EngineError::Tournament(TournamentError::TournamentLocked(
                tournament_id,
            )));
        }

        let params = tournament.config.pricing.clone();
        let mut priced = 0usize;
        for race in &mut tournament.races {
            for horse in &mut race.horses {
                horse.cost = Some(price(horse.odds, &params));
                priced += 1;
            }
        }

        self.emit_event(EventPayload::PricesAssigned(PricesAssignedEvent {
            tournament_id,
            horses_priced: priced,
        }));

        Ok(priced)
    }

    /// Lock the tournament. One-way: entries freeze from here on.
    /// Idempotent; the event fires only on the actual transition.
    pub fn lock_tournament(&mut self, tournament_id: TournamentId) -> Result<bool, EngineError> {
        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;

        let transitioned = tournament.lock();
        if transitioned {
            self.emit_event(EventPayload::TournamentLocked(TournamentLockedEvent {
                tournament_id,
            }));
        }
        Ok(transitioned)
    }
}
