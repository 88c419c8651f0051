// 9.1 engine/core.rs: main engine. holds all tournaments, entries, results, standings.

use super::config::EngineConfig;
use crate::entry::Entry;
use crate::events::{Event, EventId, EventPayload};
use crate::leaderboard::Standing;
use crate::results::RaceResult;
use crate::tournament::Tournament;
use crate::types::{EntryId, RaceId, Timestamp, TournamentId};
use std::collections::HashMap;

/** 9.1.1: main engine struct. all state lives here */
#[derive(Debug)]
pub struct Engine {
    pub(super) config: EngineConfig,
    pub(super) tournaments: HashMap<TournamentId, Tournament>,
    pub(super) entries: HashMap<EntryId, Entry>,
    pub(super) results: HashMap<RaceId, RaceResult>,
    pub(super) standings: HashMap<TournamentId, Vec<Standing>>,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) next_tournament_id: u32,
    pub(super) next_race_id: u64,
    pub(super) next_horse_id: u64,
    pub(super) next_entry_id: u64,
    pub(super) current_time: Timestamp,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            tournaments: HashMap::new(),
            entries: HashMap::new(),
            results: HashMap::new(),
            standings: HashMap::new(),
            events: Vec::new(),
            next_event_id: 1,
            next_tournament_id: 1,
            next_race_id: 1,
            next_horse_id: 1,
            next_entry_id: 1,
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn get_tournament(&self, tournament_id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&tournament_id)
    }

    pub fn get_entry(&self, entry_id: EntryId) -> Option<&Entry> {
        self.entries.get(&entry_id)
    }

    pub fn entries_for(&self, tournament_id: TournamentId) -> impl Iterator<Item = &Entry> {
        self.entries
            .values()
            .filter(move |e| e.tournament_id == tournament_id)
    }

    pub fn get_result(&self, race_id: RaceId) -> Option<&RaceResult> {
        self.results.get(&race_id)
    }

    /// Last-aggregated standings, the rows the display layer reads.
    pub fn get_standings(&self, tournament_id: TournamentId) -> &[Standing] {
        self.standings
            .get(&tournament_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The tournament a race belongs to, if any.
    pub(super) fn tournament_of_race(&self, race_id: RaceId) -> Option<TournamentId> {
        self.tournaments
            .values()
            .find(|t| t.race(race_id).is_some())
            .map(|t| t.id)
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            println!("[Event {}] {:?}", event.id.0, event.payload);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}
