// 8.0: every state change produces an event. used for audit trails, state
// reconstruction, and notifying external systems (the results-entry and
// leaderboard-display collaborators). the EventPayload enum lists all event types.

use crate::types::{
    Cost, EntryId, OwnerId, Points, RaceId, StableNumber, Timestamp, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Setup events
    TournamentCreated(TournamentCreatedEvent),
    PricesAssigned(PricesAssignedEvent),
    TournamentLocked(TournamentLockedEvent),

    // Entry events
    EntrySubmitted(EntrySubmittedEvent),
    EntryUpdated(EntryUpdatedEvent),
    EntryRejected(EntryRejectedEvent),

    // Results events
    ResultRecorded(ResultRecordedEvent),
    LeaderboardUpdated(LeaderboardUpdatedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentCreatedEvent {
    pub tournament_id: TournamentId,
    pub name: String,
    pub total_budget: Cost,
    pub entry_fee: Cost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesAssignedEvent {
    pub tournament_id: TournamentId,
    pub horses_priced: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentLockedEvent {
    pub tournament_id: TournamentId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySubmittedEvent {
    pub tournament_id: TournamentId,
    pub entry_id: EntryId,
    pub owner: OwnerId,
    pub spend: Cost,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryUpdatedEvent {
    pub tournament_id: TournamentId,
    pub entry_id: EntryId,
    pub spend: Cost,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRejectedEvent {
    pub tournament_id: TournamentId,
    pub owner: OwnerId,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecordedEvent {
    pub race_id: RaceId,
    pub first: BTreeSet<StableNumber>,
    pub second: BTreeSet<StableNumber>,
    pub third: BTreeSet<StableNumber>,
    /// Whether this overwrote a previously recorded result.
    pub replaced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardUpdatedEvent {
    pub tournament_id: TournamentId,
    pub entries_ranked: usize,
    pub leading_points: Points,
}

pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
    next_id: u64,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl EventEmitter for EventCollector {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
