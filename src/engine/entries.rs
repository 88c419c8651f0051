//! Entry submission and re-selection.
//!
//! The engine validates every candidate picks set in full before anything is
//! stored. A swap is an atomic replace of the whole set, so spend can never
//! drift from toggling order. Rejections leave an audit event behind, same as
//! acceptances.

use super::core::Engine;
use super::outcomes::{EngineError, EntryReceipt};
use crate::entry::{Entry, Picks};
use crate::events::{EntryRejectedEvent, EntrySubmittedEvent, EntryUpdatedEvent, EventPayload};
use crate::roster::{validate_roster, RosterDecision};
use crate::types::{EntryId, OwnerId, TournamentId};

impl Engine {
    /// Dry-run validation for a candidate picks set. What the selection UI
    /// calls while the player is still building a stable.
    pub fn validate_picks(
        &self,
        tournament_id: TournamentId,
        picks: &Picks,
    ) -> Result<RosterDecision, EngineError> {
        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;
        Ok(validate_roster(picks, tournament)?)
    }

    /// Validate and persist a new entry.
    pub fn submit_entry(
        &mut self,
        tournament_id: TournamentId,
        owner: OwnerId,
        stable_name: &str,
        picks: Picks,
    ) -> Result<EntryReceipt, EngineError> {
        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;

        let decision = match validate_roster(&picks, tournament) {
            Ok(decision) => decision,
            Err(e) => {
                self.emit_event(EventPayload::EntryRejected(EntryRejectedEvent {
                    tournament_id,
                    owner,
                    reason: e.to_string(),
                }));
                return Err(EngineError::Roster(e));
            }
        };

        let entry_id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;

        let entry = Entry::new(
            entry_id,
            tournament_id,
            owner,
            stable_name.to_string(),
            picks,
            self.current_time,
        );
        self.entries.insert(entry_id, entry);

        self.emit_event(EventPayload::EntrySubmitted(EntrySubmittedEvent {
            tournament_id,
            entry_id,
            owner,
            spend: decision.spend,
            complete: decision.complete,
        }));

        Ok(EntryReceipt {
            entry_id,
            spend: decision.spend,
            complete: decision.complete,
        })
    }

    /// Replace an entry's picks wholesale. The candidate set is validated
    /// exactly like a fresh submission; on failure the stored entry is
    /// untouched.
    pub fn update_entry(
        &mut self,
        entry_id: EntryId,
        picks: Picks,
    ) -> Result<EntryReceipt, EngineError> {
        let entry = self
            .entries
            .get(&entry_id)
            .ok_or(EngineError::EntryNotFound(entry_id))?;
        let tournament_id = entry.tournament_id;
        let owner = entry.owner;

        let tournament = self
            .tournaments
            .get(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;

        let decision = match validate_roster(&picks, tournament) {
            Ok(decision) => decision,
            Err(e) => {
                self.emit_event(EventPayload::EntryRejected(EntryRejectedEvent {
                    tournament_id,
                    owner,
                    reason: e.to_string(),
                }));
                return Err(EngineError::Roster(e));
            }
        };

        // validated; commit the replacement
        if let Some(entry) = self.entries.get_mut(&entry_id) {
            entry.picks = picks;
        }

        self.emit_event(EventPayload::EntryUpdated(EntryUpdatedEvent {
            tournament_id,
            entry_id,
            spend: decision.spend,
            complete: decision.complete,
        }));

        Ok(EntryReceipt {
            entry_id,
            spend: decision.spend,
            complete: decision.complete,
        })
    }
}
