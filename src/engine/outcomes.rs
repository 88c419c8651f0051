// 9.0.2: receipt types and errors for engine operations.

use crate::config::ConfigError;
use crate::pricing::PricingError;
use crate::results::ResultError;
use crate::roster::RosterError;
use crate::tournament::TournamentError;
use crate::types::{Cost, EntryId, RaceId, TournamentId};

#[derive(Debug, Clone)]
pub struct EntryReceipt {
    pub entry_id: EntryId,
    pub spend: Cost,
    pub complete: bool,
}

#[derive(Debug, Clone)]
pub struct ResultReceipt {
    pub race_id: RaceId,
    /// Whether a previously recorded result was overwritten.
    pub replaced: bool,
    /// Whether all three positions are now filled.
    pub complete: bool,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Tournament {0:?} not found")]
    TournamentNotFound(TournamentId),

    #[error("Race {0:?} not found")]
    RaceNotFound(RaceId),

    #[error("Entry {0:?} not found")]
    EntryNotFound(EntryId),

    #[error("Invalid contest config: {0:?}")]
    InvalidConfig(ConfigError),

    #[error("Tournament error: {0}")]
    Tournament(#[from] TournamentError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Result error: {0}")]
    Results(#[from] ResultError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}
