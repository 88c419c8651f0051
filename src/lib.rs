// stable-core: fantasy horse-racing contest engine.
// fairness-first architecture: pricing, budget validation and scoring take priority.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: ids, StableNumber, Odds, Cost, Points, Timestamp
//   2.x  pricing.rs: morning-line odds -> virtual cost
//   3.x  entry.rs: player entries, per-race and fixed-roster pick modes
//        roster.rs: budget/lock/membership validation of candidate picks
//   4.x  results.rs: raw finish strings -> structured results, dead heats
//   5.x  scoring.rs: result + picks -> points
//   6.x  leaderboard.rs: ranked standings with deterministic tie-break
//   7.x  config.rs: contest settings, presets, validation
//   8.x  events.rs: state transition events for audit
//   9.x  engine/: coordinator: setup, pricing, entries, results, standings
//        tournament.rs: tournament/race/horse records and card invariants

// core contest modules
pub mod entry;
pub mod leaderboard;
pub mod pricing;
pub mod results;
pub mod roster;
pub mod scoring;
pub mod tournament;
pub mod types;

// integration modules
pub mod config;
pub mod engine;
pub mod events;

// re exports for convenience
pub use config::{ConfigError, ContestConfig};
pub use engine::*;
pub use entry::*;
pub use events::*;
pub use leaderboard::*;
pub use pricing::*;
pub use results::*;
pub use roster::*;
pub use scoring::*;
pub use tournament::*;
pub use types::*;
