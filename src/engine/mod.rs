// 9.0: contest engine. coordinates tournament setup, pricing, entry
// validation, result ingestion, and leaderboard recomputation.
// deterministic and event-driven with no external I/O.

mod config;
mod core;
mod entries;
mod outcomes;
mod scoring;
mod setup;

pub use config::EngineConfig;
pub use core::Engine;
pub use outcomes::{EngineError, EntryReceipt, ResultReceipt};
