// src/lib.rs
// Public library surface for the CLI and integration tests.

// Matching core (pure, no I/O)
pub mod banks;
pub mod edits;
pub mod engine;
pub mod interview;
pub mod keywords;
pub mod phrases;
pub mod scoring;
pub mod text;

// Dev diagnostics
pub mod debug;

// Adapters around the core: input collection and report files
pub mod input;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::banks::Banks;
pub use crate::edits::{EditTarget, SuggestedEdit};
pub use crate::engine::{run_agent, Copilot, OutputPacket};
pub use crate::scoring::MatchScores;
