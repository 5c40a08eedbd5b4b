//! Game rules for the four-row Maker-Breaker game
//!
//! This module implements:
//! - The catalog of winning lines
//! - Threat analysis (win threats, forcing moves, forks) and legal moves

pub mod lines;
pub mod threat;

// Re-exports for convenient access
pub use lines::{Direction, LineCatalog};
pub use threat::{Outcome, ThreatState};
