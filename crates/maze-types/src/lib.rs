// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Value types, configuration, and error hierarchy for the
//! Bicameral Maze decision engine.

pub mod config;
pub mod decision;
pub mod error;
pub mod score;
pub mod stimulus;

pub use config::{GateMode, IdentityCore, MazeConfig};
pub use decision::{Decision, MemoryTrace};
pub use error::{MazeError, MazeResult};
pub use score::{clamp_score, clamp_unit, ema, round_to, Action, ActionValues};
pub use stimulus::Stimulus;
