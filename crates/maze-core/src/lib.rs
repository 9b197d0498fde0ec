// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Core Decision Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Decision engine for an agent that drifts from external rule-following
//! towards trusting its own inner-voice audit.
//!
//! Each cycle layers three utility contributions (baseline policy, soft
//! audit, hard identity constraints) and picks the argmax. Afterwards the
//! state vector drifts by moving averages of the world's outcome.
//!
//! # Invariants
//!
//! 1. **Bounded state**: every `MazeState` field is in [0, 1] after every
//!    `step`. Non-finite inputs and outcomes are clamped, never propagated.
//!
//! 2. **Veto is an override**: when the identity veto fires, the final
//!    `Act` utility is exactly 0.0. `Act` can then only win a three-way
//!    tie at zero.
//!
//! 3. **One random stream**: a single seeded `ChaCha20Rng` feeds both the
//!    probability gate and the world. Threshold mode and a disabled inner
//!    voice consume nothing from it.
//!
//! 4. **Ablation is clean**: with the inner voice disabled, no audit or
//!    constraint term is ever non-zero and `audit_invoked` stays 0.

pub mod desire;
pub mod diagnostics;
pub mod episode;
pub mod inner_voice;
pub mod maze;
pub mod metrics;
pub mod policy;
pub mod state;
pub mod world;

pub use desire::{DesireEngine, ImpulseField, ImpulseType, Intent};
pub use diagnostics::DecisionLog;
pub use episode::{count_divergent_decisions, run_episode, EpisodeReport};
pub use inner_voice::{InnerVoice, Verdict};
pub use maze::BicameralMaze;
pub use metrics::{Metrics, MetricsSummary};
pub use policy::Policy;
pub use state::{MazeState, StateSnapshot, VoiceSource};
pub use world::{ExternalWorld, ToyWorld, World};
