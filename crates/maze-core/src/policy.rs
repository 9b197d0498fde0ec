// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Baseline Policy
// ─────────────────────────────────────────────────────────────────────

use maze_types::{clamp_unit, ActionValues, Stimulus};

use crate::state::MazeState;

/// Closed-form baseline utility, computed before any audit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy;

impl Policy {
    pub fn new() -> Self {
        Self
    }

    /// Per-action utility in [0, 1]. Pure function of its inputs.
    pub fn utility(&self, stimulus: &Stimulus, intent_strength: f64, state: &MazeState) -> ActionValues {
        let risk = stimulus.risk;
        let ambiguity = stimulus.ambiguity;

        // favours strong intent in calm, clear situations
        let act = 0.35 + 0.45 * intent_strength + 0.15 * (1.0 - risk) + 0.10 * (1.0 - ambiguity)
            - 0.10 * risk;

        let wait = 0.30 + 0.30 * risk + 0.10 * ambiguity + 0.10 * (1.0 - state.memory_trust);

        let introspection = if stimulus.requires_introspection { 0.10 } else { 0.0 };
        let ask = 0.25 + 0.35 * ambiguity + introspection + 0.05 * (1.0 - state.coherence);

        ActionValues::new(act, wait, ask).map(clamp_unit)
    }
}
