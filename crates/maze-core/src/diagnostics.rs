// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Diagnostic Decision Log
// ─────────────────────────────────────────────────────────────────────
//! One record per cycle, in the shape external harnesses consume.
//! Utilities, intent strength and outcome are rounded to 3 decimals,
//! regret to 4.

use serde::{Deserialize, Serialize};

use maze_types::{Action, ActionValues};

use crate::state::StateSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionLog {
    /// 1-based cycle index.
    pub step: u64,
    /// Stimulus label.
    pub stimulus: String,
    pub state_before: StateSnapshot,
    pub intent: String,
    pub intent_strength: f64,
    pub base_utility: ActionValues,
    pub used_inner_voice: bool,
    pub audit_delta: ActionValues,
    pub constraint_penalty: ActionValues,
    pub veto: bool,
    pub final_utility: ActionValues,
    pub decision: Action,
    pub regret: f64,
    pub audit_changed_action: bool,
    /// Filled by `step`; `None` after a bare `decide`.
    #[serde(default)]
    pub outcome: Option<f64>,
    #[serde(default)]
    pub state_after: Option<StateSnapshot>,
}

impl DecisionLog {
    /// The cycle ran through `step` and has an outcome.
    pub fn is_committed(&self) -> bool {
        self.outcome.is_some()
    }
}
