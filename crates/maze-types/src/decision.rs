// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Decision and Memory Trace
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::score::{Action, ActionValues};
use crate::stimulus::Stimulus;

/// Immutable result of one decision cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Selected action (argmax of `utility`).
    pub action: Action,
    /// Human-readable summary of the chosen action's contributions.
    pub reasoning: String,
    /// The inner voice was gated in this cycle.
    pub used_inner_voice: bool,
    /// The hard identity veto forced `utility[Act]` to 0.0.
    pub veto_applied: bool,
    /// Soft audit adjustments (all zero when not gated in).
    pub audit_delta: ActionValues,
    /// Hard constraint adjustments (all zero when not gated in).
    pub constraint_penalty: ActionValues,
    /// Final clamped utility after all layers.
    pub utility: ActionValues,
}

impl Decision {
    /// `max(utility) - utility[action]`.
    pub fn regret(&self) -> f64 {
        self.utility.max_value() - self.utility[self.action]
    }
}

/// One committed cycle, kept in the bounded observability buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryTrace {
    pub stimulus: Stimulus,
    pub decision: Decision,
    /// World outcome, [0, 1].
    pub outcome: f64,
    /// 1-based cycle index at which the trace was recorded.
    pub step: u64,
}
