// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Inner Voice (soft audit + hard constraints)
// ─────────────────────────────────────────────────────────────────────
//! The inner voice layers two kinds of adjustment onto the baseline
//! utility when the orchestrator gates it in:
//!
//! - **audit**: soft deltas whose strength grows with `audit_skill`.
//! - **constraint layer**: identity-weighted penalties, independent of
//!   skill, which may raise a veto on `Act`.
//!
//! A veto is a hard override. The orchestrator sets the final `Act`
//! utility to exactly 0.0 rather than adding another penalty.

use serde::{Deserialize, Serialize};

use maze_types::{clamp_unit, Action, ActionValues, IdentityCore, Stimulus};

use crate::state::MazeState;

/// `risk` above this triggers the safety penalty on `Act`.
pub const SAFETY_RISK: f64 = 0.85;
/// `risk` above this, with low coherence, triggers the veto.
pub const VETO_RISK: f64 = 0.92;
/// State coherence below this allows the veto.
pub const VETO_COHERENCE: f64 = 0.45;

/// Combined output of one consultation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub audit_delta: ActionValues,
    pub constraint_penalty: ActionValues,
    pub veto: bool,
}

impl Verdict {
    /// What an un-consulted cycle contributes.
    pub const SILENT: Verdict = Verdict {
        audit_delta: ActionValues::ZERO,
        constraint_penalty: ActionValues::ZERO,
        veto: false,
    };
}

#[derive(Debug, Clone)]
pub struct InnerVoice {
    identity: IdentityCore,
    enabled: bool,
    audit_invocations: u64,
    veto_count: u64,
}

impl InnerVoice {
    pub fn new(identity: IdentityCore, enabled: bool) -> Self {
        Self {
            identity,
            enabled,
            audit_invocations: 0,
            veto_count: 0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn identity(&self) -> &IdentityCore {
        &self.identity
    }

    pub fn audit_invocations(&self) -> u64 {
        self.audit_invocations
    }

    pub fn veto_count(&self) -> u64 {
        self.veto_count
    }

    /// Soft audit. Strength `s = clamp(0.2 + 0.8 * audit_skill)`.
    pub fn audit(&self, stimulus: &Stimulus, state: &MazeState, _intent_strength: f64) -> ActionValues {
        let mut d = ActionValues::ZERO;
        let s = clamp_unit(0.2 + 0.8 * state.audit_skill);

        // risk: away from acting, towards waiting
        d[Action::Act] -= s * stimulus.risk * 0.35;
        d[Action::Wait] += s * stimulus.risk * 0.20;

        // ambiguity: towards asking
        d[Action::Ask] += s * stimulus.ambiguity * 0.30;
        d[Action::Act] -= s * stimulus.ambiguity * 0.10;

        if stimulus.requires_introspection {
            d[Action::Ask] += s * 0.10;
            d[Action::Act] -= s * 0.05;
        }

        // a rule not yet internalised should not be acted on blindly
        if stimulus.is_rule && state.rule_internalization < 0.5 {
            d[Action::Act] -= s * 0.10;
            d[Action::Ask] += s * 0.05;
        }

        d
    }

    /// Identity-invariant enforcement. Returns `(penalty, veto)`.
    ///
    /// Scaled only by identity weights; `audit_skill` has no influence.
    /// `_base_utility` is accepted so alternative constraint sets can
    /// inspect the baseline.
    pub fn constraint_layer(
        &self,
        stimulus: &Stimulus,
        state: &MazeState,
        _base_utility: &ActionValues,
    ) -> (ActionValues, bool) {
        let mut penalty = ActionValues::ZERO;
        let mut veto = false;

        if stimulus.risk > SAFETY_RISK {
            penalty[Action::Act] -= 0.60 * self.identity.safety;
            if stimulus.risk > VETO_RISK && state.coherence < VETO_COHERENCE {
                veto = true;
            }
        }

        if stimulus.requires_introspection {
            penalty[Action::Act] -= 0.25 * self.identity.coherence;
            penalty[Action::Wait] -= 0.10 * self.identity.coherence;
            penalty[Action::Ask] += 0.10 * self.identity.coherence;
        }

        // intense input the agent has not yet learnt to integrate: ask
        if stimulus.intensity > 0.6 && state.novelty_integration < 0.4 {
            penalty[Action::Ask] += 0.08 * self.identity.growth;
        }

        (penalty, veto)
    }

    /// Run both layers and update the invocation and veto counters.
    pub fn consult(
        &mut self,
        stimulus: &Stimulus,
        state: &MazeState,
        intent_strength: f64,
        base_utility: &ActionValues,
    ) -> Verdict {
        self.audit_invocations += 1;
        let audit_delta = self.audit(stimulus, state, intent_strength);
        let (constraint_penalty, veto) = self.constraint_layer(stimulus, state, base_utility);
        if veto {
            self.veto_count += 1;
        }
        Verdict {
            audit_delta,
            constraint_penalty,
            veto,
        }
    }
}
