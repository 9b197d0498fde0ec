// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Orchestrator
// ─────────────────────────────────────────────────────────────────────
//! `BicameralMaze` wires desire, policy, gating, the inner voice and the
//! world into one decision cycle, then drifts the state vector from the
//! observed outcome.
//!
//! One `ChaCha20Rng`, seeded at construction, feeds every stochastic
//! choice: the probability gate and the world's noise. Same seed, same
//! config and same stimuli give bit-identical runs.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use maze_types::{
    clamp_unit, ema, round_to, Action, Decision, GateMode, MazeConfig, MazeResult, MemoryTrace,
    Stimulus,
};

use crate::desire::DesireEngine;
use crate::diagnostics::DecisionLog;
use crate::inner_voice::{InnerVoice, Verdict};
use crate::metrics::Metrics;
use crate::policy::Policy;
use crate::state::MazeState;
use crate::world::{ToyWorld, World};

pub struct BicameralMaze {
    config: MazeConfig,
    world: Arc<dyn World>,
    state: MazeState,
    desire: DesireEngine,
    policy: Policy,
    inner: InnerVoice,
    rng: ChaCha20Rng,
    metrics: Metrics,
    traces: VecDeque<MemoryTrace>,
}

impl BicameralMaze {
    /// Validates `config` and builds a newborn agent (`p_internal = 0.10`).
    pub fn new(world: Arc<dyn World>, config: MazeConfig) -> MazeResult<Self> {
        config.validate()?;
        log::debug!(
            "BicameralMaze: seed={} inner_voice={} mode={} p_threshold={}",
            config.seed,
            config.inner_voice_enabled,
            config.gate_mode,
            config.p_threshold
        );
        Ok(Self {
            world,
            state: MazeState::default(),
            desire: DesireEngine::new(),
            policy: Policy::new(),
            inner: InnerVoice::new(config.identity, config.inner_voice_enabled),
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            metrics: Metrics::default(),
            traces: VecDeque::with_capacity(config.trace_capacity),
            config,
        })
    }

    /// Agent in the reference [`ToyWorld`].
    pub fn with_toy_world(config: MazeConfig) -> MazeResult<Self> {
        Self::new(Arc::new(ToyWorld), config)
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn state(&self) -> &MazeState {
        &self.state
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn inner_voice(&self) -> &InnerVoice {
        &self.inner
    }

    /// Committed cycles, oldest first, at most `trace_capacity` of them.
    pub fn traces(&self) -> &VecDeque<MemoryTrace> {
        &self.traces
    }

    /// Number of 32-bit words consumed from the RNG stream so far.
    pub fn stream_position(&self) -> u128 {
        self.rng.get_word_pos()
    }

    /// Choose an action without consulting the world or learning.
    ///
    /// Not free of side effects: `steps` and the audit/veto counters
    /// advance, and in probability mode the gate consumes one draw from
    /// the shared stream. Interleaving speculative `decide` calls with
    /// `step` therefore shifts every later draw.
    pub fn decide(&mut self, stimulus: &Stimulus) -> (Decision, DecisionLog) {
        self.decide_sanitised(&stimulus.sanitised())
    }

    /// Full cycle: decide, score against the world, record the trace,
    /// update the state.
    pub fn step(&mut self, stimulus: &Stimulus) -> (Decision, f64, DecisionLog) {
        let stimulus = stimulus.sanitised();
        let (decision, mut log) = self.decide_sanitised(&stimulus);

        let outcome = clamp_unit(self.world.outcome(&stimulus, &decision, &mut self.rng));

        self.traces.push_back(MemoryTrace {
            stimulus: stimulus.clone(),
            decision: decision.clone(),
            outcome,
            step: self.metrics.steps,
        });
        while self.traces.len() > self.config.trace_capacity {
            if let Some(old) = self.traces.pop_front() {
                log::trace!("trace buffer full, evicted step {}", old.step);
            }
        }

        log.outcome = Some(round_to(outcome, 3));

        let before = self.state.voice_source();
        self.update_state(&stimulus, &decision, outcome);
        let after = self.state.voice_source();
        if before != after {
            log::info!(
                "voice source {before} -> {after} at step {} (p_internal={:.3})",
                self.metrics.steps,
                self.state.p_internal
            );
        }

        log.state_after = Some(self.state.snapshot());
        (decision, outcome, log)
    }

    /// Probability mode draws once; threshold mode and a disabled inner
    /// voice draw nothing.
    fn gate(&mut self) -> bool {
        if !self.inner.enabled() {
            return false;
        }
        match self.config.gate_mode {
            GateMode::Probability => self.rng.gen::<f64>() < self.state.p_internal,
            GateMode::Threshold => self.state.p_internal >= self.config.p_threshold,
        }
    }

    fn decide_sanitised(&mut self, stimulus: &Stimulus) -> (Decision, DecisionLog) {
        self.metrics.steps += 1;
        let step = self.metrics.steps;
        let state_before = self.state.snapshot();

        let field = self.desire.compute(stimulus, &self.state);
        let intent = self.desire.intent(&field);

        let base = self.policy.utility(stimulus, intent.strength, &self.state);

        let used_inner_voice = self.gate();
        let verdict = if used_inner_voice {
            self.metrics.audit_invoked += 1;
            self.inner.consult(stimulus, &self.state, intent.strength, &base)
        } else {
            Verdict::SILENT
        };

        let mut utility = base
            .plus(&verdict.audit_delta)
            .plus(&verdict.constraint_penalty)
            .map(clamp_unit);

        if verdict.veto {
            self.metrics.veto_applied += 1;
            self.metrics.identity_violations_blocked += 1;
            utility[Action::Act] = 0.0;
            log::warn!(
                "identity veto at step {step}: act blocked (risk={:.2}, coherence={:.2})",
                stimulus.risk,
                self.state.coherence
            );
        }

        let chosen = utility.argmax();
        let regret = utility.max_value() - utility[chosen];
        self.metrics.regret_sum += regret;

        let audit_changed_action = used_inner_voice && chosen != base.argmax();
        if audit_changed_action {
            self.metrics.audit_changed_action += 1;
        }

        let reasoning = format!(
            "intent={}; base={:.2}; audit={:+.2}; constraint={:+.2}; p_internal={:.2}; mode={}",
            intent.text,
            base[chosen],
            verdict.audit_delta[chosen],
            verdict.constraint_penalty[chosen],
            self.state.p_internal,
            self.config.gate_mode
        );

        log::debug!(
            "step {step}: gated={used_inner_voice} veto={} action={chosen} regret={regret:.4}",
            verdict.veto
        );

        let decision = Decision {
            action: chosen,
            reasoning,
            used_inner_voice,
            veto_applied: verdict.veto,
            audit_delta: verdict.audit_delta,
            constraint_penalty: verdict.constraint_penalty,
            utility,
        };

        let log = DecisionLog {
            step,
            stimulus: stimulus.content.clone(),
            state_before,
            intent: intent.text,
            intent_strength: round_to(intent.strength, 3),
            base_utility: base.rounded(3),
            used_inner_voice,
            audit_delta: verdict.audit_delta.rounded(3),
            constraint_penalty: verdict.constraint_penalty.rounded(3),
            veto: verdict.veto,
            final_utility: utility.rounded(3),
            decision: chosen,
            regret: round_to(regret, 4),
            audit_changed_action,
            outcome: None,
            state_after: None,
        };

        (decision, log)
    }

    /// Moving-average drift of every state field from one outcome.
    fn update_state(&mut self, stimulus: &Stimulus, decision: &Decision, outcome: f64) {
        let s = &mut self.state;
        let used = decision.used_inner_voice;

        // p_internal rises when a consulted audit pays off; idle voice decays
        if used {
            let target = clamp_unit(s.p_internal + 0.20 * (outcome - 0.50));
            s.p_internal = ema(s.p_internal, target, 0.12);
        } else {
            s.p_internal = clamp_unit(s.p_internal * 0.995);
        }

        if used {
            s.audit_skill = ema(s.audit_skill, outcome, 0.10);
        } else {
            s.audit_skill = clamp_unit(s.audit_skill * 0.997);
        }

        if stimulus.requires_introspection {
            let bump = if decision.action == Action::Ask { 0.15 } else { 0.08 };
            s.introspection_depth = ema(
                s.introspection_depth,
                clamp_unit(s.introspection_depth + bump),
                0.10,
            );
        } else {
            s.introspection_depth = clamp_unit(s.introspection_depth * 0.995);
        }

        let preferred = if stimulus.requires_introspection {
            Action::Ask
        } else if stimulus.risk > 0.6 {
            Action::Wait
        } else {
            Action::Act
        };
        let coherent = if decision.action == preferred { 1.0 } else { 0.4 };
        s.coherence = ema(s.coherence, coherent, 0.15);

        let novelty_shock = if stimulus.intensity > 0.75 { 1.0 } else { 0.0 };
        let target_mem = clamp_unit(s.memory_trust + 0.25 * (outcome - 0.50) - 0.05 * novelty_shock);
        s.memory_trust = ema(s.memory_trust, target_mem, 0.12);

        if stimulus.intensity > 0.55 {
            let target_nov = clamp_unit(s.novelty_integration + 0.20 * (outcome - 0.50));
            s.novelty_integration = ema(s.novelty_integration, target_nov, 0.10);
        } else {
            s.novelty_integration = clamp_unit(s.novelty_integration * 0.998);
        }

        if stimulus.is_rule {
            let target_rule = clamp_unit(s.rule_internalization + 0.20 * (outcome - 0.45));
            s.rule_internalization = ema(s.rule_internalization, target_rule, 0.10);
        } else {
            s.rule_internalization = clamp_unit(s.rule_internalization * 0.999);
        }

        s.clamp_all();
    }
}

impl std::fmt::Debug for BicameralMaze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BicameralMaze")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("metrics", &self.metrics)
            .field("traces", &self.traces.len())
            .finish_non_exhaustive()
    }
}
