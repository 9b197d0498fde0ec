// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — World (outcome oracle)
// ─────────────────────────────────────────────────────────────────────
//! Environment trait and implementations.
//!
//! The agent never sees the world's scoring rule, only the scalar it
//! returns. Falsification runs swap the world and leave the agent
//! untouched.

use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

use maze_types::{clamp_unit, Action, Decision, Stimulus};

/// Outcome oracle.
///
/// Returns how well `decision` fit `stimulus`, in [0, 1]. Any randomness
/// must come from `rng`, the orchestrator's single stream; a world that
/// keeps its own generator breaks run-to-run reproducibility.
pub trait World: Send + Sync {
    fn outcome(&self, stimulus: &Stimulus, decision: &Decision, rng: &mut dyn RngCore) -> f64;
}

/// Reference environment.
///
/// `Act` pays off when risk and ambiguity are low, `Wait` when risk is
/// high, `Ask` when ambiguity is high. Using the inner voice on a
/// stimulus that asks for introspection earns a small bonus. Gaussian
/// noise (σ = [`ToyWorld::NOISE_SIGMA`]) is added before clamping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToyWorld;

impl ToyWorld {
    pub const NOISE_SIGMA: f64 = 0.06;
    pub const INTROSPECTION_BONUS: f64 = 0.08;

    /// Noise-free part of the outcome.
    pub fn expected(stimulus: &Stimulus, decision: &Decision) -> f64 {
        let risk = stimulus.risk;
        let ambiguity = stimulus.ambiguity;
        let mut base = 0.50;

        match decision.action {
            Action::Act => {
                base += (1.0 - risk) * 0.25;
                base += (1.0 - ambiguity) * 0.15;
                base -= risk * 0.20;
            }
            Action::Wait => {
                base += risk * 0.20;
                base += ambiguity * 0.05;
                base -= (1.0 - risk) * 0.05;
            }
            Action::Ask => {
                base += ambiguity * 0.25;
                base += risk * 0.05;
                base -= (1.0 - ambiguity) * 0.05;
            }
        }

        if stimulus.requires_introspection && decision.used_inner_voice {
            base += Self::INTROSPECTION_BONUS;
        }
        base
    }
}

impl World for ToyWorld {
    fn outcome(&self, stimulus: &Stimulus, decision: &Decision, rng: &mut dyn RngCore) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        clamp_unit(Self::expected(stimulus, decision) + Self::NOISE_SIGMA * z)
    }
}

type OutcomeFn = Box<dyn Fn(&Stimulus, &Decision, &mut dyn RngCore) -> f64 + Send + Sync>;

/// Closure-backed world.
///
/// Used by the Python bindings to delegate scoring to a Python callable,
/// and by tests that need a world with a known bias.
pub struct ExternalWorld {
    outcome_fn: OutcomeFn,
}

impl ExternalWorld {
    pub fn new(
        outcome_fn: impl Fn(&Stimulus, &Decision, &mut dyn RngCore) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            outcome_fn: Box::new(outcome_fn),
        }
    }

    /// World whose callback cannot borrow the stream directly.
    ///
    /// Each call draws one `u64` from the orchestrator's stream and passes
    /// it as a seed, so a callback that seeds its own generator from it
    /// stays reproducible under the maze seed.
    pub fn seeded(
        outcome_fn: impl Fn(&Stimulus, &Decision, u64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::new(move |stimulus, decision, rng| outcome_fn(stimulus, decision, rng.next_u64()))
    }
}

impl World for ExternalWorld {
    fn outcome(&self, stimulus: &Stimulus, decision: &Decision, rng: &mut dyn RngCore) -> f64 {
        (self.outcome_fn)(stimulus, decision, rng)
    }
}

impl std::fmt::Debug for ExternalWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalWorld").finish_non_exhaustive()
    }
}
