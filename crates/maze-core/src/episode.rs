// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Episode Runner
// ─────────────────────────────────────────────────────────────────────
//! Feeds a stimulus sequence through `step` and collects the result in
//! the shape ablation harnesses compare.

use serde::{Deserialize, Serialize};

use maze_types::{Action, Stimulus};

use crate::diagnostics::DecisionLog;
use crate::maze::BicameralMaze;
use crate::metrics::MetricsSummary;
use crate::state::{StateSnapshot, VoiceSource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub final_state: StateSnapshot,
    pub metrics: MetricsSummary,
    pub logs: Vec<DecisionLog>,
    /// 1-based index within the episode of the first step after which
    /// `voice_source` was `internal`.
    pub transition_step: Option<usize>,
}

impl EpisodeReport {
    /// Chosen action per step.
    pub fn decisions(&self) -> Vec<Action> {
        self.logs.iter().map(|l| l.decision).collect()
    }
}

/// Run every stimulus through `maze.step` in order.
///
/// Metrics are the maze's cumulative counters, so a maze that already
/// ran cycles reports those too.
pub fn run_episode(maze: &mut BicameralMaze, stimuli: &[Stimulus]) -> EpisodeReport {
    let mut logs = Vec::with_capacity(stimuli.len());
    let mut transition_step = None;

    for (i, stimulus) in stimuli.iter().enumerate() {
        let (_, _, log) = maze.step(stimulus);
        logs.push(log);
        if transition_step.is_none() && maze.state().voice_source() == VoiceSource::InternalSelf {
            transition_step = Some(i + 1);
        }
    }

    EpisodeReport {
        final_state: maze.state().snapshot(),
        metrics: maze.metrics().summary(),
        logs,
        transition_step,
    }
}

/// Steps at which two episodes chose different actions. Compares up to
/// the shorter of the two.
pub fn count_divergent_decisions(a: &EpisodeReport, b: &EpisodeReport) -> usize {
    a.logs
        .iter()
        .zip(&b.logs)
        .filter(|(x, y)| x.decision != y.decision)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use maze_types::{GateMode, MazeConfig};

    use crate::world::ExternalWorld;

    fn causality_stimuli() -> Vec<Stimulus> {
        vec![
            Stimulus::new("investment")
                .with_intensity(0.8)
                .with_risk(0.7)
                .with_ambiguity(0.6)
                .introspective(),
            Stimulus::new("rule x")
                .with_intensity(0.6)
                .with_risk(0.2)
                .with_ambiguity(0.5)
                .rule(),
            Stimulus::new("creative problem")
                .with_intensity(0.7)
                .with_risk(0.3)
                .with_ambiguity(0.7)
                .introspective(),
            Stimulus::new("routine")
                .with_intensity(0.3)
                .with_risk(0.1)
                .with_ambiguity(0.2),
            Stimulus::new("ethical dilemma")
                .with_intensity(0.9)
                .with_risk(0.8)
                .with_ambiguity(0.5)
                .introspective(),
        ]
    }

    fn ablation_stimuli() -> Vec<Stimulus> {
        let block = [
            Stimulus::new("complex decision")
                .with_intensity(0.8)
                .with_risk(0.7)
                .with_ambiguity(0.6)
                .introspective(),
            Stimulus::new("rule")
                .with_intensity(0.6)
                .with_risk(0.2)
                .with_ambiguity(0.5)
                .rule(),
            Stimulus::new("emotional situation")
                .with_intensity(0.7)
                .with_risk(0.6)
                .with_ambiguity(0.5)
                .with_valence(0.5),
        ];
        block.iter().cycle().take(21).cloned().collect()
    }

    fn toy(config: MazeConfig) -> BicameralMaze {
        BicameralMaze::with_toy_world(config).unwrap()
    }

    #[test]
    fn test_inner_voice_causality() {
        let stimuli = causality_stimuli();
        let mut with = toy(MazeConfig::seeded(123));
        let mut without = toy(MazeConfig {
            inner_voice_enabled: false,
            ..MazeConfig::seeded(123)
        });

        let r_with = run_episode(&mut with, &stimuli);
        let r_without = run_episode(&mut without, &stimuli);

        let divergent = count_divergent_decisions(&r_with, &r_without);
        assert!(divergent > 0 || r_with.metrics.audit_invoked > 0);
        assert_eq!(r_without.metrics.audit_invoked, 0);
        assert_eq!(r_with.metrics.steps, 5);
        assert_eq!(r_with.logs.len(), 5);
    }

    #[test]
    fn test_disabled_run_has_silent_logs() {
        let mut maze = toy(MazeConfig {
            inner_voice_enabled: false,
            ..MazeConfig::seeded(123)
        });
        let report = run_episode(&mut maze, &causality_stimuli());
        for log in &report.logs {
            assert!(!log.used_inner_voice);
            assert!(log.audit_delta.is_zero());
            assert!(log.constraint_penalty.is_zero());
            assert!(!log.veto);
        }
    }

    #[test]
    fn test_bicameral_transition() {
        // With ToyWorld and the probability gate, p_internal starts at 0.10,
        // the gate rarely opens and p_internal stays below 0.30 over 30
        // steps. A consistently rewarding world and a gate open from the
        // first step stand in.
        let world = Arc::new(ExternalWorld::new(|_, _, rng| 0.9 + rng.gen_range(-0.05f64..0.05)));
        let config = MazeConfig {
            gate_mode: GateMode::Threshold,
            p_threshold: 0.05,
            ..MazeConfig::seeded(7)
        };
        let mut maze = BicameralMaze::new(world, config).unwrap();
        let initial = maze.state().p_internal;
        assert_eq!(maze.state().voice_source(), VoiceSource::ExternalAuthority);

        let stimuli: Vec<Stimulus> = [
            Stimulus::new("decide for yourself")
                .with_intensity(0.7)
                .with_risk(0.4)
                .with_ambiguity(0.5)
                .introspective(),
            Stimulus::new("trust your judgement")
                .with_intensity(0.7)
                .with_risk(0.3)
                .with_ambiguity(0.6)
                .introspective()
                .rule(),
            Stimulus::new("new situation")
                .with_intensity(0.8)
                .with_risk(0.4)
                .with_ambiguity(0.7)
                .introspective(),
        ]
        .iter()
        .cycle()
        .take(30)
        .cloned()
        .collect();

        let report = run_episode(&mut maze, &stimuli);
        assert!(maze.state().p_internal > initial);
        assert!(maze.state().voice_source() >= VoiceSource::Transitional);
        assert_eq!(report.final_state.voice_source, maze.state().voice_source());
        assert_eq!(report.metrics.audit_invoked, 30);
    }

    #[test]
    fn test_transition_step_recorded() {
        let world = Arc::new(ExternalWorld::new(|_, _, _| 1.0));
        let config = MazeConfig {
            gate_mode: GateMode::Threshold,
            p_threshold: 0.0,
            ..MazeConfig::default()
        };
        let mut maze = BicameralMaze::new(world, config).unwrap();
        let stimuli = vec![Stimulus::new("praise").introspective(); 200];
        let report = run_episode(&mut maze, &stimuli);
        let at = report.transition_step.expect("should reach internal");
        assert!(at > 1 && at <= 200);
        assert_eq!(
            report.logs[at - 1].state_after.as_ref().unwrap().voice_source,
            VoiceSource::InternalSelf
        );
        assert_ne!(
            report.logs[at - 2].state_after.as_ref().unwrap().voice_source,
            VoiceSource::InternalSelf
        );
    }

    #[test]
    fn test_ablation_ordering() {
        let stimuli = ablation_stimuli();
        assert_eq!(stimuli.len(), 21);

        let full = run_episode(&mut toy(MazeConfig::seeded(99)), &stimuli);
        let disabled = run_episode(
            &mut toy(MazeConfig {
                inner_voice_enabled: false,
                ..MazeConfig::seeded(99)
            }),
            &stimuli,
        );
        let gated = run_episode(
            &mut toy(MazeConfig {
                gate_mode: GateMode::Threshold,
                p_threshold: 0.90,
                ..MazeConfig::seeded(99)
            }),
            &stimuli,
        );

        assert_eq!(disabled.metrics.audit_invoked, 0);
        assert!(gated.metrics.audit_invoked <= full.metrics.audit_invoked);
        assert_eq!(full.metrics.steps, 21);
    }

    #[test]
    fn test_reproducible_episode() {
        let stimuli = ablation_stimuli();
        let a = run_episode(&mut toy(MazeConfig::seeded(5)), &stimuli);
        let b = run_episode(&mut toy(MazeConfig::seeded(5)), &stimuli);
        assert_eq!(a, b);
    }

    fn noisy_seeded(config: MazeConfig) -> BicameralMaze {
        let world = ExternalWorld::seeded(|_, d, seed| {
            let mut local = ChaCha20Rng::seed_from_u64(seed);
            let bias = if d.action == Action::Ask { 0.6 } else { 0.4 };
            bias + local.gen_range(-0.2f64..0.2)
        });
        BicameralMaze::new(Arc::new(world), config).unwrap()
    }

    #[test]
    fn test_seeded_world_reproducible_under_maze_seed() {
        let stimuli = ablation_stimuli();
        let outcomes = |r: &EpisodeReport| r.logs.iter().map(|l| l.outcome).collect::<Vec<_>>();

        let a = run_episode(&mut noisy_seeded(MazeConfig::seeded(17)), &stimuli);
        let b = run_episode(&mut noisy_seeded(MazeConfig::seeded(17)), &stimuli);
        let c = run_episode(&mut noisy_seeded(MazeConfig::seeded(18)), &stimuli);

        assert_eq!(a, b);
        assert_eq!(outcomes(&a), outcomes(&b));
        assert_ne!(outcomes(&a), outcomes(&c));
    }

    #[test]
    fn test_divergence_counts() {
        let stimuli = causality_stimuli();
        let a = run_episode(&mut toy(MazeConfig::seeded(1)), &stimuli);
        assert_eq!(count_divergent_decisions(&a, &a), 0);
        assert_eq!(a.decisions().len(), 5);
    }

    #[test]
    fn test_report_json_shape() {
        let report = run_episode(&mut toy(MazeConfig::default()), &causality_stimuli()[..2]);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["final_state"]["autonomy_index"].is_number());
        assert!(json["metrics"]["avg_regret"].is_number());
        assert_eq!(json["logs"].as_array().unwrap().len(), 2);
        assert!(json["logs"][0]["base_utility"]["act"].is_number());
        assert!(json["logs"][1]["state_after"]["voice_source"].is_string());
    }
}
