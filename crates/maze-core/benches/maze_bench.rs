// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Decision Cycle Benchmarks
// ─────────────────────────────────────────────────────────────────────

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use maze_core::{run_episode, BicameralMaze};
use maze_types::{GateMode, MazeConfig, Stimulus};

fn stimuli() -> Vec<Stimulus> {
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

// ── decide() ────────────────────────────────────────────────────────

fn bench_decide_probability(c: &mut Criterion) {
    let mut maze = BicameralMaze::with_toy_world(MazeConfig::default()).unwrap();
    let stim = Stimulus::new("bench").with_risk(0.6).introspective();
    c.bench_function("decide_probability", |b| {
        b.iter(|| maze.decide(black_box(&stim)))
    });
}

fn bench_decide_threshold_gated(c: &mut Criterion) {
    let config = MazeConfig {
        gate_mode: GateMode::Threshold,
        p_threshold: 0.0,
        ..MazeConfig::default()
    };
    let mut maze = BicameralMaze::with_toy_world(config).unwrap();
    let stim = Stimulus::new("bench").with_risk(0.9).introspective().rule();
    c.bench_function("decide_threshold_gated", |b| {
        b.iter(|| maze.decide(black_box(&stim)))
    });
}

// ── step() ──────────────────────────────────────────────────────────

fn bench_step(c: &mut Criterion) {
    let mut maze = BicameralMaze::with_toy_world(MazeConfig::default()).unwrap();
    let stim = Stimulus::new("bench").with_intensity(0.7).introspective();
    c.bench_function("step", |b| b.iter(|| maze.step(black_box(&stim))));
}

// ── run_episode(), 21 stimuli ───────────────────────────────────────

fn bench_episode_21(c: &mut Criterion) {
    let stimuli = stimuli();
    c.bench_function("episode_21", |b| {
        b.iter(|| {
            let mut maze = BicameralMaze::with_toy_world(MazeConfig::seeded(99)).unwrap();
            run_episode(&mut maze, black_box(&stimuli))
        })
    });
}

criterion_group!(
    benches,
    bench_decide_probability,
    bench_decide_threshold_gated,
    bench_step,
    bench_episode_21,
);
criterion_main!(benches);
