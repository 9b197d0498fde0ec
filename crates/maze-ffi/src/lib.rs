// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied: PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Bicameral Maze decision engine.
//!
//! Exposes `Stimulus`, `IdentityCore`, `Decision` and `BicameralMaze`.
//!
//! # FFI Safety
//!
//! - GIL acquired via `Python::with_gil` before every call into a Python
//!   world callable.
//! - A world callable receives a `random.Random` seeded from the maze's
//!   stream; one that raises or returns a non-number scores 0.5.
//! - Configuration is validated before the maze is built; invalid values
//!   raise `ValueError`.
//!
//! Usage from Python:
//! ```python
//! from bicameral_maze import BicameralMaze, Stimulus
//!
//! maze = BicameralMaze(seed=123)
//! decision, outcome, log = maze.step(Stimulus("routine", risk=0.1))
//! print(decision.action, maze.state()["voice_source"])
//! ```

use std::sync::Arc;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde::Serialize;

use maze_core::{run_episode, BicameralMaze, ExternalWorld, ToyWorld, World};
use maze_types::{ActionValues, Decision, GateMode, IdentityCore, MazeConfig, Stimulus};

/// Neutral score used when a Python world callable misbehaves.
const FALLBACK_OUTCOME: f64 = 0.5;

fn value_error(e: impl ToString) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Serialise through JSON into native Python containers.
fn to_py<'py, T: Serialize>(py: Python<'py>, value: &T) -> PyResult<Bound<'py, PyAny>> {
    let text = serde_json::to_string(value).map_err(value_error)?;
    py.import("json")?.call_method1("loads", (text,))
}

/// `random.Random(seed)`, handed to a Python world as its generator.
fn py_random<'py>(py: Python<'py>, seed: u64) -> PyResult<Bound<'py, PyAny>> {
    py.import("random")?.getattr("Random")?.call1((seed,))
}

fn action_dict<'py>(py: Python<'py>, values: &ActionValues) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (action, value) in values.iter() {
        dict.set_item(action.as_str(), value)?;
    }
    Ok(dict)
}

// ─── PyStimulus ─────────────────────────────────────────────────────

#[pyclass(name = "Stimulus")]
#[derive(Clone)]
struct PyStimulus {
    inner: Stimulus,
}

#[pymethods]
impl PyStimulus {
    #[new]
    #[pyo3(signature = (
        content,
        intensity = 0.5,
        risk = 0.3,
        ambiguity = 0.5,
        requires_introspection = false,
        emotional_valence = 0.0,
        is_rule = false,
    ))]
    fn new(
        content: String,
        intensity: f64,
        risk: f64,
        ambiguity: f64,
        requires_introspection: bool,
        emotional_valence: f64,
        is_rule: bool,
    ) -> PyResult<Self> {
        let stimulus = Stimulus {
            content,
            intensity,
            risk,
            ambiguity,
            requires_introspection,
            emotional_valence,
            is_rule,
        };
        stimulus.validate().map_err(value_error)?;
        Ok(Self { inner: stimulus })
    }

    #[getter]
    fn content(&self) -> &str {
        &self.inner.content
    }

    #[getter]
    fn intensity(&self) -> f64 {
        self.inner.intensity
    }

    #[getter]
    fn risk(&self) -> f64 {
        self.inner.risk
    }

    #[getter]
    fn ambiguity(&self) -> f64 {
        self.inner.ambiguity
    }

    #[getter]
    fn requires_introspection(&self) -> bool {
        self.inner.requires_introspection
    }

    #[getter]
    fn emotional_valence(&self) -> f64 {
        self.inner.emotional_valence
    }

    #[getter]
    fn is_rule(&self) -> bool {
        self.inner.is_rule
    }

    fn __repr__(&self) -> String {
        format!(
            "Stimulus({:?}, intensity={}, risk={}, ambiguity={})",
            self.inner.content, self.inner.intensity, self.inner.risk, self.inner.ambiguity
        )
    }
}

// ─── PyIdentityCore ─────────────────────────────────────────────────

#[pyclass(name = "IdentityCore")]
#[derive(Clone)]
struct PyIdentityCore {
    inner: IdentityCore,
}

#[pymethods]
impl PyIdentityCore {
    #[new]
    #[pyo3(signature = (coherence = 0.7, safety = 0.9, growth = 0.6, autonomy = 0.5))]
    fn new(coherence: f64, safety: f64, growth: f64, autonomy: f64) -> PyResult<Self> {
        let identity = IdentityCore {
            coherence,
            safety,
            growth,
            autonomy,
        };
        identity.validate().map_err(value_error)?;
        Ok(Self { inner: identity })
    }

    #[getter]
    fn coherence(&self) -> f64 {
        self.inner.coherence
    }

    #[getter]
    fn safety(&self) -> f64 {
        self.inner.safety
    }

    #[getter]
    fn growth(&self) -> f64 {
        self.inner.growth
    }

    #[getter]
    fn autonomy(&self) -> f64 {
        self.inner.autonomy
    }

    fn __repr__(&self) -> String {
        format!(
            "IdentityCore(coherence={}, safety={}, growth={}, autonomy={})",
            self.inner.coherence, self.inner.safety, self.inner.growth, self.inner.autonomy
        )
    }
}

// ─── PyDecision ─────────────────────────────────────────────────────

/// Read-only view of one decision.
#[pyclass(name = "Decision")]
#[derive(Clone)]
struct PyDecision {
    inner: Decision,
}

#[pymethods]
impl PyDecision {
    /// "act", "wait" or "ask".
    #[getter]
    fn action(&self) -> &'static str {
        self.inner.action.as_str()
    }

    #[getter]
    fn reasoning(&self) -> &str {
        &self.inner.reasoning
    }

    #[getter]
    fn used_inner_voice(&self) -> bool {
        self.inner.used_inner_voice
    }

    #[getter]
    fn veto_applied(&self) -> bool {
        self.inner.veto_applied
    }

    #[getter]
    fn audit_delta<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        action_dict(py, &self.inner.audit_delta)
    }

    #[getter]
    fn constraint_penalty<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        action_dict(py, &self.inner.constraint_penalty)
    }

    #[getter]
    fn utility<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        action_dict(py, &self.inner.utility)
    }

    fn regret(&self) -> f64 {
        self.inner.regret()
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        to_py(py, &self.inner)
    }

    fn __repr__(&self) -> String {
        format!(
            "Decision(action={}, used_inner_voice={}, veto_applied={})",
            self.inner.action, self.inner.used_inner_voice, self.inner.veto_applied
        )
    }
}

// ─── PyBicameralMaze ────────────────────────────────────────────────

/// Decision engine with a Rust or Python world.
///
/// A Python world is any callable `(Stimulus, Decision, random.Random)
/// -> float`. The generator is seeded from the maze's own stream on every
/// call, so a world that draws only from it replays exactly under the
/// same `seed`.
#[pyclass(name = "BicameralMaze")]
struct PyBicameralMaze {
    inner: BicameralMaze,
}

#[pymethods]
impl PyBicameralMaze {
    #[new]
    #[pyo3(signature = (
        world = None,
        identity = None,
        seed = 42,
        inner_voice_enabled = true,
        mode_p_internal = "probability",
        p_threshold = 0.5,
    ))]
    fn new(
        world: Option<PyObject>,
        identity: Option<PyIdentityCore>,
        seed: u64,
        inner_voice_enabled: bool,
        mode_p_internal: &str,
        p_threshold: f64,
    ) -> PyResult<Self> {
        let gate_mode: GateMode = mode_p_internal.parse().map_err(value_error)?;
        let config = MazeConfig {
            seed,
            inner_voice_enabled,
            gate_mode,
            p_threshold,
            identity: identity.map(|i| i.inner).unwrap_or_default(),
            ..MazeConfig::default()
        };

        let world: Arc<dyn World> = match world {
            Some(cb) => Arc::new(ExternalWorld::seeded(move |stimulus, decision, seed| {
                Python::with_gil(|py| {
                    let outcome = py_random(py, seed).and_then(|rng| {
                        let args = (
                            PyStimulus {
                                inner: stimulus.clone(),
                            },
                            PyDecision {
                                inner: decision.clone(),
                            },
                            rng,
                        );
                        cb.call1(py, args)?.extract::<f64>(py)
                    });
                    match outcome {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            log::warn!("world callable failed ({e}), scoring {FALLBACK_OUTCOME}");
                            FALLBACK_OUTCOME
                        }
                    }
                })
            })),
            None => Arc::new(ToyWorld),
        };

        let inner = BicameralMaze::new(world, config).map_err(value_error)?;
        Ok(Self { inner })
    }

    /// Choose without learning. Returns `(Decision, log_dict)`.
    ///
    /// Still advances the step counter and, in probability mode, the
    /// random stream.
    fn decide<'py>(
        &mut self,
        py: Python<'py>,
        stimulus: PyStimulus,
    ) -> PyResult<(PyDecision, Bound<'py, PyAny>)> {
        let (decision, log) = self.inner.decide(&stimulus.inner);
        Ok((PyDecision { inner: decision }, to_py(py, &log)?))
    }

    /// Full cycle. Returns `(Decision, outcome, log_dict)`.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        stimulus: PyStimulus,
    ) -> PyResult<(PyDecision, f64, Bound<'py, PyAny>)> {
        let (decision, outcome, log) = self.inner.step(&stimulus.inner);
        Ok((PyDecision { inner: decision }, outcome, to_py(py, &log)?))
    }

    /// Rounded state snapshot with `voice_source` and `autonomy_index`.
    fn state<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        to_py(py, &self.inner.state().snapshot())
    }

    fn metrics<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        to_py(py, &self.inner.metrics().summary())
    }

    /// Returns `{final_state, metrics, logs, transition_step}`.
    fn run_episode<'py>(
        &mut self,
        py: Python<'py>,
        stimuli: Vec<PyStimulus>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let stimuli: Vec<Stimulus> = stimuli.into_iter().map(|s| s.inner).collect();
        let report = run_episode(&mut self.inner, &stimuli);
        to_py(py, &report)
    }

    #[getter]
    fn trace_len(&self) -> usize {
        self.inner.traces().len()
    }

    #[getter]
    fn identity(&self) -> PyIdentityCore {
        PyIdentityCore {
            inner: *self.inner.inner_voice().identity(),
        }
    }

    #[getter]
    fn mode_p_internal(&self) -> &'static str {
        self.inner.config().gate_mode.as_str()
    }

    fn __repr__(&self) -> String {
        let state = self.inner.state();
        format!(
            "BicameralMaze(steps={}, p_internal={:.3}, voice_source={})",
            self.inner.metrics().steps,
            state.p_internal,
            state.voice_source()
        )
    }
}

// ─── Module Registration ────────────────────────────────────────────

/// Bicameral Maze: decision engine with a gated inner-voice audit.
///
/// - `Stimulus`: one situation presented to the agent
/// - `IdentityCore`: priority weights for the hard constraint layer
/// - `Decision`: result of one cycle
/// - `BicameralMaze`: the orchestrator
#[pymodule]
fn bicameral_maze(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyStimulus>()?;
    m.add_class::<PyIdentityCore>()?;
    m.add_class::<PyDecision>()?;
    m.add_class::<PyBicameralMaze>()?;
    Ok(())
}
