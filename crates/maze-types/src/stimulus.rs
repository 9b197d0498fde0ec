// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Stimulus
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};
use crate::score::{clamp_score, clamp_unit};

/// One situation presented to the agent per decision cycle.
///
/// Immutable once built. The `with_*` builders clamp into range; a
/// stimulus assembled from raw fields (deserialised, FFI) should go
/// through [`Stimulus::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stimulus {
    /// Free-form label, echoed into the diagnostic log.
    pub content: String,
    /// Strength of the situation, [0, 1].
    pub intensity: f64,
    /// Estimated risk of acting, [0, 1].
    pub risk: f64,
    /// Uncertainty about what the situation is, [0, 1].
    pub ambiguity: f64,
    /// The situation explicitly calls for self-examination.
    pub requires_introspection: bool,
    /// Affective tone, [-1, 1].
    pub emotional_valence: f64,
    /// The input is an instruction or rule rather than a situation.
    pub is_rule: bool,
}

impl Stimulus {
    /// Neutral stimulus: intensity 0.5, risk 0.3, ambiguity 0.5.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            intensity: 0.5,
            risk: 0.3,
            ambiguity: 0.5,
            requires_introspection: false,
            emotional_valence: 0.0,
            is_rule: false,
        }
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = clamp_unit(intensity);
        self
    }

    pub fn with_risk(mut self, risk: f64) -> Self {
        self.risk = clamp_unit(risk);
        self
    }

    pub fn with_ambiguity(mut self, ambiguity: f64) -> Self {
        self.ambiguity = clamp_unit(ambiguity);
        self
    }

    pub fn with_valence(mut self, valence: f64) -> Self {
        self.emotional_valence = clamp_score(valence, -1.0, 1.0);
        self
    }

    pub fn introspective(mut self) -> Self {
        self.requires_introspection = true;
        self
    }

    pub fn rule(mut self) -> Self {
        self.is_rule = true;
        self
    }

    /// Check every numeric field is finite (`Numerical`) and in range
    /// (`Validation`).
    pub fn validate(&self) -> MazeResult<()> {
        for (name, value, lo) in [
            ("intensity", self.intensity, 0.0),
            ("risk", self.risk, 0.0),
            ("ambiguity", self.ambiguity, 0.0),
            ("emotional_valence", self.emotional_valence, -1.0),
        ] {
            if !value.is_finite() {
                return Err(MazeError::Numerical(format!("{name} is {value}")));
            }
            if !(lo..=1.0).contains(&value) {
                return Err(MazeError::Validation(format!(
                    "{name} must be in [{lo}, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Copy with every numeric field forced into range.
    pub fn sanitised(&self) -> Self {
        Self {
            content: self.content.clone(),
            intensity: clamp_unit(self.intensity),
            risk: clamp_unit(self.risk),
            ambiguity: clamp_unit(self.ambiguity),
            requires_introspection: self.requires_introspection,
            emotional_valence: clamp_score(self.emotional_valence, -1.0, 1.0),
            is_rule: self.is_rule,
        }
    }
}
