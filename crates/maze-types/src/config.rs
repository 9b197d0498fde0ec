// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Orchestrator Configuration
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};

/// How the orchestrator decides whether to consult the inner voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateMode {
    /// Consult iff a uniform draw `u < p_internal` (one RNG draw per cycle).
    #[default]
    Probability,
    /// Consult iff `p_internal >= p_threshold` (no RNG draw).
    Threshold,
}

impl GateMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            GateMode::Probability => "probability",
            GateMode::Threshold => "threshold",
        }
    }
}

impl fmt::Display for GateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GateMode {
    type Err = MazeError;

    /// Unknown mode strings are rejected rather than mapped to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "probability" => Ok(GateMode::Probability),
            "threshold" => Ok(GateMode::Threshold),
            _ => Err(MazeError::Config(format!(
                "unknown gate mode '{s}', expected 'probability' or 'threshold'"
            ))),
        }
    }
}

/// Static identity priorities, read-only for the lifetime of an agent.
///
/// Scale the hard constraint layer; higher = more important.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityCore {
    pub coherence: f64,
    pub safety: f64,
    pub growth: f64,
    pub autonomy: f64,
}

impl Default for IdentityCore {
    fn default() -> Self {
        Self {
            coherence: 0.7,
            safety: 0.9,
            growth: 0.6,
            autonomy: 0.5,
        }
    }
}

impl IdentityCore {
    pub fn validate(&self) -> MazeResult<()> {
        for (name, value) in [
            ("coherence", self.coherence),
            ("safety", self.safety),
            ("growth", self.growth),
            ("autonomy", self.autonomy),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MazeError::Config(format!(
                    "identity.{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Runtime configuration for one `BicameralMaze` instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Seed for the single RNG stream shared by gating and the world.
    /// Default: 42.
    pub seed: u64,

    /// Master switch for the inner voice. `false` is the full ablation.
    /// Default: true.
    pub inner_voice_enabled: bool,

    /// Gating rule. Default: probability.
    pub gate_mode: GateMode,

    /// Threshold for `GateMode::Threshold`. Ignored otherwise.
    /// Default: 0.5.
    pub p_threshold: f64,

    /// Identity priorities scaling the hard constraint layer.
    pub identity: IdentityCore,

    /// Memory trace ring size; oldest entries are dropped first.
    /// Default: 200.
    pub trace_capacity: usize,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            inner_voice_enabled: true,
            gate_mode: GateMode::Probability,
            p_threshold: 0.5,
            identity: IdentityCore::default(),
            trace_capacity: 200,
        }
    }
}

impl MazeConfig {
    /// Default configuration with a specific seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> MazeResult<()> {
        if !self.p_threshold.is_finite() || !(0.0..=1.0).contains(&self.p_threshold) {
            return Err(MazeError::Config(format!(
                "p_threshold must be in [0, 1], got {}",
                self.p_threshold
            )));
        }
        if self.trace_capacity < 1 {
            return Err(MazeError::Config(format!(
                "trace_capacity must be >= 1, got {}",
                self.trace_capacity
            )));
        }
        self.identity.validate()
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> MazeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| MazeError::Config(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = MazeConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.gate_mode, GateMode::Probability);
        assert_eq!(cfg.trace_capacity, 200);
    }

    #[test]
    fn test_gate_mode_parse() {
        assert_eq!("probability".parse::<GateMode>().unwrap(), GateMode::Probability);
        assert_eq!(" Threshold ".parse::<GateMode>().unwrap(), GateMode::Threshold);
    }

    #[test]
    fn test_gate_mode_rejects_unknown() {
        let err = "sometimes".parse::<GateMode>().unwrap_err();
        assert!(matches!(err, MazeError::Config(_)));
        assert!(err.to_string().contains("sometimes"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let cfg = MazeConfig {
            p_threshold: 1.5,
            ..MazeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_threshold_nan() {
        let cfg = MazeConfig {
            p_threshold: f64::NAN,
            ..MazeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_trace_capacity() {
        let cfg = MazeConfig {
            trace_capacity: 0,
            ..MazeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_identity_out_of_range() {
        let cfg = MazeConfig {
            identity: IdentityCore {
                safety: -0.1,
                ..IdentityCore::default()
            },
            ..MazeConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("identity.safety"));
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = MazeConfig::from_json(
            r#"{"seed": 99, "gate_mode": "threshold", "p_threshold": 0.9}"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 99);
        assert_eq!(cfg.gate_mode, GateMode::Threshold);
        assert_eq!(cfg.p_threshold, 0.9);
        assert!(cfg.inner_voice_enabled);
        assert_eq!(cfg.identity, IdentityCore::default());
    }

    #[test]
    fn test_from_json_unknown_mode() {
        let err = MazeConfig::from_json(r#"{"gate_mode": "always"}"#).unwrap_err();
        assert!(matches!(err, MazeError::Config(_)));
    }

    #[test]
    fn test_from_json_garbage() {
        assert!(MazeConfig::from_json("not json").is_err());
    }
}
