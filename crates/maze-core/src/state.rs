// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Internal State Vector
// ─────────────────────────────────────────────────────────────────────
//! The seven drifting parameters of the agent and their derived
//! classification.
//!
//! `p_internal` is the probability (or, in threshold mode, the level)
//! with which the inner-voice audit is consulted. The remaining fields
//! are learned capabilities that gate and scale the audit.

use std::fmt;

use serde::{Deserialize, Serialize};

use maze_types::score::{clamp_unit, round_to};

/// Where the agent's guidance currently comes from, derived from
/// `p_internal`. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VoiceSource {
    /// `p_internal < 0.30`
    #[serde(rename = "external")]
    ExternalAuthority,
    /// `0.30 <= p_internal < 0.70`
    #[serde(rename = "transitional")]
    Transitional,
    /// `p_internal >= 0.70`
    #[serde(rename = "internal")]
    InternalSelf,
}

impl VoiceSource {
    pub const TRANSITIONAL_FROM: f64 = 0.30;
    pub const INTERNAL_FROM: f64 = 0.70;

    pub fn classify(p_internal: f64) -> Self {
        if p_internal < Self::TRANSITIONAL_FROM {
            VoiceSource::ExternalAuthority
        } else if p_internal < Self::INTERNAL_FROM {
            VoiceSource::Transitional
        } else {
            VoiceSource::InternalSelf
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            VoiceSource::ExternalAuthority => "external",
            VoiceSource::Transitional => "transitional",
            VoiceSource::InternalSelf => "internal",
        }
    }
}

impl fmt::Display for VoiceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable parameter vector. Every field stays in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeState {
    pub p_internal: f64,
    pub rule_internalization: f64,
    /// How accurately the audit judges; grows only while it is used.
    pub audit_skill: f64,
    pub introspection_depth: f64,
    pub coherence: f64,
    pub memory_trust: f64,
    pub novelty_integration: f64,
}

impl Default for MazeState {
    /// Newborn, externally governed agent.
    fn default() -> Self {
        Self {
            p_internal: 0.10,
            rule_internalization: 0.00,
            audit_skill: 0.10,
            introspection_depth: 0.20,
            coherence: 0.50,
            memory_trust: 0.30,
            novelty_integration: 0.00,
        }
    }
}

impl MazeState {
    pub fn voice_source(&self) -> VoiceSource {
        VoiceSource::classify(self.p_internal)
    }

    /// `0.30 * rule_internalization + 0.30 * audit_skill + 0.40 * p_internal`.
    pub fn autonomy_index(&self) -> f64 {
        clamp_unit(
            0.30 * self.rule_internalization + 0.30 * self.audit_skill + 0.40 * self.p_internal,
        )
    }

    /// Named view of all seven stored fields.
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("p_internal", self.p_internal),
            ("rule_internalization", self.rule_internalization),
            ("audit_skill", self.audit_skill),
            ("introspection_depth", self.introspection_depth),
            ("coherence", self.coherence),
            ("memory_trust", self.memory_trust),
            ("novelty_integration", self.novelty_integration),
        ]
    }

    pub fn is_bounded(&self) -> bool {
        self.fields()
            .iter()
            .all(|(_, v)| v.is_finite() && (0.0..=1.0).contains(v))
    }

    /// Force every field back into [0, 1].
    pub(crate) fn clamp_all(&mut self) {
        self.p_internal = clamp_unit(self.p_internal);
        self.rule_internalization = clamp_unit(self.rule_internalization);
        self.audit_skill = clamp_unit(self.audit_skill);
        self.introspection_depth = clamp_unit(self.introspection_depth);
        self.coherence = clamp_unit(self.coherence);
        self.memory_trust = clamp_unit(self.memory_trust);
        self.novelty_integration = clamp_unit(self.novelty_integration);
    }

    /// Rounded, serialisable view (3 decimals).
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            p_internal: round_to(self.p_internal, 3),
            voice_source: self.voice_source(),
            rule_internalization: round_to(self.rule_internalization, 3),
            audit_skill: round_to(self.audit_skill, 3),
            introspection_depth: round_to(self.introspection_depth, 3),
            coherence: round_to(self.coherence, 3),
            memory_trust: round_to(self.memory_trust, 3),
            novelty_integration: round_to(self.novelty_integration, 3),
            autonomy_index: round_to(self.autonomy_index(), 3),
        }
    }
}

/// `state.to_dict()`: stored fields plus derived `voice_source` and
/// `autonomy_index`, floats rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub p_internal: f64,
    pub voice_source: VoiceSource,
    pub rule_internalization: f64,
    pub audit_skill: f64,
    pub introspection_depth: f64,
    pub coherence: f64,
    pub memory_trust: f64,
    pub novelty_integration: f64,
    pub autonomy_index: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newborn_defaults() {
        let s = MazeState::default();
        assert_eq!(s.p_internal, 0.10);
        assert_eq!(s.voice_source(), VoiceSource::ExternalAuthority);
        assert!(s.is_bounded());
    }

    #[test]
    fn test_voice_source_boundaries() {
        assert_eq!(VoiceSource::classify(0.0), VoiceSource::ExternalAuthority);
        assert_eq!(VoiceSource::classify(0.2999), VoiceSource::ExternalAuthority);
        assert_eq!(VoiceSource::classify(0.30), VoiceSource::Transitional);
        assert_eq!(VoiceSource::classify(0.6999), VoiceSource::Transitional);
        assert_eq!(VoiceSource::classify(0.70), VoiceSource::InternalSelf);
        assert_eq!(VoiceSource::classify(1.0), VoiceSource::InternalSelf);
    }

    #[test]
    fn test_voice_source_ordering() {
        assert!(VoiceSource::ExternalAuthority < VoiceSource::Transitional);
        assert!(VoiceSource::Transitional < VoiceSource::InternalSelf);
    }

    #[test]
    fn test_autonomy_index() {
        let s = MazeState::default();
        // 0.30*0 + 0.30*0.1 + 0.40*0.1 = 0.07
        assert!((s.autonomy_index() - 0.07).abs() < 1e-12);
        let full = MazeState {
            p_internal: 1.0,
            rule_internalization: 1.0,
            audit_skill: 1.0,
            ..MazeState::default()
        };
        assert!((full.autonomy_index() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_all() {
        let mut s = MazeState {
            p_internal: 1.3,
            coherence: -0.2,
            memory_trust: f64::NAN,
            ..MazeState::default()
        };
        assert!(!s.is_bounded());
        s.clamp_all();
        assert!(s.is_bounded());
        assert_eq!(s.p_internal, 1.0);
        assert_eq!(s.coherence, 0.0);
        assert_eq!(s.memory_trust, 0.0);
    }

    #[test]
    fn test_snapshot_keys_and_rounding() {
        let s = MazeState {
            p_internal: 0.123456,
            ..MazeState::default()
        };
        let snap = s.snapshot();
        assert_eq!(snap.p_internal, 0.123);
        let json = serde_json::to_value(&snap).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "p_internal",
            "voice_source",
            "rule_internalization",
            "audit_skill",
            "introspection_depth",
            "coherence",
            "memory_trust",
            "novelty_integration",
            "autonomy_index",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj.len(), 9);
        assert_eq!(json["voice_source"], "external");
    }
}
