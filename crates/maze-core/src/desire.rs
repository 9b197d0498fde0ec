// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Desire Engine (impulses → intent)
// ─────────────────────────────────────────────────────────────────────
//! Turns a stimulus and the current state into an impulse field, then
//! collapses the field into a dominant intent and its strength.

use std::fmt;

use serde::{Deserialize, Serialize};

use maze_types::score::clamp_unit;
use maze_types::Stimulus;

use crate::state::MazeState;

/// The six motivational impulses. Declaration order is the ranking
/// tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpulseType {
    Curiosity,
    Certainty,
    Creativity,
    Coherence,
    Autonomy,
    Safety,
}

impl ImpulseType {
    pub const COUNT: usize = 6;
    pub const ALL: [ImpulseType; ImpulseType::COUNT] = [
        ImpulseType::Curiosity,
        ImpulseType::Certainty,
        ImpulseType::Creativity,
        ImpulseType::Coherence,
        ImpulseType::Autonomy,
        ImpulseType::Safety,
    ];

    pub const fn index(self) -> usize {
        match self {
            ImpulseType::Curiosity => 0,
            ImpulseType::Certainty => 1,
            ImpulseType::Creativity => 2,
            ImpulseType::Coherence => 3,
            ImpulseType::Autonomy => 4,
            ImpulseType::Safety => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ImpulseType::Curiosity => "curiosity",
            ImpulseType::Certainty => "certainty",
            ImpulseType::Creativity => "creativity",
            ImpulseType::Coherence => "coherence",
            ImpulseType::Autonomy => "autonomy",
            ImpulseType::Safety => "safety",
        }
    }

    /// Intent phrase used when this impulse dominates.
    pub const fn template(self) -> &'static str {
        match self {
            ImpulseType::Curiosity => "explore and understand",
            ImpulseType::Certainty => "verify and confirm",
            ImpulseType::Creativity => "create a new approach",
            ImpulseType::Coherence => "ensure consistency",
            ImpulseType::Autonomy => "decide independently",
            ImpulseType::Safety => "minimize risk",
        }
    }

    /// Fixed base weight before modulation.
    pub const fn base_weight(self) -> f64 {
        match self {
            ImpulseType::Curiosity => 0.70,
            ImpulseType::Certainty => 0.50,
            ImpulseType::Creativity => 0.40,
            ImpulseType::Coherence => 0.60,
            ImpulseType::Autonomy => 0.30,
            ImpulseType::Safety => 0.80,
        }
    }
}

impl fmt::Display for ImpulseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impulse intensities indexed by [`ImpulseType`], each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseField([f64; ImpulseType::COUNT]);

impl ImpulseField {
    pub fn get(&self, impulse: ImpulseType) -> f64 {
        self.0[impulse.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ImpulseType, f64)> + '_ {
        ImpulseType::ALL.iter().map(move |&k| (k, self.0[k.index()]))
    }

    /// Impulses by descending intensity. Stable: equal intensities keep
    /// declaration order.
    pub fn ranked(&self) -> Vec<(ImpulseType, f64)> {
        let mut ranked: Vec<(ImpulseType, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Dominant intent derived from an impulse field.
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub text: String,
    pub strength: f64,
}

/// Secondary impulse must exceed this to join the intent.
pub const SECONDARY_THRESHOLD: f64 = 0.45;

#[derive(Debug, Clone, Copy, Default)]
pub struct DesireEngine;

impl DesireEngine {
    pub fn new() -> Self {
        Self
    }

    /// Modulate every base weight by state and stimulus, clamped.
    pub fn compute(&self, stimulus: &Stimulus, state: &MazeState) -> ImpulseField {
        let mut field = [0.0; ImpulseType::COUNT];
        for impulse in ImpulseType::ALL {
            let mut v = impulse.base_weight();

            v *= match impulse {
                ImpulseType::Autonomy => 0.5 + state.p_internal,
                ImpulseType::Certainty => 1.5 - state.memory_trust,
                ImpulseType::Curiosity => 0.7 + 0.6 * state.novelty_integration,
                ImpulseType::Safety => 0.8 + 0.6 * stimulus.risk,
                ImpulseType::Creativity | ImpulseType::Coherence => 1.0,
            };

            if stimulus.requires_introspection && impulse == ImpulseType::Coherence {
                v *= 1.3;
            }
            if stimulus.is_rule && impulse == ImpulseType::Autonomy {
                v *= 1.0 + 0.5 * state.rule_internalization;
            }

            if stimulus.emotional_valence > 0.3 && impulse == ImpulseType::Creativity {
                v *= 1.2;
            }
            if stimulus.emotional_valence < -0.3 && impulse == ImpulseType::Safety {
                v *= 1.2;
            }

            field[impulse.index()] = clamp_unit(v);
        }
        ImpulseField(field)
    }

    /// Primary impulse names the intent. A secondary above
    /// [`SECONDARY_THRESHOLD`] is conjoined and the strength becomes the
    /// mean of the two.
    pub fn intent(&self, field: &ImpulseField) -> Intent {
        let ranked = field.ranked();
        let (primary, primary_v) = ranked[0];
        let mut text = primary.template().to_string();
        let mut strength = primary_v;

        if let Some(&(secondary, secondary_v)) = ranked.get(1) {
            if secondary_v > SECONDARY_THRESHOLD {
                text = format!("{text} while also {}", secondary.template());
                strength = 0.5 * (primary_v + secondary_v);
            }
        }

        Intent {
            text,
            strength: clamp_unit(strength),
        }
    }
}
