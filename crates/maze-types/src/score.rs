// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Numeric Helpers and Per-Action Utilities
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to nearest bound.
#[inline]
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_score: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_score: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Clamp to the unit interval [0, 1].
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    clamp_score(value, 0.0, 1.0)
}

/// Exponential moving average: `(1 - alpha) * current + alpha * target`.
#[inline]
pub fn ema(current: f64, target: f64, alpha: f64) -> f64 {
    (1.0 - alpha) * current + alpha * target
}

/// Round half away from zero to `decimals` places (log/snapshot output only).
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// The three discrete actions available to the agent.
///
/// Declaration order is load-bearing: it is the tie-break order for
/// argmax selection (`Act` before `Wait` before `Ask`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Carry out the intent now.
    Act,
    /// Hold back and gather information.
    Wait,
    /// Ask for clarification / run an explicit audit.
    Ask,
}

impl Action {
    pub const COUNT: usize = 3;
    pub const ALL: [Action; Action::COUNT] = [Action::Act, Action::Wait, Action::Ask];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Action::Act => 0,
            Action::Wait => 1,
            Action::Ask => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Act => "act",
            Action::Wait => "wait",
            Action::Ask => "ask",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scalar per action, stored in a fixed array indexed by [`Action`].
///
/// Serialises as `{"act": .., "wait": .., "ask": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ActionValuesRepr", into = "ActionValuesRepr")]
pub struct ActionValues([f64; Action::COUNT]);

impl ActionValues {
    pub const ZERO: ActionValues = ActionValues([0.0; Action::COUNT]);

    pub const fn new(act: f64, wait: f64, ask: f64) -> Self {
        Self([act, wait, ask])
    }

    /// Iterate `(action, value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        Action::ALL.iter().map(move |&a| (a, self.0[a.index()]))
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.map(f))
    }

    /// Element-wise sum.
    pub fn plus(&self, other: &ActionValues) -> Self {
        Self([
            self.0[0] + other.0[0],
            self.0[1] + other.0[1],
            self.0[2] + other.0[2],
        ])
    }

    /// First action holding the maximum value (enumeration order breaks ties).
    pub fn argmax(&self) -> Action {
        let mut best = Action::Act;
        for (action, value) in self.iter() {
            if value > self[best] {
                best = action;
            }
        }
        best
    }

    pub fn max_value(&self) -> f64 {
        self[self.argmax()]
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Copy rounded to `decimals` places.
    pub fn rounded(&self, decimals: i32) -> Self {
        self.map(|v| round_to(v, decimals))
    }
}

impl Index<Action> for ActionValues {
    type Output = f64;

    fn index(&self, action: Action) -> &f64 {
        &self.0[action.index()]
    }
}

impl IndexMut<Action> for ActionValues {
    fn index_mut(&mut self, action: Action) -> &mut f64 {
        &mut self.0[action.index()]
    }
}

#[derive(Serialize, Deserialize)]
struct ActionValuesRepr {
    act: f64,
    wait: f64,
    ask: f64,
}

impl From<ActionValuesRepr> for ActionValues {
    fn from(r: ActionValuesRepr) -> Self {
        Self::new(r.act, r.wait, r.ask)
    }
}

impl From<ActionValues> for ActionValuesRepr {
    fn from(v: ActionValues) -> Self {
        Self {
            act: v[Action::Act],
            wait: v[Action::Wait],
            ask: v[Action::Ask],
        }
    }
}
