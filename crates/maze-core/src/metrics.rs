// ─────────────────────────────────────────────────────────────────────
// Bicameral Maze — Episode Metrics
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use maze_types::round_to;

/// Monotonic counters, accumulated across every `decide` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub steps: u64,
    /// Cycles in which the inner voice was gated in.
    pub audit_invoked: u64,
    /// Gated-in cycles whose choice differs from the baseline argmax.
    pub audit_changed_action: u64,
    pub veto_applied: u64,
    /// Every veto blocks exactly one `Act`.
    pub identity_violations_blocked: u64,
    pub regret_sum: f64,
}

impl Metrics {
    /// `regret_sum / max(1, steps)`.
    pub fn avg_regret(&self) -> f64 {
        self.regret_sum / self.steps.max(1) as f64
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            steps: self.steps,
            audit_invoked: self.audit_invoked,
            audit_changed_action: self.audit_changed_action,
            veto_applied: self.veto_applied,
            identity_violations_blocked: self.identity_violations_blocked,
            avg_regret: round_to(self.avg_regret(), 6),
        }
    }
}

/// Episode-level view with `avg_regret` in place of the raw sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub steps: u64,
    pub audit_invoked: u64,
    pub audit_changed_action: u64,
    pub veto_applied: u64,
    pub identity_violations_blocked: u64,
    pub avg_regret: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_regret_empty() {
        assert_eq!(Metrics::default().avg_regret(), 0.0);
    }

    #[test]
    fn test_summary_rounding() {
        let m = Metrics {
            steps: 3,
            regret_sum: 0.1,
            ..Metrics::default()
        };
        assert_eq!(m.summary().avg_regret, 0.033333);
    }

    #[test]
    fn test_summary_json_keys() {
        let json = serde_json::to_value(Metrics::default().summary()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 6);
        assert!(obj.contains_key("avg_regret"));
        assert!(!obj.contains_key("regret_sum"));
    }
}
