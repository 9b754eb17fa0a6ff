use serde::{Deserialize, Serialize};

/// Append-only step counters for one posting attempt. Constructed per
/// attempt and owned by the navigator; never shared process-wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStats {
    pub total_steps: u64,
    pub rule_based_steps: u64,
    pub ai_calls: u64,
}

impl NavigationStats {
    pub fn record_step(&mut self) {
        self.total_steps += 1;
    }

    pub fn record_rule_step(&mut self) {
        self.rule_based_steps += 1;
    }

    pub fn record_ai_call(&mut self) {
        self.ai_calls += 1;
    }

    pub fn report(&self) -> StatsReport {
        StatsReport::from(*self)
    }
}

/// Rule-coverage report: what share of steps the rule engine handled without
/// paying for an AI call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_steps: u64,
    pub rule_based_steps: u64,
    pub ai_calls: u64,
    pub rule_based_pct: f32,
    pub ai_pct: f32,
}

impl From<NavigationStats> for StatsReport {
    fn from(stats: NavigationStats) -> Self {
        let pct = |part: u64| {
            if stats.total_steps == 0 {
                0.0
            } else {
                part as f32 / stats.total_steps as f32 * 100.0
            }
        };
        Self {
            total_steps: stats.total_steps,
            rule_based_steps: stats.rule_based_steps,
            ai_calls: stats.ai_calls,
            rule_based_pct: pct(stats.rule_based_steps),
            ai_pct: pct(stats.ai_calls),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_percentages() {
        let mut stats = NavigationStats::default();
        for _ in 0..8 {
            stats.record_step();
            stats.record_rule_step();
        }
        for _ in 0..2 {
            stats.record_step();
            stats.record_ai_call();
        }
        let report = stats.report();
        assert_eq!(report.total_steps, 10);
        assert_eq!(report.rule_based_pct, 80.0);
        assert_eq!(report.ai_pct, 20.0);
    }

    #[test]
    fn empty_report_avoids_division_by_zero() {
        let report = NavigationStats::default().report();
        assert_eq!(report.rule_based_pct, 0.0);
        assert_eq!(report.ai_pct, 0.0);
    }
}
