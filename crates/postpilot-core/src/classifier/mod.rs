//! Screen classification.
//!
//! Rules are evaluated in a fixed priority order; each rule sums the weights
//! of its firing signals, capped per rule. The first rule to reach the
//! configured threshold wins. When none does, every rule is still scored so
//! the Unknown result can carry the best sub-threshold candidate for
//! diagnostics.

pub mod rules;
pub mod signal;

use crate::config::ClassifierConfig;
use crate::screen::{DetectionResult, TargetApp};
use postpilot_common::Evidence;
use regex::Regex;
use rules::{rules_for, Rule};
use signal::SignalKind;

const PERCENT_PATTERN: &str = r"\b\d{1,3}\s?%";

pub struct Classifier {
    app: TargetApp,
    threshold: f32,
    percent: Regex,
}

impl Classifier {
    pub fn new(app: TargetApp, config: &ClassifierConfig) -> Self {
        Self {
            app,
            threshold: config.confidence_threshold,
            // Static pattern, cannot fail to compile.
            percent: Regex::new(PERCENT_PATTERN).expect("percent pattern"),
        }
    }

    pub fn app(&self) -> TargetApp {
        self.app
    }

    /// Classify one snapshot. Never errors: the worst case is Unknown, with
    /// confidence 0.0 only for an empty snapshot.
    pub fn classify(&self, evidence: &Evidence) -> DetectionResult {
        if evidence.is_empty() {
            return DetectionResult::unknown(0.0, "empty_snapshot");
        }

        let mut best_score = 0.0_f32;
        let mut best_rule = "no_rule";

        for rule in rules_for(self.app) {
            let (score, tags) = self.score_rule(rule, evidence);
            if score >= self.threshold {
                return DetectionResult::matched(rule.screen, score, rule.name, tags);
            }
            if score > best_score {
                best_score = score;
                best_rule = rule.name;
            }
        }

        DetectionResult::unknown(best_score, best_rule)
    }

    /// Additive score of one rule with its fired evidence tags.
    fn score_rule(&self, rule: &Rule, evidence: &Evidence) -> (f32, Vec<String>) {
        let mut score = 0.0_f32;
        let mut tags = Vec::new();

        for signal in rule.signals {
            let hit = match signal.kind {
                SignalKind::Percent => self.percent.is_match(evidence.all_text()),
                _ => signal.hits(evidence),
            };
            if hit {
                score += signal.weight;
                tags.push(signal.tag.to_string());
            }
        }

        (score.min(rule.cap), tags)
    }
}
