//! The hybrid orchestrator: one decision per step.
//!
//! Pipeline: classify → stuck-state check → policy → AI fallback. Rule
//! decisions are free; the AI decider is only consulted when the policy
//! defers, and its failures are isolated into a low-confidence wait so an
//! attempt never aborts on a flaky decision service.

use crate::ai::{self, AiDecider, AiError};
use crate::stats::{NavigationStats, StatsReport};
use postpilot_common::protocol::{DeviceProfile, Key, SwipeDirection, UiElement};
use postpilot_common::{formatter, Action, Evidence};
use postpilot_core::screen::DetectionResult;
use postpilot_core::{Classifier, EngineConfig, Policy, PostingState, ScreenType, TargetApp};
use serde::{Deserialize, Serialize};

/// The sole externally observable artifact per step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    pub action: Action,
    pub used_ai: bool,
    pub screen: ScreenType,
    pub detection_confidence: f32,
    pub action_confidence: f32,
    pub reason: String,
}

pub struct HybridNavigator {
    config: EngineConfig,
    classifier: Classifier,
    policy: Policy,
    state: PostingState,
    stats: NavigationStats,
    ai: Option<Box<dyn AiDecider>>,
    caption: String,
    last_screen: Option<ScreenType>,
    same_screen_streak: u32,
}

impl HybridNavigator {
    pub fn new(
        app: TargetApp,
        device: DeviceProfile,
        caption: impl Into<String>,
        config: EngineConfig,
    ) -> Self {
        let caption = caption.into();
        Self {
            classifier: Classifier::new(app, &config.classifier),
            policy: Policy::new(app, device, caption.clone(), &config.policy),
            state: PostingState::new(),
            stats: NavigationStats::default(),
            ai: None,
            caption,
            last_screen: None,
            same_screen_streak: 0,
            config,
        }
    }

    pub fn with_ai(mut self, decider: Box<dyn AiDecider>) -> Self {
        self.ai = Some(decider);
        self
    }

    pub fn state(&self) -> &PostingState {
        &self.state
    }

    pub fn stats(&self) -> &NavigationStats {
        &self.stats
    }

    pub fn report(&self) -> StatsReport {
        self.stats.report()
    }

    /// Decide the next action for one snapshot. Completes fully, including
    /// any AI invocation, before returning; the caller executes the action
    /// and only then captures the next snapshot.
    pub async fn navigate(&mut self, elements: &[UiElement]) -> NavigationResult {
        self.stats.record_step();
        let evidence = Evidence::extract(elements);
        let detection = self.classifier.classify(&evidence);
        self.track_streak(detection.screen);

        if self.same_screen_streak >= self.config.navigator.stuck_streak
            && detection.screen.is_loopable()
        {
            let action = self.recovery_action(detection.screen);
            self.same_screen_streak = 0;
            self.stats.record_rule_step();
            return self.result(action, false, &detection, "stuck-state recovery");
        }

        let action = self
            .policy
            .decide(detection.screen, elements, &evidence, &self.state);

        if action.is_error() {
            // Terminal conditions surface immediately; never escalated to AI.
            return self.result(action, false, &detection, "terminal policy outcome");
        }
        if !action.is_defer() {
            self.stats.record_rule_step();
            return self.result(action, false, &detection, "rule-based decision");
        }

        if self.ai.is_none() {
            let action = self.diagnostic_error(elements, &detection);
            return self.result(action, false, &detection, "defer with no AI configured");
        }

        self.stats.record_ai_call();
        let action = self.consult_ai(elements).await;
        self.result(action, true, &detection, "escalated to AI decider")
    }

    /// Record a completed stage after the caller confirms execution. This is
    /// the only mutation path for the posting state.
    pub fn confirm_executed(&mut self, action: &Action) {
        if let Some(stage) = action.completes {
            self.state.mark(stage);
        }
    }

    fn track_streak(&mut self, screen: ScreenType) {
        if self.last_screen == Some(screen) {
            self.same_screen_streak += 1;
        } else {
            self.last_screen = Some(screen);
            self.same_screen_streak = 1;
        }
    }

    /// Deflect a livelock instead of repeating the naive action.
    fn recovery_action(&self, screen: ScreenType) -> Action {
        let seen = self.same_screen_streak;
        match screen {
            ScreenType::InterstitialPromo => Action::press(
                Key::Back,
                format!("classified {} {} times in a row; backing out", screen, seen),
                0.75,
            ),
            ScreenType::UploadProgress => Action::wait(
                self.config.navigator.recovery_wait_seconds,
                format!("upload progress unchanged for {} steps; waiting longer", seen),
                0.75,
            ),
            _ => Action::swipe(
                SwipeDirection::Up,
                format!(
                    "classified {} {} times in a row; swiping to reveal new content",
                    screen, seen
                ),
                0.75,
            ),
        }
    }

    async fn consult_ai(&mut self, elements: &[UiElement]) -> Action {
        let decider = match &self.ai {
            Some(decider) => decider,
            None => return Action::wait(2.0, "AI decider disappeared mid-step", 0.30),
        };

        let outcome = decider
            .analyze(
                elements,
                &self.caption,
                self.state.video_selected,
                self.state.caption_entered,
            )
            .await;

        match outcome {
            Ok(proposal) => match ai::normalize(&proposal, elements) {
                Ok(action) => action,
                Err(err) => ai_failure_action(err),
            },
            Err(err) => ai_failure_action(err),
        }
    }

    /// Fail closed: an unhandled screen with no AI configured becomes a
    /// diagnostic error carrying enough context to write the missing rule.
    fn diagnostic_error(&self, elements: &[UiElement], detection: &DetectionResult) -> Action {
        let reason = format!(
            "no deterministic action for screen {} (confidence {:.2}, best rule {}) and no AI decider configured",
            detection.screen, detection.confidence, detection.matched_rule
        );
        let rationale = format!(
            "fail-closed defer; leading elements:\n{}",
            formatter::summarize_snapshot(elements, 5)
        );
        Action::error(reason, rationale, 0.90)
    }

    fn result(
        &self,
        action: Action,
        used_ai: bool,
        detection: &DetectionResult,
        reason: &str,
    ) -> NavigationResult {
        NavigationResult {
            used_ai,
            screen: detection.screen,
            detection_confidence: detection.confidence,
            action_confidence: action.confidence,
            reason: reason.to_string(),
            action,
        }
    }
}

/// Isolate AI-path failures: downgrade to a low-confidence wait rather than
/// propagating into the attempt.
fn ai_failure_action(err: AiError) -> Action {
    Action::wait(
        2.0,
        format!("AI fallback failed ({}); waiting before next capture", err),
        0.30,
    )
}
