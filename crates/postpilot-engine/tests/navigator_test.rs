use async_trait::async_trait;
use postpilot_common::protocol::{ActionKind, DeviceProfile, Stage, UiElement};
use postpilot_core::{EngineConfig, ScreenType, TargetApp};
use postpilot_engine::{
    AiDecider, AiError, AiProposal, BackendError, DeviceBackend, HybridNavigator, Session,
    SessionOutcome,
};
use postpilot_common::protocol::Action;

fn el(text: &str, desc: &str) -> UiElement {
    UiElement {
        text: text.to_string(),
        desc: desc.to_string(),
        clickable: true,
        ..Default::default()
    }
}

fn home_feed() -> Vec<UiElement> {
    vec![
        el("For You", ""),
        el("Following", ""),
        el("", "Create"),
    ]
}

fn caption_screen() -> Vec<UiElement> {
    vec![
        el("Describe your post", ""),
        el("Post", ""),
        el("Who can view this post", ""),
    ]
}

fn unrecognized_screen() -> Vec<UiElement> {
    vec![el("lorem ipsum", ""), el("Mystery Button", "")]
}

fn navigator() -> HybridNavigator {
    HybridNavigator::new(
        TargetApp::TikTok,
        DeviceProfile::default(),
        "hello",
        EngineConfig::default(),
    )
}

struct CannedAi(AiProposal);

#[async_trait]
impl AiDecider for CannedAi {
    async fn analyze(
        &self,
        _snapshot: &[UiElement],
        _caption: &str,
        _video_selected: bool,
        _caption_entered: bool,
    ) -> Result<AiProposal, AiError> {
        Ok(self.0.clone())
    }
}

struct FailingAi;

#[async_trait]
impl AiDecider for FailingAi {
    async fn analyze(
        &self,
        _snapshot: &[UiElement],
        _caption: &str,
        _video_selected: bool,
        _caption_entered: bool,
    ) -> Result<AiProposal, AiError> {
        Err(AiError::Call("decision service timed out".to_string()))
    }
}

#[tokio::test]
async fn stuck_loopable_screen_gets_recovery_action() {
    let mut nav = navigator();
    let snapshot = home_feed();

    for _ in 0..3 {
        let result = nav.navigate(&snapshot).await;
        assert!(
            matches!(result.action.kind, ActionKind::Tap { .. }),
            "early steps should tap the create button"
        );
    }

    let fourth = nav.navigate(&snapshot).await;
    assert!(
        matches!(fourth.action.kind, ActionKind::Swipe { .. }),
        "fourth identical classification must deflect, got {:?}",
        fourth.action.kind
    );
    assert_eq!(fourth.reason, "stuck-state recovery");
}

#[tokio::test]
async fn non_loopable_screen_never_deflects() {
    let mut nav = navigator();
    let snapshot = caption_screen();

    for _ in 0..6 {
        let result = nav.navigate(&snapshot).await;
        assert!(
            matches!(result.action.kind, ActionKind::TypeText { .. }),
            "caption entry is not loopable, got {:?}",
            result.action.kind
        );
    }
}

#[tokio::test]
async fn defer_without_ai_becomes_diagnostic_error() {
    let mut nav = navigator();
    let result = nav.navigate(&unrecognized_screen()).await;

    assert_eq!(result.screen, ScreenType::Unknown);
    assert!(!result.used_ai);
    match &result.action.kind {
        ActionKind::Error { reason } => {
            assert!(reason.contains("no AI decider configured"));
            assert!(reason.contains("unknown"));
        }
        other => panic!("expected diagnostic error, got {:?}", other),
    }
    assert!(result.action.rationale.contains("Mystery Button"));
}

#[tokio::test]
async fn ai_call_failure_degrades_to_wait() {
    let mut nav = navigator().with_ai(Box::new(FailingAi));
    let result = nav.navigate(&unrecognized_screen()).await;

    assert!(result.used_ai);
    assert!(matches!(result.action.kind, ActionKind::Wait { .. }));
    assert!(result.action.confidence <= 0.30);
    assert_eq!(nav.stats().ai_calls, 1);
}

#[tokio::test]
async fn malformed_ai_response_degrades_to_wait() {
    let proposal = AiProposal {
        action: "reboot".to_string(),
        rationale: Some("because".to_string()),
        ..Default::default()
    };
    let mut nav = navigator().with_ai(Box::new(CannedAi(proposal)));
    let result = nav.navigate(&unrecognized_screen()).await;

    assert!(result.used_ai);
    assert!(matches!(result.action.kind, ActionKind::Wait { .. }));
}

#[tokio::test]
async fn valid_ai_proposal_becomes_action() {
    let proposal = AiProposal {
        action: "tap".to_string(),
        rationale: Some("unrecognized promo; the button advances".to_string()),
        target: Some("Mystery Button".to_string()),
        confidence: Some(0.8),
        ..Default::default()
    };
    let mut nav = navigator().with_ai(Box::new(CannedAi(proposal)));
    let result = nav.navigate(&unrecognized_screen()).await;

    assert!(result.used_ai);
    match &result.action.kind {
        ActionKind::Tap { target } => assert_eq!(target.label, "Mystery Button"),
        other => panic!("expected tap from AI proposal, got {:?}", other),
    }
    assert_eq!(nav.stats().ai_calls, 1);
}

#[tokio::test]
async fn terminal_screens_bypass_ai_entirely() {
    let mut nav = navigator().with_ai(Box::new(FailingAi));
    let banned = vec![
        el("Your account was permanently banned", ""),
        el("You violated our community guidelines", ""),
    ];
    let result = nav.navigate(&banned).await;

    assert!(!result.used_ai);
    assert!(result.action.is_error());
    assert_eq!(result.action.confidence, 1.0);
    assert_eq!(nav.stats().ai_calls, 0);
}

#[tokio::test]
async fn caption_entered_never_reverts_within_attempt() {
    let mut nav = navigator();

    let typed = nav.navigate(&caption_screen()).await;
    assert_eq!(typed.action.completes, Some(Stage::CaptionEntered));
    nav.confirm_executed(&typed.action);
    assert!(nav.state().caption_entered);

    // Later confirmations, whatever they complete, must not clear the flag.
    let submit = nav.navigate(&caption_screen()).await;
    nav.confirm_executed(&submit.action);
    nav.confirm_executed(&Action::swipe(
        postpilot_common::protocol::SwipeDirection::Up,
        "unrelated",
        0.7,
    ));
    assert!(nav.state().caption_entered);
}

#[tokio::test]
async fn stats_track_rule_and_ai_shares() {
    let mut nav = navigator().with_ai(Box::new(FailingAi));

    nav.navigate(&home_feed()).await;
    nav.navigate(&caption_screen()).await;
    nav.navigate(&unrecognized_screen()).await;

    let report = nav.report();
    assert_eq!(report.total_steps, 3);
    assert_eq!(report.rule_based_steps, 2);
    assert_eq!(report.ai_calls, 1);
    assert!((report.rule_based_pct - 66.66).abs() < 1.0);
}

struct ScriptedBackend {
    snapshots: Vec<Vec<UiElement>>,
    cursor: usize,
    executed: Vec<Action>,
}

impl ScriptedBackend {
    fn new(snapshots: Vec<Vec<UiElement>>) -> Self {
        Self {
            snapshots,
            cursor: 0,
            executed: Vec::new(),
        }
    }
}

#[async_trait]
impl DeviceBackend for ScriptedBackend {
    async fn capture_snapshot(&mut self) -> Result<Vec<UiElement>, BackendError> {
        let snapshot = self
            .snapshots
            .get(self.cursor.min(self.snapshots.len() - 1))
            .cloned()
            .ok_or_else(|| BackendError::Capture("no snapshot scripted".to_string()))?;
        self.cursor += 1;
        Ok(snapshot)
    }

    async fn execute(&mut self, action: &Action) -> Result<(), BackendError> {
        self.executed.push(action.clone());
        Ok(())
    }
}

#[tokio::test]
async fn session_stops_on_success() {
    let success_screen = vec![el("Your video has been posted", ""), el("Done", "")];
    let mut backend = ScriptedBackend::new(vec![home_feed(), success_screen]);
    let mut nav = navigator();

    let outcome = Session::new(10).run(&mut backend, &mut nav).await.unwrap();
    assert_eq!(outcome, SessionOutcome::Posted { steps: 2 });
    assert_eq!(backend.executed.len(), 1);
}

#[tokio::test]
async fn session_stops_on_terminal_error() {
    let banned = vec![
        el("Your account was permanently banned", ""),
        el("You violated our community guidelines", ""),
    ];
    let mut backend = ScriptedBackend::new(vec![banned]);
    let mut nav = navigator();

    let outcome = Session::new(10).run(&mut backend, &mut nav).await.unwrap();
    match outcome {
        SessionOutcome::Failed { reason, steps } => {
            assert_eq!(steps, 1);
            assert!(reason.contains("banned"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(backend.executed.is_empty());
}

#[tokio::test]
async fn session_respects_step_budget() {
    let mut backend = ScriptedBackend::new(vec![home_feed()]);
    let mut nav = navigator();

    let outcome = Session::new(3).run(&mut backend, &mut nav).await.unwrap();
    assert_eq!(outcome, SessionOutcome::ExhaustedSteps { steps: 3 });
    assert_eq!(backend.executed.len(), 3);
}
