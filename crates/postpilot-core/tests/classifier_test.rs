use postpilot_common::protocol::UiElement;
use postpilot_common::Evidence;
use postpilot_core::config::ClassifierConfig;
use postpilot_core::screen::DetectionResult;
use postpilot_core::{Classifier, ScreenType, TargetApp};

fn el(text: &str, desc: &str) -> UiElement {
    UiElement {
        text: text.to_string(),
        desc: desc.to_string(),
        clickable: true,
        ..Default::default()
    }
}

fn classify(app: TargetApp, elements: &[UiElement]) -> DetectionResult {
    let classifier = Classifier::new(app, &ClassifierConfig::default());
    classifier.classify(&Evidence::extract(elements))
}

fn tiktok_home_feed() -> Vec<UiElement> {
    vec![
        el("For You", ""),
        el("Following", ""),
        el("", "Create"),
        el("dance challenge #fyp", ""),
    ]
}

#[test]
fn confidence_always_in_unit_range() {
    let snapshots: Vec<Vec<UiElement>> = vec![
        vec![],
        tiktok_home_feed(),
        vec![el("complete gibberish", ""), el("nothing relevant", "")],
        vec![el("Your account was permanently banned", ""), el("Appeal", "")],
        vec![el("Uploading", ""), el("99%", "")],
        vec![el("Not now", ""), el("Turn on notifications", "")],
    ];

    for app in [TargetApp::TikTok, TargetApp::Instagram] {
        for snapshot in &snapshots {
            let det = classify(app, snapshot);
            assert!(
                (0.0..=1.0).contains(&det.confidence),
                "confidence {} out of range for {:?}",
                det.confidence,
                det.matched_rule
            );
        }
    }
}

#[test]
fn empty_snapshot_is_unknown_with_zero_confidence() {
    for app in [TargetApp::TikTok, TargetApp::Instagram] {
        let det = classify(app, &[]);
        assert_eq!(det.screen, ScreenType::Unknown);
        assert_eq!(det.confidence, 0.0);
    }
}

#[test]
fn earlier_rule_wins_on_overlap() {
    // Matches both the interstitial-promo rule (0.75) and the home-feed rule
    // (0.90): the promo rule is earlier in priority order and must win even
    // though the home-feed score is higher.
    let snapshot = vec![
        el("Not now", ""),
        el("Turn on notifications", ""),
        el("For You", ""),
        el("Following", ""),
        el("", "Create"),
    ];

    for _ in 0..10 {
        let det = classify(TargetApp::TikTok, &snapshot);
        assert_eq!(det.screen, ScreenType::InterstitialPromo);
        assert_eq!(det.matched_rule, "tiktok_interstitial_promo");
    }
}

#[test]
fn tiktok_home_feed_detected() {
    let det = classify(TargetApp::TikTok, &tiktok_home_feed());
    assert_eq!(det.screen, ScreenType::HomeFeed);
    assert!(det.confidence >= 0.70);
    assert!(det.evidence.contains(&"create-button".to_string()));
}

#[test]
fn banned_screen_detected_with_high_confidence() {
    let det = classify(
        TargetApp::TikTok,
        &[
            el("Your account was permanently banned", ""),
            el("You violated our community guidelines", ""),
            el("Submit an appeal", ""),
        ],
    );
    assert_eq!(det.screen, ScreenType::AccountBanned);
    assert!(det.confidence >= 0.90);
}

#[test]
fn instagram_caption_screen_detected() {
    let det = classify(
        TargetApp::Instagram,
        &[
            el("Write a caption...", ""),
            el("Tag people", ""),
            el("Share", ""),
        ],
    );
    assert_eq!(det.screen, ScreenType::CaptionEntry);
}

#[test]
fn login_wall_detected() {
    let det = classify(
        TargetApp::Instagram,
        &[
            el("Log in", ""),
            el("Sign up", ""),
            el("Forgot password?", ""),
        ],
    );
    assert_eq!(det.screen, ScreenType::LoginRequired);
}

#[test]
fn unknown_reports_best_sub_threshold_candidate() {
    let det = classify(TargetApp::TikTok, &[el("Following", "")]);
    assert_eq!(det.screen, ScreenType::Unknown);
    assert!(det.confidence > 0.0);
    assert!(det.confidence < 0.70);
    assert_eq!(det.matched_rule, "tiktok_home_feed");
}

#[test]
fn threshold_is_configurable() {
    let strict = Classifier::new(
        TargetApp::TikTok,
        &ClassifierConfig {
            confidence_threshold: 0.99,
        },
    );
    let det = strict.classify(&Evidence::extract(&tiktok_home_feed()));
    assert_eq!(det.screen, ScreenType::Unknown);
    assert!(det.confidence < 0.99);
}

#[test]
fn upload_progress_detected_via_percent() {
    let det = classify(
        TargetApp::Instagram,
        &[el("Sharing", ""), el("Finishing up", ""), el("47%", "")],
    );
    assert_eq!(det.screen, ScreenType::UploadProgress);
}
