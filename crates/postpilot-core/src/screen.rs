use serde::{Deserialize, Serialize};
use std::fmt;

/// Which posting flow the engine is driving. The two apps evolve
/// independently, so each carries its own rule and policy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetApp {
    TikTok,
    Instagram,
}

impl fmt::Display for TargetApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetApp::TikTok => write!(f, "tiktok"),
            TargetApp::Instagram => write!(f, "instagram"),
        }
    }
}

/// Closed set of screens the posting flow can encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenType {
    HomeFeed,
    CreateMenu,
    GalleryPicker,
    Editor,
    CaptionEntry,
    UploadProgress,
    PostSuccess,
    PermissionPrompt,
    UpdatePrompt,
    InterstitialPromo,
    LoginRequired,
    Verification,
    AccountBanned,
    Unknown,
}

impl ScreenType {
    /// Overlays can appear on top of any other screen, which is why their
    /// rules are evaluated first.
    pub fn is_overlay(&self) -> bool {
        matches!(
            self,
            ScreenType::PermissionPrompt
                | ScreenType::UpdatePrompt
                | ScreenType::InterstitialPromo
        )
    }

    /// Unrecoverable account/app conditions. Always surfaced, never retried.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScreenType::LoginRequired | ScreenType::Verification | ScreenType::AccountBanned
        )
    }

    /// Screens observed to re-classify identically across consecutive steps
    /// even though actions executed: the feed keeps feeding, the gallery
    /// re-renders, progress stalls, promos reappear.
    pub fn is_loopable(&self) -> bool {
        matches!(
            self,
            ScreenType::HomeFeed
                | ScreenType::GalleryPicker
                | ScreenType::UploadProgress
                | ScreenType::InterstitialPromo
        )
    }
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenType::HomeFeed => "home_feed",
            ScreenType::CreateMenu => "create_menu",
            ScreenType::GalleryPicker => "gallery_picker",
            ScreenType::Editor => "editor",
            ScreenType::CaptionEntry => "caption_entry",
            ScreenType::UploadProgress => "upload_progress",
            ScreenType::PostSuccess => "post_success",
            ScreenType::PermissionPrompt => "permission_prompt",
            ScreenType::UpdatePrompt => "update_prompt",
            ScreenType::InterstitialPromo => "interstitial_promo",
            ScreenType::LoginRequired => "login_required",
            ScreenType::Verification => "verification",
            ScreenType::AccountBanned => "account_banned",
            ScreenType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Classification outcome for one snapshot. Produced fresh each step and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub screen: ScreenType,
    pub confidence: f32,
    pub matched_rule: String,
    pub evidence: Vec<String>,
}

impl DetectionResult {
    pub fn matched(
        screen: ScreenType,
        confidence: f32,
        rule: &str,
        evidence: Vec<String>,
    ) -> Self {
        Self {
            screen,
            confidence: confidence.clamp(0.0, 1.0),
            matched_rule: rule.to_string(),
            evidence,
        }
    }

    /// No rule reached threshold: carry the best sub-threshold score and the
    /// rule that produced it, for diagnostics.
    pub fn unknown(best_score: f32, best_rule: &str) -> Self {
        Self {
            screen: ScreenType::Unknown,
            confidence: best_score.clamp(0.0, 1.0),
            matched_rule: best_rule.to_string(),
            evidence: Vec::new(),
        }
    }
}
