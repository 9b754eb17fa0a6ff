//! Per-screen action policy.
//!
//! One handler per screen type; the match in `decide` is exhaustive so a new
//! `ScreenType` variant fails compilation until it gets a handler. Handlers
//! are pure functions of the snapshot, the evidence, and the posting state.

pub mod caption;
pub mod flow;
pub mod locate;
pub mod outcome;
pub mod popups;

use crate::config::PolicyConfig;
use crate::screen::{ScreenType, TargetApp};
use crate::state::PostingState;
use postpilot_common::protocol::{DeviceProfile, UiElement};
use postpilot_common::{Action, Evidence};

pub struct Policy {
    app: TargetApp,
    device: DeviceProfile,
    caption: String,
    config: PolicyConfig,
}

impl Policy {
    pub fn new(
        app: TargetApp,
        device: DeviceProfile,
        caption: impl Into<String>,
        config: &PolicyConfig,
    ) -> Self {
        Self {
            app,
            device,
            caption: caption.into(),
            config: config.clone(),
        }
    }

    pub fn app(&self) -> TargetApp {
        self.app
    }

    pub(crate) fn device(&self) -> DeviceProfile {
        self.device
    }

    pub(crate) fn caption(&self) -> &str {
        &self.caption
    }

    pub(crate) fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Select the next action for a classified screen.
    pub fn decide(
        &self,
        screen: ScreenType,
        elements: &[UiElement],
        evidence: &Evidence,
        state: &PostingState,
    ) -> Action {
        match screen {
            ScreenType::HomeFeed => self.home_feed(elements, evidence),
            ScreenType::CreateMenu => self.create_menu(elements, evidence),
            ScreenType::GalleryPicker => self.gallery_picker(elements, evidence, state),
            ScreenType::Editor => self.editor(elements, evidence),
            ScreenType::CaptionEntry => self.caption_entry(elements, evidence, state),
            ScreenType::UploadProgress => self.upload_progress(),
            ScreenType::PostSuccess => self.post_success(),
            ScreenType::PermissionPrompt => self.permission_prompt(elements, evidence),
            ScreenType::UpdatePrompt => self.dismiss_popup(elements, evidence, "update prompt"),
            ScreenType::InterstitialPromo => {
                self.dismiss_popup(elements, evidence, "interstitial promo")
            }
            ScreenType::LoginRequired => {
                self.terminal("login required; session is logged out")
            }
            ScreenType::Verification => {
                self.terminal("verification challenge; human intervention required")
            }
            ScreenType::AccountBanned => self.terminal("account banned or suspended"),
            ScreenType::Unknown => Action::defer("screen not classified by any rule"),
        }
    }
}
