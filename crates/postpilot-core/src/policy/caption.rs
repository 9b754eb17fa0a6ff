//! Caption entry: type the caption, then submit the post.

use super::locate::{find_control, ControlSpec, CONF_COORDINATE};
use super::Policy;
use crate::screen::TargetApp;
use crate::state::PostingState;
use postpilot_common::protocol::{Stage, UiElement};
use postpilot_common::{Action, Evidence};

const TIKTOK_CAPTION_FIELD: ControlSpec = ControlSpec {
    // The caption input id has kept this fragment across recent builds.
    id_fragments: &["desc_input"],
    exact: &["describe your post"],
    substrings: &["describe your post", "add description", "caption"],
    fuzzy: &[],
};

const INSTAGRAM_CAPTION_FIELD: ControlSpec = ControlSpec {
    id_fragments: &["caption"],
    exact: &[],
    substrings: &["write a caption", "caption"],
    fuzzy: &[],
};

const TIKTOK_SHARE: ControlSpec = ControlSpec {
    id_fragments: &["publish"],
    exact: &["post"],
    substrings: &["post"],
    fuzzy: &[],
};

const INSTAGRAM_SHARE: ControlSpec = ControlSpec {
    id_fragments: &["share"],
    exact: &["share"],
    substrings: &["share"],
    fuzzy: &[],
};

impl Policy {
    pub(crate) fn caption_entry(
        &self,
        elements: &[UiElement],
        evidence: &Evidence,
        state: &PostingState,
    ) -> Action {
        if !state.caption_entered {
            return self.enter_caption(elements, evidence);
        }
        self.submit_post(elements, evidence)
    }

    fn enter_caption(&self, elements: &[UiElement], evidence: &Evidence) -> Action {
        let spec = match self.app() {
            TargetApp::TikTok => &TIKTOK_CAPTION_FIELD,
            TargetApp::Instagram => &INSTAGRAM_CAPTION_FIELD,
        };
        if let Some(located) =
            find_control(elements, evidence, spec, self.config().fuzzy_min_score)
        {
            return Action::type_text(
                Some(located.target(elements)),
                self.caption(),
                located.rationale("caption field"),
                located.confidence,
            )
            .completing(Stage::CaptionEntered);
        }

        if self.config().optimistic_focus_typing {
            // Legacy fragile path: assume the field holds focus and type.
            return Action::type_text(
                None,
                self.caption(),
                "caption field not located; optimistic typing into focused control",
                0.55,
            )
            .completing(Stage::CaptionEntered);
        }

        Action::defer("caption field not located; refusing to type blind")
    }

    fn submit_post(&self, elements: &[UiElement], evidence: &Evidence) -> Action {
        let (spec, fallback, what) = match self.app() {
            TargetApp::TikTok => (&TIKTOK_SHARE, (0.82, 0.94), "post button"),
            TargetApp::Instagram => (&INSTAGRAM_SHARE, (0.5, 0.94), "share button"),
        };
        if let Some(located) =
            find_control(elements, evidence, spec, self.config().fuzzy_min_score)
        {
            return Action::tap(
                located.target(elements),
                located.rationale(what),
                located.confidence,
            )
            .completing(Stage::ShareConfirmed);
        }

        let (x, y) = self.device().point(fallback.0, fallback.1);
        Action::tap_at(
            x,
            y,
            format!("{} not found; tapping its usual position", what),
            CONF_COORDINATE,
        )
        .completing(Stage::ShareConfirmed)
    }
}
