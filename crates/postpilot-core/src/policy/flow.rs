//! Main-flow handlers: home feed, create menu, gallery picker, editor.

use super::locate::{find_control, ControlSpec, CONF_COORDINATE, CONF_SUBSTRING};
use super::Policy;
use crate::screen::TargetApp;
use crate::state::PostingState;
use postpilot_common::protocol::{Stage, UiElement};
use postpilot_common::{Action, Evidence};

const TIKTOK_CREATE: ControlSpec = ControlSpec::phrases(&["create", "+"], &["create"]);
const INSTAGRAM_CREATE: ControlSpec =
    ControlSpec::phrases(&["create", "new post"], &["create", "new post"]);

const TIKTOK_UPLOAD_ENTRY: ControlSpec =
    ControlSpec::phrases(&["upload", "album"], &["upload", "album"]);
const INSTAGRAM_CREATE_OPTION: ControlSpec =
    ControlSpec::phrases(&["reel", "post", "new post"], &["reel"]);

const TIKTOK_GALLERY_NEXT: ControlSpec = ControlSpec {
    id_fragments: &["next"],
    exact: &["next"],
    substrings: &["next ("],
    fuzzy: &[],
};
const INSTAGRAM_GALLERY_NEXT: ControlSpec = ControlSpec::phrases(&["next"], &["next"]);

const VIDEO_THUMBNAIL: ControlSpec = ControlSpec {
    id_fragments: &[],
    exact: &[],
    substrings: &["video"],
    fuzzy: &[],
};

const TIKTOK_EDITOR_NEXT: ControlSpec = ControlSpec::phrases(&["next", "done"], &["next"]);
const INSTAGRAM_EDITOR_NEXT: ControlSpec = ControlSpec::phrases(&["next"], &["next"]);

impl Policy {
    /// Home feed: open the creation surface.
    pub(crate) fn home_feed(&self, elements: &[UiElement], evidence: &Evidence) -> Action {
        let spec = match self.app() {
            TargetApp::TikTok => &TIKTOK_CREATE,
            TargetApp::Instagram => &INSTAGRAM_CREATE,
        };
        if let Some(located) =
            find_control(elements, evidence, spec, self.config().fuzzy_min_score)
        {
            return Action::tap(
                located.target(elements),
                located.rationale("create button"),
                located.confidence,
            );
        }

        // The create tab sits bottom-center on both apps across form factors.
        let (x, y) = self.device().point(0.5, 0.94);
        Action::tap_at(
            x,
            y,
            "create button not found; tapping bottom-center tab slot",
            CONF_COORDINATE,
        )
    }

    /// Create menu: route into the media picker.
    pub(crate) fn create_menu(&self, elements: &[UiElement], evidence: &Evidence) -> Action {
        let (spec, fallback, what) = match self.app() {
            TargetApp::TikTok => (&TIKTOK_UPLOAD_ENTRY, (0.84, 0.88), "upload entry"),
            TargetApp::Instagram => (&INSTAGRAM_CREATE_OPTION, (0.5, 0.72), "reel option"),
        };
        if let Some(located) =
            find_control(elements, evidence, spec, self.config().fuzzy_min_score)
        {
            return Action::tap(
                located.target(elements),
                located.rationale(what),
                located.confidence,
            );
        }

        let (x, y) = self.device().point(fallback.0, fallback.1);
        Action::tap_at(
            x,
            y,
            format!("{} not found; tapping its usual position", what),
            CONF_COORDINATE,
        )
    }

    /// Gallery picker: select a video, then confirm the selection. The state
    /// flag skips the selection step once it is already done.
    pub(crate) fn gallery_picker(
        &self,
        elements: &[UiElement],
        evidence: &Evidence,
        state: &PostingState,
    ) -> Action {
        if state.video_selected {
            let (spec, fallback) = match self.app() {
                TargetApp::TikTok => (&TIKTOK_GALLERY_NEXT, (0.5, 0.93)),
                TargetApp::Instagram => (&INSTAGRAM_GALLERY_NEXT, (0.9, 0.07)),
            };
            if let Some(located) =
                find_control(elements, evidence, spec, self.config().fuzzy_min_score)
            {
                return Action::tap(
                    located.target(elements),
                    located.rationale("gallery next button"),
                    located.confidence,
                );
            }
            let (x, y) = self.device().point(fallback.0, fallback.1);
            return Action::tap_at(
                x,
                y,
                "gallery next button not found; tapping its usual position",
                CONF_COORDINATE,
            );
        }

        // Thumbnails describe themselves as "Video, <duration>" in both apps.
        if let Some(located) = find_control(
            elements,
            evidence,
            &VIDEO_THUMBNAIL,
            self.config().fuzzy_min_score,
        ) {
            return Action::tap(
                located.target(elements),
                "first video thumbnail in the grid",
                CONF_SUBSTRING.min(located.confidence),
            )
            .completing(Stage::VideoSelected);
        }

        let cell = match self.app() {
            TargetApp::TikTok => (0.17, 0.33),
            TargetApp::Instagram => (0.17, 0.45),
        };
        let (x, y) = self.device().point(cell.0, cell.1);
        Action::tap_at(
            x,
            y,
            "no labelled thumbnail; tapping first grid cell",
            CONF_COORDINATE,
        )
        .completing(Stage::VideoSelected)
    }

    /// Editor: advance to the caption screen without touching edit tools.
    pub(crate) fn editor(&self, elements: &[UiElement], evidence: &Evidence) -> Action {
        let (spec, fallback) = match self.app() {
            TargetApp::TikTok => (&TIKTOK_EDITOR_NEXT, (0.86, 0.93)),
            TargetApp::Instagram => (&INSTAGRAM_EDITOR_NEXT, (0.9, 0.93)),
        };
        if let Some(located) =
            find_control(elements, evidence, spec, self.config().fuzzy_min_score)
        {
            return Action::tap(
                located.target(elements),
                located.rationale("editor next button"),
                located.confidence,
            );
        }

        let (x, y) = self.device().point(fallback.0, fallback.1);
        Action::tap_at(
            x,
            y,
            "editor next button not found; tapping its usual position",
            CONF_COORDINATE,
        )
    }
}
