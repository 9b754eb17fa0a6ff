//! Progress and terminal-outcome handlers.

use super::Policy;
use postpilot_common::Action;

impl Policy {
    /// Upload in flight: poll until the app lands on success or an error.
    pub(crate) fn upload_progress(&self) -> Action {
        Action::wait(2.0, "upload in progress; waiting before next capture", 0.90)
    }

    /// Explicit confirmation, or the owner view of the just-posted video.
    pub(crate) fn post_success(&self) -> Action {
        Action::success("post confirmed on screen", 0.95)
    }

    /// Unrecoverable account/app condition. Confidence 1.0 and never
    /// escalated: retrying a ban or a captcha from a bot makes things worse.
    pub(crate) fn terminal(&self, reason: &str) -> Action {
        Action::error(reason, "terminal condition; surfacing to operator", 1.0)
    }
}
