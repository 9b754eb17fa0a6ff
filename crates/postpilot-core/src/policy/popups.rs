//! Popup and permission-prompt handlers.

use super::Policy;
use postpilot_common::protocol::{Key, Target, UiElement};
use postpilot_common::{Action, Evidence};

/// Dismissal phrases, in priority order.
pub const DISMISS_PHRASES: &[&str] = &[
    "not now",
    "skip",
    "maybe later",
    "no thanks",
    "don't allow",
    "cancel",
    "dismiss",
];

/// Grant phrases for permission dialogs the flow depends on.
const ALLOW_PHRASES: &[&str] = &["while using the app", "allow", "ok"];

impl Policy {
    /// Permission prompts gating media access must be granted or the flow
    /// dead-ends in the gallery; anything else is dismissed like a popup.
    pub(crate) fn permission_prompt(
        &self,
        elements: &[UiElement],
        evidence: &Evidence,
    ) -> Action {
        let gates_media = ["photo", "media", "storage", "camera"]
            .iter()
            .any(|needle| evidence.contains(needle));

        if gates_media {
            for phrase in ALLOW_PHRASES {
                if let Some(index) = evidence.find_text_exact(phrase) {
                    return Action::tap(
                        Target::from_element(index, &elements[index]),
                        format!("granting media permission via {:?}", phrase),
                        0.92,
                    );
                }
            }
            for phrase in ALLOW_PHRASES {
                if let Some(index) = evidence.find_text_contains(phrase) {
                    return Action::tap(
                        Target::from_element(index, &elements[index]),
                        format!("granting media permission via {:?} (substring)", phrase),
                        0.85,
                    );
                }
            }
        }

        self.dismiss_popup(elements, evidence, "permission prompt")
    }

    /// Dismiss a popup: exact phrase first, then substring, then back out.
    pub(crate) fn dismiss_popup(
        &self,
        elements: &[UiElement],
        evidence: &Evidence,
        what: &str,
    ) -> Action {
        for phrase in DISMISS_PHRASES {
            if let Some(index) = evidence.find_text_exact(phrase) {
                return Action::tap(
                    Target::from_element(index, &elements[index]),
                    format!("dismissing {} via {:?}", what, phrase),
                    0.92,
                );
            }
        }

        for phrase in DISMISS_PHRASES {
            let index = evidence
                .find_text_contains(phrase)
                .or_else(|| evidence.find_desc_contains(phrase));
            if let Some(index) = index {
                return Action::tap(
                    Target::from_element(index, &elements[index]),
                    format!("dismissing {} via {:?} (substring)", what, phrase),
                    0.85,
                );
            }
        }

        Action::press(
            Key::Back,
            format!("no dismiss control on {}; backing out", what),
            0.70,
        )
    }
}
