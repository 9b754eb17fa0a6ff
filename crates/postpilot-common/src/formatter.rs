//! Plain-text rendering of snapshot elements and actions for logs and
//! diagnostic messages.

use crate::protocol::{Action, ActionKind, UiElement};

/// One line per element, e.g.
/// `[3] "Next" (id ...:id/btn_next) @ (540,1820) 120x80 {clickable}`
pub fn format_element(index: usize, element: &UiElement) -> String {
    let mut out = format!("[{}] {:?}", index, element.label());

    if !element.resource_id.is_empty() {
        out.push_str(&format!(" (id {})", element.resource_id));
    }

    let (cx, cy) = element.bounds.center();
    out.push_str(&format!(
        " @ ({},{}) {}x{}",
        cx,
        cy,
        element.bounds.width(),
        element.bounds.height()
    ));

    if element.clickable {
        out.push_str(" {clickable}");
    }

    out
}

/// The leading elements of a snapshot, one per line, capped at `max` entries.
/// Used as context in diagnostic errors when no rule covers a screen.
pub fn summarize_snapshot(elements: &[UiElement], max: usize) -> String {
    let mut lines: Vec<String> = elements
        .iter()
        .take(max)
        .enumerate()
        .map(|(i, e)| format_element(i, e))
        .collect();

    if elements.len() > max {
        lines.push(format!("... and {} more", elements.len() - max));
    }

    lines.join("\n")
}

pub fn format_action(action: &Action) -> String {
    let head = match &action.kind {
        ActionKind::Tap { target } => {
            let (x, y) = target.center();
            format!("tap {:?} @ ({},{})", target.label, x, y)
        }
        ActionKind::TapAt { x, y } => format!("tap @ ({},{})", x, y),
        ActionKind::TypeText { target, text } => match target {
            Some(t) => format!("type {:?} into {:?}", text, t.label),
            None => format!("type {:?} into focused control", text),
        },
        ActionKind::Swipe { direction } => format!("swipe {:?}", direction).to_lowercase(),
        ActionKind::Wait { seconds } => format!("wait {}s", seconds),
        ActionKind::Press { key } => format!("press {:?}", key).to_lowercase(),
        ActionKind::Success => "success".to_string(),
        ActionKind::Defer => "defer".to_string(),
        ActionKind::Error { reason } => format!("error: {}", reason),
    };

    format!(
        "{} ({:.0}%, {})",
        head,
        action.confidence * 100.0,
        action.rationale
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Bounds, Target};

    fn element(text: &str, clickable: bool) -> UiElement {
        UiElement {
            text: text.to_string(),
            desc: String::new(),
            resource_id: String::new(),
            bounds: Bounds::new(0, 0, 100, 50),
            clickable,
        }
    }

    #[test]
    fn element_line_shape() {
        let line = format_element(2, &element("Next", true));
        assert_eq!(line, "[2] \"Next\" @ (50,25) 100x50 {clickable}");
    }

    #[test]
    fn summary_caps_entries() {
        let elements: Vec<UiElement> = (0..5).map(|i| element(&format!("e{}", i), false)).collect();
        let summary = summarize_snapshot(&elements, 3);
        assert_eq!(summary.lines().count(), 4);
        assert!(summary.ends_with("... and 2 more"));
    }

    #[test]
    fn action_line_includes_confidence_and_rationale() {
        let target = Target::from_element(0, &element("Post", true));
        let line = format_action(&Action::tap(target, "exact text match", 0.92));
        assert!(line.contains("tap \"Post\""));
        assert!(line.contains("92%"));
        assert!(line.contains("exact text match"));
    }
}
