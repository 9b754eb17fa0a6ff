//! Boundary to the external AI decision service.
//!
//! The service is consumed through the `AiDecider` trait and answers with an
//! `AiProposal`: a loosely-typed record that promises nothing beyond an
//! action kind and a rationale. `normalize` validates that contract and
//! builds a real `Action`, rejecting malformed responses with a typed error
//! instead of letting a raw failure propagate into the decision loop.

use async_trait::async_trait;
use postpilot_common::protocol::{Key, SwipeDirection, Target, UiElement};
use postpilot_common::{Action, Evidence};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI decision call failed: {0}")]
    Call(String),

    #[error("malformed AI response: {0}")]
    Malformed(String),
}

/// Minimal required-field contract for an AI response. Everything beyond
/// `action` and `rationale` is optional and validated per action kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiProposal {
    pub action: String,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub seconds: Option<f32>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

#[async_trait]
pub trait AiDecider: Send + Sync {
    async fn analyze(
        &self,
        snapshot: &[UiElement],
        caption: &str,
        video_selected: bool,
        caption_entered: bool,
    ) -> Result<AiProposal, AiError>;
}

/// Validate a proposal against the snapshot it was produced for and build
/// the corresponding action.
pub fn normalize(proposal: &AiProposal, elements: &[UiElement]) -> Result<Action, AiError> {
    let rationale = proposal
        .rationale
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AiError::Malformed("missing rationale".to_string()))?;
    let confidence = proposal.confidence.unwrap_or(0.6).clamp(0.0, 1.0);

    match proposal.action.as_str() {
        "tap" => {
            if let Some(text) = &proposal.target {
                let target = resolve_target(text, elements)?;
                Ok(Action::tap(target, rationale, confidence))
            } else if let (Some(x), Some(y)) = (proposal.x, proposal.y) {
                Ok(Action::tap_at(x, y, rationale, confidence))
            } else {
                Err(AiError::Malformed(
                    "tap requires a target or coordinates".to_string(),
                ))
            }
        }
        "type" | "type_text" => {
            let text = proposal
                .text
                .clone()
                .ok_or_else(|| AiError::Malformed("type requires text".to_string()))?;
            let target = match &proposal.target {
                Some(label) => Some(resolve_target(label, elements)?),
                None => None,
            };
            Ok(Action::type_text(target, text, rationale, confidence))
        }
        "swipe" => {
            let direction = match proposal.direction.as_deref() {
                Some("up") => SwipeDirection::Up,
                Some("down") => SwipeDirection::Down,
                Some("left") => SwipeDirection::Left,
                Some("right") => SwipeDirection::Right,
                other => {
                    return Err(AiError::Malformed(format!(
                        "swipe direction {:?} not recognized",
                        other
                    )))
                }
            };
            Ok(Action::swipe(direction, rationale, confidence))
        }
        "wait" => Ok(Action::wait(
            proposal.seconds.unwrap_or(2.0).max(0.0),
            rationale,
            confidence,
        )),
        "press" | "back" => {
            let key = match proposal.target.as_deref() {
                None | Some("back") => Key::Back,
                Some("home") => Key::Home,
                Some("enter") => Key::Enter,
                Some(other) => {
                    return Err(AiError::Malformed(format!(
                        "key {:?} not recognized",
                        other
                    )))
                }
            };
            Ok(Action::press(key, rationale, confidence))
        }
        "success" | "done" => Ok(Action::success(rationale, confidence)),
        "abort" | "error" => {
            let reason = proposal
                .text
                .clone()
                .unwrap_or_else(|| rationale.to_string());
            Ok(Action::error(reason, rationale, confidence))
        }
        other => Err(AiError::Malformed(format!(
            "unknown action kind {:?}",
            other
        ))),
    }
}

/// Map a target phrase back onto a snapshot element: exact text/desc first,
/// then substring.
fn resolve_target(label: &str, elements: &[UiElement]) -> Result<Target, AiError> {
    let needle = label.trim().to_lowercase();
    let evidence = Evidence::extract(elements);
    let index = evidence
        .find_text_exact(&needle)
        .or_else(|| evidence.find_desc_exact(&needle))
        .or_else(|| evidence.find_text_contains(&needle))
        .or_else(|| evidence.find_desc_contains(&needle))
        .ok_or_else(|| {
            AiError::Malformed(format!("tap target {:?} not present in snapshot", label))
        })?;
    Ok(Target::from_element(index, &elements[index]))
}
