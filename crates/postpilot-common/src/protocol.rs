use serde::{Deserialize, Serialize};

/// Pixel rectangle of an element in screen coordinates.
///
/// Coordinates follow the accessibility dump convention: `(x1, y1)` is the
/// top-left corner, `(x2, y2)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Bounds {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }

    /// Center point, the tap target for this element.
    pub fn center(&self) -> (i32, i32) {
        (self.x1 + self.width() / 2, self.y1 + self.height() / 2)
    }
}

/// One element of a UI snapshot, as captured from the device.
///
/// All string fields default to empty when the capture omits them. The
/// `resource_id` is an opaque identifier that is reassigned across app builds;
/// matching on it is only ever a secondary signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiElement {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default)]
    pub clickable: bool,
}

impl UiElement {
    /// Best human-readable label: text, else description, else resource id.
    pub fn label(&self) -> &str {
        if !self.text.is_empty() {
            &self.text
        } else if !self.desc.is_empty() {
            &self.desc
        } else {
            &self.resource_id
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Back,
    Home,
    Enter,
}

/// A concrete element reference handed to the device transport.
///
/// The index points into the snapshot the action was decided against; the
/// bounds are carried so the transport can tap without re-resolving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub index: usize,
    pub bounds: Bounds,
    pub label: String,
}

impl Target {
    pub fn from_element(index: usize, element: &UiElement) -> Self {
        Self {
            index,
            bounds: element.bounds,
            label: element.label().to_string(),
        }
    }

    pub fn center(&self) -> (i32, i32) {
        self.bounds.center()
    }
}

/// Posting stage an action completes once the caller confirms execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    VideoSelected,
    CaptionEntered,
    ShareConfirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    Tap { target: Target },
    TapAt { x: i32, y: i32 },
    TypeText { target: Option<Target>, text: String },
    Swipe { direction: SwipeDirection },
    Wait { seconds: f32 },
    Press { key: Key },
    Success,
    Defer,
    Error { reason: String },
}

/// One decided control action.
///
/// `rationale` and `confidence` travel with every action so the surrounding
/// system can decide whether to trust it without inspecting engine internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(flatten)]
    pub kind: ActionKind,
    pub rationale: String,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completes: Option<Stage>,
}

impl Action {
    fn new(kind: ActionKind, rationale: impl Into<String>, confidence: f32) -> Self {
        Self {
            kind,
            rationale: rationale.into(),
            confidence: confidence.clamp(0.0, 1.0),
            completes: None,
        }
    }

    pub fn tap(target: Target, rationale: impl Into<String>, confidence: f32) -> Self {
        Self::new(ActionKind::Tap { target }, rationale, confidence)
    }

    pub fn tap_at(x: i32, y: i32, rationale: impl Into<String>, confidence: f32) -> Self {
        Self::new(ActionKind::TapAt { x, y }, rationale, confidence)
    }

    pub fn type_text(
        target: Option<Target>,
        text: impl Into<String>,
        rationale: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self::new(
            ActionKind::TypeText {
                target,
                text: text.into(),
            },
            rationale,
            confidence,
        )
    }

    pub fn swipe(direction: SwipeDirection, rationale: impl Into<String>, confidence: f32) -> Self {
        Self::new(ActionKind::Swipe { direction }, rationale, confidence)
    }

    pub fn wait(seconds: f32, rationale: impl Into<String>, confidence: f32) -> Self {
        Self::new(ActionKind::Wait { seconds }, rationale, confidence)
    }

    pub fn press(key: Key, rationale: impl Into<String>, confidence: f32) -> Self {
        Self::new(ActionKind::Press { key }, rationale, confidence)
    }

    pub fn success(rationale: impl Into<String>, confidence: f32) -> Self {
        Self::new(ActionKind::Success, rationale, confidence)
    }

    pub fn defer(rationale: impl Into<String>) -> Self {
        Self::new(ActionKind::Defer, rationale, 0.0)
    }

    pub fn error(reason: impl Into<String>, rationale: impl Into<String>, confidence: f32) -> Self {
        Self::new(
            ActionKind::Error {
                reason: reason.into(),
            },
            rationale,
            confidence,
        )
    }

    /// Mark the posting stage this action finishes once executed.
    pub fn completing(mut self, stage: Stage) -> Self {
        self.completes = Some(stage);
        self
    }

    pub fn is_defer(&self) -> bool {
        matches!(self.kind, ActionKind::Defer)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, ActionKind::Error { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self.kind, ActionKind::Success)
    }
}

/// Screen dimensions of the device executing the flow.
///
/// Coordinate-fallback taps are expressed as fractions of the screen so the
/// same policy tables work across form factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub width: u32,
    pub height: u32,
}

impl DeviceProfile {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Absolute pixel position for a fractional screen coordinate.
    pub fn point(&self, fx: f32, fy: f32) -> (i32, i32) {
        let x = (self.width as f32 * fx.clamp(0.0, 1.0)).round() as i32;
        let y = (self.height as f32 * fy.clamp(0.0, 1.0)).round() as i32;
        (x, y)
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        // 1080x1920 portrait, the most common cloud-phone profile.
        Self {
            width: 1080,
            height: 1920,
        }
    }
}
