use serde::{Deserialize, Serialize};

/// Engine tuning. The classifier threshold and the stuck-streak limit are
/// hand-tuned operational constants, kept configurable rather than baked in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub navigator: NavigatorConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum rule score for a positive classification.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

fn default_confidence_threshold() -> f32 {
    0.70
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Consecutive same-screen classifications before a recovery action is
    /// substituted on loopable screens.
    #[serde(default = "default_stuck_streak")]
    pub stuck_streak: u32,
    /// Pause used when deflecting a stalled upload-progress screen.
    #[serde(default = "default_recovery_wait_seconds")]
    pub recovery_wait_seconds: f32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            stuck_streak: default_stuck_streak(),
            recovery_wait_seconds: default_recovery_wait_seconds(),
        }
    }
}

fn default_stuck_streak() -> u32 {
    4
}

fn default_recovery_wait_seconds() -> f32 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Legacy behavior: when the caption field cannot be located, type into
    /// whichever control currently has focus. Off by default; the engine
    /// defers instead.
    #[serde(default)]
    pub optimistic_focus_typing: bool,
    /// Minimum Jaro-Winkler similarity for the fuzzy text-match tier.
    #[serde(default = "default_fuzzy_min_score")]
    pub fuzzy_min_score: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            optimistic_focus_typing: false,
            fuzzy_min_score: default_fuzzy_min_score(),
        }
    }
}

fn default_fuzzy_min_score() -> f64 {
    0.85
}
