use async_trait::async_trait;
use postpilot_common::protocol::{Action, UiElement};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("snapshot capture failed: {0}")]
    Capture(String),

    #[error("action execution failed: {0}")]
    Execute(String),

    #[error("device session lost: {0}")]
    Disconnected(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Seam to the external device transport. The engine never calls this from
/// inside `navigate`; only the session driver touches it, so one decision is
/// always fully made before anything executes.
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    /// Capture the current UI element tree, in traversal order.
    async fn capture_snapshot(&mut self) -> Result<Vec<UiElement>, BackendError>;

    /// Execute one decided action on the device.
    async fn execute(&mut self, action: &Action) -> Result<(), BackendError>;
}
