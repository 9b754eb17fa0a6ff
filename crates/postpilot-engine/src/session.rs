//! Bounded driving loop around one posting attempt.
//!
//! capture → navigate → execute → confirm, until the navigator reports
//! success or a terminal error, or the step budget runs out.

use crate::backend::{BackendError, DeviceBackend};
use crate::navigator::HybridNavigator;
use postpilot_common::protocol::ActionKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("device backend error: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The post went through.
    Posted { steps: u32 },
    /// A terminal condition was surfaced.
    Failed { reason: String, steps: u32 },
    /// The step budget ran out before either outcome.
    ExhaustedSteps { steps: u32 },
}

pub struct Session {
    max_steps: u32,
}

impl Session {
    pub fn new(max_steps: u32) -> Self {
        Self { max_steps }
    }

    pub async fn run<B>(
        &self,
        backend: &mut B,
        navigator: &mut HybridNavigator,
    ) -> Result<SessionOutcome, SessionError>
    where
        B: DeviceBackend + ?Sized,
    {
        for step in 1..=self.max_steps {
            let snapshot = backend.capture_snapshot().await?;
            let result = navigator.navigate(&snapshot).await;

            match &result.action.kind {
                ActionKind::Success => return Ok(SessionOutcome::Posted { steps: step }),
                ActionKind::Error { reason } => {
                    return Ok(SessionOutcome::Failed {
                        reason: reason.clone(),
                        steps: step,
                    })
                }
                _ => {
                    backend.execute(&result.action).await?;
                    navigator.confirm_executed(&result.action);
                }
            }
        }

        Ok(SessionOutcome::ExhaustedSteps {
            steps: self.max_steps,
        })
    }
}
