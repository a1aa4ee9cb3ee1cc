use crate::core::shell::{Shell, ShellEvent};
use crate::domain::ports::UserModule;
use crate::utils::error::{BridgeError, Result};

/// The rendered screen, plus whatever went wrong while producing it.
#[derive(Debug)]
pub struct ScreenOutcome {
    pub screen: String,
    pub error: Option<BridgeError>,
}

/// Drives a shell through one full screen cycle.
pub struct ScreenEngine<M: UserModule + ?Sized> {
    shell: Shell<M>,
}

impl<M: UserModule + ?Sized> ScreenEngine<M> {
    pub fn new(shell: Shell<M>) -> Self {
        Self { shell }
    }

    /// Activates, waits for the async call and renders the screen.
    ///
    /// The screen is rendered even when a call fails or the wait times out;
    /// the failure comes back alongside it.
    pub async fn run(&mut self) -> Result<ScreenOutcome> {
        tracing::info!("Activating screen");
        let error = match self.shell.activate() {
            Ok(()) => {
                let slot = self.shell.sync_users();
                if let Some(at) = slot.updated_at() {
                    tracing::debug!("Sync slot revision {} updated at {}", slot.revision(), at.to_rfc3339());
                }
                self.settle().await
            }
            Err(e) => Some(e),
        };

        let screen = self.shell.render()?;
        Ok(ScreenOutcome { screen, error })
    }

    async fn settle(&mut self) -> Option<BridgeError> {
        tracing::info!("Waiting for pending calls");
        match self.shell.run_until_settled().await {
            Ok(events) => {
                for event in events {
                    match event {
                        ShellEvent::AsyncUsersReady { count } => {
                            tracing::debug!("Async slot updated with {} users", count)
                        }
                        ShellEvent::AsyncUsersFailed { reason } => {
                            tracing::warn!("Async slot failed: {}", reason)
                        }
                    }
                }
                self.shell.take_async_error()
            }
            Err(e) => Some(e),
        }
    }

    pub fn shell(&self) -> &Shell<M> {
        &self.shell
    }
}
