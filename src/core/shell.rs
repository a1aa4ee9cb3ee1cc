use crate::core::slot::{ResultSlot, SlotState};
use crate::domain::model::User;
use crate::domain::ports::{ShellConfig, UserModule};
use crate::domain::promise::PendingUsers;
use crate::utils::error::{BridgeError, Result};
use std::sync::Arc;
use std::time::Duration;

/// What the shell applied when a pending call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    AsyncUsersReady { count: usize },
    AsyncUsersFailed { reason: String },
}

/// Screen state driven by one `UserModule`.
///
/// All slot updates happen on the caller's turn: `activate` fills the sync
/// slot directly, the async slot is only written from `next_event`,
/// `process_pending_events` or `run_until_settled`.
pub struct Shell<M: UserModule + ?Sized = dyn UserModule> {
    module: Arc<M>,
    sync_user: User,
    async_user: User,
    settle_timeout: Option<Duration>,
    sync_users: ResultSlot,
    async_users: ResultSlot,
    pending_async: Option<PendingUsers>,
    async_error: Option<BridgeError>,
    activated: bool,
}

impl<M: UserModule + ?Sized> Shell<M> {
    pub fn new<C: ShellConfig + ?Sized>(module: Arc<M>, config: &C) -> Self {
        Self {
            module,
            sync_user: config.sync_user(),
            async_user: config.async_user(),
            settle_timeout: config.settle_timeout(),
            sync_users: ResultSlot::new(),
            async_users: ResultSlot::new(),
            pending_async: None,
            async_error: None,
            activated: false,
        }
    }

    /// Calls `get_users` and stores the answer, then issues `get_users_async`.
    ///
    /// Only the first activation calls the module. A sync failure marks the
    /// sync slot failed and skips the async call.
    pub fn activate(&mut self) -> Result<()> {
        if self.activated {
            tracing::debug!("Shell already activated, ignoring");
            return Ok(());
        }
        self.activated = true;

        let module_name = self.module.name().to_string();
        tracing::info!(module = %module_name, user_id = self.sync_user.id, "Calling getUsers");

        match self.module.get_users(&self.sync_user) {
            Ok(users) => {
                tracing::info!(module = %module_name, count = users.len(), "Sync users ready");
                self.sync_users.replace(users);
            }
            Err(e) => {
                tracing::error!(module = %module_name, "getUsers failed: {}", e);
                self.sync_users.fail(e.to_string());
                return Err(e);
            }
        }

        tracing::info!(module = %module_name, user_id = self.async_user.id, "Issuing getUsersAsync");
        self.pending_async = Some(self.module.get_users_async(self.async_user.clone()));
        Ok(())
    }

    /// Applies any call that has already settled, without waiting.
    pub fn process_pending_events(&mut self) -> Vec<ShellEvent> {
        let Some(pending) = self.pending_async.as_mut() else {
            return Vec::new();
        };
        match pending.try_settle() {
            Some(outcome) => {
                self.pending_async = None;
                vec![self.apply_async(outcome)]
            }
            None => Vec::new(),
        }
    }

    /// Waits for the next pending call to settle and applies it.
    ///
    /// Returns `None` when nothing is in flight. Dropping the returned future
    /// leaves the call in flight.
    pub async fn next_event(&mut self) -> Option<ShellEvent> {
        let pending = self.pending_async.as_mut()?;
        let outcome = pending.await;
        self.pending_async = None;
        Some(self.apply_async(outcome))
    }

    /// Drains every in-flight call, bounded by the configured settle timeout.
    ///
    /// On timeout the async slot keeps whatever it held and the call stays
    /// in flight.
    pub async fn run_until_settled(&mut self) -> Result<Vec<ShellEvent>> {
        let settle_timeout = self.settle_timeout;
        let drain = async {
            let mut events = Vec::new();
            while let Some(event) = self.next_event().await {
                events.push(event);
            }
            events
        };

        match settle_timeout {
            None => Ok(drain.await),
            Some(timeout) => tokio::time::timeout(timeout, drain).await.map_err(|_| {
                tracing::warn!("Pending calls did not settle within {:?}", timeout);
                BridgeError::Timeout {
                    millis: timeout.as_millis() as u64,
                }
            }),
        }
    }

    fn apply_async(&mut self, outcome: Result<Vec<User>>) -> ShellEvent {
        match outcome {
            Ok(users) => {
                let count = users.len();
                tracing::info!(module = %self.module.name(), count, "Async users ready");
                self.async_users.replace(users);
                ShellEvent::AsyncUsersReady { count }
            }
            Err(e) => {
                tracing::error!(module = %self.module.name(), "getUsersAsync rejected: {}", e);
                let reason = e.to_string();
                self.async_users.fail(reason.clone());
                self.async_error = Some(e);
                ShellEvent::AsyncUsersFailed { reason }
            }
        }
    }

    pub fn sync_users(&self) -> &ResultSlot {
        &self.sync_users
    }

    pub fn async_users(&self) -> &ResultSlot {
        &self.async_users
    }

    pub fn sync_user(&self) -> &User {
        &self.sync_user
    }

    pub fn async_user(&self) -> &User {
        &self.async_user
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// The error behind a `Failed` async slot, if not taken yet.
    pub fn take_async_error(&mut self) -> Option<BridgeError> {
        self.async_error.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_async.is_some()
    }

    /// Text rendering of both sections.
    pub fn render(&self) -> Result<String> {
        let sync = render_section("Sync users", &self.sync_user, &self.sync_users)?;
        let async_section = render_section("Async users", &self.async_user, &self.async_users)?;
        Ok(format!("{}\n\n{}\n", sync, async_section))
    }
}

fn render_section(title: &str, user: &User, slot: &ResultSlot) -> Result<String> {
    let user_json = serde_json::to_string_pretty(user)?;
    let relatives = match slot.state() {
        SlotState::Failed(reason) => format!("unavailable ({})", reason),
        SlotState::Empty | SlotState::Ready(_) => serde_json::to_string_pretty(slot.users())?,
    };
    Ok(format!(
        "{}\nFor user {} we have following relatives {}",
        title, user_json, relatives
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;
    use crate::core::relatives_module::RelativesModule;

    #[tokio::test]
    async fn test_render_before_and_after_settle() {
        let mut shell = Shell::new(Arc::new(RelativesModule::new()), &TomlConfig::default());
        let before = shell.render().unwrap();
        assert!(before.contains("Sync users\nFor user {"));
        assert!(before.contains("we have following relatives []"));

        shell.activate().unwrap();
        shell.run_until_settled().await.unwrap();

        let after = shell.render().unwrap();
        assert!(after.contains("\"Judy Doe\""));
        assert!(after.contains("\"Marta Doe\""));
        assert!(after.contains("Async users\nFor user {"));
    }

    #[tokio::test]
    async fn test_dyn_module() {
        let module: Arc<dyn UserModule> = Arc::new(RelativesModule::new());
        let mut shell: Shell = Shell::new(module, &TomlConfig::default());
        shell.activate().unwrap();
        assert_eq!(shell.sync_users().users().len(), 1);
        assert!(shell.has_pending());
        let events = shell.run_until_settled().await.unwrap();
        assert_eq!(events, vec![ShellEvent::AsyncUsersReady { count: 3 }]);
        assert!(!shell.has_pending());
    }
}
