use crate::core::sdk;
use crate::domain::model::User;
use crate::domain::ports::UserModule;
use crate::domain::promise::{promise, PendingUsers};
use crate::utils::error::{BridgeError, Result};
use std::time::Duration;
use tokio::runtime::Handle;

pub const MODULE_NAME: &str = "MyCppModule";

/// The shipped module: answers both calls from the relatives lookup.
#[derive(Debug, Clone, Default)]
pub struct RelativesModule {
    async_delay: Duration,
}

impl RelativesModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds every async answer back by `delay` before resolving.
    pub fn with_async_delay(delay: Duration) -> Self {
        Self { async_delay: delay }
    }

    pub fn async_delay(&self) -> Duration {
        self.async_delay
    }
}

impl UserModule for RelativesModule {
    fn name(&self) -> &str {
        MODULE_NAME
    }

    fn get_users(&self, user: &User) -> Result<Vec<User>> {
        tracing::debug!(module = MODULE_NAME, user_id = user.id, "getUsers called");
        let relatives = sdk::relatives_for(user);
        tracing::debug!(module = MODULE_NAME, count = relatives.len(), "getUsers returned");
        Ok(relatives)
    }

    fn get_users_async(&self, user: User) -> PendingUsers {
        tracing::debug!(module = MODULE_NAME, user_id = user.id, "getUsersAsync issued");
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!(module = MODULE_NAME, "getUsersAsync called outside a runtime");
                return PendingUsers::settled(Err(BridgeError::RuntimeUnavailable {
                    operation: "getUsersAsync".to_string(),
                }));
            }
        };

        let (promise, pending) = promise();

        let delay = self.async_delay;
        handle.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if promise.is_abandoned() {
                tracing::debug!(module = MODULE_NAME, "getUsersAsync caller went away");
                return;
            }
            let relatives = sdk::relatives_for(&user);
            tracing::debug!(module = MODULE_NAME, count = relatives.len(), "getUsersAsync resolved");
            promise.resolve(relatives);
        });

        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{jane_doe, john_doe};
    use tokio::time::Instant;
    use tokio_test::{assert_pending, task};

    #[test]
    fn test_get_users_is_idempotent() {
        let module = RelativesModule::new();
        let first = module.get_users(&john_doe()).unwrap();
        let second = module.get_users(&john_doe()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, sdk::relatives_for(&john_doe()));
    }

    #[tokio::test]
    async fn test_get_users_async_resolves_to_relatives() {
        let module = RelativesModule::new();
        let users = module.get_users_async(jane_doe()).await.unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users, module.get_users(&jane_doe()).unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_delay_holds_answer_back() {
        let module = RelativesModule::with_async_delay(Duration::from_millis(300));
        let start = Instant::now();
        let mut pending = module.get_users_async(jane_doe());

        let early = tokio::time::timeout(Duration::from_millis(299), &mut pending).await;
        assert!(early.is_err());

        let users = pending.await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_not_settled_before_first_poll() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let _guard = rt.enter();
        let module = RelativesModule::new();
        let mut pending = task::spawn(module.get_users_async(john_doe()));
        assert_pending!(pending.poll());
    }

    #[test]
    fn test_outside_runtime_rejects_instead_of_panicking() {
        let module = RelativesModule::new();
        let pending = module.get_users_async(john_doe());
        let outcome = tokio_test::block_on(pending);
        assert!(matches!(
            outcome,
            Err(BridgeError::RuntimeUnavailable { .. })
        ));
    }
}
