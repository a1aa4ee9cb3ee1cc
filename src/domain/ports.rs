use crate::domain::model::User;
use crate::domain::promise::PendingUsers;
use crate::utils::error::Result;
use std::time::Duration;

/// The call surface a native module exposes to the shell.
pub trait UserModule: Send + Sync {
    /// Registration name, used for logging.
    fn name(&self) -> &str;

    /// Blocks the calling turn until the module answers.
    fn get_users(&self, user: &User) -> Result<Vec<User>>;

    /// Issues the call and returns immediately. The handle settles later.
    fn get_users_async(&self, user: User) -> PendingUsers;
}

pub trait ShellConfig: Send + Sync {
    fn sync_user(&self) -> User;
    fn async_user(&self) -> User;
    /// `None` waits for as long as the module takes.
    fn settle_timeout(&self) -> Option<Duration>;
}
