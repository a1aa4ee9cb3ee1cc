pub mod bridge;
pub mod engine;
pub mod relatives_module;
pub mod sdk;
pub mod shell;
pub mod slot;

pub use crate::domain::model::{Address, User};
pub use crate::domain::ports::{ShellConfig, UserModule};
pub use crate::domain::promise::{promise, PendingUsers, UsersPromise};
pub use crate::utils::error::Result;
