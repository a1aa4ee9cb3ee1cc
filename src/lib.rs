pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use core::{
    engine::{ScreenEngine, ScreenOutcome},
    relatives_module::{RelativesModule, MODULE_NAME},
    shell::{Shell, ShellEvent},
    slot::{ResultSlot, SlotState},
};
pub use domain::model::{Address, User};
pub use domain::ports::{ShellConfig, UserModule};
pub use domain::promise::{promise, PendingUsers, UsersPromise};
pub use utils::error::{BridgeError, Result};
