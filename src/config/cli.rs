use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::validate_path;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "relatives-bridge")]
#[command(about = "Calls the relatives module synchronously and asynchronously and renders the results")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Override module.async_delay_ms from config
    #[arg(long)]
    pub async_delay_ms: Option<u64>,

    /// Override shell.settle_timeout_ms from config (0 waits forever)
    #[arg(long)]
    pub settle_timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Activate the screen and print both sections (default)
    Show,
    /// Call the module once with a user given as JSON
    Query {
        /// User record, e.g. '{"id":1,"name":"John Doe","address":{...}}'
        #[arg(long)]
        user: String,

        /// Use getUsersAsync instead of getUsers
        #[arg(long = "async")]
        use_async: bool,
    },
}

impl CliConfig {
    /// Loads the config file, if any, and applies flag overrides on top.
    pub fn load_toml(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => {
                validate_path("config", path)?;
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        if let Some(delay) = self.async_delay_ms {
            config.set_async_delay_ms(delay);
            tracing::info!("🔧 Async delay overridden to {}ms", delay);
        }
        if let Some(timeout) = self.settle_timeout_ms {
            config.set_settle_timeout_ms(timeout);
            tracing::info!("🔧 Settle timeout overridden to {}ms", timeout);
        }

        Ok(config)
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show)
    }
}
