use crate::domain::model::{jane_doe, john_doe, User};
use crate::domain::ports::ShellConfig;
use crate::utils::error::{BridgeError, Result};
use crate::utils::validation::{validate_range, validate_user, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 5_000;
const MAX_SETTLE_TIMEOUT_MS: u64 = 600_000;
const MAX_ASYNC_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub module: Option<ModuleConfig>,
    pub shell: Option<ShellSection>,
    pub fixtures: Option<FixturesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub async_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellSection {
    /// `0` waits without a bound.
    pub settle_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixturesConfig {
    pub sync_user: Option<User>,
    pub async_user: Option<User>,
}

impl TomlConfig {
    /// Loads a config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a config from TOML text, after environment substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BridgeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BridgeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn async_delay(&self) -> Duration {
        Duration::from_millis(
            self.module
                .as_ref()
                .and_then(|m| m.async_delay_ms)
                .unwrap_or(0),
        )
    }

    pub fn settle_timeout_ms(&self) -> u64 {
        self.shell
            .as_ref()
            .and_then(|s| s.settle_timeout_ms)
            .unwrap_or(DEFAULT_SETTLE_TIMEOUT_MS)
    }

    pub fn set_async_delay_ms(&mut self, millis: u64) {
        self.module.get_or_insert_with(Default::default).async_delay_ms = Some(millis);
    }

    pub fn set_settle_timeout_ms(&mut self, millis: u64) {
        self.shell.get_or_insert_with(Default::default).settle_timeout_ms = Some(millis);
    }

    fn fixtures(&self) -> Option<&FixturesConfig> {
        self.fixtures.as_ref()
    }
}

impl ShellConfig for TomlConfig {
    fn sync_user(&self) -> User {
        self.fixtures()
            .and_then(|f| f.sync_user.clone())
            .unwrap_or_else(john_doe)
    }

    fn async_user(&self) -> User {
        self.fixtures()
            .and_then(|f| f.async_user.clone())
            .unwrap_or_else(jane_doe)
    }

    fn settle_timeout(&self) -> Option<Duration> {
        match self.settle_timeout_ms() {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(delay) = self.module.as_ref().and_then(|m| m.async_delay_ms) {
            validate_range("module.async_delay_ms", delay, 0, MAX_ASYNC_DELAY_MS)?;
        }

        validate_range(
            "shell.settle_timeout_ms",
            self.settle_timeout_ms(),
            0,
            MAX_SETTLE_TIMEOUT_MS,
        )?;

        if let Some(fixtures) = self.fixtures() {
            if let Some(user) = &fixtures.sync_user {
                validate_user("fixtures.sync_user", user)?;
            }
            if let Some(user) = &fixtures.async_user {
                validate_user("fixtures.async_user", user)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.sync_user(), john_doe());
        assert_eq!(config.async_user(), jane_doe());
        assert_eq!(config.async_delay(), Duration::ZERO);
        assert_eq!(config.settle_timeout(), Some(Duration::from_secs(5)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixture_override() {
        let toml_content = r#"
[module]
async_delay_ms = 250

[shell]
settle_timeout_ms = 0

[fixtures.sync_user]
id = 42
name = "Ada Doe"
hasChildren = true

[fixtures.sync_user.address]
street = "1 Main Street"
city = "Leeds"
zipcode = "LS1 1AA"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let user = config.sync_user();
        assert_eq!(user.id, 42);
        assert_eq!(user.has_children, Some(true));
        assert_eq!(user.address.city, "Leeds");
        assert_eq!(config.async_user(), jane_doe());
        assert_eq!(config.async_delay(), Duration::from_millis(250));
        assert_eq!(config.settle_timeout(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RELATIVES_TEST_CITY", "Bristol");

        let toml_content = r#"
[fixtures.async_user]
id = 3
name = "Sam Doe"

[fixtures.async_user.address]
street = "5 Quay Street"
city = "${RELATIVES_TEST_CITY}"
zipcode = "BS1 4DJ"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.async_user().address.city, "Bristol");

        std::env::remove_var("RELATIVES_TEST_CITY");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[fixtures.sync_user]
id = 1
name = " "

[fixtures.sync_user.address]
street = "47 West Street"
city = "London"
zipcode = "N97 6QJ"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let mut config = TomlConfig::default();
        config.set_settle_timeout_ms(MAX_SETTLE_TIMEOUT_MS + 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[module\nasync_delay_ms = 1");
        assert!(matches!(
            result,
            Err(BridgeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[module]\nasync_delay_ms = 10\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.async_delay(), Duration::from_millis(10));
    }
}
