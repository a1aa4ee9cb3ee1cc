use crate::domain::model::{Address, User};
use crate::utils::error::{BridgeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Checks an address under `prefix`, e.g. `fixtures.sync_user.address`.
pub fn validate_address(prefix: &str, address: &Address) -> Result<()> {
    validate_non_empty_string(&format!("{}.street", prefix), &address.street)?;
    validate_non_empty_string(&format!("{}.city", prefix), &address.city)?;
    validate_non_empty_string(&format!("{}.zipcode", prefix), &address.zipcode)?;
    Ok(())
}

pub fn validate_user(prefix: &str, user: &User) -> Result<()> {
    validate_non_empty_string(&format!("{}.name", prefix), &user.name)?;
    validate_address(&format!("{}.address", prefix), &user.address)
}

impl Validate for User {
    fn validate(&self) -> Result<()> {
        validate_user("user", self)
    }
}
