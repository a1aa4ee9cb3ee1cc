use crate::domain::model::User;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Decodes and validates a user handed over as JSON.
pub fn user_from_json(raw: &str) -> Result<User> {
    let user: User = serde_json::from_str(raw)?;
    user.validate()?;
    Ok(user)
}

pub fn users_to_json(users: &[User]) -> Result<String> {
    Ok(serde_json::to_string_pretty(users)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::jane_doe;
    use crate::utils::error::BridgeError;

    #[test]
    fn test_user_from_json() {
        let user = user_from_json(
            r#"{"id":1,"name":"Jane Doe","hasChildren":true,
                "address":{"street":"97 York Road","city":"London","zipcode":"NW91 5RU"}}"#,
        )
        .unwrap();
        assert_eq!(user, jane_doe());
    }

    #[test]
    fn test_user_from_json_rejects_bad_input() {
        assert!(matches!(
            user_from_json(r#"{"id":1,"name":"Jane Doe"}"#),
            Err(BridgeError::SerializationError(_))
        ));
        assert!(matches!(
            user_from_json(r#"{"id":"one","name":"Jane","address":{"street":"a","city":"b","zipcode":"c"}}"#),
            Err(BridgeError::SerializationError(_))
        ));
        assert!(matches!(
            user_from_json(r#"{"id":1,"name":"","address":{"street":"a","city":"b","zipcode":"c"}}"#),
            Err(BridgeError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_users_to_json_empty() {
        assert_eq!(users_to_json(&[]).unwrap(), "[]");
    }
}
