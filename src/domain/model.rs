use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zipcode: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            zipcode: zipcode.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.street, self.city, self.zipcode)
    }
}

/// A user record as it crosses the module boundary.
///
/// `has_children` is `None` when the caller did not say; it is serialized as
/// `hasChildren` and omitted entirely in that case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_children: Option<bool>,
    pub address: Address,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>, has_children: Option<bool>, address: Address) -> Self {
        Self {
            id,
            name: name.into(),
            has_children,
            address,
        }
    }
}

/// First fixture: no `hasChildren` given.
pub fn john_doe() -> User {
    User::new(
        1,
        "John Doe",
        None,
        Address::new("47 West Street", "London", "N97 6QJ"),
    )
}

/// Second fixture: a parent.
pub fn jane_doe() -> User {
    User::new(
        1,
        "Jane Doe",
        Some(true),
        Address::new("97 York Road", "London", "NW91 5RU"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_children_absent_or_null_is_none() {
        let absent: User = serde_json::from_value(json!({
            "id": 1,
            "name": "John Doe",
            "address": {"street": "47 West Street", "city": "London", "zipcode": "N97 6QJ"}
        }))
        .unwrap();
        assert_eq!(absent, john_doe());

        let null: User = serde_json::from_value(json!({
            "id": 1,
            "name": "John Doe",
            "hasChildren": null,
            "address": {"street": "47 West Street", "city": "London", "zipcode": "N97 6QJ"}
        }))
        .unwrap();
        assert_eq!(null.has_children, None);
    }

    #[test]
    fn test_missing_address_is_rejected() {
        let result: serde_json::Result<User> =
            serde_json::from_value(json!({"id": 1, "name": "John Doe"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_unknown_children() {
        let value = serde_json::to_value(jane_doe()).unwrap();
        assert_eq!(value["hasChildren"], json!(true));
        assert_eq!(value["address"]["zipcode"], json!("NW91 5RU"));

        let value = serde_json::to_value(john_doe()).unwrap();
        assert!(value.get("hasChildren").is_none());
    }

    #[test]
    fn test_address_display() {
        assert_eq!(
            john_doe().address.to_string(),
            "47 West Street London N97 6QJ"
        );
    }
}
