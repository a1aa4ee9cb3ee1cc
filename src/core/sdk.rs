use crate::domain::model::User;

/// Looks up the relatives of `user`.
///
/// Every user has one relative, Judy. Parents also get Frank and Marta. An
/// unknown `has_children` counts as no children. Ids wrap on overflow.
pub fn relatives_for(user: &User) -> Vec<User> {
    let has_children = user.has_children.unwrap_or(false);

    let mut relatives = Vec::with_capacity(if has_children { 3 } else { 1 });
    relatives.push(User::new(
        user.id.wrapping_add(1),
        "Judy Doe",
        Some(has_children),
        user.address.clone(),
    ));

    if has_children {
        relatives.push(User::new(
            user.id.wrapping_add(2),
            "Frank Doe",
            Some(false),
            user.address.clone(),
        ));
        relatives.push(User::new(
            user.id.wrapping_add(3),
            "Marta Doe",
            Some(false),
            user.address.clone(),
        ));
    }

    relatives
}
