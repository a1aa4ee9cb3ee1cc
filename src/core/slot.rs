use crate::domain::model::User;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Ready(Vec<User>),
    Failed(String),
}

/// Latest result of one operation. Each update replaces the previous one.
#[derive(Debug, Clone)]
pub struct ResultSlot {
    state: SlotState,
    updated_at: Option<DateTime<Utc>>,
    revision: u64,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self {
            state: SlotState::Empty,
            updated_at: None,
            revision: 0,
        }
    }

    pub fn replace(&mut self, users: Vec<User>) {
        self.set(SlotState::Ready(users));
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.set(SlotState::Failed(reason.into()));
    }

    fn set(&mut self, state: SlotState) {
        self.state = state;
        self.updated_at = Some(Utc::now());
        self.revision += 1;
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    /// The stored users; empty unless the slot is `Ready`.
    pub fn users(&self) -> &[User] {
        match &self.state {
            SlotState::Ready(users) => users.as_slice(),
            _ => &[],
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self.state, SlotState::Empty)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for ResultSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{jane_doe, john_doe};

    #[test]
    fn test_replace_is_wholesale() {
        let mut slot = ResultSlot::new();
        assert!(!slot.is_settled());
        assert!(slot.users().is_empty());

        slot.replace(vec![john_doe(), jane_doe()]);
        slot.replace(vec![jane_doe()]);
        assert_eq!(slot.users(), &[jane_doe()]);
        assert_eq!(slot.revision(), 2);
        assert!(slot.updated_at().is_some());
    }

    #[test]
    fn test_failure_clears_users() {
        let mut slot = ResultSlot::new();
        slot.replace(vec![john_doe()]);
        slot.fail("rejected");
        assert!(slot.is_settled());
        assert!(slot.users().is_empty());
        assert_eq!(slot.state(), &SlotState::Failed("rejected".to_string()));
    }
}
