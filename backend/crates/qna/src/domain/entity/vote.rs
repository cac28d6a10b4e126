//! Vote Sub-record
//!
//! One direction of voting on a question: a set of voter ids plus the
//! denormalized total. The total is derived from the set on every
//! mutation, so the two can never drift inside the domain.

use std::collections::HashSet;

use kernel::id::UserId;

/// Direction of a vote request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn opposite(&self) -> Self {
        match self {
            VoteDirection::Up => VoteDirection::Down,
            VoteDirection::Down => VoteDirection::Up,
        }
    }

    /// Store representation (+1 / -1)
    pub fn id(&self) -> i16 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    /// Parse the store representation
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(VoteDirection::Up),
            -1 => Some(VoteDirection::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl std::fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's vote state on one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    None,
    Up,
    Down,
}

impl VoteState {
    /// The direction this state occupies, if any
    pub fn direction(&self) -> Option<VoteDirection> {
        match self {
            VoteState::None => None,
            VoteState::Up => Some(VoteDirection::Up),
            VoteState::Down => Some(VoteDirection::Down),
        }
    }
}

/// Net effect of one vote request on one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// First-time vote (or vote after an earlier undo)
    Added,
    /// Repeated same-direction vote, interpreted as an undo
    Removed,
    /// Retracted from the opposite set, added to the requested one
    Moved,
}

impl VoteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteOutcome::Added => "added",
            VoteOutcome::Removed => "removed",
            VoteOutcome::Moved => "moved",
        }
    }
}

impl std::fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One direction's vote record: `{total, by}`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vote {
    total: u32,
    by: HashSet<UserId>,
}

impl Vote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from stored membership; the total is recomputed from the
    /// set, never trusted from a separate counter
    pub fn from_members(by: HashSet<UserId>) -> Self {
        Self {
            total: by.len() as u32,
            by,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn by(&self) -> &HashSet<UserId> {
        &self.by
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.by.contains(user)
    }

    pub(crate) fn insert(&mut self, user: UserId) {
        self.by.insert(user);
        self.total = self.by.len() as u32;
    }

    pub(crate) fn remove(&mut self, user: &UserId) -> bool {
        let removed = self.by.remove(user);
        self.total = self.by.len() as u32;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_tracks_membership() {
        let mut vote = Vote::new();
        assert_eq!(vote.total(), 0);

        let a = UserId::new();
        let b = UserId::new();

        vote.insert(a);
        vote.insert(b);
        assert_eq!(vote.total(), 2);

        // Re-inserting the same user must not inflate the total
        vote.insert(a);
        assert_eq!(vote.total(), 2);

        assert!(vote.remove(&a));
        assert_eq!(vote.total(), 1);

        // Removing an absent user is a no-op
        assert!(!vote.remove(&a));
        assert_eq!(vote.total(), 1);
    }

    #[test]
    fn test_from_members_recomputes_total() {
        let a = UserId::new();
        let b = UserId::new();
        let vote = Vote::from_members(HashSet::from([a, b]));
        assert_eq!(vote.total(), 2);
        assert!(vote.contains(&a));
    }

    #[test]
    fn test_direction_store_mapping() {
        assert_eq!(VoteDirection::Up.id(), 1);
        assert_eq!(VoteDirection::Down.id(), -1);
        assert_eq!(VoteDirection::from_id(1), Some(VoteDirection::Up));
        assert_eq!(VoteDirection::from_id(-1), Some(VoteDirection::Down));
        assert_eq!(VoteDirection::from_id(0), None);
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(VoteDirection::Up.opposite(), VoteDirection::Down);
        assert_eq!(VoteDirection::Down.opposite(), VoteDirection::Up);
    }
}
