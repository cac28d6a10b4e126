//! Question Entity
//!
//! A question owns its two embedded vote sub-records exclusively. The
//! vote reconciliation engine lives here: [`Question::cast_vote`]
//! produces a new consistent state for both records from a snapshot of
//! the question as it was read at the start of the request.

use chrono::{DateTime, Utc};
use kernel::id::{QuestionId, UserId};

use crate::domain::entity::vote::{Vote, VoteDirection, VoteOutcome, VoteState};

/// Question entity
#[derive(Debug, Clone)]
pub struct Question {
    pub question_id: QuestionId,
    /// Author reference; the user is referenced, never owned
    pub author_id: UserId,
    pub text: String,
    pub up_vote: Vote,
    pub down_vote: Vote,
    /// Optimistic-concurrency counter; bumped by the store on every
    /// vote save, checked against the snapshot's value
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Create a new question (text already shape-validated upstream)
    pub fn new(author_id: UserId, text: String) -> Self {
        let now = Utc::now();

        Self {
            question_id: QuestionId::new(),
            author_id,
            text,
            up_vote: Vote::new(),
            down_vote: Vote::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply one vote request and reconcile both sub-records.
    ///
    /// Both membership checks are evaluated against the state as it
    /// existed before this request began. The sets are disjoint, so the
    /// opposite-direction retraction cannot change the same-direction
    /// test below it. The net effect is exactly one of add, remove, or
    /// move; a vote request is never refused for business reasons.
    pub fn cast_vote(&mut self, voter: UserId, direction: VoteDirection) -> VoteOutcome {
        let (same, opposite) = match direction {
            VoteDirection::Up => (&mut self.up_vote, &mut self.down_vote),
            VoteDirection::Down => (&mut self.down_vote, &mut self.up_vote),
        };

        let was_opposite = opposite.remove(&voter);

        let outcome = if same.contains(&voter) {
            // Repeat same-direction vote: undo it
            same.remove(&voter);
            VoteOutcome::Removed
        } else if was_opposite {
            same.insert(voter);
            VoteOutcome::Moved
        } else {
            same.insert(voter);
            VoteOutcome::Added
        };

        self.updated_at = Utc::now();
        outcome
    }

    /// Which vote state a user currently occupies on this question
    pub fn vote_state(&self, user: &UserId) -> VoteState {
        if self.up_vote.contains(user) {
            VoteState::Up
        } else if self.down_vote.contains(user) {
            VoteState::Down
        } else {
            VoteState::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(UserId::new(), "What is it like to be a software Engineer?".to_string())
    }

    fn assert_consistent(q: &Question) {
        assert_eq!(q.up_vote.total() as usize, q.up_vote.by().len());
        assert_eq!(q.down_vote.total() as usize, q.down_vote.by().len());
        assert!(
            q.up_vote.by().is_disjoint(q.down_vote.by()),
            "a user may occupy at most one vote set"
        );
    }

    #[test]
    fn test_first_upvote_adds() {
        let mut q = question();
        let voter = UserId::new();

        let outcome = q.cast_vote(voter, VoteDirection::Up);

        assert_eq!(outcome, VoteOutcome::Added);
        assert_eq!(q.vote_state(&voter), VoteState::Up);
        assert_eq!(q.up_vote.total(), 1);
        assert_eq!(q.down_vote.total(), 0);
        assert_consistent(&q);
    }

    #[test]
    fn test_double_upvote_is_an_undo() {
        let mut q = question();
        let voter = UserId::new();

        q.cast_vote(voter, VoteDirection::Up);
        let outcome = q.cast_vote(voter, VoteDirection::Up);

        assert_eq!(outcome, VoteOutcome::Removed);
        assert_eq!(q.vote_state(&voter), VoteState::None);
        assert_eq!(q.up_vote.total(), 0);
        assert_eq!(q.down_vote.total(), 0);
        assert_consistent(&q);
    }

    #[test]
    fn test_opposite_vote_moves() {
        let mut q = question();
        let voter = UserId::new();

        q.cast_vote(voter, VoteDirection::Down);
        assert_eq!(q.vote_state(&voter), VoteState::Down);

        let outcome = q.cast_vote(voter, VoteDirection::Up);

        assert_eq!(outcome, VoteOutcome::Moved);
        assert_eq!(q.vote_state(&voter), VoteState::Up);
        assert_eq!(q.up_vote.total(), 1);
        assert_eq!(q.down_vote.total(), 0);
        assert_consistent(&q);
    }

    #[test]
    fn test_full_state_machine() {
        // NONE --up--> UP --up--> NONE --down--> DOWN --down--> NONE
        // NONE --up--> UP --down--> DOWN --up--> UP
        let mut q = question();
        let voter = UserId::new();

        assert_eq!(q.vote_state(&voter), VoteState::None);

        q.cast_vote(voter, VoteDirection::Up);
        assert_eq!(q.vote_state(&voter), VoteState::Up);

        q.cast_vote(voter, VoteDirection::Up);
        assert_eq!(q.vote_state(&voter), VoteState::None);

        q.cast_vote(voter, VoteDirection::Down);
        assert_eq!(q.vote_state(&voter), VoteState::Down);

        q.cast_vote(voter, VoteDirection::Down);
        assert_eq!(q.vote_state(&voter), VoteState::None);

        q.cast_vote(voter, VoteDirection::Up);
        q.cast_vote(voter, VoteDirection::Down);
        assert_eq!(q.vote_state(&voter), VoteState::Down);

        q.cast_vote(voter, VoteDirection::Up);
        assert_eq!(q.vote_state(&voter), VoteState::Up);

        assert_consistent(&q);
    }

    #[test]
    fn test_voters_are_independent() {
        let mut q = question();
        let alice = UserId::new();
        let bob = UserId::new();
        let carol = UserId::new();

        q.cast_vote(alice, VoteDirection::Up);
        q.cast_vote(bob, VoteDirection::Up);
        q.cast_vote(carol, VoteDirection::Down);

        assert_eq!(q.up_vote.total(), 2);
        assert_eq!(q.down_vote.total(), 1);

        // Bob undoes; Alice and Carol are untouched
        q.cast_vote(bob, VoteDirection::Up);
        assert_eq!(q.vote_state(&alice), VoteState::Up);
        assert_eq!(q.vote_state(&bob), VoteState::None);
        assert_eq!(q.vote_state(&carol), VoteState::Down);
        assert_eq!(q.up_vote.total(), 1);
        assert_eq!(q.down_vote.total(), 1);
        assert_consistent(&q);
    }

    #[test]
    fn test_any_sequence_stays_consistent() {
        let mut q = question();
        let voters: Vec<UserId> = (0..5).map(|_| UserId::new()).collect();

        // Deterministic mixed sequence over five voters
        let sequence = [
            (0, VoteDirection::Up),
            (1, VoteDirection::Down),
            (0, VoteDirection::Down),
            (2, VoteDirection::Up),
            (1, VoteDirection::Down),
            (3, VoteDirection::Up),
            (0, VoteDirection::Down),
            (4, VoteDirection::Down),
            (2, VoteDirection::Up),
            (3, VoteDirection::Down),
        ];

        for (i, direction) in sequence {
            q.cast_vote(voters[i], direction);
            assert_consistent(&q);
        }

        assert_eq!(q.vote_state(&voters[0]), VoteState::None);
        assert_eq!(q.vote_state(&voters[1]), VoteState::None);
        assert_eq!(q.vote_state(&voters[2]), VoteState::None);
        assert_eq!(q.vote_state(&voters[3]), VoteState::Down);
        assert_eq!(q.vote_state(&voters[4]), VoteState::Down);
    }
}
