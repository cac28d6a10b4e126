//! Answer Entity
//!
//! Holds a non-owning back-reference to its question; a question's
//! ordered answer list is realized by creation order. No exposed
//! operation deletes an answer.

use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, QuestionId, UserId};

/// Answer entity
#[derive(Debug, Clone)]
pub struct Answer {
    pub answer_id: AnswerId,
    pub question_id: QuestionId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Answer {
    /// Create a new answer (text already shape-validated upstream)
    pub fn new(question_id: QuestionId, author_id: UserId, text: String) -> Self {
        let now = Utc::now();

        Self {
            answer_id: AnswerId::new(),
            question_id,
            author_id,
            text,
            created_at: now,
            updated_at: now,
        }
    }
}
