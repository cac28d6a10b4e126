//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer. Besides the entities themselves, the traits expose hydrated
//! read models (`*Detail`) with references expanded into embedded
//! summaries, ready for response shaping.

use kernel::id::{AnswerId, QuestionId, UserId};
use kernel::query::{Pagination, QueryFilter};

use crate::domain::entity::answer::Answer;
use crate::domain::entity::question::Question;
use crate::error::QnaResult;

/// Public profile summary used when expanding user references.
/// Never carries the password hash.
#[derive(Debug, Clone)]
pub struct AuthorSummary {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// An answer with its author expanded
#[derive(Debug, Clone)]
pub struct AnswerWithAuthor {
    pub answer: Answer,
    pub author: AuthorSummary,
}

/// A question with every reference expanded: author, both voter lists,
/// and its answers (in creation order) with their authors
#[derive(Debug, Clone)]
pub struct QuestionDetail {
    pub question: Question,
    pub author: AuthorSummary,
    pub up_voters: Vec<AuthorSummary>,
    pub down_voters: Vec<AuthorSummary>,
    pub answers: Vec<AnswerWithAuthor>,
}

/// The slim question embedded in an answer detail: totals only, no
/// membership lists, no answer list
#[derive(Debug, Clone)]
pub struct QuestionSummary {
    pub question_id: QuestionId,
    pub text: String,
    pub up_vote_total: u32,
    pub down_vote_total: u32,
    pub author: AuthorSummary,
}

/// An answer with author and question expanded
#[derive(Debug, Clone)]
pub struct AnswerDetail {
    pub answer: Answer,
    pub author: AuthorSummary,
    pub question: QuestionSummary,
}

/// Question repository trait
#[trait_variant::make(QuestionRepository: Send)]
pub trait LocalQuestionRepository {
    /// Create a new question
    async fn create(&self, question: &Question) -> QnaResult<()>;

    /// Load a question snapshot, vote membership included
    async fn find_by_id(&self, question_id: &QuestionId) -> QnaResult<Option<Question>>;

    /// Load a fully-expanded question
    async fn fetch_detail(&self, question_id: &QuestionId) -> QnaResult<Option<QuestionDetail>>;

    /// List fully-expanded questions matching a filter, newest first
    async fn search(
        &self,
        filter: &QueryFilter,
        page: &Pagination,
    ) -> QnaResult<Vec<QuestionDetail>>;

    /// Persist the reconciled vote state for `voter` in one atomic step,
    /// guarded by the version the snapshot was read at.
    ///
    /// Returns `false` when the version moved underneath the request;
    /// the caller discards the in-memory mutation.
    async fn store_vote_state(
        &self,
        question: &Question,
        voter: &UserId,
        expected_version: i64,
    ) -> QnaResult<bool>;

    /// Look up a user's public summary (for author expansion and
    /// notification addressing)
    async fn find_author(&self, user_id: &UserId) -> QnaResult<Option<AuthorSummary>>;
}

/// Answer repository trait
#[trait_variant::make(AnswerRepository: Send)]
pub trait LocalAnswerRepository {
    /// Create a new answer
    async fn create(&self, answer: &Answer) -> QnaResult<()>;

    /// Load a fully-expanded answer
    async fn fetch_detail(&self, answer_id: &AnswerId) -> QnaResult<Option<AnswerDetail>>;

    /// List fully-expanded answers matching a filter, newest first
    async fn search(&self, filter: &QueryFilter, page: &Pagination)
    -> QnaResult<Vec<AnswerDetail>>;
}
