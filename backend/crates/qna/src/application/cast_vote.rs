//! Cast Vote Use Case
//!
//! Runs the reconciliation engine over a question snapshot and persists
//! the result behind a version guard. The engine itself never fails on
//! valid inputs; the pipeline has already rejected unauthenticated
//! callers and unknown/malformed question ids before this point.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::question::Question;
use crate::domain::entity::vote::VoteDirection;
use crate::domain::repository::QuestionRepository;
use crate::error::{QnaError, QnaResult};

/// Cast vote use case
pub struct CastVoteUseCase<R>
where
    R: QuestionRepository,
{
    repo: Arc<R>,
}

impl<R> CastVoteUseCase<R>
where
    R: QuestionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Reconcile and persist one vote request.
    ///
    /// Takes the snapshot the pipeline already loaded - the state is
    /// never re-read mid-operation. A stale version means a concurrent
    /// vote won; the mutation is discarded and the caller retries the
    /// whole request.
    pub async fn execute(
        &self,
        mut question: Question,
        voter: UserId,
        direction: VoteDirection,
    ) -> QnaResult<Question> {
        let expected_version = question.version;

        let outcome = question.cast_vote(voter, direction);

        let stored = self
            .repo
            .store_vote_state(&question, &voter, expected_version)
            .await?;

        if !stored {
            return Err(QnaError::VoteContention);
        }

        tracing::info!(
            question_id = %question.question_id,
            voter = %voter,
            direction = %direction,
            outcome = %outcome,
            up_total = question.up_vote.total(),
            down_total = question.down_vote.total(),
            "Vote reconciled"
        );

        Ok(question)
    }
}
