//! Answer Question Use Case
//!
//! Creates an answer and notifies the question's author best-effort.
//! The notification result travels back as data; its failure never
//! fails the request.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::notify::Notifier;
use crate::domain::entity::answer::Answer;
use crate::domain::entity::question::Question;
use crate::domain::repository::{AnswerRepository, QuestionRepository};
use crate::error::QnaResult;

/// Answer question output
pub struct AnswerQuestionOutput {
    pub answer: Answer,
    /// Whether the question's author was notified
    pub notified: bool,
}

/// Answer question use case
pub struct AnswerQuestionUseCase<R, N>
where
    R: QuestionRepository + AnswerRepository,
    N: Notifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> AnswerQuestionUseCase<R, N>
where
    R: QuestionRepository + AnswerRepository,
    N: Notifier,
{
    pub fn new(repo: Arc<R>, notifier: Arc<N>) -> Self {
        Self { repo, notifier }
    }

    /// Create an answer to an already-resolved question.
    pub async fn execute(
        &self,
        question: &Question,
        author_id: UserId,
        text: String,
    ) -> QnaResult<AnswerQuestionOutput> {
        let answer = Answer::new(question.question_id, author_id, text);

        AnswerRepository::create(self.repo.as_ref(), &answer).await?;

        let notified = self.notify_author(question).await;

        tracing::info!(
            answer_id = %answer.answer_id,
            question_id = %question.question_id,
            author_id = %answer.author_id,
            notified,
            "Answer created"
        );

        Ok(AnswerQuestionOutput { answer, notified })
    }

    async fn notify_author(&self, question: &Question) -> bool {
        let author = match self.repo.find_author(&question.author_id).await {
            Ok(Some(author)) => author,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not resolve question author for notification");
                return false;
            }
        };

        match self
            .notifier
            .question_answered(&author.email, &question.text)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    question_id = %question.question_id,
                    error = %e,
                    "Answer notification failed"
                );
                false
            }
        }
    }
}
