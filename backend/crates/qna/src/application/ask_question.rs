//! Ask Question Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::question::Question;
use crate::domain::repository::QuestionRepository;
use crate::error::QnaResult;

/// Ask question input (text already shape-validated by the pipeline)
pub struct AskQuestionInput {
    pub author_id: UserId,
    pub text: String,
}

/// Ask question use case
pub struct AskQuestionUseCase<R>
where
    R: QuestionRepository,
{
    repo: Arc<R>,
}

impl<R> AskQuestionUseCase<R>
where
    R: QuestionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AskQuestionInput) -> QnaResult<Question> {
        let question = Question::new(input.author_id, input.text);

        self.repo.create(&question).await?;

        tracing::info!(
            question_id = %question.question_id,
            author_id = %question.author_id,
            "Question created"
        );

        Ok(question)
    }
}
