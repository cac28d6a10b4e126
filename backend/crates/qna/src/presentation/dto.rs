//! API DTOs (Data Transfer Objects)
//!
//! Response shaping strips internal bookkeeping (password hash, version
//! counter) and expands references into embedded summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::repository::{
    AnswerDetail, AnswerWithAuthor, AuthorSummary, QuestionDetail, QuestionSummary,
};

// ============================================================================
// Requests
// ============================================================================

/// Create question request
///
/// `text` defaults to empty so a missing key surfaces as the validation
/// label; `token` is the lowest-precedence token transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub text: String,
    pub token: Option<String>,
}

/// Create answer request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswerRequest {
    #[serde(default)]
    pub text: String,
    pub token: Option<String>,
}

/// Question listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Free-text search over the question text
    pub text: Option<String>,
    /// Author name search ("ayo" or "ayodele Aki")
    pub author_name: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
}

/// Answer listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAnswersParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub text: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Embedded user summary (author, voter)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&AuthorSummary> for UserSummaryResponse {
    fn from(author: &AuthorSummary) -> Self {
        Self {
            id: author.user_id.to_string(),
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            email: author.email.clone(),
        }
    }
}

/// One vote sub-record with its voters expanded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub total: u32,
    pub by: Vec<UserSummaryResponse>,
}

/// One vote sub-record, totals only (embedded question summaries)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTotalResponse {
    pub total: u32,
}

/// An answer embedded inside a question response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEmbedResponse {
    pub id: String,
    pub text: String,
    pub author: UserSummaryResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AnswerWithAuthor> for AnswerEmbedResponse {
    fn from(entry: &AnswerWithAuthor) -> Self {
        Self {
            id: entry.answer.answer_id.to_string(),
            text: entry.answer.text.clone(),
            author: UserSummaryResponse::from(&entry.author),
            created_at: entry.answer.created_at,
            updated_at: entry.answer.updated_at,
        }
    }
}

/// Fully-expanded question
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub text: String,
    pub author: UserSummaryResponse,
    pub up_vote: VoteResponse,
    pub down_vote: VoteResponse,
    pub answers: Vec<AnswerEmbedResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&QuestionDetail> for QuestionResponse {
    fn from(detail: &QuestionDetail) -> Self {
        Self {
            id: detail.question.question_id.to_string(),
            text: detail.question.text.clone(),
            author: UserSummaryResponse::from(&detail.author),
            up_vote: VoteResponse {
                total: detail.question.up_vote.total(),
                by: detail.up_voters.iter().map(UserSummaryResponse::from).collect(),
            },
            down_vote: VoteResponse {
                total: detail.question.down_vote.total(),
                by: detail
                    .down_voters
                    .iter()
                    .map(UserSummaryResponse::from)
                    .collect(),
            },
            answers: detail.answers.iter().map(AnswerEmbedResponse::from).collect(),
            created_at: detail.question.created_at,
            updated_at: detail.question.updated_at,
        }
    }
}

/// The slim question embedded in an answer response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummaryResponse {
    pub id: String,
    pub text: String,
    pub author: UserSummaryResponse,
    pub up_vote: VoteTotalResponse,
    pub down_vote: VoteTotalResponse,
}

impl From<&QuestionSummary> for QuestionSummaryResponse {
    fn from(summary: &QuestionSummary) -> Self {
        Self {
            id: summary.question_id.to_string(),
            text: summary.text.clone(),
            author: UserSummaryResponse::from(&summary.author),
            up_vote: VoteTotalResponse {
                total: summary.up_vote_total,
            },
            down_vote: VoteTotalResponse {
                total: summary.down_vote_total,
            },
        }
    }
}

/// Fully-expanded answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub id: String,
    pub text: String,
    pub author: UserSummaryResponse,
    pub question: QuestionSummaryResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AnswerDetail> for AnswerResponse {
    fn from(detail: &AnswerDetail) -> Self {
        Self {
            id: detail.answer.answer_id.to_string(),
            text: detail.answer.text.clone(),
            author: UserSummaryResponse::from(&detail.author),
            question: QuestionSummaryResponse::from(&detail.question),
            created_at: detail.answer.created_at,
            updated_at: detail.answer.updated_at,
        }
    }
}

/// Answer-creation response: the answer plus the notification outcome
#[derive(Debug, Clone, Serialize)]
pub struct CreatedAnswerResponse {
    #[serde(flatten)]
    pub answer: AnswerResponse,
    pub notified: bool,
}
