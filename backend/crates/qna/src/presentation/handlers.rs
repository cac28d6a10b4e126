//! HTTP Handlers
//!
//! Every mutation follows the same pipeline: shape-validate the body,
//! resolve the path id, resolve the access token, run the use case,
//! shape the response. No step retries.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use chrono::Utc;
use kernel::id::{AnswerId, QuestionId, UserId};
use kernel::query::{Pagination, QueryFilter};
use kernel::response::Success;
use platform::token::{AccessClaims, extract_token};
use std::sync::Arc;

use crate::application::config::QnaConfig;
use crate::application::notify::Notifier;
use crate::application::{
    AnswerQuestionUseCase, AskQuestionInput, AskQuestionUseCase, CastVoteUseCase, validate,
};
use crate::domain::entity::question::Question;
use crate::domain::entity::vote::VoteDirection;
use crate::domain::repository::{AnswerRepository, QuestionRepository};
use crate::error::{QnaError, QnaResult};
use crate::presentation::dto::{
    AnswerResponse, CreateAnswerRequest, CreateQuestionRequest, CreatedAnswerResponse,
    ListAnswersParams, ListQuestionsParams, QuestionResponse,
};

/// Filterable logical fields for the question listing
const QUESTION_FILTER_FIELDS: &[&str] = &["text"];

/// Logical primary-key field for `?key=id` translation
const QUESTION_ID_FIELD: &str = "questionId";

/// Filterable logical fields for the answer listing
const ANSWER_FILTER_FIELDS: &[&str] = &["text"];

/// Logical primary-key field for `?key=id` translation
const ANSWER_ID_FIELD: &str = "answerId";

/// Shared state for QnA handlers
#[derive(Clone)]
pub struct QnaAppState<R, N>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub config: Arc<QnaConfig>,
}

// ============================================================================
// Authentication helpers
// ============================================================================

/// Resolve the caller from the request's access token.
///
/// Transport precedence: `Authorization: Bearer`, `x-access-token`,
/// `token` header, `token` cookie, `token` body field.
fn authenticate(
    config: &QnaConfig,
    headers: &HeaderMap,
    body_token: Option<&str>,
) -> QnaResult<AccessClaims> {
    let token = extract_token(headers, body_token).ok_or(QnaError::MissingToken)?;

    config
        .token_codec()
        .verify(&token, Utc::now().timestamp_millis())
        .map_err(|_| QnaError::InvalidToken)
}

/// The id inside claims was issued by us; anything unparsable means the
/// token did not come from this system.
fn claims_user_id(claims: &AccessClaims) -> QnaResult<UserId> {
    UserId::parse_str(&claims.id).map_err(|_| QnaError::InvalidToken)
}

// ============================================================================
// Questions
// ============================================================================

/// POST /api/v1/question
pub async fn create_question<R, N>(
    State(state): State<QnaAppState<R, N>>,
    headers: HeaderMap,
    Json(req): Json<CreateQuestionRequest>,
) -> QnaResult<impl IntoResponse>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let text = validate::text_body(&req.text).map_err(QnaError::Validation)?;

    let claims = authenticate(&state.config, &headers, req.token.as_deref())?;
    let author_id = claims_user_id(&claims)?;

    let use_case = AskQuestionUseCase::new(state.repo.clone());
    let question = use_case.execute(AskQuestionInput { author_id, text }).await?;

    let detail = QuestionRepository::fetch_detail(state.repo.as_ref(), &question.question_id)
        .await?
        .ok_or_else(|| QnaError::Internal("Question missing right after create".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(Success::new(QuestionResponse::from(&detail))),
    ))
}

/// GET /api/v1/question
pub async fn list_questions<R, N>(
    State(state): State<QnaAppState<R, N>>,
    Query(params): Query<ListQuestionsParams>,
) -> QnaResult<Json<Success<Vec<QuestionResponse>>>>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let page = Pagination::from_params(params.page.as_deref(), params.limit.as_deref());

    let mut filter = QueryFilter::new();
    if let Some(text) = params.text.as_deref() {
        filter = filter.contains("text", text);
    }
    if let Some(name) = params.author_name.as_deref() {
        filter = filter.person_name(name, "authorFirstName", "authorLastName");
    }
    if let (Some(key), Some(value)) = (params.key.as_deref(), params.value.as_deref()) {
        filter = filter.key_value(key, value, QUESTION_FILTER_FIELDS, QUESTION_ID_FIELD);
    }

    let details = QuestionRepository::search(state.repo.as_ref(), &filter, &page).await?;
    let questions = details.iter().map(QuestionResponse::from).collect();

    Ok(Json(Success::new(questions)))
}

/// GET /api/v1/question/{id}
pub async fn get_question<R, N>(
    State(state): State<QnaAppState<R, N>>,
    Path(id): Path<String>,
) -> QnaResult<Json<Success<QuestionResponse>>>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let question_id = QuestionId::parse_str(&id).map_err(|_| QnaError::InvalidQuestionId)?;

    let detail = QuestionRepository::fetch_detail(state.repo.as_ref(), &question_id)
        .await?
        .ok_or(QnaError::QuestionNotFound)?;

    Ok(Json(Success::new(QuestionResponse::from(&detail))))
}

// ============================================================================
// Votes
// ============================================================================

/// PATCH /api/v1/question/upvote/{id}
pub async fn upvote_question<R, N>(
    state: State<QnaAppState<R, N>>,
    path: Path<String>,
    headers: HeaderMap,
) -> QnaResult<Json<Success<QuestionResponse>>>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    vote_question(state, path, headers, VoteDirection::Up).await
}

/// PATCH /api/v1/question/downvote/{id}
pub async fn downvote_question<R, N>(
    state: State<QnaAppState<R, N>>,
    path: Path<String>,
    headers: HeaderMap,
) -> QnaResult<Json<Success<QuestionResponse>>>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    vote_question(state, path, headers, VoteDirection::Down).await
}

async fn vote_question<R, N>(
    State(state): State<QnaAppState<R, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    direction: VoteDirection,
) -> QnaResult<Json<Success<QuestionResponse>>>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let question = resolve_question(&state, &id).await?;

    // The vote routes carry no body, so the body-field token transport
    // does not apply here
    let claims = authenticate(&state.config, &headers, None)?;
    let voter = claims_user_id(&claims)?;

    let use_case = CastVoteUseCase::new(state.repo.clone());
    let question = use_case.execute(question, voter, direction).await?;

    let detail = QuestionRepository::fetch_detail(state.repo.as_ref(), &question.question_id)
        .await?
        .ok_or(QnaError::QuestionNotFound)?;

    Ok(Json(Success::new(QuestionResponse::from(&detail))))
}

async fn resolve_question<R, N>(
    state: &QnaAppState<R, N>,
    raw_id: &str,
) -> QnaResult<Question>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let question_id = QuestionId::parse_str(raw_id).map_err(|_| QnaError::InvalidQuestionId)?;

    QuestionRepository::find_by_id(state.repo.as_ref(), &question_id)
        .await?
        .ok_or(QnaError::QuestionNotFound)
}

// ============================================================================
// Answers
// ============================================================================

/// POST /api/v1/question/{id}/answer
pub async fn create_answer<R, N>(
    State(state): State<QnaAppState<R, N>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<CreateAnswerRequest>,
) -> QnaResult<impl IntoResponse>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let text = validate::text_body(&req.text).map_err(QnaError::Validation)?;

    let question = resolve_question(&state, &id).await?;

    let claims = authenticate(&state.config, &headers, req.token.as_deref())?;
    let author_id = claims_user_id(&claims)?;

    let use_case = AnswerQuestionUseCase::new(state.repo.clone(), state.notifier.clone());
    let output = use_case.execute(&question, author_id, text).await?;

    let detail = AnswerRepository::fetch_detail(state.repo.as_ref(), &output.answer.answer_id)
        .await?
        .ok_or_else(|| QnaError::Internal("Answer missing right after create".to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(Success::new(CreatedAnswerResponse {
            answer: AnswerResponse::from(&detail),
            notified: output.notified,
        })),
    ))
}

/// GET /api/v1/answer
pub async fn list_answers<R, N>(
    State(state): State<QnaAppState<R, N>>,
    Query(params): Query<ListAnswersParams>,
) -> QnaResult<Json<Success<Vec<AnswerResponse>>>>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let page = Pagination::from_params(params.page.as_deref(), params.limit.as_deref());

    let mut filter = QueryFilter::new();
    if let Some(text) = params.text.as_deref() {
        filter = filter.contains("text", text);
    }
    if let (Some(key), Some(value)) = (params.key.as_deref(), params.value.as_deref()) {
        filter = filter.key_value(key, value, ANSWER_FILTER_FIELDS, ANSWER_ID_FIELD);
    }

    let details = AnswerRepository::search(state.repo.as_ref(), &filter, &page).await?;
    let answers = details.iter().map(AnswerResponse::from).collect();

    Ok(Json(Success::new(answers)))
}

/// GET /api/v1/answer/{id}
pub async fn get_answer<R, N>(
    State(state): State<QnaAppState<R, N>>,
    Path(id): Path<String>,
) -> QnaResult<Json<Success<AnswerResponse>>>
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let answer_id = AnswerId::parse_str(&id).map_err(|_| QnaError::InvalidAnswerId)?;

    let detail = AnswerRepository::fetch_detail(state.repo.as_ref(), &answer_id)
        .await?
        .ok_or(QnaError::AnswerNotFound)?;

    Ok(Json(Success::new(AnswerResponse::from(&detail))))
}
