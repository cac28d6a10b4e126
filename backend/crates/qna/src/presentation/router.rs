//! Question and Answer Routers

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::application::config::QnaConfig;
use crate::application::notify::{EmailNotifier, Notifier};
use crate::domain::repository::{AnswerRepository, QuestionRepository};
use crate::infra::postgres::PgQnaRepository;
use crate::presentation::handlers::{self, QnaAppState};

/// Create the Question router with PostgreSQL repository
pub fn question_router(
    repo: PgQnaRepository,
    notifier: EmailNotifier,
    config: QnaConfig,
) -> Router {
    question_router_generic(repo, notifier, config)
}

/// Create a generic Question router for any repository implementation
pub fn question_router_generic<R, N>(repo: R, notifier: N, config: QnaConfig) -> Router
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let state = QnaAppState {
        repo: Arc::new(repo),
        notifier: Arc::new(notifier),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            post(handlers::create_question::<R, N>).get(handlers::list_questions::<R, N>),
        )
        .route("/{id}", get(handlers::get_question::<R, N>))
        .route("/upvote/{id}", patch(handlers::upvote_question::<R, N>))
        .route("/downvote/{id}", patch(handlers::downvote_question::<R, N>))
        .route("/{id}/answer", post(handlers::create_answer::<R, N>))
        .with_state(state)
}

/// Create the Answer router with PostgreSQL repository
pub fn answer_router(repo: PgQnaRepository, notifier: EmailNotifier, config: QnaConfig) -> Router {
    answer_router_generic(repo, notifier, config)
}

/// Create a generic Answer router for any repository implementation
pub fn answer_router_generic<R, N>(repo: R, notifier: N, config: QnaConfig) -> Router
where
    R: QuestionRepository + AnswerRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let state = QnaAppState {
        repo: Arc::new(repo),
        notifier: Arc::new(notifier),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::list_answers::<R, N>))
        .route("/{id}", get(handlers::get_answer::<R, N>))
        .with_state(state)
}
