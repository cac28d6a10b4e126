//! QnA (Questions & Answers) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Ask questions, answer them, list/search both
//! - Up/down voting with toggle semantics: a repeated vote undoes
//!   itself, the opposite vote moves the user's state directly
//! - Best-effort email notification to a question's author when it
//!   receives an answer
//!
//! ## Consistency Model
//! - A user occupies at most one of a question's two vote sets
//! - Denormalized vote totals always equal their set sizes
//! - Vote persistence is version-guarded (compare-and-swap); a stale
//!   snapshot is discarded and the whole request retried by the caller

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::QnaConfig;
pub use application::notify::EmailNotifier;
pub use error::{QnaError, QnaResult};
pub use infra::postgres::PgQnaRepository;
pub use presentation::router::{answer_router, question_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgQnaRepository as QnaStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
