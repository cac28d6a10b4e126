//! Application Layer
//!
//! Use cases and application services.

pub mod answer_question;
pub mod ask_question;
pub mod cast_vote;
pub mod config;
pub mod notify;
pub mod validate;

// Re-exports
pub use answer_question::{AnswerQuestionOutput, AnswerQuestionUseCase};
pub use ask_question::{AskQuestionInput, AskQuestionUseCase};
pub use cast_vote::CastVoteUseCase;
pub use config::QnaConfig;
pub use notify::{EmailNotifier, Notifier, NotifyError};
