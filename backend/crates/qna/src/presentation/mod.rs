//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::QnaAppState;
pub use router::{answer_router, answer_router_generic, question_router, question_router_generic};
