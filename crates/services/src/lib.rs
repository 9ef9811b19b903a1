#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod error;
pub mod problem_service;

pub use tutor_core::Clock;

pub use ai::{GeminiClient, GeminiConfig, GeneratedProblem, ProblemAi};
pub use app_services::AppServices;
pub use error::{AiError, AppServicesError, ProblemServiceError};
pub use problem_service::ProblemService;
