pub mod config;
pub mod document_processor;
pub mod error;
pub mod gemini_service;
pub mod models;
pub mod prompt_builder;
pub mod question_bank;
pub mod question_service;
pub mod response_parser;

pub use config::GeneratorConfig;
pub use document_processor::DocumentProcessor;
pub use error::{GenerationError, GenerationOutcome};
pub use gemini_service::{GeminiService, TextGenerator};
pub use models::*;
pub use question_bank::QuestionBank;
pub use question_service::QuestionService;
